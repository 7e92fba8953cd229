// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Owned column-major input for the stack layout.

use thiserror::Error;

/// Errors returned when building a [`SeriesFrame`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StackError {
    /// The frame has no series columns.
    #[error("stack input has no series")]
    NoSeries,
    /// A series column does not have the same length as the first one.
    #[error("series {series} has {found} values, expected {expected}")]
    RaggedSeries {
        /// Index of the offending series.
        series: usize,
        /// Length of the first series.
        expected: usize,
        /// Length of the offending series.
        found: usize,
    },
}

/// One numeric column per series, all of the same length.
///
/// Row `j` of every column is the sample for the same x position.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesFrame {
    columns: Vec<Vec<f64>>,
}

impl SeriesFrame {
    /// Builds a frame from per-series columns.
    pub fn new(columns: Vec<Vec<f64>>) -> Result<Self, StackError> {
        let Some(first) = columns.first() else {
            return Err(StackError::NoSeries);
        };
        let expected = first.len();
        for (series, col) in columns.iter().enumerate() {
            if col.len() != expected {
                return Err(StackError::RaggedSeries {
                    series,
                    expected,
                    found: col.len(),
                });
            }
        }
        Ok(Self { columns })
    }

    /// Builds a frame by reading `series_count` values from each row.
    pub fn from_rows<R>(
        rows: &[R],
        series_count: usize,
        mut value: impl FnMut(&R, usize) -> f64,
    ) -> Result<Self, StackError> {
        let columns = (0..series_count)
            .map(|s| rows.iter().map(|r| value(r, s)).collect())
            .collect();
        Self::new(columns)
    }

    /// Number of series.
    pub fn series_count(&self) -> usize {
        self.columns.len()
    }

    /// Number of rows (x positions).
    pub fn row_count(&self) -> usize {
        self.columns.first().map_or(0, Vec::len)
    }

    /// Values of one series, if present.
    pub fn series(&self, index: usize) -> Option<&[f64]> {
        self.columns.get(index).map(Vec::as_slice)
    }

    /// Sum of one series, skipping non-finite values.
    pub fn series_sum(&self, index: usize) -> f64 {
        self.series(index)
            .map(|c| c.iter().copied().filter(|v| v.is_finite()).sum())
            .unwrap_or(0.0)
    }
}
