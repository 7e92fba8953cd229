// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types for the streamgraph view and its configuration.

use streamgraph_stack::StackError;
use thiserror::Error;

/// Errors returned by [`crate::StreamGraphView`].
#[derive(Debug, Error)]
pub enum StreamGraphError {
    /// A row does not carry a value for a tracked series.
    #[error("row {row} has no value for series `{series}`")]
    MissingValue {
        /// Index of the offending row.
        row: usize,
        /// Name of the missing series.
        series: String,
    },
    /// A row carries a NaN or infinite value for a tracked series.
    #[error("row {row} has non-finite value {value} for series `{series}`")]
    NonFiniteValue {
        /// Index of the offending row.
        row: usize,
        /// Name of the series.
        series: String,
        /// The rejected value.
        value: f64,
    },
    /// The stack layout rejected its input.
    #[error("stack layout error: {0}")]
    Stack(#[from] StackError),
    /// The view configuration is invalid.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Errors returned while loading or validating a [`crate::StreamGraphConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration JSON could not be parsed.
    #[error("invalid configuration JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// A color string is not a `#rgb` / `#rrggbb` hex color.
    #[error("invalid color `{0}`")]
    InvalidColor(String),
    /// A field value is out of range or inconsistent.
    #[error("{0}")]
    Invalid(String),
}
