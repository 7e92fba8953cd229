// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Input rows.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// One sample: a calendar date and one numeric value per series name.
///
/// In JSON a row is a flat object: `{"Date": "2024-01-01", "GPT-4": 10, "Claude": 3}`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Row {
    /// The sample date.
    #[serde(rename = "Date")]
    pub date: NaiveDate,
    /// Values keyed by series name.
    #[serde(flatten)]
    pub values: BTreeMap<String, f64>,
}

impl Row {
    /// Creates a row with no values.
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            values: BTreeMap::new(),
        }
    }

    /// Adds (or replaces) the value of `series`.
    pub fn with(mut self, series: impl Into<String>, value: f64) -> Self {
        self.values.insert(series.into(), value);
        self
    }

    /// Returns the value of `series`, if present.
    pub fn value(&self, series: &str) -> Option<f64> {
        self.values.get(series).copied()
    }
}

/// Parses a JSON array of rows.
pub fn rows_from_json(json: &str) -> Result<Vec<Row>, ConfigError> {
    Ok(serde_json::from_str(json)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_flat_objects() {
        let rows = rows_from_json(
            r#"[{"Date": "2024-01-01", "GPT-4": 10, "Claude": 3.5},
                {"Date": "2024-02-01", "GPT-4": 12, "Claude": 4}]"#,
        )
        .unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(rows[0].value("Claude"), Some(3.5));
        assert_eq!(rows[1].value("GPT-4"), Some(12.0));
        assert_eq!(rows[1].value("Gemini"), None);
    }

    #[test]
    fn rejects_non_numeric_values() {
        assert!(rows_from_json(r#"[{"Date": "2024-01-01", "GPT-4": "ten"}]"#).is_err());
    }
}
