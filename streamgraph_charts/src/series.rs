// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The tracked series and their fixed colors.

use peniko::Color;
use serde::{Deserialize, Serialize};

use crate::config::HexColor;
use crate::legend::LegendItem;

/// A tracked series: its row field name and its fixed color.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeriesDef {
    /// Row field name, also the legend label.
    pub name: String,
    /// Fill color.
    pub color: HexColor,
}

impl SeriesDef {
    /// Creates a series definition.
    pub fn new(name: impl Into<String>, color: Color) -> Self {
        Self {
            name: name.into(),
            color: HexColor(color),
        }
    }

    /// The five language-model hashtag series, bottom of the stack first.
    pub fn hashtag_models() -> Vec<Self> {
        vec![
            Self::new("GPT-4", Color::from_rgb8(0xe4, 0x1a, 0x1c)),
            Self::new("Gemini", Color::from_rgb8(0x37, 0x7e, 0xb8)),
            Self::new("PaLM-2", Color::from_rgb8(0x4d, 0xaf, 0x4a)),
            Self::new("Claude", Color::from_rgb8(0x98, 0x4e, 0xa3)),
            Self::new("LLaMA-3.1", Color::from_rgb8(0xff, 0x7f, 0x00)),
        ]
    }
}

/// An ordered, non-empty list of series.
#[derive(Clone, Debug, PartialEq)]
pub struct SeriesSet {
    series: Vec<SeriesDef>,
}

impl SeriesSet {
    /// Wraps a list of series definitions (stack order, bottom first).
    pub fn new(series: Vec<SeriesDef>) -> Self {
        Self { series }
    }

    /// The default hashtag series.
    pub fn hashtag_models() -> Self {
        Self::new(SeriesDef::hashtag_models())
    }

    /// Number of series.
    pub fn len(&self) -> usize {
        self.series.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// Returns the series at `index`.
    pub fn get(&self, index: usize) -> Option<&SeriesDef> {
        self.series.get(index)
    }

    /// Iterates the series in stack order.
    pub fn iter(&self) -> impl Iterator<Item = &SeriesDef> {
        self.series.iter()
    }

    /// Legend items, listed top-down in reverse stack order (top layer first).
    pub fn legend_items(&self) -> Vec<LegendItem> {
        self.series
            .iter()
            .rev()
            .map(|s| LegendItem::solid(s.name.clone(), s.color.color()))
            .collect()
    }
}

impl Default for SeriesSet {
    fn default() -> Self {
        Self::hashtag_models()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legend_lists_top_layer_first() {
        let set = SeriesSet::hashtag_models();
        let labels: Vec<_> = set.legend_items().into_iter().map(|i| i.label).collect();
        assert_eq!(labels, vec!["LLaMA-3.1", "Claude", "PaLM-2", "Gemini", "GPT-4"]);
    }

    #[test]
    fn colors_are_fixed_per_series() {
        let set = SeriesSet::hashtag_models();
        let claude = set.iter().find(|s| s.name == "Claude").unwrap();
        assert_eq!(claude.color.to_hex(), "#984ea3");
        assert_eq!(set.get(0).map(|s| s.name.as_str()), Some("GPT-4"));
    }
}
