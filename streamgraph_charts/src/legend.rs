// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Legend mark generation.
//!
//! A static "heading + swatches + labels" legend: one rounded color swatch and one label per
//! series, listed top to bottom in the order given.

use kurbo::{Point, Rect};
use peniko::color::palette::css;
use peniko::{Brush, Color};
use streamgraph_core::{FontWeight, Mark, MarkId, TextAnchor, TextBaseline};

use crate::config::LegendConfig;
use crate::layout::Size;
use crate::measure::TextMeasurer;
use crate::z_order;

/// Id offset of the first item label; the heading and swatches use the ids below it.
const LABEL_ID_OFFSET: u64 = 1 << 20;

/// A simple legend row item.
#[derive(Clone, Debug, PartialEq)]
pub struct LegendItem {
    /// The label string shown next to the swatch.
    pub label: String,
    /// The swatch fill paint.
    pub fill: Brush,
}

impl LegendItem {
    /// Convenience constructor for a solid-color swatch.
    pub fn solid(label: impl Into<String>, color: Color) -> Self {
        Self {
            label: label.into(),
            fill: Brush::Solid(color),
        }
    }
}

/// An unpositioned legend.
///
/// Use this with a measure/arrange layout pass:
/// - Measure: call [`LegendSwatchesSpec::measure`] to get a desired size.
/// - Arrange: call [`LegendSwatchesSpec::at`] once you know the origin.
#[derive(Clone, Debug)]
pub struct LegendSwatchesSpec {
    /// Stable-id base; each generated mark uses a deterministic offset from this base.
    pub id_base: MarkId,
    /// Optional heading above the rows.
    pub title: Option<String>,
    /// Heading font size.
    pub title_font_size: f64,
    /// Swatch square size.
    pub swatch_size: f64,
    /// Swatch corner radius.
    pub swatch_radius: f64,
    /// Vertical gap between rows.
    pub row_gap: f64,
    /// Horizontal gap between swatch and label.
    pub label_dx: f64,
    /// Label font size.
    pub font_size: f64,
    /// Label font weight.
    pub label_weight: FontWeight,
    /// Label and heading color.
    pub text_fill: Brush,
    /// Items in display order.
    pub items: Vec<LegendItem>,
}

impl LegendSwatchesSpec {
    /// Creates a new legend with defaults and no heading.
    pub fn new(id_base: MarkId, items: Vec<LegendItem>) -> Self {
        Self {
            id_base,
            title: None,
            title_font_size: 16.0,
            swatch_size: 18.0,
            swatch_radius: 3.0,
            row_gap: 6.0,
            label_dx: 8.0,
            font_size: 14.0,
            label_weight: FontWeight::MEDIUM,
            text_fill: css::BLACK.into(),
            items,
        }
    }

    /// Creates a legend from a [`LegendConfig`] block.
    pub fn from_config(id_base: MarkId, config: &LegendConfig, items: Vec<LegendItem>) -> Self {
        Self {
            title: (!config.title.is_empty()).then(|| config.title.clone()),
            title_font_size: config.title_font_size,
            swatch_size: config.swatch_size,
            swatch_radius: config.swatch_radius,
            row_gap: config.row_gap,
            label_dx: config.label_dx,
            font_size: config.font_size,
            ..Self::new(id_base, items)
        }
    }

    fn title_height(&self) -> f64 {
        if self.title.is_some() {
            self.title_font_size + 2.0 * self.row_gap
        } else {
            0.0
        }
    }

    fn row_height(&self) -> f64 {
        self.swatch_size.max(self.font_size)
    }

    /// Measures the desired legend size.
    pub fn measure(&self, measurer: &impl TextMeasurer) -> Size {
        let title_w = self.title.as_deref().map_or(0.0, |t| {
            measurer.measure(t, self.title_font_size, FontWeight::BOLD).0
        });
        let label_w = self
            .items
            .iter()
            .map(|item| measurer.measure(&item.label, self.font_size, self.label_weight).0)
            .fold(0.0, f64::max);
        let rows_w = if self.items.is_empty() {
            0.0
        } else {
            self.swatch_size + self.label_dx + label_w
        };
        let n = self.items.len() as f64;
        let rows_h = if n > 0.0 {
            n * self.row_height() + (n - 1.0) * self.row_gap
        } else {
            0.0
        };
        Size {
            width: title_w.max(rows_w),
            height: self.title_height() + rows_h,
        }
    }

    /// Positions the legend with its top-left corner at `(x, y)`.
    pub fn at(self, x: f64, y: f64) -> LegendSwatches {
        LegendSwatches {
            spec: self,
            origin: Point::new(x, y),
        }
    }
}

/// A positioned legend.
#[derive(Clone, Debug)]
pub struct LegendSwatches {
    /// The unpositioned legend.
    pub spec: LegendSwatchesSpec,
    /// Top-left corner.
    pub origin: Point,
}

impl LegendSwatches {
    /// Returns the swatch rectangle of item `index`.
    pub fn swatch_rect(&self, index: usize) -> Rect {
        let s = &self.spec;
        let row_height = s.row_height();
        let y = self.origin.y + s.title_height() + index as f64 * (row_height + s.row_gap);
        let swatch_y = y + (row_height - s.swatch_size) * 0.5;
        Rect::new(
            self.origin.x,
            swatch_y,
            self.origin.x + s.swatch_size,
            swatch_y + s.swatch_size,
        )
    }

    /// Generates legend marks: the heading, then a swatch and a label per item.
    pub fn marks(&self) -> Vec<Mark> {
        let s = &self.spec;
        let mut out = Vec::with_capacity(1 + 2 * s.items.len());

        if let Some(title) = &s.title {
            out.push(
                Mark::builder(s.id_base)
                    .z_index(z_order::LEGEND_TITLE)
                    .text(self.origin, title.clone())
                    .font_size(s.title_font_size)
                    .font_weight(FontWeight::BOLD)
                    .baseline(TextBaseline::Hanging)
                    .fill(s.text_fill.clone())
                    .build(),
            );
        }

        for (i, item) in s.items.iter().enumerate() {
            let swatch = self.swatch_rect(i);
            out.push(
                Mark::builder(s.id_base.offset(1 + i as u64))
                    .z_index(z_order::LEGEND_SWATCHES)
                    .rect(swatch)
                    .corner_radius(s.swatch_radius)
                    .fill(item.fill.clone())
                    .build(),
            );
            out.push(
                Mark::builder(s.id_base.offset(LABEL_ID_OFFSET + i as u64))
                    .z_index(z_order::LEGEND_LABELS)
                    .text(
                        (swatch.x1 + s.label_dx, swatch.center().y),
                        item.label.clone(),
                    )
                    .font_size(s.font_size)
                    .font_weight(s.label_weight)
                    .anchor(TextAnchor::Start)
                    .baseline(TextBaseline::Middle)
                    .fill(s.text_fill.clone())
                    .build(),
            );
        }
        out
    }

    /// Estimates legend bounds using the provided text measurer.
    pub fn bounds(&self, measurer: &impl TextMeasurer) -> Rect {
        let size = self.spec.measure(measurer);
        Rect::from_origin_size(self.origin, (size.width, size.height))
    }
}

#[cfg(test)]
mod tests {
    use streamgraph_core::MarkPayload;

    use super::*;
    use crate::measure::HeuristicTextMeasurer;

    fn items() -> Vec<LegendItem> {
        vec![
            LegendItem::solid("Claude", css::PURPLE),
            LegendItem::solid("GPT-4", css::RED),
        ]
    }

    fn titled(id_base: MarkId) -> LegendSwatchesSpec {
        LegendSwatchesSpec {
            title: Some("Legend".into()),
            ..LegendSwatchesSpec::new(id_base, items())
        }
    }

    #[test]
    fn marks_list_heading_then_rows_in_order() {
        let legend = titled(MarkId(500)).at(620.0, 10.0);
        let marks = legend.marks();
        assert_eq!(marks.len(), 5);
        let texts: Vec<_> = marks
            .iter()
            .filter_map(|m| match &m.payload {
                MarkPayload::Text(t) => Some(t.text.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(texts, vec!["Legend", "Claude", "GPT-4"]);

        let MarkPayload::Rect(swatch) = &marks[1].payload else {
            panic!("expected the first swatch after the heading");
        };
        assert_eq!(swatch.rect.width(), 18.0);
        assert_eq!(swatch.corner_radius, 3.0);
        assert_eq!(swatch.rect.x0, 620.0);
    }

    #[test]
    fn rows_stack_downwards() {
        let legend = LegendSwatchesSpec::new(MarkId(0), items()).at(0.0, 0.0);
        let a = legend.swatch_rect(0);
        let b = legend.swatch_rect(1);
        assert!((b.y0 - a.y0 - (18.0 + 6.0)).abs() < 1e-9);
    }

    #[test]
    fn measure_covers_heading_and_labels() {
        let spec = titled(MarkId(0));
        let size = spec.measure(&HeuristicTextMeasurer);
        // Two 18px rows, a 6px gap, and the heading block.
        assert!((size.height - (16.0 + 12.0 + 18.0 * 2.0 + 6.0)).abs() < 1e-9);
        assert!(size.width >= 18.0 + 8.0);
    }
}
