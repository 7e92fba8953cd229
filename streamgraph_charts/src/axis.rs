// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Axis mark generation.
//!
//! Axes follow the D3/Vega shape: a single [`AxisSpec`] with an `orient` of `top`, `bottom`,
//! `left`, or `right`, drawn against a resolved scale. An axis emits a domain path (with outer
//! ticks at both ends of the scale range), one tick line per tick, and one label per tick.

use std::sync::Arc;

use kurbo::{BezPath, Rect};
use peniko::Brush;
use peniko::color::palette::css;
use smallvec::SmallVec;
use streamgraph_core::{Mark, MarkId, TextAnchor, TextBaseline};

use crate::scale::{ScaleBand, ScaleLinear, ScaleTime};
use crate::time::format_time_tick;
use crate::z_order;

/// A paint + width pair for stroked paths (domain lines, ticks, outlines).
#[derive(Clone, Debug, PartialEq)]
pub struct StrokeStyle {
    /// Stroke paint.
    pub brush: Brush,
    /// Stroke width in scene coordinates.
    pub stroke_width: f64,
}

impl StrokeStyle {
    /// Convenience for a solid stroke.
    pub fn solid(brush: impl Into<Brush>, stroke_width: f64) -> Self {
        Self {
            brush: brush.into(),
            stroke_width,
        }
    }
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self::solid(css::BLACK, 1.0)
    }
}

/// Axis styling defaults.
#[derive(Clone, Debug, PartialEq)]
pub struct AxisStyle {
    /// Style for the axis domain line and tick marks.
    pub rule: StrokeStyle,
    /// Fill paint for tick labels.
    pub label_fill: Brush,
    /// Font size for tick labels.
    pub label_font_size: f64,
}

impl Default for AxisStyle {
    fn default() -> Self {
        let rule = StrokeStyle::default();
        Self {
            label_fill: rule.brush.clone(),
            rule,
            label_font_size: 10.0,
        }
    }
}

/// Axis orientation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AxisOrient {
    /// A horizontal axis along the top of the plot, ticks pointing up.
    Top,
    /// A horizontal axis along the bottom of the plot, ticks pointing down.
    Bottom,
    /// A vertical axis along the left of the plot, ticks pointing left.
    Left,
    /// A vertical axis along the right of the plot, ticks pointing right.
    Right,
}

/// The resolved scale an axis is drawn against.
#[derive(Clone, Debug, PartialEq)]
pub enum AxisScale {
    /// Continuous numeric values.
    Linear(ScaleLinear),
    /// Calendar timestamps (seconds).
    Time(ScaleTime),
    /// Categories; one label per band, ticks at band centers.
    Band {
        /// The band scale.
        scale: ScaleBand,
        /// Band labels, in band order.
        labels: Vec<String>,
    },
}

impl From<ScaleLinear> for AxisScale {
    fn from(value: ScaleLinear) -> Self {
        Self::Linear(value)
    }
}

impl From<ScaleTime> for AxisScale {
    fn from(value: ScaleTime) -> Self {
        Self::Time(value)
    }
}

impl AxisScale {
    fn range(&self) -> (f64, f64) {
        match self {
            Self::Linear(s) => s.range(),
            Self::Time(s) => s.range(),
            Self::Band { scale, .. } => scale.range(),
        }
    }
}

/// Id offset of the first tick label; tick lines use the ids below it.
const LABEL_ID_OFFSET: u64 = 1 << 20;

/// Number of ids an axis reserves, starting at its `id_base`.
pub const AXIS_ID_SPAN: u64 = 2 * LABEL_ID_OFFSET;

/// A resolved tick: its scene position along the axis and its label.
#[derive(Clone, Debug, PartialEq)]
pub struct AxisTick {
    /// Data value (band index for band scales).
    pub value: f64,
    /// Position along the axis in scene coordinates.
    pub pos: f64,
    /// Formatted label.
    pub label: String,
}

/// A D3-ish axis description (single type + `orient`).
#[derive(Clone)]
pub struct AxisSpec {
    /// Stable-id base; each generated mark uses a deterministic offset from this base.
    pub id_base: MarkId,
    /// The scale ticks are generated from.
    pub scale: AxisScale,
    /// Axis placement relative to the plot.
    pub orient: AxisOrient,
    /// Approximate number of ticks (ignored by band scales).
    pub tick_count: usize,
    /// Length of the per-tick lines.
    pub tick_size_inner: f64,
    /// Length of the end caps of the domain path.
    pub tick_size_outer: f64,
    /// Gap between the tick end and the label.
    pub tick_padding: f64,
    /// Axis styling.
    pub style: AxisStyle,
    /// Optional tick label formatter, called with `(value, step)`.
    pub tick_formatter: Option<Arc<dyn Fn(f64, f64) -> String>>,
}

impl core::fmt::Debug for AxisSpec {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AxisSpec")
            .field("id_base", &self.id_base)
            .field("scale", &self.scale)
            .field("orient", &self.orient)
            .field("tick_count", &self.tick_count)
            .field("tick_size_inner", &self.tick_size_inner)
            .field("tick_size_outer", &self.tick_size_outer)
            .field("tick_padding", &self.tick_padding)
            .field("style", &self.style)
            .field("tick_formatter", &self.tick_formatter.is_some())
            .finish()
    }
}

impl AxisSpec {
    /// Creates a new axis with D3 defaults: 10 ticks, tick size 6, padding 3.
    pub fn new(id_base: MarkId, scale: impl Into<AxisScale>, orient: AxisOrient) -> Self {
        Self {
            id_base,
            scale: scale.into(),
            orient,
            tick_count: 10,
            tick_size_inner: 6.0,
            tick_size_outer: 6.0,
            tick_padding: 3.0,
            style: AxisStyle::default(),
            tick_formatter: None,
        }
    }

    /// Convenience constructor for a `bottom` axis.
    pub fn bottom(id_base: MarkId, scale: impl Into<AxisScale>) -> Self {
        Self::new(id_base, scale, AxisOrient::Bottom)
    }

    /// Convenience constructor for a `left` axis.
    pub fn left(id_base: MarkId, scale: impl Into<AxisScale>) -> Self {
        Self::new(id_base, scale, AxisOrient::Left)
    }

    /// Convenience constructor for a band axis with one label per band.
    pub fn band(id_base: MarkId, scale: ScaleBand, labels: Vec<String>, orient: AxisOrient) -> Self {
        Self::new(id_base, AxisScale::Band { scale, labels }, orient)
    }

    /// Set the approximate tick count.
    pub fn with_tick_count(mut self, tick_count: usize) -> Self {
        self.tick_count = tick_count;
        self
    }

    /// Set the axis style.
    pub fn with_style(mut self, style: AxisStyle) -> Self {
        self.style = style;
        self
    }

    /// Set a custom tick label formatter.
    pub fn with_tick_formatter(mut self, f: impl Fn(f64, f64) -> String + 'static) -> Self {
        self.tick_formatter = Some(Arc::new(f));
        self
    }

    /// Resolves tick positions and labels.
    pub fn ticks(&self) -> SmallVec<[AxisTick; 16]> {
        let (values, step): (Vec<f64>, f64) = match &self.scale {
            AxisScale::Linear(s) => {
                let v = s.ticks(self.tick_count);
                let step = tick_step(&v);
                (v, step)
            }
            AxisScale::Time(s) => {
                let (v, interval) = s.ticks(self.tick_count);
                (v, interval.map_or(0.0, |i| i.approx_seconds()))
            }
            AxisScale::Band { scale, labels } => {
                return labels
                    .iter()
                    .take(scale.count())
                    .enumerate()
                    .map(|(i, label)| AxisTick {
                        value: i as f64,
                        pos: scale.center(i),
                        label: label.clone(),
                    })
                    .collect();
            }
        };

        values
            .into_iter()
            .map(|v| {
                let pos = match &self.scale {
                    AxisScale::Linear(s) => s.map(v),
                    AxisScale::Time(s) => s.map(v),
                    AxisScale::Band { .. } => v,
                };
                AxisTick {
                    value: v,
                    pos,
                    label: self.format_tick(v, step),
                }
            })
            .collect()
    }

    fn format_tick(&self, v: f64, step: f64) -> String {
        if let Some(f) = &self.tick_formatter {
            return f(v, step);
        }
        match self.scale {
            AxisScale::Time(_) => format_time_tick(v),
            _ => format_number_with_step(v, step),
        }
    }

    /// Generates marks for this axis against the given plot rectangle.
    ///
    /// The domain path spans the scale range; the axis line sits on the plot edge named by
    /// `orient`.
    pub fn marks(&self, plot: Rect) -> Vec<Mark> {
        let (r0, r1) = self.scale.range();
        let inner = self.tick_size_inner;
        let outer = self.tick_size_outer;
        let label_offset = inner.max(0.0) + self.tick_padding;
        let rule = &self.style.rule;

        let horizontal = matches!(self.orient, AxisOrient::Top | AxisOrient::Bottom);
        let (line, sign) = match self.orient {
            AxisOrient::Bottom => (plot.y1, 1.0),
            AxisOrient::Top => (plot.y0, -1.0),
            AxisOrient::Left => (plot.x0, -1.0),
            AxisOrient::Right => (plot.x1, 1.0),
        };
        let pt = |along: f64, across: f64| {
            if horizontal {
                (along, across)
            } else {
                (across, along)
            }
        };

        let mut out = Vec::new();

        let mut domain = BezPath::new();
        domain.move_to(pt(r0, line + sign * outer));
        domain.line_to(pt(r0, line));
        domain.line_to(pt(r1, line));
        domain.line_to(pt(r1, line + sign * outer));
        out.push(
            Mark::builder(self.id_base)
                .z_index(z_order::AXIS_RULES)
                .path(domain)
                .fill(peniko::Color::TRANSPARENT)
                .stroke(rule.brush.clone(), rule.stroke_width)
                .build(),
        );

        let (anchor, baseline) = match self.orient {
            AxisOrient::Bottom => (TextAnchor::Middle, TextBaseline::Hanging),
            AxisOrient::Top => (TextAnchor::Middle, TextBaseline::Alphabetic),
            AxisOrient::Left => (TextAnchor::End, TextBaseline::Middle),
            AxisOrient::Right => (TextAnchor::Start, TextBaseline::Middle),
        };

        for (i, tick) in self.ticks().into_iter().enumerate() {
            let i = i as u64;
            let mut p = BezPath::new();
            p.move_to(pt(tick.pos, line));
            p.line_to(pt(tick.pos, line + sign * inner));
            out.push(
                Mark::builder(self.id_base.offset(1 + i))
                    .z_index(z_order::AXIS_RULES)
                    .path(p)
                    .fill(peniko::Color::TRANSPARENT)
                    .stroke(rule.brush.clone(), rule.stroke_width)
                    .build(),
            );
            out.push(
                Mark::builder(self.id_base.offset(LABEL_ID_OFFSET + i))
                    .z_index(z_order::AXIS_LABELS)
                    .text(pt(tick.pos, line + sign * label_offset), tick.label)
                    .font_size(self.style.label_font_size)
                    .anchor(anchor)
                    .baseline(baseline)
                    .fill(self.style.label_fill.clone())
                    .build(),
            );
        }

        out
    }
}

fn tick_step(ticks: &[f64]) -> f64 {
    match ticks {
        [a, b, ..] => (b - a).abs(),
        _ => 0.0,
    }
}

/// Formats `v` with just enough decimals to distinguish ticks `step` apart.
fn format_number_with_step(v: f64, step: f64) -> String {
    let decimals = if step > 0.0 && step.is_finite() {
        let d = (-step.log10().floor()).clamp(0.0, 12.0);
        #[allow(clippy::cast_possible_truncation, reason = "clamped to [0, 12]")]
        {
            d as usize
        }
    } else {
        0
    };
    let v = if v == 0.0 { 0.0 } else { v };
    let s = format!("{v:.decimals$}");
    // Typographic minus, as D3 prints it.
    match s.strip_prefix('-') {
        Some(rest) => format!("\u{2212}{rest}"),
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use streamgraph_core::MarkPayload;

    use super::*;

    fn text_labels(marks: &[Mark]) -> Vec<String> {
        marks
            .iter()
            .filter_map(|m| match &m.payload {
                MarkPayload::Text(t) => Some(t.text.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn left_axis_labels_use_step_precision() {
        let axis = AxisSpec::left(
            MarkId(100),
            ScaleLinear::new((-1.0, 1.0), (420.0, 0.0)),
        );
        let labels = text_labels(&axis.marks(Rect::new(60.0, 40.0, 480.0, 460.0)));
        assert_eq!(labels.first().map(String::as_str), Some("\u{2212}1.0"));
        assert!(labels.iter().any(|l| l == "0.0"), "{labels:?}");
        assert_eq!(labels.last().map(String::as_str), Some("1.0"));
    }

    #[test]
    fn bottom_axis_emits_domain_ticks_and_labels() {
        let axis = AxisSpec::bottom(MarkId(0), ScaleLinear::new((0.0, 10.0), (0.0, 100.0)))
            .with_tick_count(5);
        let marks = axis.marks(Rect::new(0.0, 0.0, 100.0, 50.0));
        // 6 ticks (0, 2, ..., 10): domain + 6 tick lines + 6 labels.
        assert_eq!(marks.len(), 13);
        let MarkPayload::Text(t) = &marks[2].payload else {
            panic!("expected the first label after the first tick line");
        };
        assert_eq!(t.pos.y, 50.0 + 6.0 + 3.0);
        assert_eq!(t.anchor, TextAnchor::Middle);
    }

    #[test]
    fn band_axis_labels_sit_at_band_centers() {
        let band = ScaleBand::new((50.0, 300.0), 2).with_padding(0.3, 0.3);
        let axis = AxisSpec::band(
            MarkId(0),
            band,
            vec!["Jan".into(), "Feb".into()],
            AxisOrient::Bottom,
        );
        let ticks = axis.ticks();
        assert_eq!(ticks.len(), 2);
        assert_eq!(ticks[0].label, "Jan");
        assert!((ticks[1].pos - band.center(1)).abs() < 1e-9);
    }

    #[test]
    fn custom_formatter_wins() {
        let axis = AxisSpec::left(MarkId(0), ScaleLinear::new((0.0, 1.0), (1.0, 0.0)))
            .with_tick_count(1)
            .with_tick_formatter(|v, _| format!("<{v}>"));
        let labels: Vec<_> = axis.ticks().into_iter().map(|t| t.label).collect();
        assert_eq!(labels, vec!["<0>", "<1>"]);
    }
}
