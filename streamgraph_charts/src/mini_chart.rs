// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The per-series bar chart shown inside the tooltip.

use chrono::NaiveDate;
use kurbo::{Point, Rect, Vec2};
use peniko::Color;
use streamgraph_core::{Mark, MarkId};

use crate::axis::{AXIS_ID_SPAN, AxisOrient, AxisSpec};
use crate::bar_mark::BarMarkSpec;
use crate::config::MiniChartConfig;
use crate::layout::{Margin, Size};
use crate::scale::{ScaleBand, ScaleLinear};
use crate::time::format_month_abbrev;

const X_AXIS_ID_OFFSET: u64 = 1 << 24;
const Y_AXIS_ID_OFFSET: u64 = X_AXIS_ID_OFFSET + AXIS_ID_SPAN;

/// A small bar chart of one series' raw values, one bar per row.
///
/// Geometry is resolved eagerly in chart-local coordinates (origin at the chart's top-left).
/// Bands are keyed by row index, so repeated month labels still get their own bar.
#[derive(Clone, Debug, PartialEq)]
pub struct MiniBarChart {
    size: Size,
    margin: Margin,
    band_padding: f64,
    y_tick_count: usize,
    color: Color,
    labels: Vec<String>,
    values: Vec<f64>,
    band: ScaleBand,
    y_scale: ScaleLinear,
    bars: Vec<Rect>,
}

impl MiniBarChart {
    /// Builds the chart for `values` (aligned with `dates`).
    ///
    /// The value axis spans `[0, max]`, extended to nice bounds.
    pub fn new(config: &MiniChartConfig, color: Color, dates: &[NaiveDate], values: &[f64]) -> Self {
        let labels: Vec<String> = dates
            .iter()
            .map(|d| format_month_abbrev(*d).to_owned())
            .collect();
        let values = values.to_vec();
        let size = Size {
            width: config.width,
            height: config.height,
        };
        let margin = config.margin;
        let (band, y_scale) = scales(
            size,
            margin,
            config.band_padding,
            values.len(),
            max_value(&values),
            Vec2::ZERO,
        );
        let bars = BarMarkSpec::new(MarkId(0), band, y_scale).bars(&values);
        Self {
            size,
            margin,
            band_padding: config.band_padding,
            y_tick_count: config.y_tick_count,
            color,
            labels,
            values,
            band,
            y_scale,
            bars,
        }
    }

    /// Outer chart size.
    pub fn size(&self) -> Size {
        self.size
    }

    /// Number of bars (equal to the number of rows).
    pub fn bar_count(&self) -> usize {
        self.bars.len()
    }

    /// Bar rectangles in chart-local coordinates.
    pub fn bars(&self) -> &[Rect] {
        &self.bars
    }

    /// Month-abbreviation band labels, one per bar.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// The raw values.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// The value scale in chart-local coordinates.
    pub fn y_scale(&self) -> ScaleLinear {
        self.y_scale
    }

    /// The band scale in chart-local coordinates.
    pub fn band(&self) -> ScaleBand {
        self.band
    }

    /// Bar fill color.
    pub fn color(&self) -> Color {
        self.color
    }

    /// Generates bars and both axes with the chart's top-left corner at `origin`.
    ///
    /// Every mark gets `z_index`. Bars take `id_base + i`; the axes start at `id_base + 2^24`.
    pub fn marks(&self, origin: Point, id_base: MarkId, z_index: i32) -> Vec<Mark> {
        let (band, y_scale) = scales(
            self.size,
            self.margin,
            self.band_padding,
            self.values.len(),
            max_value(&self.values),
            origin.to_vec2(),
        );
        let plot = Rect::new(
            origin.x + self.margin.left,
            origin.y + self.margin.top,
            origin.x + self.size.width - self.margin.right,
            origin.y + self.size.height - self.margin.bottom,
        );

        let mut out = BarMarkSpec::new(id_base, band, y_scale)
            .with_fill(self.color)
            .marks(&self.values);
        out.extend(
            AxisSpec::band(
                id_base.offset(X_AXIS_ID_OFFSET),
                band,
                self.labels.clone(),
                AxisOrient::Bottom,
            )
            .marks(plot),
        );
        out.extend(
            AxisSpec::left(id_base.offset(Y_AXIS_ID_OFFSET), y_scale)
                .with_tick_count(self.y_tick_count)
                .marks(plot),
        );
        for mark in &mut out {
            mark.z_index = z_index;
        }
        out
    }
}

fn max_value(values: &[f64]) -> f64 {
    values.iter().copied().fold(0.0, f64::max)
}

fn scales(
    size: Size,
    margin: Margin,
    padding: f64,
    count: usize,
    max: f64,
    offset: Vec2,
) -> (ScaleBand, ScaleLinear) {
    let band = ScaleBand::new(
        (offset.x + margin.left, offset.x + size.width - margin.right),
        count,
    )
    .with_padding(padding, padding);
    let y_scale = ScaleLinear::new(
        (0.0, max),
        (
            offset.y + size.height - margin.bottom,
            offset.y + margin.top,
        ),
    )
    .nice(10);
    (band, y_scale)
}
