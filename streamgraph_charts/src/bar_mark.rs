// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bar mark generation.

use kurbo::Rect;
use peniko::Brush;
use streamgraph_core::{Mark, MarkId};

use crate::scale::{ScaleBand, ScaleLinear};

/// A vertical bar mark over a band scale.
///
/// This generates one rect mark per value, with bar geometry derived from the value and a
/// baseline.
#[derive(Clone, Debug)]
pub struct BarMarkSpec {
    /// Stable-id base; bar `i` uses `id_base + i`.
    pub id_base: MarkId,
    /// Band scale used for bar positions along x.
    pub band: ScaleBand,
    /// Linear scale used for bar positions along y.
    pub y_scale: ScaleLinear,
    /// Baseline in data units (typically `0.0`).
    pub baseline: f64,
    /// Fill paint for bars.
    pub fill: Brush,
    /// Rendering order hint.
    pub z_index: i32,
}

impl BarMarkSpec {
    /// Creates a bar mark spec with `baseline = 0` and a default fill (`Brush::default()`).
    pub fn new(id_base: MarkId, band: ScaleBand, y_scale: ScaleLinear) -> Self {
        Self {
            id_base,
            band,
            y_scale,
            baseline: 0.0,
            fill: Brush::default(),
            z_index: crate::z_order::SERIES_FILL,
        }
    }

    /// Sets the baseline in data units.
    pub fn with_baseline(mut self, baseline: f64) -> Self {
        self.baseline = baseline;
        self
    }

    /// Sets the fill paint.
    pub fn with_fill(mut self, fill: impl Into<Brush>) -> Self {
        self.fill = fill.into();
        self
    }

    /// Sets the z-index used for render ordering.
    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    /// Resolves bar rectangles, one per value, in band order.
    ///
    /// A bar spans from the baseline to its value, so its height is `|y(value) - y(baseline)|`.
    pub fn bars(&self, values: &[f64]) -> Vec<Rect> {
        let bw = self.band.band_width();
        let y0 = self.y_scale.map(self.baseline);
        values
            .iter()
            .enumerate()
            .map(|(i, &v)| {
                let x = self.band.x(i);
                let y = self.y_scale.map(v);
                Rect::new(x, y.min(y0), x + bw, y.max(y0))
            })
            .collect()
    }

    /// Generates rect marks for the provided values.
    pub fn marks(&self, values: &[f64]) -> Vec<Mark> {
        self.bars(values)
            .into_iter()
            .enumerate()
            .map(|(i, rect)| {
                Mark::builder(self.id_base.offset(i as u64))
                    .z_index(self.z_index)
                    .rect(rect)
                    .fill(self.fill.clone())
                    .build()
            })
            .collect()
    }
}
