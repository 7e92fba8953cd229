// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Stack orders, offsets, and the layout itself.

use smallvec::SmallVec;

use crate::frame::SeriesFrame;

/// Stack baseline offset mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StackOffset {
    /// Stack from a zero baseline (D3 `stackOffsetNone`).
    Zero,
    /// Center the stack around zero (D3 `stackOffsetSilhouette`).
    Silhouette,
    /// Streamgraph baseline (D3 `stackOffsetWiggle`).
    ///
    /// The baseline of the bottom layer is a running offset that minimizes the weighted
    /// change in slope of every layer, weighted by layer thickness.
    ///
    /// Intended for non-negative values.
    #[default]
    Wiggle,
    /// Normalize each column so the stack spans `[0, 1]` (D3 `stackOffsetExpand`).
    Expand,
}

/// The order in which series are stacked, bottom first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StackOrder {
    /// Input order (D3 `stackOrderNone`).
    #[default]
    None,
    /// Reversed input order (D3 `stackOrderReverse`).
    Reverse,
    /// Smallest series sum at the bottom (D3 `stackOrderAscending`).
    Ascending,
    /// Largest series sum at the bottom (D3 `stackOrderDescending`).
    Descending,
}

/// One stacked sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StackPoint {
    /// Lower boundary.
    pub y0: f64,
    /// Upper boundary.
    pub y1: f64,
    /// The raw (unstacked) input value.
    pub value: f64,
}

/// A stacked series: one [`StackPoint`] per input row.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    /// Index of the series in the input frame.
    pub series: usize,
    /// Position of this layer in the stack (`0` is the bottom).
    pub position: usize,
    /// Stacked samples, aligned index-for-index with the input rows.
    pub points: Vec<StackPoint>,
}

impl Layer {
    /// Returns `(min y0, max y1)` over the finite samples.
    pub fn extent(&self) -> Option<(f64, f64)> {
        extent(self.points.iter())
    }
}

/// Returns `(min y0, max y1)` across every layer.
pub fn layers_extent(layers: &[Layer]) -> Option<(f64, f64)> {
    extent(layers.iter().flat_map(|l| l.points.iter()))
}

fn extent<'a>(points: impl Iterator<Item = &'a StackPoint>) -> Option<(f64, f64)> {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for p in points {
        if p.y0.is_finite() {
            min = min.min(p.y0);
        }
        if p.y1.is_finite() {
            max = max.max(p.y1);
        }
    }
    if min.is_finite() && max.is_finite() {
        Some((min, max))
    } else {
        None
    }
}

/// A stack layout configuration.
///
/// This corresponds to D3's `stack()` generator with `order` and `offset`, applied to a
/// [`SeriesFrame`]. Every call recomputes from scratch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Stack {
    /// Stacking order.
    pub order: StackOrder,
    /// Baseline offset.
    pub offset: StackOffset,
}

impl Stack {
    /// Creates a stack with `StackOrder::None` and `StackOffset::Wiggle`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the stacking order.
    pub fn with_order(mut self, order: StackOrder) -> Self {
        self.order = order;
        self
    }

    /// Sets the baseline offset.
    pub fn with_offset(mut self, offset: StackOffset) -> Self {
        self.offset = offset;
        self
    }

    /// Series indices from bottom to top.
    pub fn order_indices(&self, frame: &SeriesFrame) -> SmallVec<[usize; 8]> {
        let n = frame.series_count();
        let mut idx: SmallVec<[usize; 8]> = (0..n).collect();
        match self.order {
            StackOrder::None => {}
            StackOrder::Reverse => idx.reverse(),
            StackOrder::Ascending => {
                idx.sort_by(|&a, &b| frame.series_sum(a).total_cmp(&frame.series_sum(b)));
            }
            StackOrder::Descending => {
                idx.sort_by(|&a, &b| frame.series_sum(b).total_cmp(&frame.series_sum(a)));
            }
        }
        idx
    }

    /// Computes one layer per series, returned in input series order.
    pub fn layers(&self, frame: &SeriesFrame) -> Vec<Layer> {
        let order = self.order_indices(frame);
        let mut layers: Vec<Layer> = (0..frame.series_count())
            .map(|s| Layer {
                series: s,
                position: 0,
                points: frame
                    .series(s)
                    .unwrap_or_default()
                    .iter()
                    .map(|&v| StackPoint {
                        y0: 0.0,
                        y1: v,
                        value: v,
                    })
                    .collect(),
            })
            .collect();
        for (position, &s) in order.iter().enumerate() {
            layers[s].position = position;
        }

        if layers.is_empty() || frame.row_count() == 0 {
            return layers;
        }

        match self.offset {
            StackOffset::Zero => {}
            StackOffset::Expand => offset_expand(&mut layers),
            StackOffset::Silhouette => offset_silhouette(&mut layers, &order),
            StackOffset::Wiggle => offset_wiggle(&mut layers, &order),
        }
        offset_zero(&mut layers, &order);
        layers
    }
}

fn or_zero(v: f64) -> f64 {
    if v.is_nan() { 0.0 } else { v }
}

/// Accumulates each layer on top of the previous one in `order`.
///
/// The bottom layer keeps whatever baseline an offset assigned to it.
fn offset_zero(layers: &mut [Layer], order: &[usize]) {
    for w in order.windows(2) {
        let (below, above) = (w[0], w[1]);
        let m = layers[above].points.len();
        for j in 0..m {
            let prev = layers[below].points[j];
            let base = if prev.y1.is_nan() { prev.y0 } else { prev.y1 };
            let p = &mut layers[above].points[j];
            p.y0 = base;
            p.y1 += base;
        }
    }
}

fn offset_expand(layers: &mut [Layer]) {
    let m = layers[0].points.len();
    for j in 0..m {
        let total: f64 = layers.iter().map(|l| or_zero(l.points[j].y1)).sum();
        if total != 0.0 {
            for l in layers.iter_mut() {
                l.points[j].y1 /= total;
            }
        }
    }
}

fn offset_silhouette(layers: &mut [Layer], order: &[usize]) {
    let bottom = order[0];
    let m = layers[bottom].points.len();
    for j in 0..m {
        let total: f64 = layers.iter().map(|l| or_zero(l.points[j].y1)).sum();
        let p = &mut layers[bottom].points[j];
        p.y0 = -total / 2.0;
        p.y1 += p.y0;
    }
}

fn offset_wiggle(layers: &mut [Layer], order: &[usize]) {
    let bottom = order[0];
    let m = layers[bottom].points.len();
    let mut y = 0.0;
    for j in 1..m {
        let mut weight = 0.0;
        let mut weighted_slope = 0.0;
        for (i, &si) in order.iter().enumerate() {
            let cur = or_zero(layers[si].points[j].y1);
            let prev = or_zero(layers[si].points[j - 1].y1);
            let mut slope = (cur - prev) / 2.0;
            for &sk in &order[..i] {
                slope += or_zero(layers[sk].points[j].y1) - or_zero(layers[sk].points[j - 1].y1);
            }
            weight += cur;
            weighted_slope += slope * cur;
        }
        let p = &mut layers[bottom].points[j - 1];
        p.y0 = y;
        p.y1 += y;
        if weight != 0.0 {
            y -= weighted_slope / weight;
        }
    }
    let p = &mut layers[bottom].points[m - 1];
    p.y0 = y;
    p.y1 += y;
}
