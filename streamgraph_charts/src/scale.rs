// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tiny scale utilities.
//!
//! These types provide the coordinate mapping behavior needed by the streamgraph and its
//! tooltip chart: a linear value scale, a calendar time scale, and a band scale.

use crate::time::{self, TimeInterval};

/// A linear mapping from a continuous domain to a continuous range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleLinear {
    domain: (f64, f64),
    range: (f64, f64),
}

impl ScaleLinear {
    /// Creates a new scale mapping `domain` values to `range` values.
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    /// Returns a copy whose domain is extended to "nice" tick boundaries.
    ///
    /// A domain that cannot be niced (empty span, non-finite) is kept as authored.
    pub fn nice(self, tick_count: usize) -> Self {
        let ticks = nice_ticks(self.domain.0, self.domain.1, tick_count);
        match (ticks.first(), ticks.last()) {
            (Some(&lo), Some(&hi)) if ticks.len() >= 2 => Self {
                domain: if self.domain.0 <= self.domain.1 {
                    (lo, hi)
                } else {
                    (hi, lo)
                },
                range: self.range,
            },
            _ => self,
        }
    }

    /// Maps a value from domain space into range space.
    ///
    /// A zero-width domain maps everything to the start of the range.
    pub fn map(&self, x: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let denom = d1 - d0;
        if denom == 0.0 {
            return r0;
        }
        let t = (x - d0) / denom;
        r0 + t * (r1 - r0)
    }

    /// Returns the configured domain.
    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    /// Returns the configured range.
    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    /// Returns "nice" tick values that lie within the domain.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        tick_values(self.domain.0, self.domain.1, count, TickBounds::Inside)
    }
}

/// How tick generation treats the ends of the domain.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum TickBounds {
    /// Ticks stay on or inside the domain.
    Inside,
    /// The first and last ticks cover the domain.
    Cover,
}

/// Returns ticks covering `[min, max]`, extended outward to whole steps.
pub(crate) fn nice_ticks(min: f64, max: f64, count: usize) -> Vec<f64> {
    tick_values(min, max, count, TickBounds::Cover)
}

fn tick_values(a: f64, b: f64, count: usize, bounds: TickBounds) -> Vec<f64> {
    if count == 0 || !a.is_finite() || !b.is_finite() {
        return Vec::new();
    }
    if a == b {
        return vec![a];
    }
    let (min, max) = if a < b { (a, b) } else { (b, a) };
    let step = nice_step((max - min) / count as f64);
    if step == 0.0 {
        return vec![min, max];
    }
    // Fractional steps divide by the inverse step so that e.g. the fourth tick of 0.1 is 0.3.
    let inverse = if step < 1.0 { (1.0 / step).round() } else { 1.0 };
    let scaled = |v: f64| if step < 1.0 { v * inverse } else { v / step };
    let (lo, hi) = match bounds {
        TickBounds::Inside => (scaled(min).ceil(), scaled(max).floor()),
        TickBounds::Cover => (scaled(min).floor(), scaled(max).ceil()),
    };
    if hi < lo || hi - lo > 10_000.0 {
        return Vec::new();
    }
    #[allow(
        clippy::cast_possible_truncation,
        reason = "finite and bounded by the check above"
    )]
    let n = (hi - lo).round() as u64;
    (0..=n)
        .map(|i| {
            let k = lo + i as f64;
            if step < 1.0 { k / inverse } else { k * step }
        })
        .collect()
}

/// Rounds a raw step to 1, 2 or 5 times a power of ten.
///
/// Thresholds are the geometric midpoints (`sqrt(50)`, `sqrt(10)`, `sqrt(2)`), which matches how
/// D3 picks tick increments.
pub(crate) fn nice_step(step: f64) -> f64 {
    if !step.is_finite() || step <= 0.0 {
        return 0.0;
    }
    let base = 10_f64.powf(step.log10().floor());
    let error = step / base;
    let factor = if error >= 50_f64.sqrt() {
        10.0
    } else if error >= 10_f64.sqrt() {
        5.0
    } else if error >= 2_f64.sqrt() {
        2.0
    } else {
        1.0
    };
    factor * base
}

/// A time scale over calendar timestamps.
///
/// Time is modeled as UTC seconds since the Unix epoch (see [`time::date_to_seconds`]); ticks
/// snap to calendar boundaries (days, Sundays, month starts, ...).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleTime {
    inner: ScaleLinear,
}

impl ScaleTime {
    /// Creates a new time scale.
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self {
            inner: ScaleLinear::new(domain, range),
        }
    }

    /// Maps a timestamp value into range space.
    pub fn map(&self, t: f64) -> f64 {
        self.inner.map(t)
    }

    /// Returns the configured domain in seconds.
    pub fn domain(&self) -> (f64, f64) {
        self.inner.domain()
    }

    /// Returns the configured range.
    pub fn range(&self) -> (f64, f64) {
        self.inner.range()
    }

    /// Returns calendar-aligned tick values and the interval they were generated with.
    pub fn ticks(&self, count: usize) -> (Vec<f64>, Option<TimeInterval>) {
        let (d0, d1) = self.inner.domain();
        time::time_ticks(d0, d1, count)
    }
}

/// A discrete band scale for categorical charts.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleBand {
    range: (f64, f64),
    count: usize,
    padding_inner: f64,
    padding_outer: f64,
}

impl ScaleBand {
    /// Creates a new band scale covering `count` bands over `range`.
    pub fn new(range: (f64, f64), count: usize) -> Self {
        Self {
            range,
            count,
            padding_inner: 0.1,
            padding_outer: 0.1,
        }
    }

    /// Sets inner and outer padding in band units.
    pub fn with_padding(mut self, inner: f64, outer: f64) -> Self {
        self.padding_inner = inner.max(0.0);
        self.padding_outer = outer.max(0.0);
        self
    }

    /// Returns the computed band width.
    pub fn band_width(&self) -> f64 {
        let (r0, r1) = self.range;
        let n = self.count as f64;
        if n <= 0.0 {
            return 0.0;
        }
        let span = (r1 - r0).abs();
        let denom = n + self.padding_inner * (n - 1.0) + 2.0 * self.padding_outer;
        if denom == 0.0 { 0.0 } else { span / denom }
    }

    /// Returns the configured range.
    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    /// Returns the number of bands.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Returns the start position of the band at `index`.
    pub fn x(&self, index: usize) -> f64 {
        let (r0, r1) = self.range;
        let bw = self.band_width();
        let step = bw * (1.0 + self.padding_inner);
        let start = if r1 >= r0 { r0 } else { r1 };
        start + bw * self.padding_outer + step * index as f64
    }

    /// Returns the center position of the band at `index`.
    pub fn center(&self, index: usize) -> f64 {
        self.x(index) + 0.5 * self.band_width()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_maps_inverted_range() {
        let s = ScaleLinear::new((-2.0, 6.0), (420.0, 0.0));
        assert!((s.map(-2.0) - 420.0).abs() < 1e-9);
        assert!((s.map(6.0) - 0.0).abs() < 1e-9);
        assert!((s.map(2.0) - 210.0).abs() < 1e-9);
    }

    #[test]
    fn nice_extends_to_whole_steps() {
        let s = ScaleLinear::new((0.0, 11.3), (0.0, 1.0)).nice(4);
        assert_eq!(s.domain(), (0.0, 12.0));
    }

    #[test]
    fn nice_keeps_zero_span_domain() {
        let s = ScaleLinear::new((0.0, 0.0), (100.0, 0.0)).nice(4);
        assert_eq!(s.domain(), (0.0, 0.0));
        assert_eq!(s.map(5.0), 100.0);
    }

    #[test]
    fn ticks_stay_inside_domain() {
        let s = ScaleLinear::new((-3.7, 8.2), (0.0, 1.0));
        let ticks = s.ticks(10);
        assert_eq!(ticks.first().copied(), Some(-3.0));
        assert_eq!(ticks.last().copied(), Some(8.0));
    }

    #[test]
    fn fractional_ticks_are_exact_decimals() {
        let ticks = ScaleLinear::new((0.0, 1.0), (0.0, 1.0)).ticks(10);
        assert_eq!(ticks.len(), 11);
        assert_eq!(ticks[3], 0.3);
        assert_eq!(ticks[7], 0.7);
        let ticks = ScaleLinear::new((-1.0, 1.0), (0.0, 1.0)).ticks(10);
        assert_eq!(ticks[1], -0.8);
        assert_eq!(ticks[5], 0.0);
    }

    #[test]
    fn band_positions_are_monotonic_and_fit_range() {
        let band = ScaleBand::new((50.0, 300.0), 4).with_padding(0.3, 0.3);
        let bw = band.band_width();
        assert!(band.x(0) > 50.0);
        assert!(band.x(1) > band.x(0));
        assert!((band.x(3) + bw + bw * 0.3 - 300.0).abs() < 1e-9);
    }
}
