// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Text measurement hooks for guide layout.
//!
//! Shaping stays downstream, so the legend and tooltip accept a measurer for rough bounds
//! estimation.

use streamgraph_core::FontWeight;

/// A minimal text measurement interface used by guide generators.
///
/// Callers can plug in a real text measurement backend (e.g. based on shaping), or use
/// [`HeuristicTextMeasurer`].
pub trait TextMeasurer {
    /// Returns `(width, height)` in the same coordinate system as the marks.
    fn measure(&self, text: &str, font_size: f64, weight: FontWeight) -> (f64, f64);
}

/// A tiny heuristic text measurer suitable for demos and early layout.
///
/// It assumes an average glyph width of ~0.6em (a little wider for heavy weights) and a
/// height of 1em.
#[derive(Clone, Copy, Debug, Default)]
pub struct HeuristicTextMeasurer;

impl TextMeasurer for HeuristicTextMeasurer {
    fn measure(&self, text: &str, font_size: f64, weight: FontWeight) -> (f64, f64) {
        let em = if weight >= FontWeight::BOLD { 0.65 } else { 0.6 };
        let width = em * font_size * text.chars().count() as f64;
        (width, font_size)
    }
}
