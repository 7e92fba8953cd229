// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Retained drawing surface for streamgraph charts.
//!
//! Chart code lowers its output into [`Mark`]s: rectangles, paths, and text runs, each with a
//! stable [`MarkId`] and a `z_index` paint-order hint. A [`Scene`] keeps the marks of the last
//! frame and reports what changed as [`MarkDiff`]s, so hosts (SVG dumps, GPU renderers, web
//! canvases) only need to apply enter/update/exit records.
//!
//! Text shaping is out of scope; text marks store unshaped strings.

mod mark;
mod scene;

pub use mark::{
    FontWeight, Mark, MarkBuilder, MarkId, MarkPayload, PathBuilder, PathPayload, RectBuilder,
    RectPayload, TextAnchor, TextBaseline, TextBuilder, TextPayload,
};
pub use scene::{MarkDiff, Scene};
