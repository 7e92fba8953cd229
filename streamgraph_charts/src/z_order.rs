// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Suggested z-order conventions for chart-generated marks.
//!
//! Marks carry an explicit `z_index` for render ordering. The chart layer sets z-indexes
//! consistently so hosts don't have to hand-tune paint order.
//!
//! These values are intentionally coarse. Renderers should sort by `(z_index, MarkId)` for a
//! deterministic tie-break.

/// Filled series marks (stream layers, bars). Layers add their stack index.
pub const SERIES_FILL: i32 = 0;

/// Axis domain line and tick marks.
pub const AXIS_RULES: i32 = 30;
/// Axis tick labels.
pub const AXIS_LABELS: i32 = 40;

/// Legend heading.
pub const LEGEND_TITLE: i32 = 55;
/// Legend swatches.
pub const LEGEND_SWATCHES: i32 = 60;
/// Legend labels.
pub const LEGEND_LABELS: i32 = 70;

// Tooltip layers are offsets from the tooltip's configured `z_index`.

/// Tooltip drop shadow.
pub const TOOLTIP_SHADOW: i32 = 0;
/// Tooltip panel background and border.
pub const TOOLTIP_PANEL: i32 = 1;
/// Tooltip contents (title and mini chart).
pub const TOOLTIP_CONTENT: i32 = 10;
