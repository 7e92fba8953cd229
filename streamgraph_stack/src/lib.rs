// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Stack layout for layered area charts.
//!
//! This crate provides:
//! - a column-major [`SeriesFrame`] holding one numeric column per series, and
//! - a full-recompute [`Stack`] layout that turns the frame into per-series [`Layer`]s of
//!   `(y0, y1)` pairs, using D3-compatible orders and baseline offsets.
//!
//! The `Wiggle` offset is the streamgraph layout: it picks the baseline of the bottom layer so
//! that the weighted change in slope across all layers is minimized.

mod frame;
mod stack;

pub use frame::{SeriesFrame, StackError};
pub use stack::{Layer, Stack, StackOffset, StackOrder, StackPoint, layers_extent};
