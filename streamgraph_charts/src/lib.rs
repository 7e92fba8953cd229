// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Streamgraph chart building blocks for `streamgraph_core`.
//!
//! This crate is a small layer above `streamgraph_core`:
//! - **Scales** map data values (numbers, calendar dates, categories) into scene coordinates.
//! - **Guides** (axes, legends) and **series** (stacked areas, bars) are lowered into
//!   `streamgraph_core::Mark`s.
//! - [`StreamGraphView`] ties them together: it stacks [`Row`]s with the streamgraph wiggle
//!   offset, redraws its scene on every update, and drives a host-owned [`Tooltip`] on hover.
//!
//! Text shaping and layout are out of scope; text marks store unshaped strings.

mod area_mark;
mod axis;
mod bar_mark;
mod config;
mod curve;
mod error;
mod layout;
mod legend;
mod measure;
mod mini_chart;
mod row;
mod scale;
mod series;
mod time;
mod tooltip;
mod view;
#[cfg(test)]
mod view_tests;
mod z_order;

pub use area_mark::{RegionPoint, StreamAreaMarkSpec};
pub use axis::{AXIS_ID_SPAN, AxisOrient, AxisScale, AxisSpec, AxisStyle, AxisTick, StrokeStyle};
pub use bar_mark::BarMarkSpec;
pub use config::{
    HexColor, LegendConfig, MiniChartConfig, OffsetMode, RedrawMode,
    StreamGraphConfig, TooltipConfig,
};
pub use curve::Curve;
pub use error::{ConfigError, StreamGraphError};
pub use layout::{ChartLayout, ChartLayoutSpec, LegendPlacement, Margin, Size};
pub use legend::{LegendItem, LegendSwatches, LegendSwatchesSpec};
pub use measure::{HeuristicTextMeasurer, TextMeasurer};
pub use mini_chart::MiniBarChart;
pub use row::{Row, rows_from_json};
pub use scale::{ScaleBand, ScaleLinear, ScaleTime};
pub use series::{SeriesDef, SeriesSet};
pub use time::{TimeInterval, date_to_seconds, format_month_abbrev, format_time_tick, time_ticks};
pub use tooltip::{Tooltip, TooltipContent};
pub use view::{PointerEvent, SeriesRegion, StreamFrame, StreamGraphView};
pub use z_order::*;
