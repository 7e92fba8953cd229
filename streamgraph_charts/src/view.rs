// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The streamgraph view.
//!
//! [`StreamGraphView::update`] takes the full row set, recomputes the stack, and redraws the
//! scene: one filled region per series, a time axis, a value axis, and the legend. Pointer
//! events hit-test the regions and drive a host-owned [`Tooltip`].

use chrono::NaiveDate;
use kurbo::{BezPath, Point, Shape};
use peniko::Color;
use streamgraph_core::{Mark, MarkDiff, MarkId, Scene};
use streamgraph_stack::{Layer, SeriesFrame, Stack, StackOrder, layers_extent};

use crate::area_mark::{RegionPoint, StreamAreaMarkSpec};
use crate::axis::{AxisSpec, StrokeStyle};
use crate::config::{RedrawMode, StreamGraphConfig};
use crate::error::StreamGraphError;
use crate::layout::{ChartLayout, ChartLayoutSpec, LegendPlacement, Size};
use crate::legend::{LegendItem, LegendSwatchesSpec};
use crate::measure::{HeuristicTextMeasurer, TextMeasurer};
use crate::mini_chart::MiniBarChart;
use crate::row::Row;
use crate::scale::{ScaleLinear, ScaleTime};
use crate::series::SeriesSet;
use crate::time::date_to_seconds;
use crate::tooltip::{Tooltip, TooltipContent};
use crate::z_order;

/// Id range reserved for each group of view marks.
pub(crate) const ID_GROUP_SPAN: u64 = 1 << 24;

const REGION_ID_BASE: MarkId = MarkId(ID_GROUP_SPAN);
const X_AXIS_ID_BASE: MarkId = MarkId(2 * ID_GROUP_SPAN);
const Y_AXIS_ID_BASE: MarkId = MarkId(3 * ID_GROUP_SPAN);
const LEGEND_ID_BASE: MarkId = MarkId(4 * ID_GROUP_SPAN);

/// A pointer position, both relative to the surface and to the page hosting it.
///
/// Hit testing uses `surface`; the tooltip is placed relative to `page`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerEvent {
    /// Position in surface coordinates.
    pub surface: Point,
    /// Position in page coordinates.
    pub page: Point,
}

impl PointerEvent {
    /// A pointer event whose page and surface coordinates coincide.
    pub fn at(p: impl Into<Point>) -> Self {
        let p = p.into();
        Self {
            surface: p,
            page: p,
        }
    }
}

/// One drawn series region.
#[derive(Clone, Debug)]
pub struct SeriesRegion {
    /// Series index (stack input order).
    pub series: usize,
    /// Series name.
    pub name: String,
    /// Series color.
    pub color: Color,
    /// Boundary points in surface coordinates, one per row.
    pub points: Vec<RegionPoint>,
    /// Closed outline in surface coordinates.
    pub path: BezPath,
    /// Raw (unstacked) values, one per row.
    pub values: Vec<f64>,
}

/// Everything derived from the last non-empty update.
#[derive(Clone, Debug)]
pub struct StreamFrame {
    /// Row dates, in input order.
    pub dates: Vec<NaiveDate>,
    /// Time scale over `[min date, max date]`, mapped into `[0, plot width]`.
    pub x_scale: ScaleTime,
    /// Linear scale over `[min baseline, max top]`, mapped into `[plot height, 0]`.
    pub y_scale: ScaleLinear,
    /// Stacked layers, in series order.
    pub layers: Vec<Layer>,
    /// Drawn regions, in series order.
    pub regions: Vec<SeriesRegion>,
    /// Surface, plot, axes, and legend rectangles.
    pub layout: ChartLayout,
}

/// A streamgraph over time-series rows with a hover tooltip.
#[derive(Debug)]
pub struct StreamGraphView<M = HeuristicTextMeasurer> {
    config: StreamGraphConfig,
    series: SeriesSet,
    stack: Stack,
    scene: Scene,
    frame: Option<StreamFrame>,
    hovered: Option<usize>,
    measurer: M,
}

impl StreamGraphView {
    /// Creates a view after validating `config`.
    pub fn new(config: StreamGraphConfig) -> Result<Self, StreamGraphError> {
        Self::with_measurer(config, HeuristicTextMeasurer)
    }
}

impl Default for StreamGraphView {
    fn default() -> Self {
        Self::from_parts(StreamGraphConfig::default(), HeuristicTextMeasurer)
    }
}

impl<M: TextMeasurer> StreamGraphView<M> {
    /// Creates a view with a custom text measurer for legend and tooltip layout.
    pub fn with_measurer(config: StreamGraphConfig, measurer: M) -> Result<Self, StreamGraphError> {
        config.validate()?;
        Ok(Self::from_parts(config, measurer))
    }

    fn from_parts(config: StreamGraphConfig, measurer: M) -> Self {
        // Layers stay in configured order; `SeriesSet::legend_items` relies on it.
        let stack = Stack::new()
            .with_order(StackOrder::None)
            .with_offset(config.offset.into());
        Self {
            series: SeriesSet::new(config.series.clone()),
            stack,
            config,
            scene: Scene::new(),
            frame: None,
            hovered: None,
            measurer,
        }
    }

    /// The view configuration.
    pub fn config(&self) -> &StreamGraphConfig {
        &self.config
    }

    /// The tracked series.
    pub fn series(&self) -> &SeriesSet {
        &self.series
    }

    /// The retained drawing surface.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// The last rendered frame, or `None` after an empty update.
    pub fn frame(&self) -> Option<&StreamFrame> {
        self.frame.as_ref()
    }

    /// Legend entries, top to bottom.
    pub fn legend_items(&self) -> Vec<LegendItem> {
        self.series.legend_items()
    }

    /// Name of the hovered series, if any.
    pub fn hovered(&self) -> Option<&str> {
        let index = self.hovered?;
        self.series.get(index).map(|s| s.name.as_str())
    }

    /// Replaces the rendered chart with one for `rows`.
    ///
    /// Empty or absent rows clear the surface. Rows missing a value for a tracked series are
    /// rejected and leave the surface untouched. The hover state is reset; a tooltip still shown
    /// is hidden or refreshed by the next pointer move.
    pub fn update(&mut self, rows: Option<&[Row]>) -> Result<Vec<MarkDiff>, StreamGraphError> {
        let rows = match rows {
            Some(rows) if !rows.is_empty() => rows,
            _ => {
                self.frame = None;
                self.hovered = None;
                let diffs = self.scene.clear();
                tracing::debug!(exits = diffs.len(), "streamgraph cleared");
                return Ok(diffs);
            }
        };

        let frame = self.build_frame(rows)?;
        let marks = self.frame_marks(&frame);
        let mark_count = marks.len();
        let diffs = match self.config.redraw {
            RedrawMode::Replace => self.scene.replace(marks),
            RedrawMode::Diff => self.scene.tick(marks),
        };
        let (y_min, y_max) = frame.y_scale.domain();
        tracing::debug!(
            rows = rows.len(),
            marks = mark_count,
            diffs = diffs.len(),
            y_min,
            y_max,
            "streamgraph redrawn"
        );
        self.frame = Some(frame);
        self.hovered = None;
        Ok(diffs)
    }

    fn columns(&self, rows: &[Row]) -> Result<Vec<Vec<f64>>, StreamGraphError> {
        let mut columns = vec![Vec::with_capacity(rows.len()); self.series.len()];
        for (row_index, row) in rows.iter().enumerate() {
            for (column, def) in columns.iter_mut().zip(self.series.iter()) {
                let Some(value) = row.value(&def.name) else {
                    tracing::warn!(row = row_index, series = %def.name, "row is missing a series value");
                    return Err(StreamGraphError::MissingValue {
                        row: row_index,
                        series: def.name.clone(),
                    });
                };
                if !value.is_finite() {
                    tracing::warn!(row = row_index, series = %def.name, value, "row has a non-finite value");
                    return Err(StreamGraphError::NonFiniteValue {
                        row: row_index,
                        series: def.name.clone(),
                        value,
                    });
                }
                column.push(value);
            }
        }
        Ok(columns)
    }

    fn build_frame(&self, rows: &[Row]) -> Result<StreamFrame, StreamGraphError> {
        let columns = self.columns(rows)?;
        let frame = SeriesFrame::new(columns)?;
        let layers = self.stack.layers(&frame);

        let dates: Vec<NaiveDate> = rows.iter().map(|r| r.date).collect();
        let xs: Vec<f64> = dates.iter().map(|&d| date_to_seconds(d)).collect();
        let x_domain = xs
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &x| {
                (lo.min(x), hi.max(x))
            });
        let y_domain = layers_extent(&layers).unwrap_or((0.0, 0.0));

        let legend_spec = self.legend_spec();
        let legend_size = legend_spec.measure(&self.measurer);
        let layout = ChartLayout::arrange(&ChartLayoutSpec {
            view_size: Size {
                width: self.config.width,
                height: self.config.height,
            },
            margin: self.config.margin,
            legend: Some((
                legend_size,
                LegendPlacement {
                    offset_x: self.config.legend.offset_x,
                    y: self.config.legend.top,
                },
            )),
        });
        let plot = layout.plot;

        let x_scale = ScaleTime::new(x_domain, (0.0, plot.width()));
        let y_scale = ScaleLinear::new(y_domain, (plot.height(), 0.0));
        let x_surface = ScaleTime::new(x_domain, (plot.x0, plot.x1));
        let y_surface = ScaleLinear::new(y_domain, (plot.y1, plot.y0));

        let regions = layers
            .iter()
            .filter_map(|layer| {
                let def = self.series.get(layer.series)?;
                let spec = self.region_spec(layer.series, def.color.color(), x_surface, y_surface);
                let points = spec.region_points(&xs, layer);
                let path = spec.path(&points);
                Some(SeriesRegion {
                    series: layer.series,
                    name: def.name.clone(),
                    color: def.color.color(),
                    points,
                    path,
                    values: layer.points.iter().map(|p| p.value).collect(),
                })
            })
            .collect();

        Ok(StreamFrame {
            dates,
            x_scale,
            y_scale,
            layers,
            regions,
            layout,
        })
    }

    fn region_spec(
        &self,
        series: usize,
        color: Color,
        x_scale: ScaleTime,
        y_scale: ScaleLinear,
    ) -> StreamAreaMarkSpec {
        #[allow(clippy::cast_possible_truncation, reason = "opacity is validated to [0, 1]")]
        let alpha = self.config.fill_opacity as f32;
        let stroke = self.config.stroke.color();
        let z = z_order::SERIES_FILL.saturating_add(i32::try_from(series).unwrap_or(i32::MAX));
        StreamAreaMarkSpec::new(REGION_ID_BASE.offset(series as u64), x_scale, y_scale)
            .with_curve(self.config.curve)
            .with_fill(color.multiply_alpha(alpha))
            .with_stroke(StrokeStyle::solid(
                stroke.multiply_alpha(alpha),
                self.config.stroke_width,
            ))
            .with_z_index(z)
    }

    fn legend_spec(&self) -> LegendSwatchesSpec {
        LegendSwatchesSpec::from_config(LEGEND_ID_BASE, &self.config.legend, self.legend_items())
    }

    fn frame_marks(&self, frame: &StreamFrame) -> Vec<Mark> {
        let plot = frame.layout.plot;
        let x_surface = ScaleTime::new(frame.x_scale.domain(), (plot.x0, plot.x1));
        let y_surface = ScaleLinear::new(frame.y_scale.domain(), (plot.y1, plot.y0));

        let mut marks: Vec<Mark> = frame
            .regions
            .iter()
            .map(|region| {
                self.region_spec(region.series, region.color, x_surface, y_surface)
                    .mark(region.path.clone())
            })
            .collect();

        marks.extend(
            AxisSpec::bottom(X_AXIS_ID_BASE, x_surface)
                .with_tick_count(self.config.x_tick_count)
                .marks(plot),
        );
        marks.extend(
            AxisSpec::left(Y_AXIS_ID_BASE, y_surface)
                .with_tick_count(self.config.y_tick_count)
                .marks(plot),
        );

        if let Some(rect) = frame.layout.legend {
            marks.extend(self.legend_spec().at(rect.x0, rect.y0).marks());
        }
        marks
    }

    /// Returns the index of the topmost region containing `surface`.
    pub fn hit_test(&self, surface: Point) -> Option<usize> {
        let frame = self.frame.as_ref()?;
        frame
            .regions
            .iter()
            .rev()
            .find(|r| r.path.contains(surface))
            .map(|r| r.series)
    }

    /// Handles pointer movement: shows, moves, or hides the tooltip.
    ///
    /// The tooltip is created in `tooltip` on first hover. Returns the hovered series name.
    pub fn pointer_move(
        &mut self,
        event: PointerEvent,
        tooltip: &mut Option<Tooltip>,
    ) -> Option<&str> {
        let hit = self.hit_test(event.surface);
        if hit == self.hovered {
            // An update forgets the hovered region but not the host's tooltip.
            if let Some(tip) = tooltip.as_mut() {
                match hit {
                    Some(_) => tip.move_to(event.page),
                    None => tip.hide(),
                }
            }
            return self.hovered();
        }

        if self.hovered.take().is_some() {
            if let Some(tip) = tooltip.as_mut() {
                tip.hide();
            }
        }

        if let Some(index) = hit {
            if let Some(content) = self.tooltip_content(index) {
                Tooltip::ensure(tooltip, &self.config.tooltip).show(content, event.page);
                self.hovered = Some(index);
            }
        }
        self.hovered()
    }

    /// Handles the pointer leaving the surface.
    pub fn pointer_leave(&mut self, tooltip: &mut Option<Tooltip>) {
        self.hovered = None;
        if let Some(tip) = tooltip.as_mut() {
            tip.hide();
        }
    }

    fn tooltip_content(&self, index: usize) -> Option<TooltipContent> {
        let frame = self.frame.as_ref()?;
        let region = frame.regions.iter().find(|r| r.series == index)?;
        let chart = MiniBarChart::new(
            &self.config.tooltip.mini,
            region.color,
            &frame.dates,
            &region.values,
        );
        Some(TooltipContent::new(region.name.clone(), chart))
    }
}
