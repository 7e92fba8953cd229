// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Stacked area mark generation (using per-row `y0`/`y1` boundaries).

use kurbo::{BezPath, Point};
use peniko::Brush;
use streamgraph_core::{Mark, MarkId};
use streamgraph_stack::Layer;

use crate::axis::StrokeStyle;
use crate::curve::Curve;
use crate::scale::{ScaleLinear, ScaleTime};

/// One boundary sample of a stacked area, in scene coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RegionPoint {
    /// Horizontal position.
    pub x: f64,
    /// Scene y of the lower boundary (`y0`).
    pub y0: f64,
    /// Scene y of the upper boundary (`y1`).
    pub y1: f64,
}

/// A stacked area mark derived from a [`Layer`].
///
/// `xs` are the data x positions (timestamps in seconds) aligned with the layer's points.
#[derive(Clone, Debug)]
pub struct StreamAreaMarkSpec {
    /// Stable mark id.
    pub id: MarkId,
    /// X scale mapping timestamps into scene x.
    pub x_scale: ScaleTime,
    /// Y scale mapping stacked values into scene y.
    pub y_scale: ScaleLinear,
    /// Interpolation along both boundaries.
    pub curve: Curve,
    /// Fill paint for the area.
    pub fill: Brush,
    /// Optional outline around the whole region.
    pub stroke: Option<StrokeStyle>,
    /// Rendering order hint.
    pub z_index: i32,
}

impl StreamAreaMarkSpec {
    /// Creates an area mark with a basis curve, default fill, and no outline.
    pub fn new(id: MarkId, x_scale: ScaleTime, y_scale: ScaleLinear) -> Self {
        Self {
            id,
            x_scale,
            y_scale,
            curve: Curve::Basis,
            fill: Brush::default(),
            stroke: None,
            z_index: crate::z_order::SERIES_FILL,
        }
    }

    /// Sets the interpolation curve.
    pub fn with_curve(mut self, curve: Curve) -> Self {
        self.curve = curve;
        self
    }

    /// Sets the fill paint.
    pub fn with_fill(mut self, fill: impl Into<Brush>) -> Self {
        self.fill = fill.into();
        self
    }

    /// Sets the outline stroke.
    pub fn with_stroke(mut self, stroke: StrokeStyle) -> Self {
        self.stroke = Some(stroke);
        self
    }

    /// Sets the z-index used for render ordering.
    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    /// Maps a layer into scene-space boundary points.
    ///
    /// Rows beyond the shorter of `xs` and the layer are ignored.
    pub fn region_points(&self, xs: &[f64], layer: &Layer) -> Vec<RegionPoint> {
        xs.iter()
            .zip(&layer.points)
            .map(|(&x, p)| RegionPoint {
                x: self.x_scale.map(x),
                y0: self.y_scale.map(p.y0),
                y1: self.y_scale.map(p.y1),
            })
            .collect()
    }

    /// Builds the closed region path for already mapped boundary points.
    pub fn path(&self, points: &[RegionPoint]) -> BezPath {
        let top: Vec<Point> = points.iter().map(|p| Point::new(p.x, p.y1)).collect();
        let bottom: Vec<Point> = points.iter().map(|p| Point::new(p.x, p.y0)).collect();
        self.curve.area(&top, &bottom)
    }

    /// Generates the filled (and optionally outlined) region mark.
    pub fn mark(&self, path: BezPath) -> Mark {
        let builder = Mark::builder(self.id)
            .z_index(self.z_index)
            .path(path)
            .fill(self.fill.clone());
        match &self.stroke {
            Some(stroke) => builder.stroke(stroke.brush.clone(), stroke.stroke_width),
            None => builder,
        }
        .build()
    }
}

#[cfg(test)]
mod tests {
    use streamgraph_core::MarkPayload;
    use streamgraph_stack::StackPoint;

    use super::*;

    #[test]
    fn region_points_map_both_boundaries() {
        let spec = StreamAreaMarkSpec::new(
            MarkId(1),
            ScaleTime::new((0.0, 10.0), (0.0, 100.0)),
            ScaleLinear::new((-1.0, 1.0), (200.0, 0.0)),
        );
        let layer = Layer {
            series: 0,
            position: 0,
            points: vec![
                StackPoint {
                    y0: -1.0,
                    y1: 0.0,
                    value: 1.0,
                },
                StackPoint {
                    y0: 0.0,
                    y1: 1.0,
                    value: 1.0,
                },
            ],
        };
        let pts = spec.region_points(&[0.0, 10.0], &layer);
        assert_eq!(
            pts,
            vec![
                RegionPoint {
                    x: 0.0,
                    y0: 200.0,
                    y1: 100.0
                },
                RegionPoint {
                    x: 100.0,
                    y0: 100.0,
                    y1: 0.0
                },
            ]
        );
    }

    #[test]
    fn outline_sets_stroke_on_the_region() {
        let spec = StreamAreaMarkSpec::new(
            MarkId(7),
            ScaleTime::new((0.0, 1.0), (0.0, 1.0)),
            ScaleLinear::new((0.0, 1.0), (1.0, 0.0)),
        )
        .with_stroke(StrokeStyle::default())
        .with_z_index(3);
        let mark = spec.mark(BezPath::new());
        assert_eq!(mark.z_index, 3);
        let MarkPayload::Path(p) = mark.payload else {
            panic!("expected a path mark");
        };
        assert_eq!(p.stroke_width, 1.0);
    }
}
