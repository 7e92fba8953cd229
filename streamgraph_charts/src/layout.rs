// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A tiny arrange helper for the streamgraph surface.
//!
//! The surface has a fixed outer size and fixed margins (the D3 margin convention). The plot
//! rectangle is the view inset by the margins; the axes occupy the left and bottom margins,
//! and the legend sits outside the surface, to its right.

use kurbo::Rect;
use serde::{Deserialize, Serialize};

/// A width/height pair used by chart layout.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    /// Width in chart coordinate units.
    pub width: f64,
    /// Height in chart coordinate units.
    pub height: f64,
}

/// Per-side margins between the surface edge and the plot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Margin {
    /// Top margin.
    pub top: f64,
    /// Right margin.
    pub right: f64,
    /// Bottom margin.
    pub bottom: f64,
    /// Left margin.
    pub left: f64,
}

/// Legend placement relative to the surface.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LegendPlacement {
    /// Gap between the right edge of the surface and the legend.
    pub offset_x: f64,
    /// Top of the legend, in surface coordinates.
    pub y: f64,
}

/// Layout inputs: the outer surface, its margins, and an optional legend.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ChartLayoutSpec {
    /// Outer surface size.
    pub view_size: Size,
    /// Margins around the plot.
    pub margin: Margin,
    /// An optional legend, given by its desired size and placement.
    pub legend: Option<(Size, LegendPlacement)>,
}

/// Output of the arrange pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChartLayout {
    /// Outer surface bounds.
    pub view: Rect,
    /// The plot rectangle (where regions are drawn).
    pub plot: Rect,
    /// Reserved rectangle for the left axis.
    pub axis_left: Rect,
    /// Reserved rectangle for the bottom axis.
    pub axis_bottom: Rect,
    /// Legend rectangle (if any).
    pub legend: Option<Rect>,
}

impl ChartLayout {
    /// Computes a layout from the view size, margins and legend placement.
    ///
    /// Negative plot extents collapse to zero.
    pub fn arrange(spec: &ChartLayoutSpec) -> Self {
        let view = Rect::new(
            0.0,
            0.0,
            spec.view_size.width.max(0.0),
            spec.view_size.height.max(0.0),
        );
        let m = spec.margin;
        let x0 = m.left.min(view.x1);
        let y0 = m.top.min(view.y1);
        let plot = Rect::new(
            x0,
            y0,
            (view.x1 - m.right).max(x0),
            (view.y1 - m.bottom).max(y0),
        );
        let axis_left = Rect::new(view.x0, plot.y0, plot.x0, plot.y1);
        let axis_bottom = Rect::new(plot.x0, plot.y1, plot.x1, view.y1);
        let legend = spec.legend.map(|(size, placement)| {
            let x = view.x1 + placement.offset_x;
            Rect::new(x, placement.y, x + size.width, placement.y + size.height)
        });
        Self {
            view,
            plot,
            axis_left,
            axis_bottom,
            legend,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plot_is_view_inset_by_margins() {
        let layout = ChartLayout::arrange(&ChartLayoutSpec {
            view_size: Size {
                width: 600.0,
                height: 500.0,
            },
            margin: Margin {
                top: 40.0,
                right: 120.0,
                bottom: 40.0,
                left: 60.0,
            },
            legend: Some((
                Size {
                    width: 100.0,
                    height: 150.0,
                },
                LegendPlacement {
                    offset_x: 20.0,
                    y: 10.0,
                },
            )),
        });
        assert_eq!(layout.plot, Rect::new(60.0, 40.0, 480.0, 460.0));
        assert_eq!(layout.axis_bottom, Rect::new(60.0, 460.0, 480.0, 500.0));
        assert_eq!(layout.legend, Some(Rect::new(620.0, 10.0, 720.0, 160.0)));
    }

    #[test]
    fn oversized_margins_collapse_the_plot() {
        let layout = ChartLayout::arrange(&ChartLayoutSpec {
            view_size: Size {
                width: 100.0,
                height: 100.0,
            },
            margin: Margin {
                top: 10.0,
                right: 80.0,
                bottom: 10.0,
                left: 40.0,
            },
            legend: None,
        });
        assert_eq!(layout.plot.width(), 0.0);
        assert_eq!(layout.plot.height(), 80.0);
    }
}
