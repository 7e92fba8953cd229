// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Curve interpolation for line and area paths.
//!
//! `Basis` is the uniform cubic B-spline used by D3's `curveBasis`: the curve starts and ends on
//! the first and last points and is pulled towards (but does not pass through) the interior
//! points.

use kurbo::{BezPath, Point};
use serde::{Deserialize, Serialize};

/// Interpolation between consecutive points.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Curve {
    /// Straight segments.
    Linear,
    /// Uniform cubic B-spline.
    #[default]
    Basis,
}

impl Curve {
    /// Appends `points` to `path` as one polyline.
    ///
    /// When `connect` is `true` the first point is joined to the current path with a line
    /// instead of starting a new subpath; this is how an area joins its top and bottom edges.
    pub fn append(self, path: &mut BezPath, points: &[Point], connect: bool) {
        match self {
            Self::Linear => append_linear(path, points, connect),
            Self::Basis => append_basis(path, points, connect),
        }
    }

    /// Builds a closed area: `top` left to right, then `bottom` right to left.
    ///
    /// `top` and `bottom` are expected to have the same x coordinates, index for index.
    pub fn area(self, top: &[Point], bottom: &[Point]) -> BezPath {
        let mut path = BezPath::new();
        if top.is_empty() {
            return path;
        }
        self.append(&mut path, top, false);
        let reversed: Vec<Point> = bottom.iter().rev().copied().collect();
        self.append(&mut path, &reversed, true);
        path.close_path();
        path
    }
}

fn start(path: &mut BezPath, p: Point, connect: bool) {
    if connect {
        path.line_to(p);
    } else {
        path.move_to(p);
    }
}

fn append_linear(path: &mut BezPath, points: &[Point], connect: bool) {
    let Some((&first, rest)) = points.split_first() else {
        return;
    };
    start(path, first, connect);
    for &p in rest {
        path.line_to(p);
    }
}

fn append_basis(path: &mut BezPath, points: &[Point], connect: bool) {
    match points {
        [] => {}
        [p] => start(path, *p, connect),
        [a, b] => {
            start(path, *a, connect);
            path.line_to(*b);
        }
        _ => {
            let (p0, p1) = (points[0], points[1]);
            start(path, p0, connect);
            path.line_to(lerp6(p0, p1, 5.0, 1.0));

            // Control points for the segment ending near `next`, given the two previous points.
            let segment = |path: &mut BezPath, a: Point, b: Point, next: Point| {
                path.curve_to(
                    ((2.0 * a.x + b.x) / 3.0, (2.0 * a.y + b.y) / 3.0),
                    ((a.x + 2.0 * b.x) / 3.0, (a.y + 2.0 * b.y) / 3.0),
                    ((a.x + 4.0 * b.x + next.x) / 6.0, (a.y + 4.0 * b.y + next.y) / 6.0),
                );
            };

            for w in points.windows(3) {
                segment(path, w[0], w[1], w[2]);
            }

            let n = points.len();
            let (a, b) = (points[n - 2], points[n - 1]);
            segment(path, a, b, b);
            path.line_to(b);
        }
    }
}

fn lerp6(a: Point, b: Point, wa: f64, wb: f64) -> Point {
    Point::new((wa * a.x + wb * b.x) / 6.0, (wa * a.y + wb * b.y) / 6.0)
}

#[cfg(test)]
mod tests {
    use kurbo::PathEl;

    use super::*;

    #[test]
    fn basis_with_two_points_is_a_segment() {
        let mut path = BezPath::new();
        Curve::Basis.append(&mut path, &[Point::new(0.0, 0.0), Point::new(10.0, 5.0)], false);
        assert_eq!(
            path.elements(),
            &[
                PathEl::MoveTo(Point::new(0.0, 0.0)),
                PathEl::LineTo(Point::new(10.0, 5.0)),
            ]
        );
    }

    #[test]
    fn basis_starts_and_ends_on_endpoints() {
        let pts = [
            Point::new(0.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(20.0, 0.0),
            Point::new(30.0, 10.0),
        ];
        let mut path = BezPath::new();
        Curve::Basis.append(&mut path, &pts, false);
        let els = path.elements();
        assert_eq!(els.first(), Some(&PathEl::MoveTo(pts[0])));
        assert_eq!(els.last(), Some(&PathEl::LineTo(pts[3])));
        // lineTo + one curve per interior window + the closing curve + final lineTo
        let curves = els
            .iter()
            .filter(|e| matches!(e, PathEl::CurveTo(..)))
            .count();
        assert_eq!(curves, 3);
    }

    #[test]
    fn area_is_closed_and_connects_edges() {
        let top = [Point::new(0.0, 0.0), Point::new(10.0, 0.0), Point::new(20.0, 0.0)];
        let bottom = [Point::new(0.0, 5.0), Point::new(10.0, 5.0), Point::new(20.0, 5.0)];
        let path = Curve::Basis.area(&top, &bottom);
        let els = path.elements();
        assert_eq!(els.last(), Some(&PathEl::ClosePath));
        let moves = els.iter().filter(|e| matches!(e, PathEl::MoveTo(_))).count();
        assert_eq!(moves, 1, "area must be a single subpath");
    }

    #[test]
    fn linear_area_contains_interior_point() {
        use kurbo::Shape;
        let top = [Point::new(0.0, 0.0), Point::new(10.0, 0.0)];
        let bottom = [Point::new(0.0, 5.0), Point::new(10.0, 5.0)];
        let path = Curve::Linear.area(&top, &bottom);
        assert!(path.contains(Point::new(5.0, 2.5)));
        assert!(!path.contains(Point::new(5.0, 7.5)));
    }
}
