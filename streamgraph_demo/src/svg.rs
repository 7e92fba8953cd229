// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Minimal SVG dump utilities for `streamgraph_demo`.

use std::collections::HashMap;
use std::fmt::Write as _;

use kurbo::Rect;
use peniko::Brush;
use streamgraph_core::{
    Mark, MarkDiff, MarkId, MarkPayload, PathPayload, RectPayload, TextAnchor, TextBaseline,
    TextPayload,
};

/// A host-side mirror of the view's scene, kept in sync by applying mark diffs.
#[derive(Debug, Default)]
pub(crate) struct SvgScene {
    marks: HashMap<MarkId, (i32, MarkPayload)>,
    view_box: Option<Rect>,
}

impl SvgScene {
    pub(crate) fn set_view_box(&mut self, view_box: Rect) {
        self.view_box = Some(view_box);
    }

    pub(crate) fn len(&self) -> usize {
        self.marks.len()
    }

    pub(crate) fn apply_diffs(&mut self, diffs: &[MarkDiff]) {
        for diff in diffs {
            match diff {
                MarkDiff::Enter {
                    id, z_index, new, ..
                } => {
                    self.marks.insert(*id, (*z_index, (**new).clone()));
                }
                MarkDiff::Update {
                    id,
                    new_z_index,
                    new,
                    ..
                } => {
                    self.marks.insert(*id, (*new_z_index, (**new).clone()));
                }
                MarkDiff::Exit { id, .. } => {
                    self.marks.remove(id);
                }
            }
        }
    }

    /// Inserts marks directly, without diffing (used for overlay content).
    pub(crate) fn insert_marks(&mut self, marks: Vec<Mark>) {
        for mark in marks {
            self.marks.insert(mark.id, (mark.z_index, mark.payload));
        }
    }

    pub(crate) fn to_svg_string(&self) -> String {
        let vb = self
            .view_box
            .unwrap_or_else(|| Rect::new(0.0, 0.0, 100.0, 100.0));
        let mut out = format!(
            concat!(
                r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="{} {} {} {}" "#,
                r#"width="{}" height="{}" font-family="sans-serif">"#,
                "\n"
            ),
            vb.x0,
            vb.y0,
            vb.width(),
            vb.height(),
            vb.width(),
            vb.height()
        );

        let mut paint_order: Vec<_> = self.marks.iter().collect();
        paint_order.sort_by_key(|(id, (z, _))| (*z, **id));
        for (_, (_, payload)) in paint_order {
            match payload {
                MarkPayload::Rect(r) => write_rect(&mut out, r),
                MarkPayload::Path(p) => write_path(&mut out, p),
                MarkPayload::Text(t) => write_text(&mut out, t),
            }
        }
        out.push_str("</svg>\n");
        out
    }
}

fn write_rect(out: &mut String, r: &RectPayload) {
    let _ = write!(
        out,
        r#"<rect x="{}" y="{}" width="{}" height="{}""#,
        r.rect.x0,
        r.rect.y0,
        r.rect.width(),
        r.rect.height(),
    );
    if r.corner_radius > 0.0 {
        let _ = write!(out, r#" rx="{}""#, r.corner_radius);
    }
    write_paint_attr(out, "fill", &r.fill);
    write_stroke(out, &r.stroke, r.stroke_width);
    out.push_str("/>\n");
}

fn write_path(out: &mut String, p: &PathPayload) {
    let _ = write!(out, r#"<path d="{}""#, p.path.to_svg());
    write_paint_attr(out, "fill", &p.fill);
    write_stroke(out, &p.stroke, p.stroke_width);
    out.push_str("/>\n");
}

fn write_text(out: &mut String, t: &TextPayload) {
    let baseline = match t.baseline {
        TextBaseline::Middle => "middle",
        TextBaseline::Alphabetic => "alphabetic",
        TextBaseline::Hanging => "hanging",
        TextBaseline::Ideographic => "ideographic",
    };
    let anchor = match t.anchor {
        TextAnchor::Start => "start",
        TextAnchor::Middle => "middle",
        TextAnchor::End => "end",
    };
    let _ = write!(
        out,
        r#"<text x="{}" y="{}" font-size="{}" font-weight="{}" dominant-baseline="{baseline}" text-anchor="{anchor}""#,
        t.pos.x, t.pos.y, t.font_size, t.font_weight.0
    );
    if t.angle != 0.0 {
        let _ = write!(
            out,
            r#" transform="rotate({} {} {})""#,
            t.angle, t.pos.x, t.pos.y
        );
    }
    write_paint_attr(out, "fill", &t.fill);
    let _ = writeln!(out, ">{}</text>", escape_xml(&t.text));
}

fn write_stroke(out: &mut String, brush: &Brush, width: f64) {
    if width > 0.0 {
        write_paint_attr(out, "stroke", brush);
        let _ = write!(out, r#" stroke-width="{width}""#);
    }
}
fn svg_paint(brush: &Brush) -> (String, Option<f64>) {
    match brush {
        Brush::Solid(color) => {
            let rgba = color.to_rgba8();
            if rgba.a == 0 {
                return ("none".to_owned(), None);
            }
            let fill = format!("#{:02x}{:02x}{:02x}", rgba.r, rgba.g, rgba.b);
            let opacity = if rgba.a == 255 {
                None
            } else {
                Some(f64::from(rgba.a) / 255.0)
            };
            (fill, opacity)
        }
        _ => ("none".to_owned(), None),
    }
}

fn write_paint_attr(out: &mut String, name: &str, brush: &Brush) {
    let (value, opacity) = svg_paint(brush);
    let _ = write!(out, r#" {name}="{value}""#);
    if let Some(o) = opacity {
        let _ = write!(out, r#" {name}-opacity="{o:.3}""#);
    }
}

pub(crate) fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use kurbo::BezPath;
    use peniko::Color;
    use streamgraph_core::Scene;

    use super::*;

    #[test]
    fn mirrors_scene_diffs() {
        let mut scene = Scene::new();
        let mut svg = SvgScene::default();
        let rect = Mark::builder(MarkId(1))
            .rect(Rect::new(0.0, 0.0, 18.0, 18.0))
            .corner_radius(3.0)
            .fill(Color::from_rgb8(0xe4, 0x1a, 0x1c))
            .build();
        svg.apply_diffs(&scene.tick([rect]));
        assert_eq!(svg.len(), 1);
        let out = svg.to_svg_string();
        assert!(out.contains(r#"rx="3""#), "{out}");
        assert!(out.contains(r##"fill="#e41a1c""##), "{out}");

        svg.apply_diffs(&scene.clear());
        assert_eq!(svg.len(), 0);
    }

    #[test]
    fn transparent_fill_is_none_and_text_is_escaped() {
        let mut svg = SvgScene::default();
        svg.insert_marks(vec![
            Mark::builder(MarkId(1))
                .path(BezPath::new())
                .fill(Color::TRANSPARENT)
                .build(),
            Mark::builder(MarkId(2)).text((0.0, 0.0), "a < b").build(),
        ]);
        let out = svg.to_svg_string();
        assert!(out.contains(r#"fill="none""#), "{out}");
        assert!(out.contains("a &lt; b"), "{out}");
    }
}
