// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! HTML report wrapper: the surface SVG plus the tooltip overlay as a positioned element.

use std::fmt::Write as _;

use kurbo::Point;
use streamgraph_charts::{HeuristicTextMeasurer, Tooltip};
use streamgraph_core::MarkId;

use crate::svg::{SvgScene, escape_xml};

/// Renders the tooltip as an absolutely positioned `div` with the mini chart inlined as SVG.
///
/// Returns an empty string while the tooltip is hidden.
pub(crate) fn tooltip_html(tooltip: &Tooltip) -> String {
    let Some(content) = tooltip.content().filter(|_| tooltip.is_visible()) else {
        return String::new();
    };
    let c = tooltip.config();
    let size = content.chart.size();

    let mut chart = SvgScene::default();
    chart.set_view_box(kurbo::Rect::new(0.0, 0.0, size.width, size.height));
    chart.insert_marks(content.chart.marks(Point::ZERO, MarkId(0), 0));

    let pos = tooltip.position();
    let mut out = String::new();
    let _ = write!(
        out,
        concat!(
            r#"<div id="{id}" style="position:absolute;left:{x}px;top:{y}px;"#,
            "background:{bg};border:1px solid {border};border-radius:{radius}px;",
            "padding:{pad}px;box-shadow:0 {dy}px {blur}px rgba(0,0,0,{alpha});",
            r#"pointer-events:none;z-index:{z};font-family:sans-serif;">"#
        ),
        id = Tooltip::ID,
        x = pos.x,
        y = pos.y,
        bg = c.background.to_hex(),
        border = c.border.to_hex(),
        radius = c.corner_radius,
        pad = c.padding,
        dy = c.shadow_dy,
        blur = c.shadow_blur,
        alpha = c.shadow_alpha,
        z = c.z_index,
    );
    let _ = write!(
        out,
        "<div style=\"font-size:{}px\"><strong>{}</strong> {}</div>\n{}</div>\n",
        c.title_font_size,
        escape_xml(&content.series),
        streamgraph_charts::TooltipContent::TITLE_SUFFIX,
        chart.to_svg_string(),
    );
    out
}

/// Renders the tooltip as marks inside its own SVG, for hosts without an HTML layer.
pub(crate) fn tooltip_svg(tooltip: &Tooltip) -> Option<String> {
    let marks = tooltip.marks(&HeuristicTextMeasurer, MarkId(0));
    if marks.is_empty() {
        return None;
    }
    let size = tooltip.size(&HeuristicTextMeasurer);
    let pos = tooltip.position();
    let mut svg = SvgScene::default();
    svg.set_view_box(kurbo::Rect::new(
        pos.x - 4.0,
        pos.y - 4.0,
        pos.x + size.width + 4.0,
        pos.y + size.height + 12.0,
    ));
    svg.insert_marks(marks);
    Some(svg.to_svg_string())
}

/// Wraps the rendered pieces into a standalone page.
pub(crate) fn render_page(title: &str, surface_svg: &str, overlay: &str, note: &str) -> String {
    let title = escape_xml(title);
    let note = escape_xml(note);
    format!(
        r#"<!doctype html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title}</title>
<style>
  body {{ font-family: sans-serif; margin: 24px; }}
  .surface {{ position: relative; }}
  .note {{ color: #555; font-size: 13px; }}
</style>
</head>
<body>
<h1>{title}</h1>
<p class="note">{note}</p>
<div class="surface">
{surface_svg}{overlay}</div>
</body>
</html>
"#
    )
}
