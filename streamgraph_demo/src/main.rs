// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Streamgraph demo host.
//!
//! Usage: `streamgraph_demo [rows.json] [config.json]`
//!
//! Renders the streamgraph for the given rows (or a built-in year of sample data), simulates a
//! hover over the widest series, and writes `streamgraph_demo.html` plus the tooltip as a
//! standalone `streamgraph_tooltip.svg`.

mod html;
mod svg;

use anyhow::{Context as _, Result};
use chrono::NaiveDate;
use kurbo::{Point, Rect};
use streamgraph_charts::{
    PointerEvent, Row, StreamGraphConfig, StreamGraphView, Tooltip, rows_from_json,
};
use tracing::{info, warn};
use tracing_subscriber::layer::SubscriberExt as _;
use tracing_subscriber::util::SubscriberInitExt as _;

const SERIES: [&str; 5] = ["GPT-4", "Gemini", "PaLM-2", "Claude", "LLaMA-3.1"];

/// Monthly hashtag counts for 2024, one row per series in `SERIES` order.
const SAMPLE: [[f64; 12]; 5] = [
    [42.0, 48.0, 55.0, 61.0, 58.0, 52.0, 47.0, 50.0, 57.0, 63.0, 60.0, 54.0],
    [12.0, 18.0, 31.0, 36.0, 33.0, 29.0, 27.0, 30.0, 35.0, 41.0, 44.0, 47.0],
    [20.0, 19.0, 17.0, 15.0, 12.0, 10.0, 9.0, 8.0, 6.0, 5.0, 4.0, 3.0],
    [9.0, 11.0, 16.0, 22.0, 26.0, 31.0, 34.0, 33.0, 37.0, 40.0, 43.0, 49.0],
    [0.0, 0.0, 2.0, 5.0, 9.0, 14.0, 25.0, 29.0, 27.0, 24.0, 22.0, 21.0],
];

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "streamgraph_demo=info,streamgraph_charts=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut args = std::env::args().skip(1);
    let rows = match args.next() {
        Some(path) => load_rows(&path)?,
        None => sample_rows()?,
    };
    let config = match args.next() {
        Some(path) => load_config(&path)?,
        None => StreamGraphConfig::default(),
    };
    info!(rows = rows.len(), series = config.series.len(), "loaded input");

    let mut view = StreamGraphView::new(config).context("invalid view configuration")?;
    let diffs = view
        .update(Some(&rows))
        .context("rows do not satisfy the streamgraph input contract")?;

    let mut surface = svg::SvgScene::default();
    surface.set_view_box(surface_bounds(&view));
    surface.apply_diffs(&diffs);
    info!(marks = surface.len(), diffs = diffs.len(), "surface rendered");

    let mut tooltip: Option<Tooltip> = None;
    let note = match hover_point(&view) {
        Some((series, p)) => match view.pointer_move(PointerEvent::at(p), &mut tooltip) {
            Some(hovered) => format!("Simulated hover over {hovered} at ({:.0}, {:.0}).", p.x, p.y),
            None => {
                warn!(%series, x = p.x, y = p.y, "simulated hover missed every region");
                "Simulated hover missed every region.".to_owned()
            }
        },
        None => "Nothing to hover.".to_owned(),
    };

    let overlay = tooltip.as_ref().map(html::tooltip_html).unwrap_or_default();
    let page = html::render_page(
        "Hashtag usage by language model",
        &surface.to_svg_string(),
        &overlay,
        &note,
    );
    std::fs::write("streamgraph_demo.html", page).context("write streamgraph_demo.html")?;
    info!("wrote streamgraph_demo.html");

    if let Some(svg) = tooltip.as_ref().and_then(html::tooltip_svg) {
        std::fs::write("streamgraph_tooltip.svg", svg).context("write streamgraph_tooltip.svg")?;
        info!("wrote streamgraph_tooltip.svg");
    }
    Ok(())
}

fn load_rows(path: &str) -> Result<Vec<Row>> {
    let json = std::fs::read_to_string(path).with_context(|| format!("read rows from {path}"))?;
    rows_from_json(&json).with_context(|| format!("parse rows in {path}"))
}

fn load_config(path: &str) -> Result<StreamGraphConfig> {
    let json =
        std::fs::read_to_string(path).with_context(|| format!("read config from {path}"))?;
    StreamGraphConfig::from_json_str(&json).with_context(|| format!("load config {path}"))
}

fn sample_rows() -> Result<Vec<Row>> {
    (0..12_u32)
        .map(|month| {
            let date = NaiveDate::from_ymd_opt(2024, month + 1, 1)
                .with_context(|| format!("sample month {month}"))?;
            Ok(SERIES
                .iter()
                .zip(SAMPLE.iter())
                .fold(Row::new(date), |row, (name, values)| {
                    row.with(*name, values[month as usize])
                }))
        })
        .collect()
}

/// The surface plus the legend to its right.
fn surface_bounds(view: &StreamGraphView) -> Rect {
    let c = view.config();
    let base = Rect::new(0.0, 0.0, c.width, c.height);
    match view.frame().and_then(|f| f.layout.legend) {
        Some(legend) => base.union(legend.inflate(0.0, 4.0)),
        None => base,
    }
}

/// Picks the middle sample of the series with the largest total.
fn hover_point(view: &StreamGraphView) -> Option<(String, Point)> {
    let frame = view.frame()?;
    let region = frame.regions.iter().max_by(|a, b| {
        let sa: f64 = a.values.iter().sum();
        let sb: f64 = b.values.iter().sum();
        sa.total_cmp(&sb)
    })?;
    let mid = region.points.get(region.points.len() / 2)?;
    Some((
        region.name.clone(),
        Point::new(mid.x, 0.5 * (mid.y0 + mid.y1)),
    ))
}
