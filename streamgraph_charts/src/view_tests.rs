// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use chrono::NaiveDate;
use kurbo::Point;
use streamgraph_core::{MarkDiff, MarkPayload};
use streamgraph_stack::layers_extent;

use crate::view::ID_GROUP_SPAN;
use crate::{
    PointerEvent, RedrawMode, Row, StreamGraphConfig, StreamGraphError, StreamGraphView, Tooltip,
    date_to_seconds,
};

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn example_rows() -> Vec<Row> {
    vec![
        Row::new(ymd(2024, 1, 1))
            .with("GPT-4", 10.0)
            .with("Gemini", 5.0)
            .with("PaLM-2", 2.0)
            .with("Claude", 1.0)
            .with("LLaMA-3.1", 0.0),
        Row::new(ymd(2024, 2, 1))
            .with("GPT-4", 12.0)
            .with("Gemini", 6.0)
            .with("PaLM-2", 3.0)
            .with("Claude", 2.0)
            .with("LLaMA-3.1", 1.0),
    ]
}

fn rendered_view() -> StreamGraphView {
    let mut view = StreamGraphView::default();
    view.update(Some(&example_rows())).unwrap();
    view
}

/// A point inside the region of `series`, halfway along x and halfway between its boundaries.
fn inside(view: &StreamGraphView, series: &str) -> Point {
    let frame = view.frame().unwrap();
    let region = frame.regions.iter().find(|r| r.name == series).unwrap();
    let (a, b) = (region.points[0], region.points[1]);
    let top = 0.5 * (a.y1 + b.y1);
    let bottom = 0.5 * (a.y0 + b.y0);
    Point::new(0.5 * (a.x + b.x), 0.5 * (top + bottom))
}

#[test]
fn end_to_end_example() {
    let view = rendered_view();
    let frame = view.frame().unwrap();

    assert_eq!(frame.regions.len(), 5);
    assert!(frame.regions.iter().all(|r| r.points.len() == 2));
    assert_eq!(
        frame.x_scale.domain(),
        (
            date_to_seconds(ymd(2024, 1, 1)),
            date_to_seconds(ymd(2024, 2, 1))
        )
    );

    let legend: Vec<_> = view.legend_items().into_iter().map(|i| i.label).collect();
    assert_eq!(legend, vec!["LLaMA-3.1", "Claude", "PaLM-2", "Gemini", "GPT-4"]);
}

#[test]
fn one_filled_region_mark_per_series() {
    let view = rendered_view();
    let filled_paths = view
        .scene()
        .sorted()
        .into_iter()
        .filter(|(_, _, payload)| match payload {
            MarkPayload::Path(p) => p.path.elements().last() == Some(&kurbo::PathEl::ClosePath),
            _ => false,
        })
        .count();
    assert_eq!(filled_paths, 5);
}

#[test]
fn scales_cover_the_stacked_extent() {
    let view = rendered_view();
    let frame = view.frame().unwrap();
    let extent = layers_extent(&frame.layers).unwrap();
    assert_eq!(frame.y_scale.domain(), extent);
    // The wiggle baseline moves below zero, so the domain is not the raw value range.
    assert!(extent.0 < 0.0);
    assert_eq!(frame.y_scale.range(), (420.0, 0.0));
    assert_eq!(frame.x_scale.range(), (0.0, 420.0));
}

#[test]
fn empty_or_absent_rows_clear_the_surface() {
    let mut view = rendered_view();
    assert!(!view.scene().is_empty());

    let diffs = view.update(Some(&[])).unwrap();
    assert!(diffs.iter().all(|d| matches!(d, MarkDiff::Exit { .. })));
    assert!(view.scene().is_empty());
    assert!(view.frame().is_none());

    view.update(Some(&example_rows())).unwrap();
    view.update(None).unwrap();
    assert!(view.scene().is_empty());
}

#[test]
fn hover_shows_a_bar_per_row() {
    let mut view = rendered_view();
    let mut tooltip: Option<Tooltip> = None;

    let p = inside(&view, "GPT-4");
    let hovered = view.pointer_move(
        PointerEvent {
            surface: p,
            page: p + kurbo::Vec2::new(8.0, 100.0),
        },
        &mut tooltip,
    );
    assert_eq!(hovered, Some("GPT-4"));

    let tip = tooltip.as_ref().unwrap();
    assert!(tip.is_visible());
    assert_eq!(tip.position(), p + kurbo::Vec2::new(28.0, 90.0));
    let content = tip.content().unwrap();
    assert_eq!(content.title, "GPT-4 Hashtag Usage Over Time");
    assert_eq!(content.chart.bar_count(), 2);
    assert_eq!(content.chart.labels(), ["Jan", "Feb"]);
    let bars = content.chart.bars();
    assert!((bars[1].height() / bars[0].height() - 12.0 / 10.0).abs() < 1e-9);
}

#[test]
fn moving_within_a_region_keeps_the_content() {
    let mut view = rendered_view();
    let mut tooltip = None;
    let p = inside(&view, "Gemini");
    view.pointer_move(PointerEvent::at(p), &mut tooltip);
    view.pointer_move(PointerEvent::at(p + kurbo::Vec2::new(1.0, 0.0)), &mut tooltip);
    let tip = tooltip.unwrap();
    assert_eq!(tip.content().map(|c| c.series.as_str()), Some("Gemini"));
    assert_eq!(tip.position(), p + kurbo::Vec2::new(21.0, -10.0));
}

#[test]
fn leaving_hides_and_discards_the_chart() {
    let mut view = rendered_view();
    let mut tooltip = None;

    view.pointer_move(PointerEvent::at(inside(&view, "GPT-4")), &mut tooltip);
    assert!(tooltip.as_ref().is_some_and(Tooltip::is_visible));

    // Off every region.
    assert_eq!(view.pointer_move(PointerEvent::at((1.0, 1.0)), &mut tooltip), None);
    let tip = tooltip.as_ref().unwrap();
    assert!(!tip.is_visible());
    assert!(tip.content().is_none());

    view.pointer_move(PointerEvent::at(inside(&view, "Gemini")), &mut tooltip);
    view.pointer_leave(&mut tooltip);
    assert!(view.hovered().is_none());
    let tip = tooltip.as_ref().unwrap();
    assert!(!tip.is_visible());
    assert!(tip.content().is_none());
}

#[test]
fn refresh_then_moving_off_hides_the_tooltip() {
    let mut view = rendered_view();
    let mut tooltip = None;
    view.pointer_move(PointerEvent::at(inside(&view, "GPT-4")), &mut tooltip);
    view.update(Some(&example_rows())).unwrap();
    assert!(view.hovered().is_none());

    assert_eq!(view.pointer_move(PointerEvent::at((1.0, 1.0)), &mut tooltip), None);
    let tip = tooltip.as_ref().unwrap();
    assert!(!tip.is_visible());
    assert!(tip.content().is_none());
}

#[test]
fn clear_then_moving_off_hides_the_tooltip() {
    let mut view = rendered_view();
    let mut tooltip = None;
    let p = inside(&view, "GPT-4");
    view.pointer_move(PointerEvent::at(p), &mut tooltip);
    view.update(None).unwrap();

    // Nothing is drawn, so even the old hover point misses.
    assert_eq!(view.pointer_move(PointerEvent::at(p), &mut tooltip), None);
    let tip = tooltip.as_ref().unwrap();
    assert!(!tip.is_visible());
    assert!(tip.content().is_none());
}

#[test]
fn refresh_then_moving_within_the_region_shows_new_values() {
    let mut view = rendered_view();
    let mut tooltip = None;
    let p = inside(&view, "GPT-4");
    view.pointer_move(PointerEvent::at(p), &mut tooltip);

    let mut rows = example_rows();
    rows[1] = rows[1].clone().with("GPT-4", 13.0);
    view.update(Some(&rows)).unwrap();
    let p = inside(&view, "GPT-4");
    assert_eq!(view.pointer_move(PointerEvent::at(p), &mut tooltip), Some("GPT-4"));
    let content = tooltip.as_ref().and_then(Tooltip::content).unwrap();
    assert_eq!(content.chart.values(), [10.0, 13.0]);
}

#[test]
fn legend_lists_the_top_layer_first() {
    let view = rendered_view();
    let frame = view.frame().unwrap();
    let top = frame.regions.last().unwrap();
    assert_eq!(top.series, frame.regions.len() - 1);
    assert_eq!(view.legend_items()[0].label, top.name);
    // Layers are stacked in configured series order.
    assert!(frame.layers.iter().enumerate().all(|(i, l)| l.series == i));
}

#[test]
fn switching_regions_replaces_the_content() {
    let mut view = rendered_view();
    let mut tooltip = None;
    view.pointer_move(PointerEvent::at(inside(&view, "GPT-4")), &mut tooltip);
    view.pointer_move(PointerEvent::at(inside(&view, "Gemini")), &mut tooltip);
    let content = tooltip.as_ref().and_then(Tooltip::content).unwrap();
    assert_eq!(content.series, "Gemini");
    assert_eq!(content.chart.values(), [5.0, 6.0]);
}

#[test]
fn replace_mode_exits_every_prior_mark() {
    let mut view = rendered_view();
    let before = view.scene().len();
    let diffs = view.update(Some(&example_rows())).unwrap();
    let exits = diffs
        .iter()
        .filter(|d| matches!(d, MarkDiff::Exit { .. }))
        .count();
    let enters = diffs
        .iter()
        .filter(|d| matches!(d, MarkDiff::Enter { .. }))
        .count();
    assert_eq!(exits, before);
    assert_eq!(enters, before);
    assert_eq!(view.scene().len(), before);
}

#[test]
fn diff_mode_reports_only_changes() {
    let config = StreamGraphConfig {
        redraw: RedrawMode::Diff,
        ..StreamGraphConfig::default()
    };
    let mut view = StreamGraphView::new(config).unwrap();
    let rows = example_rows();
    view.update(Some(&rows)).unwrap();
    assert!(view.update(Some(&rows)).unwrap().is_empty());

    // Regions keep their ids and are patched in place; only axis ticks may come and go.
    let mut changed = rows.clone();
    changed[1] = changed[1].clone().with("LLaMA-3.1", 4.0);
    let diffs = view.update(Some(&changed)).unwrap();
    let regions = ID_GROUP_SPAN..2 * ID_GROUP_SPAN;
    let axes = 2 * ID_GROUP_SPAN..4 * ID_GROUP_SPAN;
    let region_updates = diffs
        .iter()
        .filter(|d| matches!(d, MarkDiff::Update { id, .. } if regions.contains(&id.0)))
        .count();
    assert_eq!(region_updates, 5);
    assert!(
        diffs.iter().all(|d| match d {
            MarkDiff::Update { .. } => true,
            MarkDiff::Enter { id, .. } | MarkDiff::Exit { id, .. } => axes.contains(&id.0),
        }),
        "only axis marks may enter or exit: {diffs:?}"
    );
}

#[test]
fn missing_value_is_rejected_without_touching_the_surface() {
    let mut view = rendered_view();
    let generation = view.scene().generation();
    let len = view.scene().len();

    let mut rows = example_rows();
    rows[1].values.remove("Claude");
    let err = view.update(Some(&rows)).unwrap_err();
    assert!(
        matches!(&err, StreamGraphError::MissingValue { row: 1, series } if series == "Claude"),
        "{err}"
    );
    assert_eq!(view.scene().generation(), generation);
    assert_eq!(view.scene().len(), len);
    assert!(view.frame().is_some());
}

#[test]
fn non_finite_value_is_rejected() {
    let mut view = StreamGraphView::default();
    let rows = vec![example_rows()[0].clone().with("Gemini", f64::NAN)];
    assert!(matches!(
        view.update(Some(&rows)),
        Err(StreamGraphError::NonFiniteValue { row: 0, .. })
    ));
    assert!(view.scene().is_empty());
}

#[test]
fn single_row_draws_without_panicking() {
    let mut view = StreamGraphView::default();
    view.update(Some(&example_rows()[..1])).unwrap();
    let frame = view.frame().unwrap();
    assert!(frame.regions.iter().all(|r| r.points.len() == 1));
    // A zero-width time domain maps every row to the left edge of the plot.
    assert!(frame.regions.iter().all(|r| r.points[0].x == 60.0));
}
