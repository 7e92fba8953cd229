// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The hover tooltip overlay.
//!
//! A [`Tooltip`] is owned by the host and handed to the view by `&mut` on pointer events. It is
//! created lazily on first hover ([`Tooltip::ensure`]) and then reused: `show` replaces its
//! content, `hide` discards it.

use kurbo::{Point, Rect, Vec2};
use peniko::Color;
use streamgraph_core::{FontWeight, Mark, MarkId, TextBaseline};

use crate::config::TooltipConfig;
use crate::layout::Size;
use crate::measure::TextMeasurer;
use crate::mini_chart::MiniBarChart;
use crate::z_order;

/// Gap between the title line and the chart.
const TITLE_GAP: f64 = 8.0;

/// What the tooltip shows for a hovered series.
#[derive(Clone, Debug, PartialEq)]
pub struct TooltipContent {
    /// Hovered series name.
    pub series: String,
    /// Full title line (`"<series> Hashtag Usage Over Time"`).
    pub title: String,
    /// The series' bar chart.
    pub chart: MiniBarChart,
}

impl TooltipContent {
    /// Builds the content for `series`.
    pub fn new(series: impl Into<String>, chart: MiniBarChart) -> Self {
        let series = series.into();
        let title = format!("{series} {}", Self::TITLE_SUFFIX);
        Self {
            series,
            title,
            chart,
        }
    }

    /// Text following the (bold) series name in the title.
    pub const TITLE_SUFFIX: &'static str = "Hashtag Usage Over Time";
}

/// A floating overlay with a title and a [`MiniBarChart`].
#[derive(Clone, Debug)]
pub struct Tooltip {
    config: TooltipConfig,
    visible: bool,
    position: Point,
    content: Option<TooltipContent>,
}

impl Tooltip {
    /// The overlay's fixed identifier; hosts use it as the element id.
    pub const ID: &'static str = "streamgraph-tooltip";

    /// Creates a hidden, empty tooltip.
    pub fn new(config: TooltipConfig) -> Self {
        Self {
            config,
            visible: false,
            position: Point::ZERO,
            content: None,
        }
    }

    /// Returns the tooltip in `slot`, creating it on first use.
    pub fn ensure<'a>(slot: &'a mut Option<Self>, config: &TooltipConfig) -> &'a mut Self {
        slot.get_or_insert_with(|| Self::new(config.clone()))
    }

    /// Styling and chart settings.
    pub fn config(&self) -> &TooltipConfig {
        &self.config
    }

    /// Shows `content` offset from the pointer's page position.
    pub fn show(&mut self, content: TooltipContent, page: Point) {
        self.position = page + Vec2::new(self.config.offset_x, self.config.offset_y);
        tracing::trace!(series = %content.series, x = self.position.x, y = self.position.y, "tooltip shown");
        self.content = Some(content);
        self.visible = true;
    }

    /// Follows the pointer while shown; ignored while hidden.
    pub fn move_to(&mut self, page: Point) {
        if self.visible {
            self.position = page + Vec2::new(self.config.offset_x, self.config.offset_y);
        }
    }

    /// Hides the tooltip and discards its content.
    pub fn hide(&mut self) {
        if self.visible || self.content.is_some() {
            tracing::trace!("tooltip hidden");
        }
        self.visible = false;
        self.content = None;
    }

    /// Whether the tooltip is shown.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Top-left corner in page coordinates.
    pub fn position(&self) -> Point {
        self.position
    }

    /// Current content, if any.
    pub fn content(&self) -> Option<&TooltipContent> {
        self.content.as_ref()
    }

    fn title_height(&self) -> f64 {
        self.config.title_font_size + TITLE_GAP
    }

    /// Outer size of the panel for the current content.
    pub fn size(&self, measurer: &impl TextMeasurer) -> Size {
        let Some(content) = &self.content else {
            return Size::default();
        };
        let pad = self.config.padding;
        let (title_w, _) =
            measurer.measure(&content.title, self.config.title_font_size, FontWeight::BOLD);
        let chart = content.chart.size();
        Size {
            width: 2.0 * pad + title_w.max(chart.width),
            height: 2.0 * pad + self.title_height() + chart.height,
        }
    }

    /// Lowers the visible tooltip into marks (shadow, panel, title, chart).
    ///
    /// Returns nothing while hidden.
    pub fn marks(&self, measurer: &impl TextMeasurer, id_base: MarkId) -> Vec<Mark> {
        let (true, Some(content)) = (self.visible, &self.content) else {
            return Vec::new();
        };
        let c = &self.config;
        let size = self.size(measurer);
        let panel = Rect::from_origin_size(self.position, (size.width, size.height));
        let shadow_alpha = c.shadow_alpha.clamp(0.0, 1.0);
        #[allow(clippy::cast_possible_truncation, reason = "alpha is clamped to [0, 1]")]
        let shadow = Color::BLACK.with_alpha(shadow_alpha as f32);
        let z = |layer: i32| c.z_index.saturating_add(layer);

        let mut out = vec![
            Mark::builder(id_base)
                .z_index(z(z_order::TOOLTIP_SHADOW))
                .rect(panel + Vec2::new(0.0, c.shadow_dy))
                .corner_radius(c.corner_radius)
                .fill(shadow)
                .build(),
            Mark::builder(id_base.offset(1))
                .z_index(z(z_order::TOOLTIP_PANEL))
                .rect(panel)
                .corner_radius(c.corner_radius)
                .fill(c.background.color())
                .stroke(c.border.color(), 1.0)
                .build(),
        ];

        let title_pos = Point::new(panel.x0 + c.padding, panel.y0 + c.padding);
        let (name_w, _) =
            measurer.measure(&content.series, c.title_font_size, FontWeight::BOLD);
        let (space_w, _) = measurer.measure(" ", c.title_font_size, FontWeight::NORMAL);
        out.push(
            Mark::builder(id_base.offset(2))
                .z_index(z(z_order::TOOLTIP_CONTENT))
                .text(title_pos, content.series.clone())
                .font_size(c.title_font_size)
                .font_weight(FontWeight::BOLD)
                .baseline(TextBaseline::Hanging)
                .fill(Color::BLACK)
                .build(),
        );
        out.push(
            Mark::builder(id_base.offset(3))
                .z_index(z(z_order::TOOLTIP_CONTENT))
                .text(
                    title_pos + Vec2::new(name_w + space_w, 0.0),
                    TooltipContent::TITLE_SUFFIX,
                )
                .font_size(c.title_font_size)
                .baseline(TextBaseline::Hanging)
                .fill(Color::BLACK)
                .build(),
        );

        let chart_origin = title_pos + Vec2::new(0.0, self.title_height());
        out.extend(
            content
                .chart
                .marks(chart_origin, id_base.offset(100), z(z_order::TOOLTIP_CONTENT)),
        );
        out
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use streamgraph_core::MarkPayload;

    use super::*;
    use crate::config::MiniChartConfig;
    use crate::measure::HeuristicTextMeasurer;

    fn content() -> TooltipContent {
        let chart = MiniBarChart::new(
            &MiniChartConfig::default(),
            Color::from_rgb8(0x98, 0x4e, 0xa3),
            &[NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()],
            &[4.0],
        );
        TooltipContent::new("Claude", chart)
    }

    #[test]
    fn ensure_creates_once() {
        let mut slot = None;
        Tooltip::ensure(&mut slot, &TooltipConfig::default()).show(content(), Point::ZERO);
        let again = Tooltip::ensure(&mut slot, &TooltipConfig::default());
        assert!(again.is_visible());
    }

    #[test]
    fn show_offsets_from_the_pointer_and_hide_discards() {
        let mut tip = Tooltip::new(TooltipConfig::default());
        tip.show(content(), Point::new(100.0, 50.0));
        assert_eq!(tip.position(), Point::new(120.0, 40.0));
        assert_eq!(
            tip.content().map(|c| c.title.as_str()),
            Some("Claude Hashtag Usage Over Time")
        );

        tip.hide();
        assert!(!tip.is_visible());
        assert!(tip.content().is_none());
        assert!(tip.marks(&HeuristicTextMeasurer, MarkId(0)).is_empty());
        // Idempotent.
        tip.hide();
        assert!(!tip.is_visible());
    }

    #[test]
    fn marks_draw_panel_title_and_chart() {
        let mut tip = Tooltip::new(TooltipConfig::default());
        tip.show(content(), Point::new(0.0, 10.0));
        let marks = tip.marks(&HeuristicTextMeasurer, MarkId(9000));
        let MarkPayload::Rect(panel) = &marks[1].payload else {
            panic!("expected the panel rect");
        };
        assert_eq!(panel.corner_radius, 8.0);
        assert!(panel.rect.width() >= 320.0 + 24.0);
        let bars = marks
            .iter()
            .filter(|m| matches!(m.payload, MarkPayload::Rect(_)))
            .count();
        // Shadow, panel, one bar.
        assert_eq!(bars, 3);
    }

    #[test]
    fn marks_stack_above_the_configured_z_index() {
        let config = TooltipConfig {
            z_index: 50,
            ..TooltipConfig::default()
        };
        let mut tip = Tooltip::new(config);
        tip.show(content(), Point::ZERO);
        let marks = tip.marks(&HeuristicTextMeasurer, MarkId(0));
        assert_eq!(marks[0].z_index, 50);
        assert_eq!(marks[1].z_index, 51);
        assert!(marks[2..].iter().all(|m| m.z_index == 60));
    }
}
