// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! View configuration.
//!
//! Every field is optional in JSON; missing fields take the defaults of the hashtag-usage
//! streamgraph (a 600×500 surface, wiggle offset, basis curve, five model series).

use peniko::Color;
use serde::{Deserialize, Serialize};
use streamgraph_stack::StackOffset;

use crate::curve::Curve;
use crate::error::ConfigError;
use crate::layout::{Margin, Size};
use crate::series::SeriesDef;

/// A color that (de)serializes as a `#rgb` or `#rrggbb` hex string.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexColor(pub Color);

impl HexColor {
    /// Parses `#rgb` or `#rrggbb` (the leading `#` is optional).
    pub fn parse(s: &str) -> Result<Self, ConfigError> {
        let invalid = || ConfigError::InvalidColor(s.to_owned());
        let hex = s.trim().trim_start_matches('#');
        if !hex.is_ascii() {
            return Err(invalid());
        }
        let channel = |digits: &str| u8::from_str_radix(digits, 16).map_err(|_| invalid());
        let (r, g, b) = match hex.len() {
            3 => {
                let expand = |i: usize| channel(&hex[i..=i]).map(|v| v * 17);
                (expand(0)?, expand(1)?, expand(2)?)
            }
            6 => (channel(&hex[0..2])?, channel(&hex[2..4])?, channel(&hex[4..6])?),
            _ => return Err(invalid()),
        };
        Ok(Self(Color::from_rgb8(r, g, b)))
    }

    /// Returns the color.
    pub fn color(self) -> Color {
        self.0
    }

    /// Formats the color as `#rrggbb`.
    pub fn to_hex(self) -> String {
        let c = self.0.to_rgba8();
        format!("#{:02x}{:02x}{:02x}", c.r, c.g, c.b)
    }
}

impl TryFrom<String> for HexColor {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<HexColor> for String {
    fn from(value: HexColor) -> Self {
        value.to_hex()
    }
}

/// Baseline offset of the stack.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OffsetMode {
    /// Streamgraph baseline.
    #[default]
    Wiggle,
    /// Centered around zero.
    Silhouette,
    /// Stacked from zero.
    Zero,
    /// Normalized to `[0, 1]`.
    Expand,
}

impl From<OffsetMode> for StackOffset {
    fn from(value: OffsetMode) -> Self {
        match value {
            OffsetMode::Wiggle => Self::Wiggle,
            OffsetMode::Silhouette => Self::Silhouette,
            OffsetMode::Zero => Self::Zero,
            OffsetMode::Expand => Self::Expand,
        }
    }
}

/// How an update is applied to the scene.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RedrawMode {
    /// Exit every previous mark, then enter the new frame.
    #[default]
    Replace,
    /// Patch the scene, reporting only marks that changed.
    Diff,
}

/// Legend block settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LegendConfig {
    /// Heading text.
    pub title: String,
    /// Gap between the right edge of the surface and the legend.
    pub offset_x: f64,
    /// Top of the legend block.
    pub top: f64,
    /// Swatch edge length.
    pub swatch_size: f64,
    /// Swatch corner radius.
    pub swatch_radius: f64,
    /// Vertical gap between rows.
    pub row_gap: f64,
    /// Gap between swatch and label.
    pub label_dx: f64,
    /// Label font size.
    pub font_size: f64,
    /// Heading font size.
    pub title_font_size: f64,
}

impl Default for LegendConfig {
    fn default() -> Self {
        Self {
            title: "Legend".to_owned(),
            offset_x: 20.0,
            top: 10.0,
            swatch_size: 18.0,
            swatch_radius: 3.0,
            row_gap: 6.0,
            label_dx: 8.0,
            font_size: 14.0,
            title_font_size: 16.0,
        }
    }
}

/// Tooltip mini bar chart settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MiniChartConfig {
    /// Outer width.
    pub width: f64,
    /// Outer height.
    pub height: f64,
    /// Margins around the bar plot.
    pub margin: Margin,
    /// Inner and outer band padding.
    pub band_padding: f64,
    /// Approximate tick count of the value axis.
    pub y_tick_count: usize,
}

impl Default for MiniChartConfig {
    fn default() -> Self {
        Self {
            width: 320.0,
            height: 180.0,
            margin: Margin {
                top: 30.0,
                right: 20.0,
                bottom: 50.0,
                left: 50.0,
            },
            band_padding: 0.3,
            y_tick_count: 4,
        }
    }
}

impl MiniChartConfig {
    /// Size of the bar plot inside the margins.
    pub fn plot_size(&self) -> Size {
        Size {
            width: self.width - self.margin.left - self.margin.right,
            height: self.height - self.margin.top - self.margin.bottom,
        }
    }
}

/// Tooltip overlay settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TooltipConfig {
    /// Horizontal offset from the pointer's page position.
    pub offset_x: f64,
    /// Vertical offset from the pointer's page position.
    pub offset_y: f64,
    /// Inner padding of the panel.
    pub padding: f64,
    /// Panel corner radius.
    pub corner_radius: f64,
    /// Panel border color.
    pub border: HexColor,
    /// Panel background color.
    pub background: HexColor,
    /// Opacity of the drop shadow.
    pub shadow_alpha: f64,
    /// Vertical offset of the drop shadow.
    pub shadow_dy: f64,
    /// Blur radius of the drop shadow.
    pub shadow_blur: f64,
    /// Stacking order of the overlay.
    pub z_index: i32,
    /// Title font size.
    pub title_font_size: f64,
    /// The mini bar chart.
    pub mini: MiniChartConfig,
}

impl Default for TooltipConfig {
    fn default() -> Self {
        Self {
            offset_x: 20.0,
            offset_y: -10.0,
            padding: 12.0,
            corner_radius: 8.0,
            border: HexColor(Color::from_rgb8(0xcc, 0xcc, 0xcc)),
            background: HexColor(Color::from_rgb8(0xff, 0xff, 0xff)),
            shadow_alpha: 0.15,
            shadow_dy: 2.0,
            shadow_blur: 8.0,
            z_index: 1000,
            title_font_size: 13.0,
            mini: MiniChartConfig::default(),
        }
    }
}

/// Configuration of a [`crate::StreamGraphView`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StreamGraphConfig {
    /// Surface width.
    pub width: f64,
    /// Surface height.
    pub height: f64,
    /// Margins around the plot.
    pub margin: Margin,
    /// Approximate tick count of the time axis.
    pub x_tick_count: usize,
    /// Approximate tick count of the value axis.
    pub y_tick_count: usize,
    /// Interpolation of region boundaries.
    pub curve: Curve,
    /// Stack baseline offset.
    pub offset: OffsetMode,
    /// Region outline color.
    pub stroke: HexColor,
    /// Region outline width.
    pub stroke_width: f64,
    /// Region fill opacity.
    pub fill_opacity: f64,
    /// How updates are applied to the scene.
    pub redraw: RedrawMode,
    /// Tracked series, bottom of the stack first.
    pub series: Vec<SeriesDef>,
    /// Legend settings.
    pub legend: LegendConfig,
    /// Tooltip settings.
    pub tooltip: TooltipConfig,
}

impl Default for StreamGraphConfig {
    fn default() -> Self {
        Self {
            width: 600.0,
            height: 500.0,
            margin: Margin {
                top: 40.0,
                right: 120.0,
                bottom: 40.0,
                left: 60.0,
            },
            x_tick_count: 6,
            y_tick_count: 10,
            curve: Curve::Basis,
            offset: OffsetMode::Wiggle,
            stroke: HexColor(Color::from_rgb8(0x22, 0x22, 0x22)),
            stroke_width: 1.0,
            fill_opacity: 0.9,
            redraw: RedrawMode::Replace,
            series: SeriesDef::hashtag_models(),
            legend: LegendConfig::default(),
            tooltip: TooltipConfig::default(),
        }
    }
}

impl StreamGraphConfig {
    /// Parses and validates a JSON configuration.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Size of the plot inside the margins.
    pub fn plot_size(&self) -> Size {
        Size {
            width: self.width - self.margin.left - self.margin.right,
            height: self.height - self.margin.top - self.margin.bottom,
        }
    }

    /// Checks value ranges and series uniqueness.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let plot = self.plot_size();
        if !(plot.width > 0.0 && plot.height > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "plot area must be positive, got {}x{}",
                plot.width, plot.height
            )));
        }
        if self.series.is_empty() {
            return Err(ConfigError::Invalid("at least one series is required".into()));
        }
        for (i, s) in self.series.iter().enumerate() {
            if s.name.is_empty() {
                return Err(ConfigError::Invalid(format!("series {i} has an empty name")));
            }
            if self.series[..i].iter().any(|prev| prev.name == s.name) {
                return Err(ConfigError::Invalid(format!(
                    "duplicate series name `{}`",
                    s.name
                )));
            }
        }
        if !(0.0..=1.0).contains(&self.fill_opacity) {
            return Err(ConfigError::Invalid(format!(
                "fill_opacity must be in [0, 1], got {}",
                self.fill_opacity
            )));
        }
        if !(self.stroke_width >= 0.0 && self.stroke_width.is_finite()) {
            return Err(ConfigError::Invalid(format!(
                "stroke_width must be non-negative, got {}",
                self.stroke_width
            )));
        }
        let mini = &self.tooltip.mini;
        let mini_plot = mini.plot_size();
        if !(mini_plot.width > 0.0 && mini_plot.height > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "tooltip chart area must be positive, got {}x{}",
                mini_plot.width, mini_plot.height
            )));
        }
        if !(0.0..1.0).contains(&mini.band_padding) {
            return Err(ConfigError::Invalid(format!(
                "band_padding must be in [0, 1), got {}",
                mini.band_padding
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_hashtag_chart() {
        let c = StreamGraphConfig::default();
        assert_eq!(c.plot_size(), Size { width: 420.0, height: 420.0 });
        assert_eq!(c.series.len(), 5);
        assert_eq!(c.stroke.to_hex(), "#222222");
        assert!(c.validate().is_ok());
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let c = StreamGraphConfig::from_json_str(
            r#"{ "width": 800, "curve": "linear", "offset": "silhouette", "legend": { "title": "Models" } }"#,
        )
        .unwrap();
        assert_eq!(c.width, 800.0);
        assert_eq!(c.height, 500.0);
        assert_eq!(c.curve, Curve::Linear);
        assert_eq!(StackOffset::from(c.offset), StackOffset::Silhouette);
        assert_eq!(c.legend.title, "Models");
        assert_eq!(c.legend.swatch_size, 18.0);
        assert_eq!(c.tooltip.mini.width, 320.0);
    }

    #[test]
    fn series_colors_parse_short_and_long_hex() {
        let c = StreamGraphConfig::from_json_str(
            r##"{ "series": [ { "name": "A", "color": "#f00" }, { "name": "B", "color": "00ff00" } ] }"##,
        )
        .unwrap();
        assert_eq!(c.series[0].color.to_hex(), "#ff0000");
        assert_eq!(c.series[1].color.to_hex(), "#00ff00");
    }

    #[test]
    fn invalid_configs_are_rejected() {
        for json in [
            r#"{ "width": 100 }"#,
            r#"{ "series": [] }"#,
            r##"{ "series": [ { "name": "A", "color": "#000" }, { "name": "A", "color": "#fff" } ] }"##,
            r#"{ "fill_opacity": 1.5 }"#,
            r#"{ "stroke_width": -1 }"#,
            r#"{ "tooltip": { "mini": { "height": 60 } } }"#,
        ] {
            assert!(
                matches!(StreamGraphConfig::from_json_str(json), Err(ConfigError::Invalid(_))),
                "{json}"
            );
        }
    }

    #[test]
    fn bad_color_and_unknown_field_are_json_errors() {
        assert!(matches!(
            StreamGraphConfig::from_json_str(r##"{ "stroke": "#12" }"##),
            Err(ConfigError::Json(_))
        ));
        assert!(matches!(
            StreamGraphConfig::from_json_str(r#"{ "colour": "red" }"#),
            Err(ConfigError::Json(_))
        ));
        // Series are always stacked in configured order.
        assert!(matches!(
            StreamGraphConfig::from_json_str(r#"{ "order": "reverse" }"#),
            Err(ConfigError::Json(_))
        ));
        assert!(matches!(
            HexColor::parse("#zzzzzz"),
            Err(ConfigError::InvalidColor(_))
        ));
    }
}
