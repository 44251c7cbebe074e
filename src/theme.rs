//! Color theme for dashboard components.
//!
//! Colors are written either as `#RRGGBB` hex strings or as 256-color palette
//! indices (`"42"`), so a theme can be declared inline in the dashboard YAML.

use ratatui::style::Color;
use serde::{Deserialize, Serialize};

/// Theme configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    /// Theme name.
    #[serde(default = "default_name")]
    pub name: String,

    /// Title text color.
    #[serde(default = "default_title")]
    pub title: String,

    /// Scatter point and axis color.
    #[serde(default = "default_scatter")]
    pub scatter: String,

    /// Histogram bar color.
    #[serde(default = "default_bar")]
    pub bar: String,

    /// Histogram alert bin color.
    #[serde(default = "default_alert")]
    pub alert: String,

    /// Radar axis and outer ring color.
    #[serde(default = "default_axis")]
    pub axis: String,

    /// Radar data polygon color.
    #[serde(default = "default_bar")]
    pub data: String,

    /// Table header background.
    #[serde(default = "default_header_fill")]
    pub header_fill: String,

    /// Table header text.
    #[serde(default = "default_header_text")]
    pub header_text: String,

    /// Colors cycled across pie slices. Funnels keep their own indexed palette.
    #[serde(default = "default_segments")]
    pub segments: Vec<String>,
}

fn default_name() -> String {
    "default".to_string()
}
fn default_title() -> String {
    "2".to_string()
}
fn default_scatter() -> String {
    "45".to_string()
}
fn default_bar() -> String {
    "42".to_string()
}
fn default_alert() -> String {
    "1".to_string()
}
fn default_axis() -> String {
    "240".to_string()
}
fn default_header_fill() -> String {
    "0".to_string()
}
fn default_header_text() -> String {
    "15".to_string()
}
fn default_segments() -> Vec<String> {
    ["42", "197", "214", "255", "39", "45", "51", "57", "63"]
        .iter()
        .map(ToString::to_string)
        .collect()
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            name: default_name(),
            title: default_title(),
            scatter: default_scatter(),
            bar: default_bar(),
            alert: default_alert(),
            axis: default_axis(),
            data: default_bar(),
            header_fill: default_header_fill(),
            header_text: default_header_text(),
            segments: default_segments(),
        }
    }
}

impl Theme {
    /// Creates a new default theme.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Title color.
    #[must_use]
    pub fn title_color(&self) -> Color {
        parse_color(&self.title)
    }

    /// Scatter color.
    #[must_use]
    pub fn scatter_color(&self) -> Color {
        parse_color(&self.scatter)
    }

    /// Histogram bar color.
    #[must_use]
    pub fn bar_color(&self) -> Color {
        parse_color(&self.bar)
    }

    /// Histogram alert color.
    #[must_use]
    pub fn alert_color(&self) -> Color {
        parse_color(&self.alert)
    }

    /// Radar axis color.
    #[must_use]
    pub fn axis_color(&self) -> Color {
        parse_color(&self.axis)
    }

    /// Radar data color.
    #[must_use]
    pub fn data_color(&self) -> Color {
        parse_color(&self.data)
    }

    /// Table header fill.
    #[must_use]
    pub fn header_fill_color(&self) -> Color {
        parse_color(&self.header_fill)
    }

    /// Table header text.
    #[must_use]
    pub fn header_text_color(&self) -> Color {
        parse_color(&self.header_text)
    }

    /// Segment palette; never empty.
    #[must_use]
    pub fn segment_colors(&self) -> Vec<Color> {
        if self.segments.is_empty() {
            return default_segments().iter().map(|c| parse_color(c)).collect();
        }
        self.segments.iter().map(|c| parse_color(c)).collect()
    }
}

/// Parses `#RRGGBB` or a palette index into a ratatui [`Color`].
///
/// Unparsable input falls back to white.
#[must_use]
pub fn parse_color(value: &str) -> Color {
    let value = value.trim();

    if let Some(hex) = value.strip_prefix('#') {
        if hex.len() != 6 || !hex.is_ascii() {
            return Color::White;
        }
        let r = u8::from_str_radix(&hex[0..2], 16).unwrap_or(255);
        let g = u8::from_str_radix(&hex[2..4], 16).unwrap_or(255);
        let b = u8::from_str_radix(&hex[4..6], 16).unwrap_or(255);
        return Color::Rgb(r, g, b);
    }

    value.parse::<u8>().map_or(Color::White, Color::Indexed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_color("#FF0000"), Color::Rgb(255, 0, 0));
        assert_eq!(parse_color("#00ff00"), Color::Rgb(0, 255, 0));
    }

    #[test]
    fn test_parse_indexed_color() {
        assert_eq!(parse_color("42"), Color::Indexed(42));
        assert_eq!(parse_color(" 197 "), Color::Indexed(197));
    }

    #[test]
    fn test_parse_invalid_color() {
        assert_eq!(parse_color("#12"), Color::White);
        assert_eq!(parse_color("300"), Color::White);
        assert_eq!(parse_color("teal"), Color::White);
    }

    #[test]
    fn test_theme_defaults() {
        let theme = Theme::new();
        assert_eq!(theme.name, "default");
        assert_eq!(theme.bar_color(), Color::Indexed(42));
        assert_eq!(theme.alert_color(), Color::Indexed(1));
        assert_eq!(theme.segment_colors().len(), 9);
    }

    #[test]
    fn test_empty_segments_fall_back() {
        let theme = Theme {
            segments: Vec::new(),
            ..Theme::default()
        };
        assert_eq!(theme.segment_colors()[0], Color::Indexed(42));
    }
}
