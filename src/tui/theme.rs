use std::collections::HashMap;

use ratatui::style::Color;
use tracing::warn;

use crate::models::{Priority, Status};

pub const THEME_NAMES: [&str; 3] = ["classic", "midnight", "paper"];

/// Colour slots for the dashboard. One dashboard, many looks.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub name: &'static str,
    pub accent: Color,
    pub text: Color,
    pub dim: Color,
    pub border: Color,
    pub selection_bg: Color,
    pub alert: Color,
    pub notice: Color,
    pub todo: Color,
    pub in_progress: Color,
    pub completed: Color,
    pub low: Color,
    pub medium: Color,
    pub high: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Theme::classic()
    }
}

impl Theme {
    pub fn classic() -> Theme {
        Theme {
            name: "classic",
            accent: Color::Cyan,
            text: Color::Reset,
            dim: Color::Gray,
            border: Color::Reset,
            selection_bg: Color::DarkGray,
            alert: Color::Red,
            notice: Color::Green,
            todo: Color::Gray,
            in_progress: Color::Blue,
            completed: Color::Green,
            low: Color::Gray,
            medium: Color::Yellow,
            high: Color::Red,
        }
    }

    pub fn midnight() -> Theme {
        Theme {
            name: "midnight",
            accent: Color::Rgb(0xFB, 0x41, 0x96),
            text: Color::Rgb(0xB0, 0xAA, 0xFF),
            dim: Color::Rgb(0x7D, 0x78, 0xBF),
            border: Color::Rgb(0x44, 0x88, 0xFF),
            selection_bg: Color::Rgb(0x3D, 0x14, 0x38),
            alert: Color::Rgb(0xFF, 0x44, 0x44),
            notice: Color::Rgb(0x44, 0xFF, 0x88),
            todo: Color::Rgb(0xB0, 0xAA, 0xFF),
            in_progress: Color::Rgb(0x44, 0xDD, 0xFF),
            completed: Color::Rgb(0x44, 0xFF, 0x88),
            low: Color::Rgb(0x7D, 0x78, 0xBF),
            medium: Color::Rgb(0xFF, 0xD7, 0x00),
            high: Color::Rgb(0xFF, 0x44, 0x44),
        }
    }

    pub fn paper() -> Theme {
        Theme {
            name: "paper",
            accent: Color::Black,
            text: Color::Black,
            dim: Color::DarkGray,
            border: Color::DarkGray,
            selection_bg: Color::Rgb(0xDD, 0xDD, 0xDD),
            alert: Color::Rgb(0xB0, 0x00, 0x20),
            notice: Color::Rgb(0x1B, 0x5E, 0x20),
            todo: Color::DarkGray,
            in_progress: Color::Rgb(0x0D, 0x47, 0xA1),
            completed: Color::Rgb(0x1B, 0x5E, 0x20),
            low: Color::DarkGray,
            medium: Color::Rgb(0xE6, 0x51, 0x00),
            high: Color::Rgb(0xB0, 0x00, 0x20),
        }
    }

    /// Looks up a built-in theme by name.
    pub fn by_name(name: &str) -> Option<Theme> {
        match name.trim().to_lowercase().as_str() {
            "classic" => Some(Theme::classic()),
            "midnight" => Some(Theme::midnight()),
            "paper" => Some(Theme::paper()),
            _ => None,
        }
    }

    /// Resolves `name` and applies `#RRGGBB` overrides, falling back to classic.
    pub fn from_config(name: &str, colors: &HashMap<String, String>) -> Theme {
        let mut theme = Theme::by_name(name).unwrap_or_else(|| {
            warn!(theme = name, "unknown theme, using classic");
            Theme::classic()
        });

        for (key, value) in colors {
            let Some(color) = parse_hex_color(value) else {
                warn!(slot = %key, value = %value, "ignoring invalid colour");
                continue;
            };
            match key.as_str() {
                "accent" => theme.accent = color,
                "text" => theme.text = color,
                "dim" => theme.dim = color,
                "border" => theme.border = color,
                "selection_bg" => theme.selection_bg = color,
                "alert" => theme.alert = color,
                "notice" => theme.notice = color,
                "todo" => theme.todo = color,
                "in_progress" => theme.in_progress = color,
                "completed" => theme.completed = color,
                "low" => theme.low = color,
                "medium" => theme.medium = color,
                "high" => theme.high = color,
                _ => warn!(slot = %key, "unknown colour slot"),
            }
        }
        theme
    }

    pub fn status_color(&self, status: Status) -> Color {
        match status {
            Status::Todo => self.todo,
            Status::InProgress => self.in_progress,
            Status::Completed => self.completed,
        }
    }

    pub fn priority_color(&self, priority: Priority) -> Color {
        match priority {
            Priority::Low => self.low,
            Priority::Medium => self.medium,
            Priority::High => self.high,
        }
    }
}

/// Parse a hex color string like "#FF4444" into an RGB Color
fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.trim().strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(hex.get(0..2)?, 16).ok()?;
    let g = u8::from_str_radix(hex.get(2..4)?, 16).ok()?;
    let b = u8::from_str_radix(hex.get(4..6)?, 16).ok()?;
    Some(Color::Rgb(r, g, b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_apply_on_top_of_named_theme() {
        let mut colors = HashMap::new();
        colors.insert("alert".to_string(), "#102030".to_string());
        colors.insert("bogus".to_string(), "#FFFFFF".to_string());
        colors.insert("text".to_string(), "nope".to_string());

        let theme = Theme::from_config("midnight", &colors);
        assert_eq!(theme.name, "midnight");
        assert_eq!(theme.alert, Color::Rgb(0x10, 0x20, 0x30));
        assert_eq!(theme.text, Theme::midnight().text);
    }

    #[test]
    fn unknown_theme_falls_back_to_classic() {
        let theme = Theme::from_config("neon", &HashMap::new());
        assert_eq!(theme, Theme::classic());
    }

    #[test]
    fn every_listed_name_resolves() {
        for name in THEME_NAMES {
            assert_eq!(Theme::by_name(name).map(|t| t.name), Some(name));
        }
    }
}
