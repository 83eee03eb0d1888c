use ratatui::style::Color;
use serde::{Deserialize, Serialize};

/// General theme
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Theme {
    pub text: TextTheme,
    pub plot: PlotTheme,
}

/// Text color theme
#[derive(Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct TextTheme {
    pub correct: Color,
    pub error: Color,
    pub untyped: Color,
    pub highlight: Color,
}

impl Default for TextTheme {
    fn default() -> Self {
        Self {
            correct: Color::Green,
            error: Color::Red,
            untyped: Color::DarkGray,
            highlight: Color::Yellow,
        }
    }
}

/// Plot color theme
#[derive(Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct PlotTheme {
    pub wpm: Color,
    pub axis: Color,
}

impl Default for PlotTheme {
    fn default() -> Self {
        Self {
            wpm: Color::Yellow,
            axis: Color::Gray,
        }
    }
}
