//! Color themes and frame rates.

use std::str::FromStr;

use serde::Deserialize;

/// Error returned when a theme or frame rate name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} `{value}`")]
pub struct ParseEnumError {
    kind: &'static str,
    value: String,
}

/// Accent color theme for the page and the rain.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorTheme {
    #[default]
    Cyan,
    Green,
    Violet,
    Blue,
    Amber,
    Pink,
}

impl ColorTheme {
    /// Cycle to the next color theme.
    pub fn next(&self) -> Self {
        match self {
            ColorTheme::Cyan => ColorTheme::Green,
            ColorTheme::Green => ColorTheme::Violet,
            ColorTheme::Violet => ColorTheme::Blue,
            ColorTheme::Blue => ColorTheme::Amber,
            ColorTheme::Amber => ColorTheme::Pink,
            ColorTheme::Pink => ColorTheme::Cyan,
        }
    }

    /// Accent as an RGB triple.
    pub fn rgb(self) -> (u8, u8, u8) {
        match self {
            ColorTheme::Cyan => (6, 182, 212),
            ColorTheme::Green => (80, 250, 123),
            ColorTheme::Violet => (139, 92, 246),
            ColorTheme::Blue => (59, 130, 246),
            ColorTheme::Amber => (241, 250, 140),
            ColorTheme::Pink => (255, 121, 198),
        }
    }

    /// Page background the rain fades into.
    pub fn background() -> (u8, u8, u8) {
        (15, 23, 42)
    }
}

impl FromStr for ColorTheme {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "cyan" => Ok(ColorTheme::Cyan),
            "green" => Ok(ColorTheme::Green),
            "violet" => Ok(ColorTheme::Violet),
            "blue" => Ok(ColorTheme::Blue),
            "amber" => Ok(ColorTheme::Amber),
            "pink" => Ok(ColorTheme::Pink),
            _ => Err(ParseEnumError {
                kind: "color theme",
                value: s.to_string(),
            }),
        }
    }
}

/// How often the app renders a frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FrameRate {
    Slow,
    #[default]
    Medium,
    Fast,
}

impl FrameRate {
    /// Time budget for one frame in milliseconds.
    pub fn frame_interval_ms(self) -> u64 {
        match self {
            FrameRate::Slow => 66,
            FrameRate::Medium => 33,
            FrameRate::Fast => 16,
        }
    }
}

impl FromStr for FrameRate {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "slow" => Ok(FrameRate::Slow),
            "medium" => Ok(FrameRate::Medium),
            "fast" => Ok(FrameRate::Fast),
            _ => Err(ParseEnumError {
                kind: "frame rate",
                value: s.to_string(),
            }),
        }
    }
}
