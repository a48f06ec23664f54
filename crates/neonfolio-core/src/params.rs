//! Tuning parameters for the effects.
//!
//! The probabilities and windows are tuning constants carried over as-is;
//! they are exposed so the config file can adjust them.

use serde::Deserialize;

/// Rain renderer tuning.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct RainParams {
    /// Size of one glyph in surface units (1 on a terminal cell grid).
    pub glyph_size: u32,
    /// Chance per frame that a drop past the bottom edge restarts at the top.
    pub restart_probability: f64,
    /// Opacity of the dark wash painted over the surface every frame.
    pub fade_alpha: f32,
    /// Drop counter value at which glyphs reach full opacity.
    pub brightness_ramp: f32,
    /// Drops start at a random offset in `[-initial_offset, 0)`.
    pub initial_offset: u32,
}

impl Default for RainParams {
    fn default() -> Self {
        Self {
            glyph_size: 1,
            restart_probability: 0.025,
            fade_alpha: 0.05,
            brightness_ramp: 20.0,
            initial_offset: 100,
        }
    }
}

/// Scramble text effect tuning.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct ScrambleParams {
    /// Chance per frame that a scrambling character picks a new glyph.
    pub reseed_probability: f64,
    /// Scrambling starts at a random frame in `[0, start_window)`.
    pub start_window: u32,
    /// The final character appears `[0, reveal_window)` frames after
    /// scrambling starts.
    pub reveal_window: u32,
    /// Pause between runs of a repeating scramble.
    pub repeat_delay_ms: u64,
}

impl Default for ScrambleParams {
    fn default() -> Self {
        Self {
            reseed_probability: 0.28,
            start_window: 40,
            reveal_window: 40,
            repeat_delay_ms: 3_000,
        }
    }
}

impl ScrambleParams {
    /// Exclusive upper bound on any entry's reveal frame.
    pub fn max_reveal_frame(&self) -> u32 {
        self.start_window
            .max(1)
            .saturating_add(self.reveal_window.max(1))
            - 1
    }
}

/// Typewriter effect tuning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TypewriterParams {
    /// Delay between typed characters.
    pub char_delay_ms: u64,
}

impl Default for TypewriterParams {
    fn default() -> Self {
        Self { char_delay_ms: 30 }
    }
}

/// Binary counter tuning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BinaryCounterParams {
    /// How long random bits are shown before the real value.
    pub duration_ms: u64,
}

impl Default for BinaryCounterParams {
    fn default() -> Self {
        Self { duration_ms: 1_500 }
    }
}
