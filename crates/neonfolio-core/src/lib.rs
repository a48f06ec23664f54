//! Core types for the neonfolio terminal portfolio.
//!
//! Everything the effect crates share lives here: the one-shot frame
//! scheduler that stands in for a browser's animation-frame callbacks,
//! deferred timers, the capability traits effects draw through, the seedable
//! random source, tuning parameters and theme enums.

mod frame;
mod params;
mod rng;
mod surface;
mod text;
mod theme;
mod timer;

pub use frame::{FrameRequest, FrameScheduler};
pub use params::{BinaryCounterParams, RainParams, ScrambleParams, TypewriterParams};
pub use rng::{EffectRng, clock_seed, derive_rng, pick, seeded_rng};
pub use surface::DrawingSurface;
pub use text::{Glyph, TextTarget, glyphs_to_string, plain_glyphs};
pub use theme::{ColorTheme, FrameRate, ParseEnumError};
pub use timer::Deferred;
