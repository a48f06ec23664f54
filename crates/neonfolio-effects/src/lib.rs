//! Visual effects for the neonfolio page.
//!
//! The rain renderer paints falling glyphs onto any [`DrawingSurface`]; the
//! text effects (scramble, typewriter, binary counter) rewrite any
//! [`TextTarget`]. [`RainCanvas`] and [`TextCell`] are the terminal
//! implementations of those capabilities, and [`Backdrop`] ties the rain to
//! the terminal viewport.
//!
//! [`DrawingSurface`]: neonfolio_core::DrawingSurface
//! [`TextTarget`]: neonfolio_core::TextTarget

mod animations;
mod backdrop;
mod canvas;
mod chars;
mod color;
mod text;

pub use animations::binary::{BinaryCounter, parse_leading_int};
pub use animations::rain::RainRenderer;
pub use animations::scramble::{
    Completion, CompletionState, QueueEntry, RepeatingScramble, ScrambleText,
};
pub use animations::typewriter::Typewriter;
pub use backdrop::{Backdrop, RainIntensity};
pub use canvas::RainCanvas;
pub use chars::{BINARY_GLYPHS, RAIN_GLYPHS, SCRAMBLE_GLYPHS};
pub use color::{hsl_to_rgb, hue_rotate, lerp_rgb, rgb_to_hsl};
pub use text::TextCell;
