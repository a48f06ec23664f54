//! Animation implementations.

pub mod binary;
pub mod rain;
pub mod scramble;
pub mod typewriter;
