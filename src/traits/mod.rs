//! Trait definitions for the panel, text and time.
//!
//! These are the seams between the render engine and its collaborators,
//! which lets the whole engine run on a desktop against mocks.
//!
//! # Submodules
//!
//! - `canvas`: [`Canvas`] pixel surface, [`MatrixPanel`] presentation, [`Rgb`]
//! - `font`: [`Font`] glyph-per-byte text drawing
//! - `clock`: [`Clock`] and [`WallClock`] time sources

pub mod canvas;
pub mod clock;
pub mod font;

pub use canvas::*;
pub use clock::*;
pub use font::*;
