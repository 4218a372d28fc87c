//! Hardware Abstraction Layer implementations.
//!
//! This module contains concrete implementations of the traits
//! defined in [`crate::traits`] for various platforms.
//!
//! # Available Implementations
//!
//! - `mock`: Test implementations for desktop development
//! - `terminal`: Panel simulator for truecolor terminals (requires `terminal` feature)

pub mod mock;

#[cfg(feature = "terminal")]
pub mod terminal;

pub use mock::*;

#[cfg(feature = "terminal")]
pub use terminal::TerminalPanel;
