//! # rs-ledmatrix
//!
//! An RGB LED matrix dashboard: weather icons, scrolling now-playing text,
//! a clock and room temperatures, all driven by MQTT.
//!
//! ## Features
//!
//! - **Icon codec**: 16x16 icons drawn as glyph grids with a per-icon legend and palette
//! - **Marquee text**: seamless wrap-around scrolling for text wider than the panel
//! - **Pages**: dashboard, clock and sensor pages with optional auto-rotation
//! - **Shared state**: MQTT writes and the render loop reads through short locks
//! - **Hardware abstraction**: panel, font and clock traits with mocks for testing
//!
//! ## Architecture
//!
//! - `traits` - Panel, font and clock abstractions
//! - `icons` - Icon codec, built-in catalog and lookup registry
//! - `scroll` - Marquee scroll engine
//! - `state` - Display state shared between MQTT and rendering
//! - `messages` - Topic names and payload parsing
//! - `pages` - Page drawing and rotation
//! - `render` - Fixed-rate render loop
//! - `services` - MQTT plumbing
//! - `hal` - Concrete implementations (mock for testing, terminal panel)
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use rs_ledmatrix::{
//!     hal::{MockFont, MockPanel},
//!     pages::Fonts,
//!     render::RenderLoop,
//!     state::{DisplayUpdate, SharedDisplayState},
//! };
//!
//! let state = Arc::new(SharedDisplayState::default());
//! state.apply(DisplayUpdate::WeatherCondition("rainy".into()));
//!
//! let fonts = Fonts { text: MockFont::new(4), large: MockFont::new(6) };
//! let mut render = RenderLoop::new(MockPanel::new(64, 32), fonts, Arc::clone(&state));
//!
//! let local = chrono::NaiveDate::from_ymd_opt(2024, 3, 9)
//!     .and_then(|d| d.and_hms_opt(8, 5, 0))
//!     .unwrap();
//! render.tick(0, local);
//! assert_eq!(render.panel().presented.len(), 1);
//! ```

#![warn(missing_docs)]

/// Shared configuration loaded from JSON.
pub mod config;
/// Mono font adapter over `embedded-graphics`.
pub mod fonts;
/// Off-screen RGB frame buffer.
pub mod frame;
/// Hardware abstraction layer with mock implementations for testing.
pub mod hal;
/// 16x16 weather icons: codec, catalog and registry.
pub mod icons;
/// Topic names and payload parsing for MQTT.
pub mod messages;
/// Display pages and rotation.
pub mod pages;
/// Fixed-rate render loop.
pub mod render;
/// Marquee scroll engine.
pub mod scroll;
/// MQTT services feeding the display.
pub mod services;
/// Display state shared across threads.
pub mod state;
/// Core traits for panel, text and time abstractions.
pub mod traits;

// Re-exports for convenience
pub use frame::FrameBuffer;
pub use icons::{Icon16, IconRegistry};
pub use pages::{PageCommand, PageController, PageKind};
pub use render::{RenderLoop, Shutdown, TickOutcome};
pub use scroll::ScrollLine;
pub use state::{Brightness, DisplayState, DisplayUpdate, SensorSlot, SharedDisplayState};
pub use traits::{Canvas, Clock, Font, MatrixPanel, Rgb, WallClock};

// Config re-exports
pub use config::{Config, DeviceConfig, LogConfig, MatrixConfig, MqttConfig, PagesConfig};
