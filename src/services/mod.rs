//! Message-bus services feeding the display.
//!
//! With the `mqtt` feature, [`MqttHandler`] bridges a `rumqttc` client to
//! the `Arc<SharedDisplayState>` that the render loop reads, and
//! [`watch_signals`] raises [`crate::render::Shutdown`] on SIGINT/SIGTERM:
//!
//! ```ignore
//! use std::sync::Arc;
//! use rs_ledmatrix::state::SharedDisplayState;
//!
//! let state = Arc::new(SharedDisplayState::default());
//! let handler = MqttHandler::new(Arc::clone(&state), MqttRuntimeConfig::from_config(&config.mqtt));
//! let render = RenderLoop::from_config(panel, fonts, Arc::clone(&state), &config);
//! ```

#[cfg(feature = "mqtt")]
pub mod mqtt;
#[cfg(feature = "mqtt")]
pub mod signals;

#[cfg(feature = "mqtt")]
pub use mqtt::*;
#[cfg(feature = "mqtt")]
pub use signals::watch_signals;
