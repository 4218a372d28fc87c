//! Shared configuration for the dashboard binary and the library services.
//!
//! Uses `heapless::String` so every section stays fixed-size, and derives
//! serde so the whole tree can be loaded from a JSON file. Every section is
//! `#[serde(default)]`, so a config file only needs the keys it changes.
//!
//! # Example
//!
//! ```rust
//! use rs_ledmatrix::config::{Config, MatrixConfig, MqttConfig};
//!
//! // Use defaults
//! let config = Config::default();
//! assert_eq!(config.matrix.display_width(), 64);
//!
//! // Or customize
//! let config = Config::default()
//!     .with_mqtt(MqttConfig::default().with_host("192.168.1.71"))
//!     .with_matrix(MatrixConfig::default().with_chain_length(2));
//! assert_eq!(config.matrix.display_width(), 128);
//!
//! // Or load from JSON
//! let config = Config::from_json(r#"{"mqtt": {"host": "broker.lan"}}"#).unwrap();
//! assert_eq!(config.mqtt.host.as_str(), "broker.lan");
//! assert_eq!(config.mqtt.port, 1883);
//! ```

use core::fmt;
use std::path::Path;

use heapless::String as HString;
use serde::{Deserialize, Serialize};

use crate::pages::PageKind;

/// Maximum length for short config strings (hostnames, client IDs)
pub const MAX_SHORT_STRING: usize = 64;

/// Maximum length for longer config strings (topic prefixes, paths)
pub const MAX_LONG_STRING: usize = 128;

/// Type alias for short config strings
pub type ShortString = HString<MAX_SHORT_STRING>;

/// Type alias for longer config strings
pub type LongString = HString<MAX_LONG_STRING>;

// ============================================================================
// Helper for creating heapless strings
// ============================================================================

/// Create a ShortString from a &str, truncating if too long
pub fn short_string(s: &str) -> ShortString {
    let mut hs = ShortString::new();
    let _ = hs.push_str(&s[..utf8_prefix_len(s, MAX_SHORT_STRING)]);
    hs
}

/// Create a LongString from a &str, truncating if too long
pub fn long_string(s: &str) -> LongString {
    let mut hs = LongString::new();
    let _ = hs.push_str(&s[..utf8_prefix_len(s, MAX_LONG_STRING)]);
    hs
}

/// Longest prefix of `s` that fits in `max` bytes and ends on a char boundary.
fn utf8_prefix_len(s: &str, max: usize) -> usize {
    if s.len() <= max {
        return s.len();
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    end
}

// ============================================================================
// Errors
// ============================================================================

/// Errors raised while loading a config file.
#[derive(Debug)]
pub enum ConfigError {
    /// The file could not be read.
    Io(std::io::Error),
    /// The file is not valid JSON for [`Config`].
    Parse(serde_json::Error),
    /// A value is out of its usable range.
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "cannot read config: {}", e),
            ConfigError::Parse(e) => write!(f, "invalid config JSON: {}", e),
            ConfigError::Invalid(what) => write!(f, "invalid config value: {}", what),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
            ConfigError::Invalid(_) => None,
        }
    }
}

// ============================================================================
// Main Config
// ============================================================================

/// Complete application configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// MQTT client configuration
    pub mqtt: MqttConfig,
    /// Panel geometry and render timing
    pub matrix: MatrixConfig,
    /// Page rotation
    pub pages: PagesConfig,
    /// Device identification
    pub device: DeviceConfig,
    /// Logging
    pub log: LogConfig,
}

impl Config {
    /// Parse a config from a JSON string and validate it.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_json::from_str(json).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
        Self::from_json(&text)
    }

    /// Check values the render loop cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.matrix.rows == 0 || self.matrix.cols == 0 || self.matrix.chain_length == 0 {
            return Err(ConfigError::Invalid("matrix geometry must be non-zero"));
        }
        if self.matrix.frame_ms == 0 {
            return Err(ConfigError::Invalid("matrix.frame_ms must be non-zero"));
        }
        if PageKind::from_name(&self.pages.start_page).is_none() {
            return Err(ConfigError::Invalid("pages.start_page is not a known page"));
        }
        Ok(())
    }

    /// Set MQTT configuration
    pub fn with_mqtt(mut self, mqtt: MqttConfig) -> Self {
        self.mqtt = mqtt;
        self
    }

    /// Set matrix configuration
    pub fn with_matrix(mut self, matrix: MatrixConfig) -> Self {
        self.matrix = matrix;
        self
    }

    /// Set page configuration
    pub fn with_pages(mut self, pages: PagesConfig) -> Self {
        self.pages = pages;
        self
    }

    /// Set device configuration
    pub fn with_device(mut self, device: DeviceConfig) -> Self {
        self.device = device;
        self
    }

    /// Set logging configuration
    pub fn with_log(mut self, log: LogConfig) -> Self {
        self.log = log;
        self
    }
}

// ============================================================================
// MQTT Config
// ============================================================================

/// MQTT client configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct MqttConfig {
    /// Broker hostname or IP
    pub host: ShortString,
    /// Broker port
    pub port: u16,
    /// Client ID (should be unique per device)
    pub client_id: ShortString,
    /// Topic prefix for all pub/sub (e.g., "matrix" -> "matrix/weather/cond")
    pub topic_prefix: ShortString,
    /// Username for authentication (empty = no auth)
    pub username: ShortString,
    /// Password for authentication
    pub password: ShortString,
    /// How often page telemetry is checked, in milliseconds
    pub telemetry_ms: u32,
    /// Keep-alive interval in seconds
    pub keep_alive_secs: u16,
    /// Whether MQTT is enabled
    pub enabled: bool,
}

impl Default for MqttConfig {
    fn default() -> Self {
        Self {
            host: short_string("localhost"),
            port: 1883,
            client_id: short_string("matrix-display"),
            topic_prefix: short_string("matrix"),
            username: ShortString::new(),
            password: ShortString::new(),
            telemetry_ms: 1000,
            keep_alive_secs: 60,
            enabled: true,
        }
    }
}

impl MqttConfig {
    /// Set the broker host
    pub fn with_host(mut self, host: &str) -> Self {
        self.host = short_string(host);
        self
    }

    /// Set the broker port
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Set the client ID
    pub fn with_client_id(mut self, id: &str) -> Self {
        self.client_id = short_string(id);
        self
    }

    /// Set the topic prefix
    pub fn with_topic_prefix(mut self, prefix: &str) -> Self {
        self.topic_prefix = short_string(prefix);
        self
    }

    /// Set authentication credentials
    pub fn with_auth(mut self, username: &str, password: &str) -> Self {
        self.username = short_string(username);
        self.password = short_string(password);
        self
    }

    /// Set the telemetry check interval
    pub fn with_telemetry_ms(mut self, ms: u32) -> Self {
        self.telemetry_ms = ms;
        self
    }

    /// Enable or disable MQTT
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Build a topic string with the configured prefix
    pub fn topic(&self, suffix: &str) -> LongString {
        let mut topic = LongString::new();
        let _ = topic.push_str(self.topic_prefix.as_str());
        let _ = topic.push('/');
        let _ = topic.push_str(suffix);
        topic
    }

    /// Check if authentication is configured
    pub fn has_auth(&self) -> bool {
        !self.username.is_empty()
    }
}

// ============================================================================
// Matrix Config
// ============================================================================

/// Panel geometry, render timing and fonts.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct MatrixConfig {
    /// Rows per panel
    pub rows: u32,
    /// Columns per panel
    pub cols: u32,
    /// Number of chained panels (extends the width)
    pub chain_length: u32,
    /// Brightness percent applied until a broker value arrives
    pub default_brightness: u8,
    /// Render tick period in milliseconds
    pub frame_ms: u32,
    /// Pixels between the two copies of a scrolling line
    pub scroll_gap: i32,
    /// Font for dashboard and sensor text
    pub text_font: ShortString,
    /// Font for the clock digits
    pub large_font: ShortString,
}

impl Default for MatrixConfig {
    fn default() -> Self {
        Self {
            rows: 32,
            cols: 64,
            chain_length: 1,
            default_brightness: 50,
            frame_ms: 50,
            scroll_gap: 10,
            text_font: short_string("6x13"),
            large_font: short_string("10x20"),
        }
    }
}

impl MatrixConfig {
    /// Visible width across all chained panels.
    pub fn display_width(&self) -> u32 {
        self.cols * self.chain_length
    }

    /// Set panel columns
    pub fn with_cols(mut self, cols: u32) -> Self {
        self.cols = cols;
        self
    }

    /// Set panel rows
    pub fn with_rows(mut self, rows: u32) -> Self {
        self.rows = rows;
        self
    }

    /// Set the chain length
    pub fn with_chain_length(mut self, chain_length: u32) -> Self {
        self.chain_length = chain_length;
        self
    }

    /// Set the render tick period
    pub fn with_frame_ms(mut self, ms: u32) -> Self {
        self.frame_ms = ms;
        self
    }

    /// Set the startup brightness
    pub fn with_default_brightness(mut self, percent: u8) -> Self {
        self.default_brightness = percent;
        self
    }

    /// Set the scroll gap
    pub fn with_scroll_gap(mut self, gap: i32) -> Self {
        self.scroll_gap = gap;
        self
    }
}

// ============================================================================
// Pages Config
// ============================================================================

/// Page selection and auto-rotation.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct PagesConfig {
    /// Page shown at startup
    pub start_page: ShortString,
    /// Auto-rotation interval in seconds (0 = stay on the current page)
    pub rotate_secs: u32,
}

impl Default for PagesConfig {
    fn default() -> Self {
        Self {
            start_page: short_string("dashboard"),
            rotate_secs: 0,
        }
    }
}

impl PagesConfig {
    /// Set the start page
    pub fn with_start_page(mut self, name: &str) -> Self {
        self.start_page = short_string(name);
        self
    }

    /// Set the rotation interval
    pub fn with_rotate_secs(mut self, secs: u32) -> Self {
        self.rotate_secs = secs;
        self
    }
}

// ============================================================================
// Device Config
// ============================================================================

/// Device identification configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceConfig {
    /// Human-readable device name
    pub name: ShortString,
    /// Device ID
    pub id: ShortString,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            name: short_string("LED Matrix"),
            id: short_string("ledmatrix"),
        }
    }
}

impl DeviceConfig {
    /// Set the device name
    pub fn with_name(mut self, name: &str) -> Self {
        self.name = short_string(name);
        self
    }

    /// Set the device ID
    pub fn with_id(mut self, id: &str) -> Self {
        self.id = short_string(id);
        self
    }
}

// ============================================================================
// Log Config
// ============================================================================

/// Logging configuration for the binary.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Level filter name (`off`, `error`, `warn`, `info`, `debug`, `trace`)
    pub level: ShortString,
    /// Optional log file; empty logs to stderr only
    pub file: LongString,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: short_string("info"),
            file: LongString::new(),
        }
    }
}

impl LogConfig {
    /// Set the level filter
    pub fn with_level(mut self, level: &str) -> Self {
        self.level = short_string(level);
        self
    }

    /// Also log to a file
    pub fn with_file(mut self, path: &str) -> Self {
        self.file = long_string(path);
        self
    }
}

// ============================================================================
// Tests
// ============================================================================
