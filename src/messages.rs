//! Inbound message parsing.
//!
//! Every broker message is a `(topic, payload)` pair. Topics are matched on
//! the suffix after the configured prefix, and payloads are turned into a
//! [`DisplayUpdate`] before they touch shared state, so a malformed payload
//! never reaches the render loop.
//!
//! | Suffix | Payload |
//! |--------|---------|
//! | `weather/cond` | condition text |
//! | `weather/temp` | temperature text |
//! | `weather/summary` | summary text |
//! | `spotify/track` | track title |
//! | `spotify/artist` | artist name |
//! | `control/brightness` | `42`, `42.6` (clamped to 5..=100) |
//! | `control/page` | `dashboard`, `clock`, `sensors` or `rotate` |
//! | `control/rotate_secs` | whole seconds, 0 disables rotation |
//! | `sensors/{living,bedroom,outdoor}` | `{"temperature": 21.5}` or `21.5` |
//!
//! # Example
//!
//! ```
//! use rs_ledmatrix::messages::parse_update;
//! use rs_ledmatrix::state::{Brightness, DisplayUpdate};
//!
//! let update = parse_update("control/brightness", b"250");
//! assert_eq!(update, Some(DisplayUpdate::Brightness(Brightness::clamped(100))));
//! assert_eq!(parse_update("control/brightness", b"bright"), None);
//! ```

use serde::Deserialize;

use crate::pages::{PageCommand, PageKind};
use crate::state::{Brightness, DisplayUpdate, SensorSlot, SharedDisplayState};

// ============================================================================
// Topics
// ============================================================================

/// Weather condition.
pub const TOPIC_WEATHER_COND: &str = "weather/cond";
/// Weather temperature.
pub const TOPIC_WEATHER_TEMP: &str = "weather/temp";
/// Weather summary.
pub const TOPIC_WEATHER_SUMMARY: &str = "weather/summary";
/// Now-playing track.
pub const TOPIC_TRACK: &str = "spotify/track";
/// Now-playing artist.
pub const TOPIC_ARTIST: &str = "spotify/artist";
/// Brightness percent.
pub const TOPIC_BRIGHTNESS: &str = "control/brightness";
/// Page selection.
pub const TOPIC_PAGE: &str = "control/page";
/// Rotation interval.
pub const TOPIC_ROTATE_SECS: &str = "control/rotate_secs";
/// Living room temperature.
pub const TOPIC_SENSOR_LIVING: &str = "sensors/living";
/// Bedroom temperature.
pub const TOPIC_SENSOR_BEDROOM: &str = "sensors/bedroom";
/// Outdoor temperature.
pub const TOPIC_SENSOR_OUTDOOR: &str = "sensors/outdoor";

/// Published: `online`/`offline`, retained.
pub const TOPIC_STATUS: &str = "status";
/// Published: active page name.
pub const TOPIC_TELE_PAGE: &str = "tele/page";

/// Payload published on the status topic while running.
pub const STATUS_ONLINE: &[u8] = b"online";
/// Payload published on the status topic on shutdown and as last will.
pub const STATUS_OFFLINE: &[u8] = b"offline";

/// Every suffix the display subscribes to.
pub const SUBSCRIBE_TOPICS: [&str; 11] = [
    TOPIC_WEATHER_COND,
    TOPIC_WEATHER_TEMP,
    TOPIC_WEATHER_SUMMARY,
    TOPIC_TRACK,
    TOPIC_ARTIST,
    TOPIC_BRIGHTNESS,
    TOPIC_PAGE,
    TOPIC_ROTATE_SECS,
    TOPIC_SENSOR_LIVING,
    TOPIC_SENSOR_BEDROOM,
    TOPIC_SENSOR_OUTDOOR,
];

// ============================================================================
// Payload parsing
// ============================================================================

/// Drawn in place of each byte that is not valid UTF-8.
pub const INVALID_GLYPH: char = '?';

/// Payload as trimmed text, one glyph per byte.
///
/// Each invalid UTF-8 byte becomes one [`INVALID_GLYPH`], so the text keeps
/// its byte length and the marquee keeps its width.
fn text(payload: &[u8]) -> String {
    let mut out = String::with_capacity(payload.len());
    for chunk in payload.utf8_chunks() {
        out.push_str(chunk.valid());
        out.extend(core::iter::repeat(INVALID_GLYPH).take(chunk.invalid().len()));
    }
    out.trim().to_string()
}

/// Parses a brightness payload.
///
/// Accepts integers and finite decimals (rounded). Anything else is
/// `None`; out-of-range values are clamped, not rejected.
pub fn parse_brightness(payload: &[u8]) -> Option<Brightness> {
    let s = core::str::from_utf8(payload).ok()?.trim();
    if let Ok(v) = s.parse::<i64>() {
        return Some(Brightness::clamped(v));
    }
    let v = s.parse::<f64>().ok().filter(|v| v.is_finite())?;
    Some(Brightness::clamped(v.round() as i64))
}

#[derive(Deserialize)]
struct SensorPayload {
    temperature: Option<f32>,
}

/// Parses a sensor payload: JSON object with `temperature`, or a bare number.
///
/// Returns `None` for anything unparseable or non-finite, which marks the
/// sensor unknown.
pub fn parse_temperature(payload: &[u8]) -> Option<f32> {
    let value = match serde_json::from_slice::<SensorPayload>(payload) {
        Ok(parsed) => parsed.temperature,
        Err(_) => core::str::from_utf8(payload)
            .ok()
            .and_then(|s| s.trim().parse::<f32>().ok()),
    };
    value.filter(|v| v.is_finite())
}

/// Parses a page command. Unknown names are `None`.
pub fn parse_page_command(payload: &[u8]) -> Option<PageCommand> {
    let s = core::str::from_utf8(payload).ok()?.trim();
    if s.eq_ignore_ascii_case("rotate") {
        return Some(PageCommand::Rotate);
    }
    PageKind::from_name(s).map(PageCommand::Show)
}

/// Parses a rotation interval in whole seconds. Negative values disable.
pub fn parse_rotate_secs(payload: &[u8]) -> Option<u32> {
    let s = core::str::from_utf8(payload).ok()?.trim();
    let secs = s.parse::<i64>().ok()?;
    Some(secs.clamp(0, u32::MAX as i64) as u32)
}

/// Turns a topic suffix and payload into an update.
///
/// Returns `None` for unknown topics and for payloads that must be
/// ignored (malformed brightness, unknown page names, non-numeric
/// intervals). Sensor topics always produce an update; garbage clears the
/// reading.
pub fn parse_update(suffix: &str, payload: &[u8]) -> Option<DisplayUpdate> {
    let update = match suffix {
        TOPIC_WEATHER_COND => DisplayUpdate::WeatherCondition(text(payload)),
        TOPIC_WEATHER_TEMP => DisplayUpdate::WeatherTemp(text(payload)),
        TOPIC_WEATHER_SUMMARY => DisplayUpdate::WeatherSummary(text(payload)),
        TOPIC_TRACK => DisplayUpdate::Track(text(payload)),
        TOPIC_ARTIST => DisplayUpdate::Artist(text(payload)),
        TOPIC_BRIGHTNESS => DisplayUpdate::Brightness(parse_brightness(payload)?),
        TOPIC_PAGE => DisplayUpdate::Page(parse_page_command(payload)?),
        TOPIC_ROTATE_SECS => DisplayUpdate::RotateSecs(parse_rotate_secs(payload)?),
        TOPIC_SENSOR_LIVING => {
            DisplayUpdate::Sensor(SensorSlot::Living, parse_temperature(payload))
        }
        TOPIC_SENSOR_BEDROOM => {
            DisplayUpdate::Sensor(SensorSlot::Bedroom, parse_temperature(payload))
        }
        TOPIC_SENSOR_OUTDOOR => {
            DisplayUpdate::Sensor(SensorSlot::Outdoor, parse_temperature(payload))
        }
        _ => return None,
    };
    Some(update)
}

/// Strips `prefix/` from a full topic and parses the rest.
pub fn route(prefix: &str, topic: &str, payload: &[u8]) -> Option<DisplayUpdate> {
    let suffix = topic.strip_prefix(prefix)?.strip_prefix('/')?;
    let update = parse_update(suffix, payload);
    if update.is_none() {
        log::debug!("ignoring message on {} ({} bytes)", topic, payload.len());
    }
    update
}

/// Routes one message and applies it. Returns true if state changed.
pub fn ingest(state: &SharedDisplayState, prefix: &str, topic: &str, payload: &[u8]) -> bool {
    match route(prefix, topic, payload) {
        Some(update) => {
            state.apply(update);
            true
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // =========================================================================
    // Text topics
    // =========================================================================

    #[test]
    fn text_topics_are_trimmed() {
        assert_eq!(
            parse_update(TOPIC_TRACK, b"  Song Title \n"),
            Some(DisplayUpdate::Track("Song Title".into()))
        );
        assert_eq!(
            parse_update(TOPIC_WEATHER_COND, b"rainy"),
            Some(DisplayUpdate::WeatherCondition("rainy".into()))
        );
    }

    #[test]
    fn empty_text_clears() {
        assert_eq!(
            parse_update(TOPIC_ARTIST, b""),
            Some(DisplayUpdate::Artist(String::new()))
        );
    }

    #[test]
    fn invalid_utf8_text_keeps_one_glyph_per_byte() {
        let update = parse_update(TOPIC_TRACK, &[b'A', 0xFF, b'B']);
        assert_eq!(update, Some(DisplayUpdate::Track("A?B".into())));

        // Truncated sequence: two bytes, two glyphs
        let update = parse_update(TOPIC_ARTIST, &[0xE2, 0x82, b'x']);
        assert_eq!(update, Some(DisplayUpdate::Artist("??x".into())));

        let update = parse_update(TOPIC_ARTIST, "Beyonc\u{e9}".as_bytes());
        assert_eq!(update, Some(DisplayUpdate::Artist("Beyonc\u{e9}".into())));
    }

    // =========================================================================
    // Brightness
    // =========================================================================

    #[test]
    fn brightness_integer_and_decimal() {
        assert_eq!(parse_brightness(b"42"), Some(Brightness::clamped(42)));
        assert_eq!(parse_brightness(b" 42.6 "), Some(Brightness::clamped(43)));
    }

    #[test]
    fn brightness_is_clamped() {
        assert_eq!(parse_brightness(b"-5").map(Brightness::percent), Some(5));
        assert_eq!(parse_brightness(b"9999").map(Brightness::percent), Some(100));
        assert_eq!(
            parse_brightness(b"99999999999999999999").map(Brightness::percent),
            Some(100)
        );
    }

    #[test]
    fn malformed_brightness_is_ignored() {
        assert_eq!(parse_brightness(b"bright"), None);
        assert_eq!(parse_brightness(b""), None);
        assert_eq!(parse_brightness(b"NaN"), None);
        assert_eq!(parse_brightness(b"inf"), None);
        assert_eq!(parse_brightness(&[0xFF]), None);
        assert_eq!(parse_update(TOPIC_BRIGHTNESS, b"x"), None);
    }

    // =========================================================================
    // Sensors
    // =========================================================================

    #[test]
    fn sensor_json_and_plain() {
        assert_eq!(parse_temperature(br#"{"temperature": 21.5}"#), Some(21.5));
        assert_eq!(
            parse_temperature(br#"{"temperature": -3, "humidity": 80}"#),
            Some(-3.0)
        );
        assert_eq!(parse_temperature(b" 18.25 "), Some(18.25));
    }

    #[test]
    fn sensor_garbage_clears() {
        assert_eq!(parse_temperature(b"warm"), None);
        assert_eq!(parse_temperature(br#"{"humidity": 80}"#), None);
        assert_eq!(parse_temperature(br#"{"temperature": null}"#), None);
        assert_eq!(parse_temperature(b"NaN"), None);
        assert_eq!(
            parse_update(TOPIC_SENSOR_BEDROOM, b"??"),
            Some(DisplayUpdate::Sensor(SensorSlot::Bedroom, None))
        );
    }

    // =========================================================================
    // Page control
    // =========================================================================

    #[test]
    fn page_commands() {
        assert_eq!(
            parse_page_command(b"Clock"),
            Some(PageCommand::Show(PageKind::Clock))
        );
        assert_eq!(parse_page_command(b"ROTATE"), Some(PageCommand::Rotate));
        assert_eq!(parse_page_command(b"weather"), None);
        assert_eq!(parse_update(TOPIC_PAGE, b"weather"), None);
    }

    #[test]
    fn rotate_secs() {
        assert_eq!(parse_rotate_secs(b"15"), Some(15));
        assert_eq!(parse_rotate_secs(b"0"), Some(0));
        assert_eq!(parse_rotate_secs(b"-3"), Some(0));
        assert_eq!(parse_rotate_secs(b"soon"), None);
    }

    // =========================================================================
    // Routing
    // =========================================================================

    #[test]
    fn route_strips_prefix() {
        assert_eq!(
            route("matrix", "matrix/spotify/artist", b"Band"),
            Some(DisplayUpdate::Artist("Band".into()))
        );
        assert_eq!(route("matrix", "other/spotify/artist", b"Band"), None);
        assert_eq!(route("matrix", "matrixspotify/artist", b"Band"), None);
        assert_eq!(route("matrix", "matrix/unknown/topic", b"x"), None);
    }

    #[test]
    fn ingest_applies_only_understood_messages() {
        let state = SharedDisplayState::default();
        state.take_pending();

        assert!(!ingest(&state, "matrix", "matrix/control/brightness", b"loud"));
        assert!(!ingest(&state, "matrix", "other/spotify/track", b"Song"));
        assert!(!state.take_pending().dirty);

        assert!(ingest(&state, "home/panel", "home/panel/spotify/track", b"Song"));
        assert_eq!(state.snapshot().track, "Song");
        assert!(state.take_pending().dirty);
    }

    #[test]
    fn every_subscribed_topic_is_understood() {
        for suffix in SUBSCRIBE_TOPICS {
            let payload: &[u8] = match suffix {
                TOPIC_PAGE => b"clock",
                _ => b"10",
            };
            assert!(parse_update(suffix, payload).is_some(), "{}", suffix);
        }
    }
}
