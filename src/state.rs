//! Shared display state between message handlers and the render loop.
//!
//! `SharedDisplayState` holds the single mutable model of what the panel
//! should show. Message handlers write one field at a time; the render loop
//! reads through a full-copy snapshot so no lock is ever held while drawing.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use rs_ledmatrix::state::{DisplayUpdate, SharedDisplayState};
//!
//! let state = Arc::new(SharedDisplayState::default());
//!
//! // Handler thread
//! state.apply(DisplayUpdate::Track("Song".into()));
//!
//! // Render thread
//! let pending = state.take_pending();
//! assert!(pending.dirty);
//! let snapshot = state.snapshot();
//! assert_eq!(snapshot.track, "Song");
//! ```
//!
//! Fields are independent and last-write-wins: a snapshot taken between a
//! track and an artist update shows the new track with the old artist.

use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Instant;

use crate::pages::{PageCommand, PageKind};

// ============================================================================
// Brightness
// ============================================================================

/// Panel brightness in percent, always within `MIN..=MAX`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Brightness(u8);

impl Brightness {
    /// Lowest accepted value; the panel is never fully dark.
    pub const MIN: u8 = 5;
    /// Highest accepted value.
    pub const MAX: u8 = 100;

    /// Clamps any integer into range.
    pub fn clamped(value: i64) -> Self {
        Self(value.clamp(Self::MIN as i64, Self::MAX as i64) as u8)
    }

    /// The percentage.
    pub fn percent(self) -> u8 {
        self.0
    }
}

impl Default for Brightness {
    fn default() -> Self {
        Self(50)
    }
}

// ============================================================================
// Sensors
// ============================================================================

/// Temperature sensors shown on the sensor page.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SensorSlot {
    /// Living room.
    Living,
    /// Bedroom.
    Bedroom,
    /// Outside.
    Outdoor,
}

impl SensorSlot {
    /// All slots in display order.
    pub const ALL: [SensorSlot; 3] = [SensorSlot::Living, SensorSlot::Bedroom, SensorSlot::Outdoor];

    /// Short label drawn before the reading.
    pub fn label(self) -> &'static str {
        match self {
            SensorSlot::Living => "LR",
            SensorSlot::Bedroom => "BR",
            SensorSlot::Outdoor => "Out",
        }
    }
}

/// Latest reading per sensor, in degrees Celsius.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SensorReadings {
    /// Living room.
    pub living: Option<f32>,
    /// Bedroom.
    pub bedroom: Option<f32>,
    /// Outside.
    pub outdoor: Option<f32>,
}

impl SensorReadings {
    /// Reading for one slot.
    pub fn get(&self, slot: SensorSlot) -> Option<f32> {
        match slot {
            SensorSlot::Living => self.living,
            SensorSlot::Bedroom => self.bedroom,
            SensorSlot::Outdoor => self.outdoor,
        }
    }

    fn set(&mut self, slot: SensorSlot, value: Option<f32>) {
        match slot {
            SensorSlot::Living => self.living = value,
            SensorSlot::Bedroom => self.bedroom = value,
            SensorSlot::Outdoor => self.outdoor = value,
        }
    }
}

// ============================================================================
// Display State
// ============================================================================

/// Everything the pages draw from.
#[derive(Clone, Debug, PartialEq)]
pub struct DisplayState {
    /// Raw weather condition ("rainy", "clear-night", ...)
    pub weather_cond: String,
    /// Temperature text, drawn with a trailing "C"
    pub weather_temp: String,
    /// One-line weather summary
    pub weather_summary: String,
    /// Now-playing track
    pub track: String,
    /// Now-playing artist
    pub artist: String,
    /// Panel brightness
    pub brightness: Brightness,
    /// Sensor temperatures
    pub sensors: SensorReadings,
    /// Set by every update, cleared by the render loop
    pub dirty: bool,
    page_command: Option<PageCommand>,
    rotate_secs: Option<u32>,
}

impl DisplayState {
    /// Empty content, given brightness, dirty so the first tick renders.
    pub fn new(brightness: Brightness) -> Self {
        Self {
            weather_cond: String::new(),
            weather_temp: String::new(),
            weather_summary: String::new(),
            track: String::new(),
            artist: String::new(),
            brightness,
            sensors: SensorReadings::default(),
            dirty: true,
            page_command: None,
            rotate_secs: None,
        }
    }
}

impl Default for DisplayState {
    fn default() -> Self {
        Self::new(Brightness::default())
    }
}

/// One parsed inbound message.
///
/// Values are already parsed and clamped; applying one is a single field
/// write.
#[derive(Clone, Debug, PartialEq)]
pub enum DisplayUpdate {
    /// New weather condition.
    WeatherCondition(String),
    /// New temperature text.
    WeatherTemp(String),
    /// New weather summary.
    WeatherSummary(String),
    /// New track title.
    Track(String),
    /// New artist.
    Artist(String),
    /// New brightness.
    Brightness(Brightness),
    /// Sensor reading; `None` marks the sensor unknown.
    Sensor(SensorSlot, Option<f32>),
    /// Page selection or rotation unlock.
    Page(PageCommand),
    /// Auto-rotation interval in seconds (0 disables).
    RotateSecs(u32),
}

/// Flags the render loop consumes once per tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Pending {
    /// State changed since the last tick.
    pub dirty: bool,
    /// Page command received since the last tick (latest wins).
    pub page_command: Option<PageCommand>,
    /// Rotation interval received since the last tick (latest wins).
    pub rotate_secs: Option<u32>,
}

// ============================================================================
// Change Detection
// ============================================================================

/// Last page reported to the broker, for publish-on-change.
#[derive(Clone, Debug, Default)]
pub struct ChangeDetection {
    /// Page most recently reported by the render loop.
    pub active_page: Option<PageKind>,
    /// Page most recently handed out by `check_page_change`.
    pub last_published_page: Option<PageKind>,
}

// ============================================================================
// Shared Display State
// ============================================================================

/// Thread-safe wrapper around [`DisplayState`].
///
/// # Thread Safety
///
/// - One `Mutex` guards all display fields. Writers hold it for a single
///   field write; the render loop holds it for a flag swap or a clone.
/// - Page telemetry has its own lock so broker publishing never contends
///   with rendering.
/// - A poisoned lock is recovered: the data is plain values that are valid
///   after any partial write.
pub struct SharedDisplayState {
    state: Mutex<DisplayState>,
    start_time: Instant,
    change_detection: Mutex<ChangeDetection>,
}

impl SharedDisplayState {
    /// Creates the state with empty content.
    pub fn new(brightness: Brightness) -> Self {
        Self {
            state: Mutex::new(DisplayState::new(brightness)),
            start_time: Instant::now(),
            change_detection: Mutex::new(ChangeDetection::default()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, DisplayState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_changes(&self) -> MutexGuard<'_, ChangeDetection> {
        self.change_detection
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Milliseconds since the state was created.
    #[inline]
    pub fn now_ms(&self) -> u64 {
        self.start_time.elapsed().as_millis() as u64
    }

    /// Writes one field and marks the state dirty.
    pub fn apply(&self, update: DisplayUpdate) {
        let mut state = self.lock();
        match update {
            DisplayUpdate::WeatherCondition(v) => state.weather_cond = v,
            DisplayUpdate::WeatherTemp(v) => state.weather_temp = v,
            DisplayUpdate::WeatherSummary(v) => state.weather_summary = v,
            DisplayUpdate::Track(v) => state.track = v,
            DisplayUpdate::Artist(v) => state.artist = v,
            DisplayUpdate::Brightness(b) => state.brightness = b,
            DisplayUpdate::Sensor(slot, value) => state.sensors.set(slot, value),
            DisplayUpdate::Page(cmd) => state.page_command = Some(cmd),
            DisplayUpdate::RotateSecs(secs) => state.rotate_secs = Some(secs),
        }
        state.dirty = true;
    }

    /// Marks the state dirty without changing content.
    pub fn mark_dirty(&self) {
        self.lock().dirty = true;
    }

    /// Reads and clears the per-tick flags in one lock.
    pub fn take_pending(&self) -> Pending {
        let mut state = self.lock();
        Pending {
            dirty: core::mem::take(&mut state.dirty),
            page_command: state.page_command.take(),
            rotate_secs: state.rotate_secs.take(),
        }
    }

    /// Full copy of the current state.
    pub fn snapshot(&self) -> DisplayState {
        self.lock().clone()
    }

    /// Current brightness.
    pub fn brightness(&self) -> Brightness {
        self.lock().brightness
    }

    /// Called by the render loop whenever the visible page changes.
    pub fn set_active_page(&self, page: PageKind) {
        self.lock_changes().active_page = Some(page);
    }

    /// Page last reported by the render loop.
    pub fn active_page(&self) -> Option<PageKind> {
        self.lock_changes().active_page
    }

    /// Returns the active page if it changed since the last call.
    pub fn check_page_change(&self) -> Option<PageKind> {
        let mut detection = self.lock_changes();
        if detection.active_page != detection.last_published_page {
            detection.last_published_page = detection.active_page;
            detection.active_page
        } else {
            None
        }
    }

    /// Forget what was published so the next check reports again
    /// (e.g. after a broker reconnect).
    pub fn reset_page_change(&self) {
        self.lock_changes().last_published_page = None;
    }
}

impl Default for SharedDisplayState {
    fn default() -> Self {
        Self::new(Brightness::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ========================================================================
    // Brightness
    // ========================================================================

    #[test]
    fn brightness_clamps_both_ends() {
        assert_eq!(Brightness::clamped(-5).percent(), Brightness::MIN);
        assert_eq!(Brightness::clamped(9999).percent(), Brightness::MAX);
        assert_eq!(Brightness::clamped(0).percent(), 5);
        assert_eq!(Brightness::clamped(5).percent(), 5);
        assert_eq!(Brightness::clamped(42).percent(), 42);
        assert_eq!(Brightness::clamped(100).percent(), 100);
        assert_eq!(Brightness::clamped(i64::MIN).percent(), 5);
        assert_eq!(Brightness::clamped(i64::MAX).percent(), 100);
    }

    #[test]
    fn brightness_default_is_half() {
        assert_eq!(Brightness::default().percent(), 50);
    }

    // ========================================================================
    // SharedDisplayState
    // ========================================================================

    #[test]
    fn new_state_is_dirty_and_empty() {
        let state = SharedDisplayState::default();
        let snap = state.snapshot();
        assert!(snap.dirty);
        assert!(snap.track.is_empty());
        assert_eq!(snap.sensors, SensorReadings::default());
        assert!(state.now_ms() < 100);
    }

    #[test]
    fn take_pending_clears_flags() {
        let state = SharedDisplayState::default();
        assert!(state.take_pending().dirty);
        assert_eq!(state.take_pending(), Pending::default());
    }

    #[test]
    fn apply_writes_field_and_sets_dirty() {
        let state = SharedDisplayState::default();
        state.take_pending();

        state.apply(DisplayUpdate::Artist("Band".into()));
        let snap = state.snapshot();
        assert_eq!(snap.artist, "Band");
        assert!(state.take_pending().dirty);
    }

    #[test]
    fn snapshot_does_not_clear_dirty() {
        let state = SharedDisplayState::default();
        state.snapshot();
        assert!(state.take_pending().dirty);
    }

    #[test]
    fn every_update_kind_lands() {
        let state = SharedDisplayState::default();
        state.apply(DisplayUpdate::WeatherCondition("rainy".into()));
        state.apply(DisplayUpdate::WeatherTemp("12".into()));
        state.apply(DisplayUpdate::WeatherSummary("Showers later".into()));
        state.apply(DisplayUpdate::Track("Song".into()));
        state.apply(DisplayUpdate::Brightness(Brightness::clamped(80)));
        state.apply(DisplayUpdate::Sensor(SensorSlot::Outdoor, Some(4.5)));

        let snap = state.snapshot();
        assert_eq!(snap.weather_cond, "rainy");
        assert_eq!(snap.weather_temp, "12");
        assert_eq!(snap.weather_summary, "Showers later");
        assert_eq!(snap.track, "Song");
        assert_eq!(snap.brightness.percent(), 80);
        assert_eq!(snap.sensors.get(SensorSlot::Outdoor), Some(4.5));
        assert_eq!(state.brightness().percent(), 80);
    }

    #[test]
    fn page_commands_are_taken_once_latest_wins() {
        let state = SharedDisplayState::default();
        state.apply(DisplayUpdate::Page(PageCommand::Show(PageKind::Clock)));
        state.apply(DisplayUpdate::Page(PageCommand::Show(PageKind::Sensors)));
        state.apply(DisplayUpdate::RotateSecs(15));

        let pending = state.take_pending();
        assert_eq!(
            pending.page_command,
            Some(PageCommand::Show(PageKind::Sensors))
        );
        assert_eq!(pending.rotate_secs, Some(15));

        let again = state.take_pending();
        assert_eq!(again.page_command, None);
        assert_eq!(again.rotate_secs, None);
    }

    #[test]
    fn sensor_reading_can_be_cleared() {
        let state = SharedDisplayState::default();
        state.apply(DisplayUpdate::Sensor(SensorSlot::Living, Some(21.0)));
        state.apply(DisplayUpdate::Sensor(SensorSlot::Living, None));
        assert_eq!(state.snapshot().sensors.living, None);
    }

    // ========================================================================
    // Page change detection
    // ========================================================================

    #[test]
    fn page_change_reported_once() {
        let state = SharedDisplayState::default();
        assert_eq!(state.check_page_change(), None);

        state.set_active_page(PageKind::Dashboard);
        assert_eq!(state.check_page_change(), Some(PageKind::Dashboard));
        assert_eq!(state.check_page_change(), None);

        state.set_active_page(PageKind::Clock);
        assert_eq!(state.active_page(), Some(PageKind::Clock));
        assert_eq!(state.check_page_change(), Some(PageKind::Clock));
    }

    #[test]
    fn reset_page_change_reports_again() {
        let state = SharedDisplayState::default();
        state.set_active_page(PageKind::Sensors);
        state.check_page_change();
        state.reset_page_change();
        assert_eq!(state.check_page_change(), Some(PageKind::Sensors));
    }
}
