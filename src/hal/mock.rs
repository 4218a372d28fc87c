//! Mock implementations for testing without hardware.
//!
//! This module provides test doubles for the panel, font and clock
//! traits, so the whole render path runs on a desktop.
//!
//! # Available Mocks
//!
//! | Mock | Trait | Purpose |
//! |------|-------|---------|
//! | [`MockPanel`] | [`MatrixPanel`] | Records presented frames and brightness |
//! | [`MockFont`] | [`Font`] | Fixed-width font that records draw calls |
//! | [`MockClock`] | [`Clock`], [`WallClock`] | Controllable time source |
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use rs_ledmatrix::hal::{MockFont, MockPanel};
//! use rs_ledmatrix::pages::Fonts;
//! use rs_ledmatrix::render::RenderLoop;
//! use rs_ledmatrix::state::{DisplayUpdate, SharedDisplayState};
//!
//! let state = Arc::new(SharedDisplayState::default());
//! let fonts = Fonts { text: MockFont::new(6), large: MockFont::new(10) };
//! let mut render = RenderLoop::new(MockPanel::new(64, 32), fonts, state.clone());
//!
//! state.apply(DisplayUpdate::Track("Song".into()));
//! render.tick(0, chrono::NaiveDateTime::default());
//!
//! assert_eq!(render.panel().presented.len(), 1);
//! ```
//!
//! [`MatrixPanel`]: crate::traits::MatrixPanel
//! [`Font`]: crate::traits::Font
//! [`Clock`]: crate::traits::Clock
//! [`WallClock`]: crate::traits::WallClock

use std::cell::RefCell;

use chrono::NaiveDateTime;

use crate::state::Brightness;
use crate::traits::{Canvas, Clock, Font, MatrixPanel, Rgb, WallClock};
use crate::FrameBuffer;

// ============================================================================
// Panel Mocks
// ============================================================================

/// Error returned by [`MockPanel`] when `fail_swaps` is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockPanelError;

/// Mock LED matrix.
///
/// Keeps every presented frame and the brightness history. Set
/// `fail_swaps` to make presentation fail.
///
/// # Example
///
/// ```rust
/// use rs_ledmatrix::hal::MockPanel;
/// use rs_ledmatrix::state::Brightness;
/// use rs_ledmatrix::traits::MatrixPanel;
///
/// let mut panel = MockPanel::new(64, 32);
/// panel.set_brightness(Brightness::clamped(80)).unwrap();
/// let frame = panel.create_frame();
/// let back = panel.swap_on_vsync(frame).unwrap();
///
/// assert_eq!(panel.presented.len(), 1);
/// assert_eq!(back.pixels().len(), 64 * 32);
/// ```
#[derive(Debug)]
pub struct MockPanel {
    width: u32,
    height: u32,
    /// Last brightness applied.
    pub brightness: Option<Brightness>,
    /// Every brightness applied, in order.
    pub brightness_history: Vec<Brightness>,
    /// Every frame presented, in order.
    pub presented: Vec<FrameBuffer>,
    /// When true, `swap_on_vsync` fails and drops the frame.
    pub fail_swaps: bool,
}

impl MockPanel {
    /// Creates a panel of the given size.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            brightness: None,
            brightness_history: Vec::new(),
            presented: Vec::new(),
            fail_swaps: false,
        }
    }

    /// The frame most recently presented.
    pub fn last_frame(&self) -> Option<&FrameBuffer> {
        self.presented.last()
    }
}

impl MatrixPanel for MockPanel {
    type Error = MockPanelError;

    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn set_brightness(&mut self, brightness: Brightness) -> Result<(), MockPanelError> {
        self.brightness = Some(brightness);
        self.brightness_history.push(brightness);
        Ok(())
    }

    fn swap_on_vsync(&mut self, frame: FrameBuffer) -> Result<FrameBuffer, MockPanelError> {
        if self.fail_swaps {
            return Err(MockPanelError);
        }
        // Hand back the previously visible frame, stale pixels included
        let back = match self.presented.last() {
            Some(visible) => visible.clone(),
            None => self.create_frame(),
        };
        self.presented.push(frame);
        Ok(back)
    }
}

// ============================================================================
// Font Mock
// ============================================================================

/// Fixed-width font that records what was drawn.
///
/// Each glyph is `glyph_width` wide and draws a single pixel at the glyph
/// origin on the baseline, so frames show where text landed without any
/// real bitmaps.
///
/// # Example
///
/// ```rust
/// use rs_ledmatrix::hal::MockFont;
/// use rs_ledmatrix::traits::{Font, Rgb};
/// use rs_ledmatrix::FrameBuffer;
///
/// let font = MockFont::new(6);
/// let mut frame = FrameBuffer::new(64, 32);
/// let end = font.draw_text(&mut frame, 2, 10, Rgb::WHITE, b"abc");
///
/// assert_eq!(end, 20);
/// assert_eq!(font.calls(), vec![(2, 10, b"abc".to_vec())]);
/// ```
#[derive(Debug, Default)]
pub struct MockFont {
    glyph_width: i32,
    calls: RefCell<Vec<(i32, i32, Vec<u8>)>>,
}

impl MockFont {
    /// Creates a font with a fixed advance.
    pub fn new(glyph_width: i32) -> Self {
        Self {
            glyph_width,
            calls: RefCell::new(Vec::new()),
        }
    }

    /// Recorded `(x, baseline, text)` for every `draw_text` call.
    pub fn calls(&self) -> Vec<(i32, i32, Vec<u8>)> {
        self.calls.borrow().clone()
    }

    /// Forgets recorded calls.
    pub fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }
}

impl Clone for MockFont {
    fn clone(&self) -> Self {
        Self::new(self.glyph_width)
    }
}

impl Font for MockFont {
    fn glyph_width(&self, _glyph: u8) -> i32 {
        self.glyph_width
    }

    fn line_height(&self) -> i32 {
        self.glyph_width * 2
    }

    fn draw_text<C: Canvas>(&self, canvas: &mut C, x: i32, y: i32, color: Rgb, text: &[u8]) -> i32 {
        self.calls.borrow_mut().push((x, y, text.to_vec()));
        let mut pen = x;
        for _ in text {
            canvas.set_pixel(pen, y, color);
            pen += self.glyph_width;
        }
        pen
    }
}

// ============================================================================
// Time Mock
// ============================================================================

/// Mock clock for testing.
///
/// Provides a controllable time source for testing time-dependent behavior.
///
/// # Example
///
/// ```rust
/// use rs_ledmatrix::hal::MockClock;
/// use rs_ledmatrix::traits::Clock;
///
/// let mut clock = MockClock::new();
/// assert_eq!(clock.now_ms(), 0);
///
/// clock.set(1000);
/// assert_eq!(clock.now_ms(), 1000);
///
/// clock.advance(500);
/// assert_eq!(clock.now_ms(), 1500);
/// ```
#[derive(Debug)]
pub struct MockClock {
    current_ms: u64,
    local: NaiveDateTime,
}

impl MockClock {
    /// Creates a new mock clock starting at 0ms and the Unix epoch.
    pub fn new() -> Self {
        Self {
            current_ms: 0,
            local: NaiveDateTime::default(),
        }
    }

    /// Sets the current time in milliseconds.
    pub fn set(&mut self, ms: u64) {
        self.current_ms = ms;
    }

    /// Advances the monotonic time by the given duration.
    ///
    /// Wall time moves by the same amount.
    pub fn advance(&mut self, ms: u64) {
        self.current_ms += ms;
        self.local += chrono::Duration::milliseconds(ms as i64);
    }

    /// Sets the local wall-clock time.
    pub fn set_local(&mut self, local: NaiveDateTime) {
        self.local = local;
    }
}

impl Default for MockClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MockClock {
    fn now_ms(&self) -> u64 {
        self.current_ms
    }
}

impl WallClock for MockClock {
    fn local_now(&self) -> NaiveDateTime {
        self.local
    }
}
