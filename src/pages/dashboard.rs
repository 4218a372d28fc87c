//! Weather and now-playing page.
//!
//! Layout on a 64x32 panel (baselines for text):
//!
//! ```text
//!  0        18
//!  +--------+---------------------------+
//!  | icon   | 12C              (y = 10) |
//!  | 16x16  |                           |
//!  +--------+---------------------------+
//!  | track, scrolling          (y = 20) |
//!  | summary, static           (y = 22) |
//!  | artist, scrolling         (y = 31) |
//!  +------------------------------------+
//! ```

use crate::scroll::ScrollLine;
use crate::traits::{Canvas, Font, Rgb};

use super::PageContext;

const TEMP_COLOR: Rgb = Rgb::new(255, 255, 0);
const SUMMARY_COLOR: Rgb = Rgb::new(0, 255, 255);
const TRACK_COLOR: Rgb = Rgb::WHITE;
const ARTIST_COLOR: Rgb = Rgb::new(0, 255, 0);

const TEMP_X: i32 = 18;
const TEMP_Y: i32 = 10;
const SUMMARY_Y: i32 = 22;
/// Summary is cut to this many bytes.
pub const SUMMARY_MAX: usize = 20;

/// Weather icon, temperature, summary and the track/artist marquees.
#[derive(Debug, Clone)]
pub struct DashboardPage {
    track: ScrollLine,
    artist: ScrollLine,
}

impl DashboardPage {
    /// Baseline of the track line.
    pub const TRACK_Y: i32 = 32 - 12;
    /// Baseline of the artist line.
    pub const ARTIST_Y: i32 = 32 - 1;

    /// Creates the page with empty marquees.
    pub fn new(display_width: i32, scroll_gap: i32) -> Self {
        Self {
            track: ScrollLine::new(display_width, scroll_gap),
            artist: ScrollLine::new(display_width, scroll_gap),
        }
    }

    /// True while either marquee needs per-frame redraws.
    pub fn is_scrolling(&self) -> bool {
        self.track.is_scrolling() || self.artist.is_scrolling()
    }

    /// Track marquee.
    pub fn track(&self) -> &ScrollLine {
        &self.track
    }

    /// Artist marquee.
    pub fn artist(&self) -> &ScrollLine {
        &self.artist
    }

    pub(super) fn draw<C: Canvas, F: Font>(&mut self, canvas: &mut C, ctx: &PageContext<'_, F>) {
        let font = &ctx.fonts.text;
        let state = ctx.state;

        self.track.update(&state.track, font);
        self.artist.update(&state.artist, font);

        ctx.icons.draw_condition(canvas, &state.weather_cond, 0, 0);

        if !state.weather_temp.is_empty() {
            let end = font.draw_text(
                canvas,
                TEMP_X,
                TEMP_Y,
                TEMP_COLOR,
                state.weather_temp.as_bytes(),
            );
            font.draw_text(canvas, end, TEMP_Y, TEMP_COLOR, b"C");
        }

        // Summary sits under the track marquee, which is drawn on top
        if !state.weather_summary.is_empty() {
            let bytes = state.weather_summary.as_bytes();
            let cut = &bytes[..bytes.len().min(SUMMARY_MAX)];
            font.draw_text(canvas, 0, SUMMARY_Y, SUMMARY_COLOR, cut);
        }

        self.track.draw(canvas, font, Self::TRACK_Y, TRACK_COLOR);
        self.artist.draw(canvas, font, Self::ARTIST_Y, ARTIST_COLOR);

        self.track.advance();
        self.artist.advance();
    }
}
