//! Text drawing abstraction.
//!
//! Text is treated as a sequence of single-byte glyphs: every byte of the
//! input is one glyph, with no multi-byte decoding. Width measurement and
//! drawing must agree on this so marquee cycle widths line up with what is
//! actually drawn.

use super::{Canvas, Rgb};

/// A loaded bitmap font.
pub trait Font {
    /// Horizontal advance of one glyph in pixels.
    fn glyph_width(&self, glyph: u8) -> i32;

    /// Distance between baselines of consecutive lines.
    fn line_height(&self) -> i32;

    /// Total advance of `text`.
    fn text_width(&self, text: &[u8]) -> i32 {
        text.iter().map(|&g| self.glyph_width(g)).sum()
    }

    /// Draws `text` with its baseline at `y`, starting at `x`.
    ///
    /// Returns the x position just after the last glyph.
    fn draw_text<C: Canvas>(&self, canvas: &mut C, x: i32, y: i32, color: Rgb, text: &[u8])
        -> i32;
}
