//! Horizontal marquee for text lines wider than the panel.
//!
//! A [`ScrollLine`] is in one of two states:
//!
//! - **Static**: the text fits (`cycle_width <= display_width`). It is drawn
//!   once at x = 0 and the offset never moves.
//! - **Scrolling**: the text plus a gap is wider than the panel. It is drawn
//!   twice, at `offset` and `offset + cycle_width`, so the tail of one copy
//!   is followed by the head of the next. Each [`ScrollLine::advance`]
//!   moves one pixel left and wraps by one cycle once the first copy has
//!   fully left the screen.
//!
//! ```text
//!   offset                offset + cycle
//!   |<---- cycle_width --->|
//!   [ long track title  gap][ long track title  gap]
//!        |<-- display -->|
//! ```
//!
//! Widths are only recomputed when the text changes, so the per-frame cost
//! is a single subtraction.

use crate::traits::{Canvas, Font, Rgb};

/// One marquee line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrollLine {
    text: String,
    cycle_width: i32,
    offset: i32,
    display_width: i32,
    gap: i32,
}

impl ScrollLine {
    /// An empty line for a panel `display_width` pixels wide.
    pub fn new(display_width: i32, gap: i32) -> Self {
        Self {
            text: String::new(),
            cycle_width: 0,
            offset: display_width,
            display_width,
            gap,
        }
    }

    /// Replaces the text.
    ///
    /// Returns `false` and leaves the offset alone when `text` equals the
    /// current text. Otherwise the cycle width is recomputed and scrolling
    /// restarts from the right edge.
    pub fn update<F: Font>(&mut self, text: &str, font: &F) -> bool {
        if self.text == text {
            return false;
        }
        self.text.clear();
        self.text.push_str(text);

        let width = font.text_width(text.as_bytes());
        self.cycle_width = if width > self.display_width {
            width + self.gap
        } else {
            width
        };
        self.offset = self.display_width;
        true
    }

    /// True when the text does not fit and must move.
    pub fn is_scrolling(&self) -> bool {
        self.cycle_width > self.display_width
    }

    /// Moves one pixel left, wrapping by one cycle. No-op when static.
    pub fn advance(&mut self) {
        if !self.is_scrolling() {
            return;
        }
        self.offset -= 1;
        if self.offset + self.cycle_width < 0 {
            self.offset += self.cycle_width;
        }
    }

    /// Draws the line with its baseline at `y`.
    pub fn draw<C: Canvas, F: Font>(&self, canvas: &mut C, font: &F, y: i32, color: Rgb) {
        if self.text.is_empty() {
            return;
        }
        let bytes = self.text.as_bytes();
        if self.is_scrolling() {
            font.draw_text(canvas, self.offset, y, color, bytes);
            font.draw_text(canvas, self.offset + self.cycle_width, y, color, bytes);
        } else {
            font.draw_text(canvas, 0, y, color, bytes);
        }
    }

    /// Current text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// X position of the first copy.
    pub fn offset(&self) -> i32 {
        self.offset
    }

    /// Text width, plus the gap when scrolling.
    pub fn cycle_width(&self) -> i32 {
        self.cycle_width
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hal::MockFont;
    use crate::FrameBuffer;

    fn font() -> MockFont {
        MockFont::new(6)
    }

    // ========================================================================
    // update
    // ========================================================================

    #[test]
    fn short_text_is_static() {
        let mut line = ScrollLine::new(64, 10);
        assert!(line.update("Song", &font()));
        assert!(!line.is_scrolling());
        assert_eq!(line.cycle_width(), 24);
        assert_eq!(line.offset(), 64);
    }

    #[test]
    fn text_exactly_display_width_is_static() {
        let mut line = ScrollLine::new(60, 10);
        line.update("0123456789", &font());
        assert_eq!(line.cycle_width(), 60);
        assert!(!line.is_scrolling());
    }

    #[test]
    fn long_text_adds_gap() {
        let mut line = ScrollLine::new(64, 10);
        line.update("A very long song title", &font());
        assert_eq!(line.cycle_width(), 22 * 6 + 10);
        assert!(line.is_scrolling());
    }

    #[test]
    fn same_text_is_a_no_op() {
        let mut line = ScrollLine::new(64, 10);
        line.update("A very long song title", &font());
        for _ in 0..17 {
            line.advance();
        }
        let offset = line.offset();
        assert!(!line.update("A very long song title", &font()));
        assert_eq!(line.offset(), offset);
    }

    #[test]
    fn new_text_resets_offset() {
        let mut line = ScrollLine::new(64, 10);
        line.update("A very long song title", &font());
        line.advance();
        line.advance();
        assert!(line.update("Another very long title", &font()));
        assert_eq!(line.offset(), 64);
    }

    // ========================================================================
    // advance
    // ========================================================================

    #[test]
    fn static_line_never_moves() {
        let mut line = ScrollLine::new(64, 10);
        line.update("Hi", &font());
        for _ in 0..100 {
            line.advance();
        }
        assert_eq!(line.offset(), 64);
    }

    #[test]
    fn wraparound_is_periodic_and_bounded() {
        let mut line = ScrollLine::new(64, 10);
        line.update("A very long song title", &font());
        let w = line.cycle_width();

        // First pass enters from the right edge
        for _ in 0..(64 + w) {
            line.advance();
            let o = line.offset();
            assert!(o >= -w && o <= 64, "offset {} out of range", o);
        }
        assert_eq!(line.offset(), -w);

        let mut seen = Vec::new();
        for _ in 0..(3 * w) {
            line.advance();
            let o = line.offset();
            assert!((-w..0).contains(&o), "offset {} out of range", o);
            seen.push(o);
        }
        assert_eq!(seen[0], -1);
        for i in 0..(2 * w) as usize {
            assert_eq!(seen[i], seen[i + w as usize]);
        }
    }

    #[test]
    fn wraps_when_first_copy_leaves() {
        let mut line = ScrollLine::new(10, 2);
        line.update("abc", &MockFont::new(4)); // 12 + 2 = 14
        assert_eq!(line.cycle_width(), 14);
        // 10 -> -14 takes 24 steps, one more wraps to -15 + 14 = -1
        for _ in 0..24 {
            line.advance();
        }
        assert_eq!(line.offset(), -14);
        line.advance();
        assert_eq!(line.offset(), -1);
    }

    // ========================================================================
    // draw
    // ========================================================================

    #[test]
    fn empty_text_draws_nothing() {
        let font = font();
        let line = ScrollLine::new(64, 10);
        let mut frame = FrameBuffer::new(64, 32);
        line.draw(&mut frame, &font, 20, Rgb::WHITE);
        assert!(font.calls().is_empty());
    }

    #[test]
    fn static_text_draws_once_at_left_margin() {
        let font = font();
        let mut line = ScrollLine::new(64, 10);
        line.update("Band", &font);
        let mut frame = FrameBuffer::new(64, 32);
        line.draw(&mut frame, &font, 31, Rgb::WHITE);
        assert_eq!(font.calls(), vec![(0, 31, b"Band".to_vec())]);
    }

    #[test]
    fn scrolling_text_draws_two_copies() {
        let font = font();
        let mut line = ScrollLine::new(64, 10);
        line.update("A very long song title", &font);
        line.advance();
        let w = line.cycle_width();
        let mut frame = FrameBuffer::new(64, 32);
        line.draw(&mut frame, &font, 20, Rgb::WHITE);
        let calls = font.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!((calls[0].0, calls[0].1), (63, 20));
        assert_eq!((calls[1].0, calls[1].1), (63 + w, 20));
    }
}
