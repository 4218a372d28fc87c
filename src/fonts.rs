//! Bitmap fonts backed by `embedded-graphics` mono fonts.
//!
//! [`MonoFontFace`] implements [`Font`] for the ASCII mono fonts that ship
//! with `embedded-graphics`. The layouts assume the 6x13 face for body
//! text and 10x20 for the clock.
//!
//! # Example
//!
//! ```rust
//! use rs_ledmatrix::fonts::MonoFontFace;
//! use rs_ledmatrix::traits::Font;
//!
//! let face = MonoFontFace::from_name("6x13").unwrap();
//! assert_eq!(face.text_width(b"12.5C"), 30);
//! assert!(MonoFontFace::from_name("comic-sans").is_err());
//! ```

use core::convert::Infallible;
use core::fmt;

use embedded_graphics::mono_font::ascii::{
    FONT_10X20, FONT_4X6, FONT_5X8, FONT_6X10, FONT_6X13, FONT_7X13, FONT_8X13, FONT_9X15,
};
use embedded_graphics::mono_font::{MonoFont, MonoTextStyle};
use embedded_graphics::pixelcolor::{Rgb888, RgbColor};
use embedded_graphics::prelude::{DrawTarget, Drawable, OriginDimensions, Point, Size};
use embedded_graphics::text::{Baseline, Text};
use embedded_graphics::Pixel;

use crate::traits::{Canvas, Font, Rgb};

/// Names accepted by [`MonoFontFace::from_name`].
pub const FONT_NAMES: [&str; 8] = [
    "4x6", "5x8", "6x10", "6x13", "7x13", "8x13", "9x15", "10x20",
];

/// Raised when a configured font does not exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontError {
    name: String,
}

impl fmt::Display for FontError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown font '{}' (available: {})",
            self.name,
            FONT_NAMES.join(", ")
        )
    }
}

impl std::error::Error for FontError {}

/// A fixed-width ASCII font.
#[derive(Clone, Copy)]
pub struct MonoFontFace {
    font: &'static MonoFont<'static>,
}

impl MonoFontFace {
    /// Looks up a font by its `WxH` name.
    pub fn from_name(name: &str) -> Result<Self, FontError> {
        let font = match name {
            "4x6" => &FONT_4X6,
            "5x8" => &FONT_5X8,
            "6x10" => &FONT_6X10,
            "6x13" => &FONT_6X13,
            "7x13" => &FONT_7X13,
            "8x13" => &FONT_8X13,
            "9x15" => &FONT_9X15,
            "10x20" => &FONT_10X20,
            _ => {
                return Err(FontError {
                    name: name.to_string(),
                })
            }
        };
        Ok(Self { font })
    }

    /// Cell size of one glyph.
    pub fn character_size(&self) -> Size {
        self.font.character_size
    }
}

impl Default for MonoFontFace {
    fn default() -> Self {
        Self { font: &FONT_6X13 }
    }
}

impl fmt::Debug for MonoFontFace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MonoFontFace")
            .field("character_size", &self.font.character_size)
            .finish()
    }
}

impl Font for MonoFontFace {
    fn glyph_width(&self, _glyph: u8) -> i32 {
        (self.font.character_size.width + self.font.character_spacing) as i32
    }

    fn line_height(&self) -> i32 {
        self.font.character_size.height as i32
    }

    fn draw_text<C: Canvas>(&self, canvas: &mut C, x: i32, y: i32, color: Rgb, text: &[u8]) -> i32 {
        let glyphs = glyph_string(text);
        let style = MonoTextStyle::new(self.font, Rgb888::new(color.r, color.g, color.b));
        let mut target = CanvasTarget(canvas);
        match Text::with_baseline(&glyphs, Point::new(x, y), style, Baseline::Alphabetic)
            .draw(&mut target)
        {
            Ok(next) => next.x,
            Err(never) => match never {},
        }
    }
}

/// One `char` per byte; control bytes become spaces so text never wraps.
fn glyph_string(text: &[u8]) -> String {
    text.iter()
        .map(|&b| if b.is_ascii_control() { ' ' } else { char::from(b) })
        .collect()
}

/// Lets `embedded-graphics` draw onto any [`Canvas`].
struct CanvasTarget<'a, C: Canvas>(&'a mut C);

impl<C: Canvas> OriginDimensions for CanvasTarget<'_, C> {
    fn size(&self) -> Size {
        Size::new(self.0.width().max(0) as u32, self.0.height().max(0) as u32)
    }
}

impl<C: Canvas> DrawTarget for CanvasTarget<'_, C> {
    type Color = Rgb888;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(coord, color) in pixels {
            self.0
                .set_pixel(coord.x, coord.y, Rgb::new(color.r(), color.g(), color.b()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FrameBuffer;

    #[test]
    fn every_listed_name_resolves() {
        for name in FONT_NAMES {
            assert!(MonoFontFace::from_name(name).is_ok(), "{}", name);
        }
    }

    #[test]
    fn unknown_name_is_an_error() {
        let err = MonoFontFace::from_name("6x12").unwrap_err();
        assert!(err.to_string().contains("6x12"));
    }

    #[test]
    fn width_is_per_byte() {
        let face = MonoFontFace::default();
        assert_eq!(face.glyph_width(b'A'), 6);
        assert_eq!(face.text_width(b""), 0);
        assert_eq!(face.text_width(b"Hello"), 30);
        // A two-byte UTF-8 char counts as two glyphs
        assert_eq!(face.text_width("é".as_bytes()), 12);
    }

    #[test]
    fn draw_returns_advance_and_lights_pixels() {
        let face = MonoFontFace::default();
        let mut frame = FrameBuffer::new(64, 32);
        let end = face.draw_text(&mut frame, 2, 12, Rgb::WHITE, b"Hi");
        assert_eq!(end, 2 + 12);
        assert!(frame.lit_count() > 0);
        // Nothing drawn left of the origin
        assert!((0..32).all(|y| frame.pixel(0, y) == Some(Rgb::BLACK)));
    }

    #[test]
    fn draw_clips_off_canvas_text() {
        let face = MonoFontFace::default();
        let mut frame = FrameBuffer::new(16, 16);
        face.draw_text(&mut frame, -100, 12, Rgb::WHITE, b"clipped");
        face.draw_text(&mut frame, 100, 12, Rgb::WHITE, b"clipped");
        assert_eq!(frame.lit_count(), 0);
    }

    #[test]
    fn control_bytes_do_not_wrap() {
        assert_eq!(glyph_string(b"a\nb"), "a b");
    }
}
