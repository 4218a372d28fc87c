//! 16x16 weather and status icons.
//!
//! Icons are authored as readable glyph grids (see `catalog`) and decoded
//! once into fixed 768-byte RGB buffers:
//!
//! ```text
//! "..112222211....."   legend ".12" -> palette [BLACK, LGREY, WHITE]
//! ```
//!
//! Lookup goes through [`normalize_condition`] first so that the vocabulary
//! of the upstream weather integration ("partlycloudy", "pouring", ...)
//! lands on one of the few drawn icons. Anything unknown draws the
//! `unknown` icon; lookup never fails.
//!
//! # Example
//!
//! ```rust
//! use rs_ledmatrix::icons::{normalize_condition, IconRegistry};
//! use rs_ledmatrix::FrameBuffer;
//!
//! assert_eq!(normalize_condition("Thunderstorm"), "thunder");
//!
//! let mut frame = FrameBuffer::new(64, 32);
//! IconRegistry::global().draw_condition(&mut frame, "rainy", 0, 0);
//! assert!(frame.lit_count() > 0);
//! ```

mod catalog;
mod codec;
mod registry;

pub use catalog::{ALIASES, DEFINITIONS};
pub use codec::{decode, post_process, EncodedIcon};
pub use registry::{IconRegistry, FALLBACK_ICON};

use crate::traits::{Canvas, Rgb};

/// Icon edge length in pixels.
pub const ICON_SIZE: usize = 16;

/// Bytes in one decoded icon.
pub const ICON_BYTES: usize = ICON_SIZE * ICON_SIZE * 3;

/// A decoded 16x16 RGB icon, row-major, 3 bytes per pixel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Icon16 {
    pixels: [u8; ICON_BYTES],
}

impl Icon16 {
    /// An all-black icon.
    pub const fn blank() -> Self {
        Self {
            pixels: [0; ICON_BYTES],
        }
    }

    /// Raw buffer.
    pub fn as_bytes(&self) -> &[u8; ICON_BYTES] {
        &self.pixels
    }

    /// Color at `(x, y)`. Panics if either coordinate is 16 or more.
    pub fn get(&self, x: usize, y: usize) -> Rgb {
        let i = (y * ICON_SIZE + x) * 3;
        Rgb::new(self.pixels[i], self.pixels[i + 1], self.pixels[i + 2])
    }

    pub(crate) fn set(&mut self, x: usize, y: usize, c: Rgb) {
        let i = (y * ICON_SIZE + x) * 3;
        self.pixels[i] = c.r;
        self.pixels[i + 1] = c.g;
        self.pixels[i + 2] = c.b;
    }

    /// All 256 pixels, row-major.
    pub fn pixels(&self) -> impl Iterator<Item = Rgb> + '_ {
        self.pixels
            .chunks_exact(3)
            .map(|p| Rgb::new(p[0], p[1], p[2]))
    }
}

/// Maps upstream weather vocabulary onto icon names.
///
/// Lowercases first; unmapped names pass through unchanged (and resolve to
/// the fallback icon if nothing is registered under them). Idempotent.
pub fn normalize_condition(raw: &str) -> String {
    let key = raw.to_lowercase();
    let mapped = match key.as_str() {
        "clear-night" => "clear",
        "partlycloudy" | "partly-cloudy" | "partly-cloudy-day" | "partlycloudy-day" => "cloudy",
        "lightning" | "lightning-rainy" | "thunderstorm" => "thunder",
        "rainy" | "pouring" | "showers" => "rain",
        "snowy" | "snowy-rainy" | "hail" => "snow",
        _ => return key,
    };
    mapped.to_string()
}

/// Blits `icon` with its top-left corner at `(x, y)`.
///
/// Pixels that fall outside the canvas are skipped; the icon itself is
/// never clamped or shifted.
pub fn draw_icon<C: Canvas>(canvas: &mut C, icon: &Icon16, x: i32, y: i32) {
    let (w, h) = (canvas.width(), canvas.height());
    for j in 0..ICON_SIZE {
        let yy = y + j as i32;
        if yy < 0 || yy >= h {
            continue;
        }
        for i in 0..ICON_SIZE {
            let xx = x + i as i32;
            if xx < 0 || xx >= w {
                continue;
            }
            canvas.set_pixel(xx, yy, icon.get(i, j));
        }
    }
}
