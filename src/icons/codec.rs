//! Glyph-grid decoding and per-icon shading.

use crate::traits::Rgb;

use super::{Icon16, ICON_SIZE};

/// A human-editable icon definition.
///
/// `rows` holds 16 strings of 16 symbols. The symbol at position *i* of
/// `legend` selects `palette[i]`; `.` always selects `palette[0]`.
#[derive(Debug, Clone, Copy)]
pub struct EncodedIcon {
    /// Registry name, lowercase.
    pub name: &'static str,
    /// Symbol grid, one string per row.
    pub rows: &'static [&'static str],
    /// Colors indexed by legend position.
    pub palette: &'static [Rgb],
    /// Symbols in palette order.
    pub legend: &'static str,
}

impl EncodedIcon {
    /// True when the grid is exactly 16 rows of 16 symbols.
    pub fn is_well_formed(&self) -> bool {
        self.rows.len() == ICON_SIZE && self.rows.iter().all(|r| r.len() == ICON_SIZE)
    }

    /// Color for one grid symbol. Unknown symbols are black.
    pub fn color_of(&self, symbol: u8) -> Rgb {
        let index = if symbol == b'.' {
            Some(0)
        } else {
            self.legend.bytes().position(|s| s == symbol)
        };
        index
            .and_then(|i| self.palette.get(i))
            .copied()
            .unwrap_or(Rgb::BLACK)
    }
}

/// Expands a definition into a 16x16 RGB buffer, row-major.
///
/// Total: missing rows or cells, unknown symbols and legend positions
/// without a palette entry all decode to black.
pub fn decode(def: &EncodedIcon) -> Icon16 {
    let mut icon = Icon16::blank();
    for y in 0..ICON_SIZE {
        let row = def.rows.get(y).map(|r| r.as_bytes()).unwrap_or(&[]);
        for x in 0..ICON_SIZE {
            let color = row.get(x).map(|&s| def.color_of(s)).unwrap_or(Rgb::BLACK);
            icon.set(x, y, color);
        }
    }
    icon
}

/// The "bright yellow" test used by the shading passes.
fn is_bright_yellow(c: Rgb) -> bool {
    c.r > 200 && c.g > 150 && c.b < 50
}

fn scale_green(icon: &mut Icon16, x: usize, y: usize, factor: f32) {
    let mut c = icon.get(x, y);
    c.g = (c.g as f32 * factor) as u8;
    icon.set(x, y, c);
}

/// Name-keyed cosmetic shading, applied once right after decoding.
///
/// - `clear`/`sunny`: yellow pixels farther than sqrt(30) from the center
///   get an orange rim (green x 0.6)
/// - `thunder`: yellow pixels in rows 10..16 are darkened towards orange
///   (green x 0.7)
pub fn post_process(name: &str, icon: &mut Icon16) {
    match name {
        "clear" | "sunny" => {
            for y in 0..ICON_SIZE {
                for x in 0..ICON_SIZE {
                    if !is_bright_yellow(icon.get(x, y)) {
                        continue;
                    }
                    let dx = x as f32 - 7.5;
                    let dy = y as f32 - 7.5;
                    if dx * dx + dy * dy > 30.0 {
                        scale_green(icon, x, y, 0.6);
                    }
                }
            }
        }
        "thunder" => {
            for y in 10..ICON_SIZE {
                for x in 0..ICON_SIZE {
                    if is_bright_yellow(icon.get(x, y)) {
                        scale_green(icon, x, y, 0.7);
                    }
                }
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgb = Rgb::new(255, 0, 0);
    const YELLOW: Rgb = Rgb::new(255, 220, 0);

    static SOLID_ROWS: [&str; 16] = ["XXXXXXXXXXXXXXXX"; 16];

    fn solid(name: &'static str, palette: &'static [Rgb], legend: &'static str) -> EncodedIcon {
        EncodedIcon {
            name,
            rows: &SOLID_ROWS,
            palette,
            legend,
        }
    }

    // =========================================================================
    // decode
    // =========================================================================

    #[test]
    fn legend_position_selects_palette_entry() {
        static PAL: [Rgb; 2] = [Rgb::BLACK, RED];
        let icon = decode(&solid("t", &PAL, ".X"));
        assert_eq!(icon.as_bytes().len(), 768);
        assert!(icon.pixels().all(|c| c == RED));
    }

    #[test]
    fn dot_is_palette_zero_even_without_legend() {
        static ROWS: [&str; 16] = ["................"; 16];
        static PAL: [Rgb; 1] = [Rgb::new(9, 8, 7)];
        let def = EncodedIcon {
            name: "t",
            rows: &ROWS,
            palette: &PAL,
            legend: "",
        };
        assert!(decode(&def).pixels().all(|c| c == Rgb::new(9, 8, 7)));
    }

    #[test]
    fn unknown_symbol_is_black() {
        static PAL: [Rgb; 2] = [Rgb::WHITE, RED];
        let icon = decode(&solid("t", &PAL, ".Y"));
        assert!(icon.pixels().all(|c| c == Rgb::BLACK));
    }

    #[test]
    fn legend_past_palette_end_is_black() {
        static PAL: [Rgb; 2] = [Rgb::WHITE, RED];
        let icon = decode(&solid("t", &PAL, ".1 X"));
        assert!(icon.pixels().all(|c| c == Rgb::BLACK));
    }

    #[test]
    fn short_rows_pad_with_black() {
        static ROWS: [&str; 2] = ["XX", "X"];
        static PAL: [Rgb; 2] = [Rgb::BLACK, RED];
        let def = EncodedIcon {
            name: "t",
            rows: &ROWS,
            palette: &PAL,
            legend: ".X",
        };
        assert!(!def.is_well_formed());
        let icon = decode(&def);
        assert_eq!(icon.get(0, 0), RED);
        assert_eq!(icon.get(1, 0), RED);
        assert_eq!(icon.get(0, 1), RED);
        assert_eq!(icon.get(2, 0), Rgb::BLACK);
        assert_eq!(icon.get(0, 15), Rgb::BLACK);
        assert_eq!(icon.pixels().filter(|c| *c == RED).count(), 3);
    }

    #[test]
    fn decode_is_row_major() {
        static ROWS: [&str; 3] = ["................", "..X.............", "................"];
        static PAL: [Rgb; 2] = [Rgb::BLACK, RED];
        let def = EncodedIcon {
            name: "t",
            rows: &ROWS,
            palette: &PAL,
            legend: ".X",
        };
        let bytes = *decode(&def).as_bytes();
        let idx = (16 + 2) * 3;
        assert_eq!(&bytes[idx..idx + 3], &[255, 0, 0]);
        assert_eq!(bytes.iter().filter(|&&b| b != 0).count(), 1);
    }

    // =========================================================================
    // post_process
    // =========================================================================

    #[test]
    fn sun_rim_is_orange_center_untouched() {
        static PAL: [Rgb; 2] = [Rgb::BLACK, YELLOW];
        let mut icon = decode(&solid("clear", &PAL, ".X"));
        post_process("clear", &mut icon);

        // Center: distance^2 = 0.5
        assert_eq!(icon.get(7, 7), YELLOW);
        // Corner: distance^2 = 112.5
        assert_eq!(icon.get(0, 0), Rgb::new(255, 132, 0));
        // Just inside the radius: (3, 7) -> 4.5^2 + 0.5^2 = 20.5
        assert_eq!(icon.get(3, 7), YELLOW);
        // Just outside: (2, 7) -> 5.5^2 + 0.5^2 = 30.5
        assert_eq!(icon.get(2, 7), Rgb::new(255, 132, 0));
    }

    #[test]
    fn sunny_gets_same_shading() {
        static PAL: [Rgb; 2] = [Rgb::BLACK, YELLOW];
        let mut a = decode(&solid("clear", &PAL, ".X"));
        let mut b = a.clone();
        post_process("clear", &mut a);
        post_process("sunny", &mut b);
        assert_eq!(a, b);
    }

    #[test]
    fn thunder_shades_only_lower_rows() {
        static PAL: [Rgb; 2] = [Rgb::BLACK, YELLOW];
        let mut icon = decode(&solid("thunder", &PAL, ".X"));
        post_process("thunder", &mut icon);
        assert_eq!(icon.get(5, 9), YELLOW);
        assert_eq!(icon.get(5, 10), Rgb::new(255, 154, 0));
        assert_eq!(icon.get(15, 15), Rgb::new(255, 154, 0));
    }

    #[test]
    fn scaled_green_is_truncated() {
        static PAL: [Rgb; 2] = [Rgb::BLACK, Rgb::new(255, 201, 0)];
        let mut sun = decode(&solid("clear", &PAL, ".X"));
        post_process("clear", &mut sun);
        // 201 * 0.6 = 120.6
        assert_eq!(sun.get(0, 0), Rgb::new(255, 120, 0));

        let mut bolt = decode(&solid("thunder", &PAL, ".X"));
        post_process("thunder", &mut bolt);
        // 201 * 0.7 = 140.7
        assert_eq!(bolt.get(0, 12), Rgb::new(255, 140, 0));
    }

    #[test]
    fn non_yellow_pixels_are_untouched() {
        static PAL: [Rgb; 2] = [Rgb::BLACK, Rgb::new(255, 120, 0)];
        let mut icon = decode(&solid("clear", &PAL, ".X"));
        let before = icon.clone();
        post_process("clear", &mut icon);
        assert_eq!(icon, before);
    }

    #[test]
    fn other_names_are_untouched() {
        static PAL: [Rgb; 2] = [Rgb::BLACK, YELLOW];
        let mut icon = decode(&solid("rain", &PAL, ".X"));
        let before = icon.clone();
        post_process("rain", &mut icon);
        assert_eq!(icon, before);
    }
}
