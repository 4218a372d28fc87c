//! Room temperature page.

use crate::state::SensorSlot;
use crate::traits::{Canvas, Font, Rgb};

use super::PageContext;

const LABEL_COLOR: Rgb = Rgb::new(255, 255, 0);
const VALUE_COLOR: Rgb = Rgb::new(0, 255, 0);
const MISSING_COLOR: Rgb = Rgb::new(255, 0, 0);
const FIRST_BASELINE: i32 = 10;
const ROW_PITCH: i32 = 10;

/// Shown for a sensor that has not reported or sent garbage.
pub const MISSING_READING: &str = "--.-";

/// One row per sensor: `LR: 21.5C`.
#[derive(Debug, Clone, Default)]
pub struct SensorsPage;

impl SensorsPage {
    /// Creates the page.
    pub fn new() -> Self {
        Self
    }

    pub(super) fn draw<C: Canvas, F: Font>(&mut self, canvas: &mut C, ctx: &PageContext<'_, F>) {
        let font = &ctx.fonts.text;
        let mut y = FIRST_BASELINE;
        for slot in SensorSlot::ALL {
            let x = font.draw_text(canvas, 0, y, LABEL_COLOR, slot.label().as_bytes());
            let x = font.draw_text(canvas, x, y, LABEL_COLOR, b": ");
            match ctx.state.sensors.get(slot) {
                Some(v) if v.is_finite() => {
                    let value = format_reading(v);
                    font.draw_text(canvas, x, y, VALUE_COLOR, value.as_bytes());
                }
                _ => {
                    font.draw_text(canvas, x, y, MISSING_COLOR, MISSING_READING.as_bytes());
                }
            }
            y += ROW_PITCH;
        }
    }
}

/// One decimal place and a unit: `21.5C`.
pub fn format_reading(celsius: f32) -> String {
    format!("{:.1}C", celsius)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hal::MockFont;
    use crate::icons::IconRegistry;
    use crate::pages::Fonts;
    use crate::state::DisplayState;
    use crate::FrameBuffer;
    use chrono::NaiveDate;

    #[test]
    fn formats_one_decimal() {
        assert_eq!(format_reading(21.0), "21.0C");
        assert_eq!(format_reading(-3.26), "-3.3C");
        assert_eq!(format_reading(19.96), "20.0C");
    }

    #[test]
    fn draws_values_and_placeholders() {
        let fonts = Fonts {
            text: MockFont::new(6),
            large: MockFont::new(10),
        };
        let mut state = DisplayState::default();
        state.sensors.living = Some(21.5);
        state.sensors.outdoor = Some(f32::NAN);
        let ctx = PageContext {
            fonts: &fonts,
            icons: IconRegistry::global(),
            state: &state,
            local: NaiveDate::from_ymd_opt(2024, 1, 1)
                .and_then(|d| d.and_hms_opt(0, 0, 0))
                .unwrap(),
        };

        let mut frame = FrameBuffer::new(64, 32);
        SensorsPage::new().draw(&mut frame, &ctx);

        let calls = fonts.text.calls();
        assert_eq!(calls.len(), 9);
        assert_eq!(calls[0], (0, 10, b"LR".to_vec()));
        assert_eq!(calls[2], (24, 10, b"21.5C".to_vec()));
        assert_eq!(calls[3], (0, 20, b"BR".to_vec()));
        assert_eq!(calls[5], (24, 20, b"--.-".to_vec()));
        assert_eq!(calls[6], (0, 30, b"Out".to_vec()));
        assert_eq!(calls[8], (30, 30, b"--.-".to_vec()));
    }
}
