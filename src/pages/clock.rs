//! Large 24-hour clock with the date underneath.

use chrono::{Datelike, NaiveDateTime, Timelike};

use crate::traits::{Canvas, Font, Rgb};

use super::PageContext;

const TIME_COLOR: Rgb = Rgb::new(0, 255, 0);
const DATE_COLOR: Rgb = Rgb::new(0, 180, 255);
const TIME_Y: i32 = 17;
const DATE_Y: i32 = 30;

/// Minute resolution, so two frames with the same key look identical.
type Shown = (u32, u32, u32, u32);

fn shown_key(local: &NaiveDateTime) -> Shown {
    (local.hour(), local.minute(), local.day(), local.month())
}

/// `HH:MM` in the large font, `DD Mon` below.
#[derive(Debug, Clone, Default)]
pub struct ClockPage {
    shown: Option<Shown>,
}

impl ClockPage {
    /// A page that has not drawn yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Forces a redraw on the next tick.
    pub fn reset(&mut self) {
        self.shown = None;
    }

    /// True when the displayed text would change.
    pub fn needs_redraw(&self, local: &NaiveDateTime) -> bool {
        self.shown != Some(shown_key(local))
    }

    pub(super) fn draw<C: Canvas, F: Font>(&mut self, canvas: &mut C, ctx: &PageContext<'_, F>) {
        let time = ctx.local.format("%H:%M").to_string();
        let date = ctx.local.format("%d %b").to_string();

        let large = &ctx.fonts.large;
        let x = centered(canvas.width(), large.text_width(time.as_bytes()));
        large.draw_text(canvas, x, TIME_Y, TIME_COLOR, time.as_bytes());

        let text = &ctx.fonts.text;
        let x = centered(canvas.width(), text.text_width(date.as_bytes()));
        text.draw_text(canvas, x, DATE_Y, DATE_COLOR, date.as_bytes());

        self.shown = Some(shown_key(&ctx.local));
    }
}

fn centered(canvas_width: i32, text_width: i32) -> i32 {
    ((canvas_width - text_width) / 2).max(0)
}
