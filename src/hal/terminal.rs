//! Matrix panel simulated in a truecolor terminal.
//!
//! Two panel rows share one terminal cell: the upper pixel is the
//! foreground of a `▀` glyph and the lower pixel its background, so a
//! 64x32 panel needs a 64x16 terminal area. Brightness scales every
//! channel before output.

use std::io::{self, Stdout, Write};

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor};
use crossterm::terminal::{Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{execute, queue};

use crate::state::Brightness;
use crate::traits::{MatrixPanel, Rgb};
use crate::FrameBuffer;

const UPPER_HALF: char = '\u{2580}';

/// Panel that draws into a terminal (or any writer).
pub struct TerminalPanel<W: Write = Stdout> {
    writer: W,
    width: u32,
    height: u32,
    brightness: Brightness,
    alternate_screen: bool,
}

impl TerminalPanel<Stdout> {
    /// Takes over stdout: alternate screen, hidden cursor.
    ///
    /// The terminal is restored when the panel is dropped.
    pub fn new(width: u32, height: u32) -> io::Result<Self> {
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, Hide, Clear(ClearType::All))?;
        Ok(Self {
            writer: stdout,
            width,
            height,
            brightness: Brightness::default(),
            alternate_screen: true,
        })
    }
}

impl<W: Write> TerminalPanel<W> {
    /// Draws into `writer` without touching terminal modes.
    pub fn with_writer(writer: W, width: u32, height: u32) -> Self {
        Self {
            writer,
            width,
            height,
            brightness: Brightness::default(),
            alternate_screen: false,
        }
    }

    /// The underlying writer.
    pub fn writer(&self) -> &W {
        &self.writer
    }

    fn scaled(&self, c: Rgb) -> Color {
        let pct = self.brightness.percent() as u16;
        let s = |v: u8| ((v as u16 * pct) / 100) as u8;
        Color::Rgb {
            r: s(c.r),
            g: s(c.g),
            b: s(c.b),
        }
    }

    fn draw(&mut self, frame: &FrameBuffer) -> io::Result<()> {
        let rows: Vec<&[Rgb]> = frame.rows().collect();
        for (cell_row, pair) in rows.chunks(2).enumerate() {
            queue!(self.writer, MoveTo(0, cell_row as u16))?;
            let upper = pair[0];
            let lower = pair.get(1).copied();
            for (x, &top) in upper.iter().enumerate() {
                let bottom = lower.and_then(|row| row.get(x).copied()).unwrap_or(Rgb::BLACK);
                let fg = self.scaled(top);
                let bg = self.scaled(bottom);
                queue!(
                    self.writer,
                    SetForegroundColor(fg),
                    SetBackgroundColor(bg),
                    Print(UPPER_HALF)
                )?;
            }
            queue!(self.writer, ResetColor)?;
        }
        self.writer.flush()
    }
}

impl<W: Write> MatrixPanel for TerminalPanel<W> {
    type Error = io::Error;

    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn set_brightness(&mut self, brightness: Brightness) -> Result<(), io::Error> {
        self.brightness = brightness;
        Ok(())
    }

    fn swap_on_vsync(&mut self, frame: FrameBuffer) -> Result<FrameBuffer, io::Error> {
        self.draw(&frame)?;
        Ok(frame)
    }
}

impl<W: Write> Drop for TerminalPanel<W> {
    fn drop(&mut self) {
        if self.alternate_screen {
            let _ = execute!(self.writer, ResetColor, Show, LeaveAlternateScreen);
        }
    }
}
