//! Pixel canvas and panel abstractions.
//!
//! The render loop only ever talks to these two traits:
//!
//! - [`Canvas`]: an off-screen pixel buffer that pages, icons and fonts draw on
//! - [`MatrixPanel`]: the physical (or simulated) LED matrix that presents a
//!   finished canvas and accepts a brightness value
//!
//! Panel bring-up (pin mapping, DMA, refresh rate) happens before a
//! [`MatrixPanel`] is handed to the render loop.

use crate::state::Brightness;
use crate::FrameBuffer;

/// A 24-bit RGB color.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rgb {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb {
    /// Pure black, also the "off" color of an LED.
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    /// Pure white.
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    /// Creates a color from its channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// True when every channel is zero.
    pub const fn is_black(&self) -> bool {
        self.r == 0 && self.g == 0 && self.b == 0
    }
}

/// Drawable pixel surface.
///
/// Coordinates are signed so callers can position content partly off-screen;
/// implementations must ignore writes outside `0..width` x `0..height`.
pub trait Canvas {
    /// Width in pixels.
    fn width(&self) -> i32;

    /// Height in pixels.
    fn height(&self) -> i32;

    /// Sets one pixel. Out-of-bounds coordinates are ignored.
    fn set_pixel(&mut self, x: i32, y: i32, color: Rgb);

    /// Sets every pixel to black.
    fn clear(&mut self);
}

/// An LED matrix that shows double-buffered frames.
pub trait MatrixPanel {
    /// Error type for panel operations.
    type Error: core::fmt::Debug;

    /// Visible width in pixels (all chained panels).
    fn width(&self) -> u32;

    /// Visible height in pixels.
    fn height(&self) -> u32;

    /// Applies a brightness value. The value is already clamped.
    fn set_brightness(&mut self, brightness: Brightness) -> Result<(), Self::Error>;

    /// Presents `frame`, synchronized to the panel refresh, and hands back
    /// the buffer to draw the next frame into.
    fn swap_on_vsync(&mut self, frame: FrameBuffer) -> Result<FrameBuffer, Self::Error>;

    /// Creates an off-screen buffer matching the panel size.
    fn create_frame(&self) -> FrameBuffer {
        FrameBuffer::new(self.width(), self.height())
    }
}
