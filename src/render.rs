//! Fixed-rate render loop.
//!
//! Each tick:
//!
//! 1. takes the pending flags from [`SharedDisplayState`] (one short lock)
//! 2. applies page commands and auto-rotation
//! 3. decides whether a frame is needed at all
//! 4. snapshots the state, draws the active page off-screen and presents it
//!
//! The lock is never held while drawing or presenting. Panel errors are
//! logged and the loop keeps going; it only stops when [`Shutdown`] is
//! requested.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::NaiveDateTime;

use crate::config::Config;
use crate::icons::IconRegistry;
use crate::pages::{Fonts, PageContext, PageController, PageKind};
use crate::state::SharedDisplayState;
use crate::traits::{Canvas, Clock, Font, MatrixPanel, WallClock};
use crate::FrameBuffer;

/// Default tick period.
pub const DEFAULT_FRAME_PERIOD: Duration = Duration::from_millis(50);

// ============================================================================
// Shutdown
// ============================================================================

/// Cloneable stop flag shared between the render loop and signal handlers.
#[derive(Clone, Debug, Default)]
pub struct Shutdown(Arc<AtomicBool>);

impl Shutdown {
    /// A flag that is not yet raised.
    pub fn new() -> Self {
        Self::default()
    }

    /// Asks every holder to stop.
    pub fn request(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// True once [`Shutdown::request`] was called on any clone.
    pub fn is_requested(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

// ============================================================================
// Render Loop
// ============================================================================

/// What a tick did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// Nothing changed; no frame was drawn.
    Idle,
    /// A frame was drawn and handed to the panel.
    Rendered,
}

/// Drives a [`MatrixPanel`] from [`SharedDisplayState`].
pub struct RenderLoop<P: MatrixPanel, F: Font> {
    panel: P,
    offscreen: FrameBuffer,
    fonts: Fonts<F>,
    icons: &'static IconRegistry,
    pages: PageController,
    state: Arc<SharedDisplayState>,
    frame_period: Duration,
    reported_page: Option<PageKind>,
    frames: u64,
}

impl<P: MatrixPanel, F: Font> RenderLoop<P, F> {
    /// Creates a loop with the standard pages sized to the panel.
    pub fn new(panel: P, fonts: Fonts<F>, state: Arc<SharedDisplayState>) -> Self {
        let offscreen = panel.create_frame();
        let pages = PageController::new(panel.width() as i32, 10);
        Self {
            panel,
            offscreen,
            fonts,
            icons: IconRegistry::global(),
            pages,
            state,
            frame_period: DEFAULT_FRAME_PERIOD,
            reported_page: None,
            frames: 0,
        }
    }

    /// Creates a loop using frame period, scroll gap and page settings
    /// from `config`.
    pub fn from_config(
        panel: P,
        fonts: Fonts<F>,
        state: Arc<SharedDisplayState>,
        config: &Config,
    ) -> Self {
        let mut pages = PageController::new(panel.width() as i32, config.matrix.scroll_gap)
            .with_rotate_secs(config.pages.rotate_secs);
        if let Some(kind) = PageKind::from_name(&config.pages.start_page) {
            pages = pages.with_start_page(kind);
        }
        Self::new(panel, fonts, state)
            .with_pages(pages)
            .with_frame_period(Duration::from_millis(config.matrix.frame_ms as u64))
    }

    /// Replaces the page set.
    pub fn with_pages(mut self, pages: PageController) -> Self {
        self.pages = pages;
        self
    }

    /// Sets the tick period.
    pub fn with_frame_period(mut self, period: Duration) -> Self {
        self.frame_period = period;
        self
    }

    /// Uses a different icon set.
    pub fn with_icons(mut self, icons: &'static IconRegistry) -> Self {
        self.icons = icons;
        self
    }

    /// The panel.
    pub fn panel(&self) -> &P {
        &self.panel
    }

    /// The panel, mutably.
    pub fn panel_mut(&mut self) -> &mut P {
        &mut self.panel
    }

    /// The fonts pages are drawn with.
    pub fn fonts(&self) -> &Fonts<F> {
        &self.fonts
    }

    /// The page controller.
    pub fn pages(&self) -> &PageController {
        &self.pages
    }

    /// Frames presented so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Runs one iteration.
    ///
    /// `now_ms` drives page rotation, `local` is shown by the clock page.
    pub fn tick(&mut self, now_ms: u64, local: NaiveDateTime) -> TickOutcome {
        let pending = self.state.take_pending();

        if let Some(secs) = pending.rotate_secs {
            self.pages.set_rotate_secs(secs);
        }
        let mut page_changed = false;
        if let Some(command) = pending.page_command {
            page_changed |= self.pages.apply(command, now_ms);
        }
        page_changed |= self.pages.update(now_ms);

        let active = self.pages.active_kind();
        if active != self.reported_page {
            if let Some(kind) = active {
                log::debug!("showing page {}", kind);
                self.state.set_active_page(kind);
            }
            self.reported_page = active;
        }

        if !(pending.dirty || page_changed || self.pages.needs_redraw(&local)) {
            return TickOutcome::Idle;
        }

        let snapshot = self.state.snapshot();
        if let Err(e) = self.panel.set_brightness(snapshot.brightness) {
            log::warn!("panel rejected brightness {:?}: {:?}", snapshot.brightness, e);
        }

        self.offscreen.clear();
        let ctx = PageContext {
            fonts: &self.fonts,
            icons: self.icons,
            state: &snapshot,
            local,
        };
        self.pages.draw(&mut self.offscreen, &ctx);

        let frame = core::mem::replace(&mut self.offscreen, FrameBuffer::new(0, 0));
        self.offscreen = match self.panel.swap_on_vsync(frame) {
            Ok(next) => next,
            Err(e) => {
                log::warn!("panel swap failed: {:?}", e);
                self.panel.create_frame()
            }
        };
        self.frames += 1;
        TickOutcome::Rendered
    }

    /// Ticks at the configured period until `shutdown` is requested.
    pub fn run<K: Clock + WallClock>(&mut self, clock: &K, shutdown: &Shutdown) {
        log::info!(
            "render loop started ({}x{}, {} ms/frame)",
            self.panel.width(),
            self.panel.height(),
            self.frame_period.as_millis()
        );
        while !shutdown.is_requested() {
            let started = Instant::now();
            self.tick(clock.now_ms(), clock.local_now());
            if let Some(rest) = self.frame_period.checked_sub(started.elapsed()) {
                std::thread::sleep(rest);
            }
        }
        log::info!("render loop stopped after {} frames", self.frames);
    }
}
