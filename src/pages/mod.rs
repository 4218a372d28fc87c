//! Display pages and the controller that rotates between them.
//!
//! The panel shows one page at a time:
//!
//! | Page | Content | Redraws on its own |
//! |------|---------|--------------------|
//! | [`DashboardPage`] | weather icon, temperature, now playing | while a line scrolls |
//! | [`ClockPage`] | `HH:MM` and `DD Mon` | when the minute or date changes |
//! | [`SensorsPage`] | room temperatures | never |
//!
//! [`PageController`] owns the pages and the active index. Pages rotate
//! every `rotate_ms` (0 disables rotation). Selecting a page explicitly
//! locks rotation until a [`PageCommand::Rotate`] unlocks it.

mod clock;
mod dashboard;
mod sensors;

pub use clock::ClockPage;
pub use dashboard::DashboardPage;
pub use sensors::SensorsPage;

use chrono::NaiveDateTime;

use crate::icons::IconRegistry;
use crate::state::DisplayState;
use crate::traits::{Canvas, Font};

/// Upper bound on registered pages.
pub const MAX_PAGES: usize = 8;

// ============================================================================
// Page identity and commands
// ============================================================================

/// Which page is showing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PageKind {
    /// Weather and now playing.
    Dashboard,
    /// Large clock.
    Clock,
    /// Temperature sensors.
    Sensors,
}

impl PageKind {
    /// All pages in rotation order.
    pub const ALL: [PageKind; 3] = [PageKind::Dashboard, PageKind::Clock, PageKind::Sensors];

    /// Name used on the wire.
    pub fn name(self) -> &'static str {
        match self {
            PageKind::Dashboard => "dashboard",
            PageKind::Clock => "clock",
            PageKind::Sensors => "sensors",
        }
    }

    /// Case-insensitive lookup. `temps` is accepted for the sensor page.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        if name.eq_ignore_ascii_case("dashboard") {
            Some(PageKind::Dashboard)
        } else if name.eq_ignore_ascii_case("clock") {
            Some(PageKind::Clock)
        } else if name.eq_ignore_ascii_case("sensors") || name.eq_ignore_ascii_case("temps") {
            Some(PageKind::Sensors)
        } else {
            None
        }
    }
}

impl core::fmt::Display for PageKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

/// Inbound page control.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageCommand {
    /// Show this page and lock rotation.
    Show(PageKind),
    /// Unlock rotation.
    Rotate,
}

// ============================================================================
// Drawing context
// ============================================================================

/// Text faces available to pages.
#[derive(Debug, Clone)]
pub struct Fonts<F: Font> {
    /// Body text (6x13 by default).
    pub text: F,
    /// Large digits for the clock (10x20 by default).
    pub large: F,
}

/// Everything a page may read while drawing.
pub struct PageContext<'a, F: Font> {
    /// Loaded fonts.
    pub fonts: &'a Fonts<F>,
    /// Weather icons.
    pub icons: &'a IconRegistry,
    /// Snapshot taken for this frame.
    pub state: &'a DisplayState,
    /// Local wall-clock time for this frame.
    pub local: NaiveDateTime,
}

// ============================================================================
// Page
// ============================================================================

/// A page the controller can show.
#[derive(Debug, Clone)]
pub enum Page {
    /// See [`DashboardPage`].
    Dashboard(DashboardPage),
    /// See [`ClockPage`].
    Clock(ClockPage),
    /// See [`SensorsPage`].
    Sensors(SensorsPage),
}

impl Page {
    /// Builds the page for `kind` on a panel `display_width` wide.
    pub fn for_kind(kind: PageKind, display_width: i32, scroll_gap: i32) -> Self {
        match kind {
            PageKind::Dashboard => Page::Dashboard(DashboardPage::new(display_width, scroll_gap)),
            PageKind::Clock => Page::Clock(ClockPage::new()),
            PageKind::Sensors => Page::Sensors(SensorsPage::new()),
        }
    }

    /// Which page this is.
    pub fn kind(&self) -> PageKind {
        match self {
            Page::Dashboard(_) => PageKind::Dashboard,
            Page::Clock(_) => PageKind::Clock,
            Page::Sensors(_) => PageKind::Sensors,
        }
    }

    /// Called whenever the page becomes active.
    pub fn on_selected(&mut self) {
        if let Page::Clock(clock) = self {
            clock.reset();
        }
    }

    /// True when the page wants a frame even though no state changed.
    pub fn needs_redraw(&self, local: &NaiveDateTime) -> bool {
        match self {
            Page::Dashboard(page) => page.is_scrolling(),
            Page::Clock(page) => page.needs_redraw(local),
            Page::Sensors(_) => false,
        }
    }

    /// Draws onto an already cleared canvas.
    pub fn draw<C: Canvas, F: Font>(&mut self, canvas: &mut C, ctx: &PageContext<'_, F>) {
        match self {
            Page::Dashboard(page) => page.draw(canvas, ctx),
            Page::Clock(page) => page.draw(canvas, ctx),
            Page::Sensors(page) => page.draw(canvas, ctx),
        }
    }
}

// ============================================================================
// Page Controller
// ============================================================================

/// Owns the pages and decides which one is showing.
#[derive(Debug, Clone)]
pub struct PageController {
    pages: heapless::Vec<Page, MAX_PAGES>,
    active: usize,
    rotation_locked: bool,
    rotate_ms: u32,
    last_change_ms: u64,
}

impl PageController {
    /// All standard pages, dashboard first, rotation disabled.
    pub fn new(display_width: i32, scroll_gap: i32) -> Self {
        let mut pages = heapless::Vec::new();
        for kind in PageKind::ALL {
            // ALL is shorter than MAX_PAGES
            let _ = pages.push(Page::for_kind(kind, display_width, scroll_gap));
        }
        Self::with_pages(pages)
    }

    /// Controller over an explicit page list. The first page starts active.
    pub fn with_pages(pages: heapless::Vec<Page, MAX_PAGES>) -> Self {
        Self {
            pages,
            active: 0,
            rotation_locked: false,
            rotate_ms: 0,
            last_change_ms: 0,
        }
    }

    /// Sets the start page without locking rotation.
    pub fn with_start_page(mut self, kind: PageKind) -> Self {
        if let Some(index) = self.index_of(kind) {
            self.active = index;
        }
        self
    }

    /// Sets the rotation interval.
    pub fn with_rotate_secs(mut self, secs: u32) -> Self {
        self.set_rotate_secs(secs);
        self
    }

    /// Changes the rotation interval; 0 disables rotation.
    pub fn set_rotate_secs(&mut self, secs: u32) {
        self.rotate_ms = secs.saturating_mul(1000);
    }

    /// Rotation interval in milliseconds.
    pub fn rotate_ms(&self) -> u32 {
        self.rotate_ms
    }

    /// True after an explicit page selection.
    pub fn is_rotation_locked(&self) -> bool {
        self.rotation_locked
    }

    /// Number of pages.
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// True when no pages are registered.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// The page showing now.
    pub fn active(&self) -> Option<&Page> {
        self.pages.get(self.active)
    }

    /// Kind of the page showing now.
    pub fn active_kind(&self) -> Option<PageKind> {
        self.active().map(Page::kind)
    }

    fn index_of(&self, kind: PageKind) -> Option<usize> {
        self.pages.iter().position(|p| p.kind() == kind)
    }

    fn select(&mut self, index: usize, lock: bool, now_ms: u64) {
        self.active = index;
        self.last_change_ms = now_ms;
        if lock {
            self.rotation_locked = true;
        }
        if let Some(page) = self.pages.get_mut(index) {
            page.on_selected();
        }
    }

    /// Applies an inbound command. Returns true when a page was selected.
    ///
    /// Unknown pages are ignored; `Rotate` only unlocks and leaves the
    /// current page showing until the next interval elapses.
    pub fn apply(&mut self, command: PageCommand, now_ms: u64) -> bool {
        match command {
            PageCommand::Show(kind) => match self.index_of(kind) {
                Some(index) => {
                    self.select(index, true, now_ms);
                    log::debug!("page {} selected, rotation locked", kind);
                    true
                }
                None => {
                    log::debug!("page {} is not registered", kind);
                    false
                }
            },
            PageCommand::Rotate => {
                self.rotation_locked = false;
                log::debug!("page rotation unlocked");
                false
            }
        }
    }

    /// Advances rotation. Returns true when the page changed.
    pub fn update(&mut self, now_ms: u64) -> bool {
        if self.rotation_locked || self.pages.len() < 2 || self.rotate_ms == 0 {
            return false;
        }
        if now_ms.saturating_sub(self.last_change_ms) < self.rotate_ms as u64 {
            return false;
        }
        let next = (self.active + 1) % self.pages.len();
        self.select(next, false, now_ms);
        true
    }

    /// Delegates to the active page.
    pub fn needs_redraw(&self, local: &NaiveDateTime) -> bool {
        self.active().is_some_and(|p| p.needs_redraw(local))
    }

    /// Draws the active page.
    pub fn draw<C: Canvas, F: Font>(&mut self, canvas: &mut C, ctx: &PageContext<'_, F>) {
        if let Some(page) = self.pages.get_mut(self.active) {
            page.draw(canvas, ctx);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller() -> PageController {
        PageController::new(64, 10)
    }

    // ========================================================================
    // PageKind
    // ========================================================================

    #[test]
    fn page_names_round_trip() {
        for kind in PageKind::ALL {
            assert_eq!(PageKind::from_name(kind.name()), Some(kind));
        }
    }

    #[test]
    fn page_names_are_case_insensitive() {
        assert_eq!(PageKind::from_name("CLOCK"), Some(PageKind::Clock));
        assert_eq!(PageKind::from_name(" Sensors "), Some(PageKind::Sensors));
        assert_eq!(PageKind::from_name("temps"), Some(PageKind::Sensors));
        assert_eq!(PageKind::from_name("weather"), None);
        assert_eq!(PageKind::from_name(""), None);
    }

    // ========================================================================
    // PageController
    // ========================================================================

    #[test]
    fn starts_on_dashboard_without_rotation() {
        let mut pages = controller();
        assert_eq!(pages.len(), 3);
        assert_eq!(pages.active_kind(), Some(PageKind::Dashboard));
        assert_eq!(pages.rotate_ms(), 0);
        assert!(!pages.update(1_000_000));
        assert_eq!(pages.active_kind(), Some(PageKind::Dashboard));
    }

    #[test]
    fn start_page_does_not_lock() {
        let pages = controller().with_start_page(PageKind::Clock);
        assert_eq!(pages.active_kind(), Some(PageKind::Clock));
        assert!(!pages.is_rotation_locked());
    }

    #[test]
    fn rotates_in_order_after_interval() {
        let mut pages = controller().with_rotate_secs(10);
        assert!(!pages.update(9_999));
        assert!(pages.update(10_000));
        assert_eq!(pages.active_kind(), Some(PageKind::Clock));
        assert!(!pages.update(15_000));
        assert!(pages.update(20_000));
        assert_eq!(pages.active_kind(), Some(PageKind::Sensors));
        assert!(pages.update(30_000));
        assert_eq!(pages.active_kind(), Some(PageKind::Dashboard));
    }

    #[test]
    fn explicit_selection_locks_rotation() {
        let mut pages = controller().with_rotate_secs(1);
        assert!(pages.apply(PageCommand::Show(PageKind::Sensors), 500));
        assert!(pages.is_rotation_locked());
        assert!(!pages.update(60_000));
        assert_eq!(pages.active_kind(), Some(PageKind::Sensors));
    }

    #[test]
    fn rotate_command_unlocks() {
        let mut pages = controller().with_rotate_secs(1);
        pages.apply(PageCommand::Show(PageKind::Clock), 0);
        assert!(!pages.apply(PageCommand::Rotate, 100));
        assert!(!pages.is_rotation_locked());
        // Interval counts from the explicit selection
        assert!(!pages.update(999));
        assert!(pages.update(1_000));
        assert_eq!(pages.active_kind(), Some(PageKind::Sensors));
    }

    #[test]
    fn rotation_interval_can_change_at_runtime() {
        let mut pages = controller();
        pages.set_rotate_secs(2);
        assert!(pages.update(2_000));
        pages.set_rotate_secs(0);
        assert!(!pages.update(100_000));
    }

    #[test]
    fn single_page_never_rotates() {
        let mut list = heapless::Vec::new();
        list.push(Page::for_kind(PageKind::Clock, 64, 10)).unwrap();
        let mut pages = PageController::with_pages(list).with_rotate_secs(1);
        assert!(!pages.update(10_000));
    }

    #[test]
    fn showing_missing_page_is_ignored() {
        let mut list = heapless::Vec::new();
        list.push(Page::for_kind(PageKind::Clock, 64, 10)).unwrap();
        let mut pages = PageController::with_pages(list);
        assert!(!pages.apply(PageCommand::Show(PageKind::Sensors), 0));
        assert_eq!(pages.active_kind(), Some(PageKind::Clock));
        assert!(!pages.is_rotation_locked());
    }

    #[test]
    fn empty_controller_is_inert() {
        let mut pages = PageController::with_pages(heapless::Vec::new()).with_rotate_secs(1);
        assert!(pages.is_empty());
        assert_eq!(pages.active_kind(), None);
        assert!(!pages.update(10_000));
    }
}
