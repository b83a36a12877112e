use crate::core::aliases::UnitId;
use crate::core::types::{LayoutProfile, NavDirection};
use crate::extensions::chrono::NaiveDateExt;
use crate::timeline::board::BoardObserver;
use crate::timeline::window::VisibleWindow;
use chrono::NaiveDate;
use serde::Serialize;

pub const DEFAULT_ROW_HEIGHT_PX: f64 = 48.0;
pub const DEFAULT_SCROLL_STEP_DAYS: u32 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ScrollBehavior {
    /// Jump without animation; used for long seeks across months.
    Instant,
    Smooth,
}

/// What the host should do to its scroll container.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScrollCommand {
    pub left: f64,
    pub behavior: ScrollBehavior,
}

/// Keys the board reacts to; everything else is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewportKey {
    ArrowLeft,
    ArrowRight,
}

impl ViewportKey {
    pub fn from_key_name(name: &str) -> Option<Self> {
        match name {
            "ArrowLeft" => Some(ViewportKey::ArrowLeft),
            "ArrowRight" => Some(ViewportKey::ArrowRight),
            _ => None,
        }
    }
}

/// Horizontal geometry of the board: scroll offset ↔ calendar date.
///
/// `viewport_width` is the width of the scrollable grid area (sidebar
/// excluded) and comes from the host, as does the profile.
#[derive(Debug, Clone)]
pub struct TimelineViewport {
    window: VisibleWindow,
    profile: LayoutProfile,
    viewport_width: f64,
    row_height: f64,
    scroll_step_days: u32,
    scroll_left: f64,
    last_visible: Option<NaiveDate>,
}

impl TimelineViewport {
    pub fn new(window: VisibleWindow, profile: LayoutProfile, viewport_width: f64) -> Self {
        Self {
            window,
            profile,
            viewport_width: viewport_width.max(0.0),
            row_height: DEFAULT_ROW_HEIGHT_PX,
            scroll_step_days: DEFAULT_SCROLL_STEP_DAYS,
            scroll_left: 0.0,
            last_visible: None,
        }
    }

    pub fn with_scroll_step(mut self, days: u32) -> Self {
        self.scroll_step_days = days.max(1);
        self
    }

    pub fn with_row_height(mut self, px: f64) -> Self {
        self.row_height = px;
        self
    }

    pub fn window(&self) -> &VisibleWindow {
        &self.window
    }

    pub fn profile(&self) -> LayoutProfile {
        self.profile
    }

    pub fn cell_width(&self) -> f64 {
        self.profile.cell_width
    }

    pub fn sidebar_width(&self) -> f64 {
        self.profile.sidebar_width
    }

    pub fn row_height(&self) -> f64 {
        self.row_height
    }

    pub fn scroll_left(&self) -> f64 {
        self.scroll_left
    }

    pub fn grid_width(&self) -> f64 {
        self.window.day_count() as f64 * self.cell_width()
    }

    pub fn max_scroll(&self) -> f64 {
        (self.grid_width() - self.viewport_width).max(0.0)
    }

    /// `floor(scroll_left / cell) + floor(viewport / cell / 2)`, clamped to
    /// the window.
    pub fn visible_index(&self, scroll_left: f64) -> usize {
        let cell = self.cell_width();
        if !(cell > 0.0) {
            return 0;
        }
        let first = (scroll_left.max(0.0) / cell).floor() as i64;
        let half = (self.viewport_width / cell / 2.0).floor() as i64;
        let last = self.window.day_count() as i64 - 1;
        (first + half).clamp(0, last) as usize
    }

    /// Date under the centre of the viewport at the current offset.
    pub fn visible_date(&self) -> NaiveDate {
        self.window
            .date_at(self.visible_index(self.scroll_left) as i64)
    }

    /// Record a scroll position reported by the host. Notifies the observer
    /// and returns the new date only when the centred date changed.
    pub fn on_scroll(
        &mut self,
        scroll_left: f64,
        observer: &dyn BoardObserver,
    ) -> Option<NaiveDate> {
        self.scroll_left = scroll_left.clamp(0.0, self.max_scroll());
        let date = self.visible_date();
        if self.last_visible == Some(date) {
            return None;
        }
        self.last_visible = Some(date);
        observer.on_visible_date_change(date);
        Some(date)
    }

    /// Relative scroll by `days` cells; negative is left.
    pub fn scroll_by(&mut self, days: i64, observer: &dyn BoardObserver) -> ScrollCommand {
        let direction = if days < 0 {
            NavDirection::Left
        } else {
            NavDirection::Right
        };
        observer.on_navigate(direction);
        let target = self.scroll_left + days as f64 * self.cell_width();
        self.apply(target, ScrollBehavior::Smooth, observer)
    }

    pub fn navigate(
        &mut self,
        direction: NavDirection,
        observer: &dyn BoardObserver,
    ) -> ScrollCommand {
        let step = self.scroll_step_days as i64;
        match direction {
            NavDirection::Left => self.scroll_by(-step, observer),
            NavDirection::Right => self.scroll_by(step, observer),
        }
    }

    pub fn handle_key(
        &mut self,
        key: ViewportKey,
        observer: &dyn BoardObserver,
    ) -> ScrollCommand {
        match key {
            ViewportKey::ArrowLeft => self.navigate(NavDirection::Left, observer),
            ViewportKey::ArrowRight => self.navigate(NavDirection::Right, observer),
        }
    }

    /// Absolute seek. Crossing into another month jumps instantly.
    pub fn scroll_to_date(
        &mut self,
        target: NaiveDate,
        observer: &dyn BoardObserver,
    ) -> ScrollCommand {
        let behavior = if target.same_month(self.visible_date()) {
            ScrollBehavior::Smooth
        } else {
            ScrollBehavior::Instant
        };
        let left = self.window.start().days_until(target) as f64 * self.cell_width();
        self.apply(left, behavior, observer)
    }

    fn apply(
        &mut self,
        target: f64,
        behavior: ScrollBehavior,
        observer: &dyn BoardObserver,
    ) -> ScrollCommand {
        let left = target.clamp(0.0, self.max_scroll());
        self.on_scroll(left, observer);
        ScrollCommand { left, behavior }
    }

    /// Left edge of `date`'s column in grid coordinates; may fall outside
    /// the grid for dates outside the window.
    pub fn x_for_date(&self, date: NaiveDate) -> f64 {
        self.window.offset_of(date) as f64 * self.cell_width()
    }

    /// Date under grid x, if any.
    pub fn date_at_x(&self, x: f64) -> Option<NaiveDate> {
        let cell = self.cell_width();
        if x < 0.0 || x >= self.grid_width() || !(cell > 0.0) {
            return None;
        }
        Some(self.window.date_at((x / cell).floor() as i64))
    }

    /// Cell under grid-relative (x, y); rows follow `unit_order`.
    pub fn hit_test(&self, x: f64, y: f64, unit_order: &[UnitId]) -> Option<(UnitId, NaiveDate)> {
        if y < 0.0 || !(self.row_height > 0.0) {
            return None;
        }
        let row = (y / self.row_height).floor() as usize;
        let unit_id = *unit_order.get(row)?;
        Some((unit_id, self.date_at_x(x)?))
    }
}
