use std::cell::RefCell;
use std::collections::HashSet;

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::config::Config;
use crate::core::aliases::{ReservationId, UnitId};
use crate::core::models::{PackageTag, PriceOverrides, Reservation};
use crate::core::snapshot::BoardSnapshot;
use crate::core::types::{
    HexColor, LayoutProfile, NavDirection, ReservationStatus, SelectionHistory, ViewportClass,
};
use crate::extensions::chrono::NaiveDateExt;
use crate::logging::{LogTarget, Logger};
use crate::timeline::bar_layout::{self, BarLabel, BarLayout, DEFAULT_LABEL_CHAR_PX};
use crate::timeline::focus::FocusState;
use crate::timeline::holidays::{HolidayCalendar, HolidayMap};
use crate::timeline::occupancy::{default_turnaround_threshold, tight_turnarounds};
use crate::timeline::packages::PackageLookup;
use crate::timeline::pricing::{self, ResolvedPrice};
use crate::timeline::selection::{DateSelectionEngine, SelectionEdge, SelectionState};
use crate::timeline::viewport::TimelineViewport;
use crate::timeline::window::VisibleWindow;

// =========
// Observers
// =========

/// Outbound events of the board. Every method defaults to a no-op so hosts
/// only implement what they listen to.
pub trait BoardObserver {
    /// Raw click, before the selection engine sees it.
    fn on_cell_click(&self, _unit_id: UnitId, _date: NaiveDate) {}
    fn on_reservation_click(&self, _reservation: &Reservation) {}
    fn on_visible_date_change(&self, _date: NaiveDate) {}
    fn on_navigate(&self, _direction: NavDirection) {}
    fn on_unit_focus(&self, _unit_id: UnitId) {}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum BoardEvent {
    CellClicked { unit_id: UnitId, date: NaiveDate },
    ReservationClicked { reservation_id: ReservationId },
    VisibleDateChanged { date: NaiveDate },
    Navigated { direction: NavDirection },
    UnitFocused { unit_id: UnitId },
}

pub struct LoggerObserver {
    logger: Logger,
}

impl LoggerObserver {
    pub fn new(logger: Logger) -> Self {
        Self { logger }
    }
}

impl BoardObserver for LoggerObserver {
    fn on_cell_click(&self, unit_id: UnitId, date: NaiveDate) {
        self.logger.info(
            format!("Cell clicked: unit {} on {}", unit_id, date.iso()),
            LogTarget::FileOnly,
        );
    }

    fn on_reservation_click(&self, reservation: &Reservation) {
        self.logger.info(
            format!("Reservation clicked: {}", reservation),
            LogTarget::FileOnly,
        );
    }

    fn on_visible_date_change(&self, date: NaiveDate) {
        self.logger.debug(
            format!("Visible date changed to {}", date.iso()),
            LogTarget::FileOnly,
        );
    }

    fn on_navigate(&self, direction: NavDirection) {
        self.logger
            .debug(format!("Navigate {}", direction), LogTarget::FileOnly);
    }

    fn on_unit_focus(&self, unit_id: UnitId) {
        self.logger
            .info(format!("Unit {} focus toggled", unit_id), LogTarget::FileOnly);
    }
}

/// Collects events in order; used by tests and by hosts that batch.
#[derive(Debug, Default)]
pub struct RecordingObserver {
    events: RefCell<Vec<BoardEvent>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<BoardEvent> {
        self.events.borrow().clone()
    }

    pub fn take(&self) -> Vec<BoardEvent> {
        self.events.borrow_mut().drain(..).collect()
    }

    fn push(&self, event: BoardEvent) {
        self.events.borrow_mut().push(event);
    }
}

impl BoardObserver for RecordingObserver {
    fn on_cell_click(&self, unit_id: UnitId, date: NaiveDate) {
        self.push(BoardEvent::CellClicked { unit_id, date });
    }

    fn on_reservation_click(&self, reservation: &Reservation) {
        self.push(BoardEvent::ReservationClicked {
            reservation_id: reservation.id,
        });
    }

    fn on_visible_date_change(&self, date: NaiveDate) {
        self.push(BoardEvent::VisibleDateChanged { date });
    }

    fn on_navigate(&self, direction: NavDirection) {
        self.push(BoardEvent::Navigated { direction });
    }

    fn on_unit_focus(&self, unit_id: UnitId) {
        self.push(BoardEvent::UnitFocused { unit_id });
    }
}

/// Fans every event out to several observers.
pub struct ObserverSet<'a> {
    observers: Vec<&'a dyn BoardObserver>,
}

impl<'a> ObserverSet<'a> {
    pub fn new(observers: Vec<&'a dyn BoardObserver>) -> Self {
        Self { observers }
    }
}

impl BoardObserver for ObserverSet<'_> {
    fn on_cell_click(&self, unit_id: UnitId, date: NaiveDate) {
        self.observers
            .iter()
            .for_each(|o| o.on_cell_click(unit_id, date));
    }

    fn on_reservation_click(&self, reservation: &Reservation) {
        self.observers
            .iter()
            .for_each(|o| o.on_reservation_click(reservation));
    }

    fn on_visible_date_change(&self, date: NaiveDate) {
        self.observers
            .iter()
            .for_each(|o| o.on_visible_date_change(date));
    }

    fn on_navigate(&self, direction: NavDirection) {
        self.observers.iter().for_each(|o| o.on_navigate(direction));
    }

    fn on_unit_focus(&self, unit_id: UnitId) {
        self.observers.iter().for_each(|o| o.on_unit_focus(unit_id));
    }
}

// ========
// Settings
// ========

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoardSettings {
    pub window_days: u32,
    pub viewport: ViewportClass,
    pub profile: LayoutProfile,
    pub compact_bar_threshold: f64,
    pub label_char_px: f64,
    pub scroll_step_days: u32,
    pub selection_history: SelectionHistory,
}

impl Default for BoardSettings {
    fn default() -> Self {
        Self {
            window_days: 60,
            viewport: ViewportClass::Desktop,
            profile: LayoutProfile::DESKTOP,
            compact_bar_threshold: 60.0,
            label_char_px: DEFAULT_LABEL_CHAR_PX,
            scroll_step_days: 7,
            selection_history: SelectionHistory::Replace,
        }
    }
}

impl BoardSettings {
    /// Profile is picked from `viewport`, which the host decides.
    pub fn from_config(config: &Config, viewport: ViewportClass) -> Self {
        Self {
            window_days: config.window_days(),
            viewport,
            profile: config.profile(viewport),
            compact_bar_threshold: config.compact_bar_threshold(),
            label_char_px: DEFAULT_LABEL_CHAR_PX,
            scroll_step_days: config.scroll_step_days(),
            selection_history: config.selection_history(),
        }
    }
}

// =====
// Frame
// =====

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayHeader {
    pub date: NaiveDate,
    pub holiday: Option<String>,
    pub is_weekend: bool,
    pub is_month_start: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CellView {
    pub date: NaiveDate,
    pub price: ResolvedPrice,
    pub holiday: Option<String>,
    pub is_weekend: bool,
    pub package: Option<PackageTag>,
    pub selected: bool,
    pub selection_edge: Option<SelectionEdge>,
    pub is_anchor: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarView {
    pub reservation_id: ReservationId,
    pub status: ReservationStatus,
    pub layout: BarLayout,
    pub label: BarLabel,
    pub tight_turnaround: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowView {
    pub unit_id: UnitId,
    pub unit_name: String,
    pub color: HexColor,
    pub dimmed: bool,
    pub interactive: bool,
    pub cells: Vec<CellView>,
    pub bars: Vec<BarView>,
}

/// Price of one selected rectangle row, at the prices currently shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SelectionTotal {
    pub unit_id: UnitId,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub nights: i64,
    pub total: Decimal,
}

/// Everything a renderer needs for one paint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoardFrame {
    pub start: NaiveDate,
    pub last: NaiveDate,
    pub cell_width: f64,
    pub sidebar_width: f64,
    pub headers: Vec<DayHeader>,
    pub rows: Vec<RowView>,
    pub selection_suspended: bool,
    pub selection_totals: Vec<SelectionTotal>,
    /// Records skipped because they could not be laid out.
    pub skipped_reservations: Vec<ReservationId>,
}

impl BoardFrame {
    pub fn row(&self, unit_id: UnitId) -> Option<&RowView> {
        self.rows.iter().find(|r| r.unit_id == unit_id)
    }
}

/// Inputs of [`build_frame`]; all borrowed, nothing cached.
pub struct FrameInputs<'a> {
    pub snapshot: &'a BoardSnapshot,
    pub window: &'a VisibleWindow,
    pub settings: &'a BoardSettings,
    pub selection: &'a SelectionState,
    pub focus: &'a FocusState,
    pub packages: &'a dyn PackageLookup,
    /// A text filter elsewhere on the page hides selection highlights.
    pub filter_active: bool,
}

/// Pure function of the inputs. Malformed reservations are skipped and
/// logged; they never blank the rest of the grid.
pub fn build_frame(inputs: &FrameInputs<'_>, logger: &Logger) -> BoardFrame {
    let snapshot = inputs.snapshot;
    let window = inputs.window;
    let settings = inputs.settings;
    let cell_width = settings.profile.cell_width;

    let holidays = HolidayCalendar::for_window(window);
    let overrides = snapshot.overrides();
    let dates = window.dates();
    let show_selection = !inputs.filter_active;

    let tight: HashSet<ReservationId> =
        tight_turnarounds(&snapshot.reservations, default_turnaround_threshold())
            .into_iter()
            .map(|t| t.reservation_id)
            .collect();

    let headers = dates
        .iter()
        .map(|&date| DayHeader {
            date,
            holiday: holidays.get(date).map(str::to_string),
            is_weekend: date.is_weekend_night(),
            is_month_start: date.day() == 1,
        })
        .collect();

    let mut skipped = Vec::new();
    let mut rows = Vec::with_capacity(snapshot.units.len());
    for unit in &snapshot.units {
        let cells = dates
            .iter()
            .map(|&date| CellView {
                date,
                price: pricing::resolve(unit, date, &overrides, &holidays),
                holiday: holidays.get(date).map(str::to_string),
                is_weekend: date.is_weekend_night(),
                package: inputs.packages.package_for(unit.id, date),
                selected: show_selection && inputs.selection.is_selected(unit.id, date),
                selection_edge: show_selection
                    .then(|| inputs.selection.edge(unit.id, date))
                    .flatten(),
                is_anchor: show_selection && inputs.selection.is_anchor(unit.id, date),
            })
            .collect();

        let mut bars = Vec::new();
        for reservation in snapshot.reservations_for(unit.id) {
            if !reservation.status.occupies_unit() {
                continue;
            }
            match bar_layout::try_layout(reservation, window, cell_width) {
                Ok(Some(layout)) => bars.push(BarView {
                    reservation_id: reservation.id,
                    status: reservation.status,
                    label: BarLabel::for_bar(
                        reservation,
                        &layout,
                        settings.compact_bar_threshold,
                        settings.label_char_px,
                    ),
                    layout,
                    tight_turnaround: tight.contains(&reservation.id),
                }),
                Ok(None) => {}
                Err(err) => {
                    logger.warn(
                        format!("Skipping reservation {}: {}", reservation.id, err),
                        LogTarget::ConsoleAndFile,
                    );
                    skipped.push(reservation.id);
                }
            }
        }
        bars.sort_by(|a, b| a.layout.left.total_cmp(&b.layout.left));

        rows.push(RowView {
            unit_id: unit.id,
            unit_name: unit.name.clone(),
            color: unit.color_hex,
            dimmed: inputs.focus.is_dimmed(unit.id),
            interactive: inputs.focus.accepts_pointer(unit.id),
            cells,
            bars,
        });
    }

    let selection_totals = if show_selection {
        selection_totals(snapshot, inputs.selection, &overrides, &holidays)
    } else {
        Vec::new()
    };

    BoardFrame {
        start: window.start(),
        last: window.last(),
        cell_width,
        sidebar_width: settings.profile.sidebar_width,
        headers,
        rows,
        selection_suspended: inputs.filter_active,
        selection_totals,
        skipped_reservations: skipped,
    }
}

fn selection_totals(
    snapshot: &BoardSnapshot,
    selection: &SelectionState,
    overrides: &PriceOverrides,
    holidays: &HolidayMap,
) -> Vec<SelectionTotal> {
    selection
        .ranges()
        .iter()
        .filter_map(|range| {
            let unit = snapshot.unit(range.unit_id)?;
            // Each selected date is one night.
            let past_end = range.end.plus_days(1);
            Some(SelectionTotal {
                unit_id: range.unit_id,
                start: range.start,
                end: range.end,
                nights: range.start.days_until(past_end),
                total: pricing::quote_nights(unit, range.start, past_end, overrides, holidays),
            })
        })
        .collect()
}

// ==========
// Controller
// ==========

/// Interactive state of one board: geometry, selection, focus and the
/// filter flag. Snapshots are passed in on every call and never stored.
#[derive(Debug, Clone)]
pub struct TimelineBoard {
    settings: BoardSettings,
    viewport: TimelineViewport,
    selection: DateSelectionEngine,
    focus: FocusState,
    filter_active: bool,
}

impl TimelineBoard {
    pub fn new(settings: BoardSettings, start: NaiveDate, viewport_width: f64) -> Self {
        let window = VisibleWindow::new(start, settings.window_days);
        let viewport = TimelineViewport::new(window, settings.profile, viewport_width)
            .with_scroll_step(settings.scroll_step_days);
        Self {
            selection: DateSelectionEngine::new(settings.selection_history),
            settings,
            viewport,
            focus: FocusState::default(),
            filter_active: false,
        }
    }

    pub fn settings(&self) -> &BoardSettings {
        &self.settings
    }

    pub fn window(&self) -> &VisibleWindow {
        self.viewport.window()
    }

    pub fn viewport(&self) -> &TimelineViewport {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut TimelineViewport {
        &mut self.viewport
    }

    pub fn selection(&self) -> &SelectionState {
        self.selection.state()
    }

    pub fn focus(&self) -> &FocusState {
        &self.focus
    }

    pub fn filter_active(&self) -> bool {
        self.filter_active
    }

    pub fn set_filter_active(&mut self, active: bool) {
        self.filter_active = active;
    }

    /// Click on a date cell. Dimmed rows ignore the pointer entirely;
    /// otherwise the raw click is emitted, then fed to the selection engine.
    pub fn click_cell(
        &mut self,
        unit_id: UnitId,
        date: NaiveDate,
        unit_order: &[UnitId],
        observer: &dyn BoardObserver,
    ) -> Option<&SelectionState> {
        if !self.focus.accepts_pointer(unit_id) {
            return None;
        }
        observer.on_cell_click(unit_id, date);
        Some(self.selection.click(unit_id, date, unit_order))
    }

    /// Click at grid-relative pixel coordinates.
    pub fn click_at(
        &mut self,
        x: f64,
        y: f64,
        unit_order: &[UnitId],
        observer: &dyn BoardObserver,
    ) -> Option<&SelectionState> {
        let (unit_id, date) = self.viewport.hit_test(x, y, unit_order)?;
        self.click_cell(unit_id, date, unit_order, observer)
    }

    pub fn click_reservation(&self, reservation: &Reservation, observer: &dyn BoardObserver) {
        if self.focus.accepts_pointer(reservation.unit_id) {
            observer.on_reservation_click(reservation);
        }
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    pub fn toggle_focus(
        &mut self,
        unit_id: UnitId,
        observer: &dyn BoardObserver,
    ) -> Option<UnitId> {
        let focused = self.focus.toggle(unit_id);
        observer.on_unit_focus(unit_id);
        focused
    }

    pub fn frame(
        &self,
        snapshot: &BoardSnapshot,
        packages: &dyn PackageLookup,
        logger: &Logger,
    ) -> BoardFrame {
        build_frame(
            &FrameInputs {
                snapshot,
                window: self.viewport.window(),
                settings: &self.settings,
                selection: self.selection.state(),
                focus: &self.focus,
                packages,
                filter_active: self.filter_active,
            },
            logger,
        )
    }
}
