//! The booking board: holidays, prices, bars, selection and the scrollable
//! viewport that ties them together.

pub mod bar_layout;
pub mod board;
pub mod focus;
pub mod holidays;
pub mod occupancy;
pub mod packages;
pub mod pricing;
pub mod selection;
pub mod viewport;
pub mod window;
#[cfg(test)]
mod tests;

pub use board::{
    BoardEvent, BoardFrame, BoardObserver, BoardSettings, LoggerObserver, ObserverSet,
    RecordingObserver, TimelineBoard, build_frame,
};
pub use holidays::{HolidayCalendar, HolidayMap};
pub use window::VisibleWindow;
