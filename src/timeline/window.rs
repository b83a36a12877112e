use crate::extensions::chrono::NaiveDateExt;
use chrono::{Datelike, NaiveDate};

/// Contiguous run of dates materialized on the board. Rebuilt rather than
/// mutated when the host moves the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibleWindow {
    start: NaiveDate,
    days: u32,
}

impl VisibleWindow {
    /// `days` is raised to 1 and cut short at the last representable date.
    pub fn new(start: NaiveDate, days: u32) -> Self {
        let remaining = u32::try_from(start.days_until(NaiveDate::MAX) + 1).unwrap_or(u32::MAX);
        Self {
            start,
            days: days.max(1).min(remaining),
        }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn last(&self) -> NaiveDate {
        self.start.plus_days(self.days as i64 - 1)
    }

    pub fn day_count(&self) -> usize {
        self.days as usize
    }

    /// Ordered list of visible dates.
    pub fn dates(&self) -> Vec<NaiveDate> {
        (0..self.days as i64)
            .map(|offset| self.start.plus_days(offset))
            .collect()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.last()
    }

    /// Column of `date`, if visible.
    pub fn index_of(&self, date: NaiveDate) -> Option<usize> {
        self.contains(date)
            .then(|| self.start.days_until(date) as usize)
    }

    /// Signed column offset; negative before the window, `>= day_count` after it.
    pub fn offset_of(&self, date: NaiveDate) -> i64 {
        self.start.days_until(date)
    }

    /// Date at column `index`, clamped into the window.
    pub fn date_at(&self, index: i64) -> NaiveDate {
        let clamped = index.clamp(0, self.days as i64 - 1);
        self.start.plus_days(clamped)
    }

    /// Calendar years touched by the window, for holiday lookup.
    pub fn years(&self) -> Vec<i32> {
        (self.start.year()..=self.last().year()).collect()
    }
}
