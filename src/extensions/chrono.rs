use chrono::{Datelike, Duration, NaiveDate, Weekday};

pub trait NaiveDateExt {
    /// `YYYY-MM-DD`, the wire form of every calendar date on the board.
    fn iso(&self) -> String;
    /// Friday and Saturday nights carry the weekend rate. Sunday does not.
    fn is_weekend_night(&self) -> bool;
    /// Signed whole days from `self` to `other`.
    fn days_until(&self, other: NaiveDate) -> i64;
    /// Saturates at `NaiveDate::MIN` / `NaiveDate::MAX`.
    fn plus_days(&self, days: i64) -> NaiveDate;
    fn same_month(&self, other: NaiveDate) -> bool;
}

impl NaiveDateExt for NaiveDate {
    fn iso(&self) -> String {
        self.format("%Y-%m-%d").to_string()
    }

    fn is_weekend_night(&self) -> bool {
        matches!(self.weekday(), Weekday::Fri | Weekday::Sat)
    }

    fn days_until(&self, other: NaiveDate) -> i64 {
        (other - *self).num_days()
    }

    fn plus_days(&self, days: i64) -> NaiveDate {
        let bound = if days < 0 {
            NaiveDate::MIN
        } else {
            NaiveDate::MAX
        };
        Duration::try_days(days)
            .and_then(|delta| self.checked_add_signed(delta))
            .unwrap_or(bound)
    }

    fn same_month(&self, other: NaiveDate) -> bool {
        self.year() == other.year() && self.month() == other.month()
    }
}
