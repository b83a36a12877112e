//! National (Brazilian) holiday calendar.
//!
//! Fixed-date holidays come from a table; movable ones are offsets from
//! Easter Sunday, computed with the Gregorian Computus.

use crate::extensions::chrono::NaiveDateExt;
use crate::timeline::window::VisibleWindow;
use chrono::NaiveDate;
use std::collections::{BTreeSet, HashMap};
use std::ops::RangeInclusive;

/// Years the Gregorian Computus is defined for here. Years outside are
/// skipped silently.
pub const SUPPORTED_YEARS: RangeInclusive<i32> = 1583..=4099;

const FIXED_HOLIDAYS: [(u32, u32, &str); 8] = [
    (1, 1, "Confraternização Universal"),
    (4, 21, "Tiradentes"),
    (5, 1, "Dia do Trabalho"),
    (9, 7, "Independência do Brasil"),
    (10, 12, "Nossa Senhora Aparecida"),
    (11, 2, "Finados"),
    (11, 15, "Proclamação da República"),
    (12, 25, "Natal"),
];

/// (days from Easter Sunday, name)
const MOVABLE_HOLIDAYS: [(i64, &str); 3] = [
    (-47, "Carnaval"),
    (-2, "Sexta-feira Santa"),
    (60, "Corpus Christi"),
];

/// Easter Sunday for `year` (anonymous Gregorian algorithm).
pub fn easter_sunday(year: i32) -> Option<NaiveDate> {
    if !SUPPORTED_YEARS.contains(&year) {
        return None;
    }
    let a = year % 19;
    let b = year / 100;
    let c = year % 100;
    let d = b / 4;
    let e = b % 4;
    let f = (b + 8) / 25;
    let g = (b - f + 1) / 3;
    let h = (19 * a + b - d - g + 15) % 30;
    let i = c / 4;
    let k = c % 4;
    let l = (32 + 2 * e + 2 * i - h - k) % 7;
    let m = (a + 11 * h + 22 * l) / 451;
    let month = (h + l - 7 * m + 114) / 31;
    let day = (h + l - 7 * m + 114) % 31 + 1;
    NaiveDate::from_ymd_opt(year, month as u32, day as u32)
}

/// ISO date string -> holiday name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HolidayMap {
    by_iso: HashMap<String, String>,
}

impl HolidayMap {
    pub fn get(&self, date: NaiveDate) -> Option<&str> {
        self.by_iso.get(&date.iso()).map(String::as_str)
    }

    pub fn get_iso(&self, iso: &str) -> Option<&str> {
        self.by_iso.get(iso).map(String::as_str)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.by_iso.contains_key(&date.iso())
    }

    pub fn len(&self) -> usize {
        self.by_iso.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_iso.is_empty()
    }

    /// Year set a window needs; a window straddling New Year touches two.
    pub fn years_for_window(window: &VisibleWindow) -> Vec<i32> {
        window.years()
    }

    // First name wins when two holidays share a date.
    fn add(&mut self, date: NaiveDate, name: &str) {
        self.by_iso
            .entry(date.iso())
            .or_insert_with(|| name.to_string());
    }
}

pub struct HolidayCalendar;

impl HolidayCalendar {
    pub fn for_years<I>(years: I) -> HolidayMap
    where
        I: IntoIterator<Item = i32>,
    {
        let years: BTreeSet<i32> = years
            .into_iter()
            .filter(|y| SUPPORTED_YEARS.contains(y))
            .collect();

        let mut map = HolidayMap::default();
        for year in years {
            for (month, day, name) in FIXED_HOLIDAYS {
                if let Some(date) = NaiveDate::from_ymd_opt(year, month, day) {
                    map.add(date, name);
                }
            }
            if let Some(easter) = easter_sunday(year) {
                for (offset, name) in MOVABLE_HOLIDAYS {
                    map.add(easter.plus_days(offset), name);
                }
            }
        }
        map
    }

    pub fn for_window(window: &VisibleWindow) -> HolidayMap {
        Self::for_years(HolidayMap::years_for_window(window))
    }
}
