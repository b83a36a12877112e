mod bar_layout_tests;

use crate::core::aliases::UnitId;
use crate::core::models::{Reservation, Unit};
use chrono::NaiveDate;
use rust_decimal::Decimal;

pub(super) fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

pub(super) fn unit(id: UnitId, name: &str) -> Unit {
    Unit::new(id, name, Decimal::from(200))
        .with_weekend_price(Decimal::from(260))
        .with_holiday_price(Decimal::from(300))
}

pub(super) fn stay(id: i64, unit_id: UnitId, check_in: &str, check_out: &str) -> Reservation {
    Reservation::new(id, unit_id, check_in, check_out, "Maria Silva")
}

pub(super) fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}
