use crate::core::aliases::{OverrideKey, PackageId, ReservationId, UnitId};
use crate::core::types::{
    CleanlinessStatus, HexColor, ReservationStatus, UnitType, parse_iso_instant,
};
use crate::errors::{Error, Result};
use crate::extensions::chrono::NaiveDateExt;
use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

// =====
// Unit
// =====

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    pub id: UnitId,
    pub name: String,
    #[serde(rename = "type", default)]
    pub unit_type: UnitType,
    #[serde(default)]
    pub max_capacity: u32,
    pub base_price: Decimal,
    #[serde(default)]
    pub weekend_price: Option<Decimal>,
    #[serde(default)]
    pub holiday_price: Option<Decimal>,
    #[serde(default)]
    pub color_hex: HexColor,
    #[serde(default)]
    pub status: CleanlinessStatus,
}

impl Unit {
    pub fn new(id: UnitId, name: impl Into<String>, base_price: Decimal) -> Self {
        Self {
            id,
            name: name.into(),
            unit_type: UnitType::default(),
            max_capacity: 2,
            base_price,
            weekend_price: None,
            holiday_price: None,
            color_hex: HexColor::default(),
            status: CleanlinessStatus::default(),
        }
    }

    pub fn with_weekend_price(mut self, price: Decimal) -> Self {
        self.weekend_price = Some(price);
        self
    }

    pub fn with_holiday_price(mut self, price: Decimal) -> Self {
        self.holiday_price = Some(price);
        self
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.unit_type)
    }
}

// ===========
// Reservation
// ===========

/// A reservation as delivered by the API. Datetimes stay raw text until a
/// [`Stay`] is requested, so one bad record cannot fail a whole snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reservation {
    pub id: ReservationId,
    #[serde(alias = "accommodation_unit")]
    pub unit_id: UnitId,
    pub check_in: String,
    pub check_out: String,
    #[serde(default)]
    pub status: ReservationStatus,
    #[serde(default)]
    pub guest_display_name: String,
}

impl Reservation {
    pub fn new(
        id: ReservationId,
        unit_id: UnitId,
        check_in: impl Into<String>,
        check_out: impl Into<String>,
        guest_display_name: impl Into<String>,
    ) -> Self {
        Self {
            id,
            unit_id,
            check_in: check_in.into(),
            check_out: check_out.into(),
            status: ReservationStatus::Confirmed,
            guest_display_name: guest_display_name.into(),
        }
    }

    pub fn with_status(mut self, status: ReservationStatus) -> Self {
        self.status = status;
        self
    }

    /// Parsed, validated stay. Fails on unparseable datetimes and on
    /// check-out not strictly after check-in.
    pub fn stay(&self) -> Result<Stay> {
        let check_in = parse_iso_instant(&self.check_in)?;
        let check_out = parse_iso_instant(&self.check_out)?;
        if check_out <= check_in {
            return Err(Error::Domain(format!(
                "Reservation {}: check-out {} is not after check-in {}.",
                self.id, self.check_out, self.check_in
            )));
        }
        Ok(Stay {
            check_in,
            check_out,
        })
    }
}

impl fmt::Display for Reservation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Reservation(id={}, unit={}, guest='{}', {} -> {}, {})",
            self.id,
            self.unit_id,
            self.guest_display_name,
            self.check_in,
            self.check_out,
            self.status
        )
    }
}

/// Validated check-in/check-out pair (check-out strictly later).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stay {
    pub check_in: NaiveDateTime,
    pub check_out: NaiveDateTime,
}

impl Stay {
    pub fn check_in_date(&self) -> NaiveDate {
        self.check_in.date()
    }

    pub fn check_out_date(&self) -> NaiveDate {
        self.check_out.date()
    }

    /// Calendar nights; 0 for a same-day stay.
    pub fn nights(&self) -> i64 {
        self.check_in_date().days_until(self.check_out_date())
    }

    /// Half-open overlap with `[from, to)`.
    pub fn overlaps(&self, from: NaiveDateTime, to: NaiveDateTime) -> bool {
        self.check_in < to && self.check_out > from
    }
}

// ==============
// Price override
// ==============

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceOverride {
    #[serde(alias = "accommodation_unit")]
    pub unit_id: UnitId,
    pub date: NaiveDate,
    pub price: Decimal,
}

/// Sparse `(unit, date) -> price` lookup addressed by [`OverrideKey`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PriceOverrides {
    by_key: HashMap<OverrideKey, Decimal>,
}

impl PriceOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key(unit_id: UnitId, date: NaiveDate) -> OverrideKey {
        format!("{}-{}", unit_id, date.iso())
    }

    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a PriceOverride>) -> Self {
        let mut overrides = Self::new();
        for r in records {
            overrides.insert(r.unit_id, r.date, r.price);
        }
        overrides
    }

    pub fn insert(&mut self, unit_id: UnitId, date: NaiveDate, price: Decimal) {
        self.by_key.insert(Self::key(unit_id, date), price);
    }

    pub fn get(&self, unit_id: UnitId, date: NaiveDate) -> Option<Decimal> {
        self.by_key.get(&Self::key(unit_id, date)).copied()
    }

    pub fn get_by_key(&self, key: &str) -> Option<Decimal> {
        self.by_key.get(key).copied()
    }

    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }
}

// =======
// Package
// =======

/// A named promotion painted over a unit's cells for an inclusive date range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Package {
    pub id: PackageId,
    #[serde(alias = "accommodation_unit")]
    pub unit_id: UnitId,
    pub name: String,
    #[serde(default)]
    pub color: HexColor,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Package {
    pub fn covers(&self, unit_id: UnitId, date: NaiveDate) -> bool {
        self.unit_id == unit_id && self.start_date <= date && date <= self.end_date
    }

    /// Creation instant; missing or unparseable values sort as oldest.
    pub fn created(&self) -> Option<NaiveDateTime> {
        self.created_at
            .as_deref()
            .and_then(|raw| parse_iso_instant(raw).ok())
    }
}

/// What a cell shows for the package that applies to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageTag {
    pub name: String,
    pub color: HexColor,
}
