use crate::core::models::{PriceOverrides, Unit};
use crate::core::types::PriceTier;
use crate::extensions::chrono::NaiveDateExt;
use crate::timeline::holidays::HolidayMap;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResolvedPrice {
    pub amount: Decimal,
    pub tier: PriceTier,
}

/// Nightly price shown in a cell. Precedence: custom override, holiday rate,
/// weekend rate (Fri/Sat nights), base rate. A missing optional rate falls
/// through to the next tier.
pub fn resolve(
    unit: &Unit,
    date: NaiveDate,
    overrides: &PriceOverrides,
    holidays: &HolidayMap,
) -> ResolvedPrice {
    if let Some(amount) = overrides.get(unit.id, date) {
        return ResolvedPrice {
            amount,
            tier: PriceTier::Custom,
        };
    }
    if let Some(amount) = unit.holiday_price.filter(|_| holidays.contains(date)) {
        return ResolvedPrice {
            amount,
            tier: PriceTier::Holiday,
        };
    }
    if let Some(amount) = unit.weekend_price.filter(|_| date.is_weekend_night()) {
        return ResolvedPrice {
            amount,
            tier: PriceTier::Weekend,
        };
    }
    ResolvedPrice {
        amount: unit.base_price,
        tier: PriceTier::Base,
    }
}

/// Sum of nightly prices for the nights `[check_in, check_out)`; used by the
/// selection summary the host shows before a bulk price edit.
pub fn quote_nights(
    unit: &Unit,
    check_in: NaiveDate,
    check_out: NaiveDate,
    overrides: &PriceOverrides,
    holidays: &HolidayMap,
) -> Decimal {
    let nights = check_in.days_until(check_out).max(0);
    (0..nights)
        .map(|n| resolve(unit, check_in.plus_days(n), overrides, holidays).amount)
        .sum()
}
