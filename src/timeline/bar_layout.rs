use crate::core::models::{Reservation, Stay};
use crate::errors::Result;
use crate::extensions::string::Ellipsize;
use crate::timeline::window::VisibleWindow;
use serde::Serialize;

/// Fraction of the check-in cell left of the bar ("arriving midday").
pub const CHECK_IN_OFFSET: f64 = 0.3;
/// Fraction of the check-out cell covered by the bar ("leaving early").
pub const CHECK_OUT_OFFSET: f64 = 0.2;
/// Average glyph width used to fit a guest name into a compact bar.
pub const DEFAULT_LABEL_CHAR_PX: f64 = 7.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BarLayout {
    /// Pixels from the left edge of the first visible cell.
    pub left: f64,
    pub width: f64,
    /// Nights that fall inside the window.
    pub clipped_nights: i64,
    /// Calendar nights of the whole stay, independent of clipping.
    pub total_nights: i64,
    pub is_same_day_check_in_out: bool,
}

impl BarLayout {
    pub fn right(&self) -> f64 {
        self.left + self.width
    }
}

/// Pixel span of `reservation` inside `window`, or `None` when the bar
/// would not be drawn: malformed datetimes, stays outside the window and
/// spans with no width left after clipping.
pub fn layout(
    reservation: &Reservation,
    window: &VisibleWindow,
    day_width: f64,
) -> Option<BarLayout> {
    let stay = reservation.stay().ok()?;
    layout_stay(&stay, window, day_width)
}

/// Same as [`layout`], keeping the reason a record was rejected so the
/// caller can log it.
pub fn try_layout(
    reservation: &Reservation,
    window: &VisibleWindow,
    day_width: f64,
) -> Result<Option<BarLayout>> {
    let stay = reservation.stay()?;
    Ok(layout_stay(&stay, window, day_width))
}

pub fn layout_stay(stay: &Stay, window: &VisibleWindow, day_width: f64) -> Option<BarLayout> {
    if !(day_width > 0.0) {
        return None;
    }
    let check_in = stay.check_in_date();
    let check_out = stay.check_out_date();
    let total_nights = stay.nights();

    if total_nights == 0 {
        let column = window.index_of(check_in)? as f64;
        return Some(BarLayout {
            left: (column + CHECK_IN_OFFSET) * day_width,
            width: (1.0 - CHECK_IN_OFFSET) * day_width,
            clipped_nights: 0,
            total_nights,
            is_same_day_check_in_out: true,
        });
    }

    if check_out <= window.start() || check_in > window.last() {
        return None;
    }

    let full_width = window.day_count() as f64 * day_width;
    let raw_left = (window.offset_of(check_in) as f64 + CHECK_IN_OFFSET) * day_width;
    let raw_right = (window.offset_of(check_out) as f64 + CHECK_OUT_OFFSET) * day_width;
    let left = raw_left.max(0.0);
    let right = raw_right.min(full_width);
    let width = right - left;
    if width <= 0.0 {
        return None;
    }

    let first_night = window.offset_of(check_in).max(0);
    let past_last_night = window
        .offset_of(check_out)
        .min(window.day_count() as i64);

    Some(BarLayout {
        left,
        width,
        clipped_nights: (past_last_night - first_night).max(0),
        total_nights,
        is_same_day_check_in_out: false,
    })
}

/// Text drawn inside a bar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BarLabel {
    pub guest: String,
    /// Night count and status; hidden on compact bars.
    pub secondary: Option<String>,
    pub compact: bool,
}

impl BarLabel {
    /// Bars narrower than `compact_threshold_px` drop the secondary line and
    /// truncate the guest name to what fits at `label_char_px` per glyph.
    pub fn for_bar(
        reservation: &Reservation,
        bar: &BarLayout,
        compact_threshold_px: f64,
        label_char_px: f64,
    ) -> Self {
        let compact = bar.width < compact_threshold_px;
        if compact {
            let fit = if label_char_px > 0.0 {
                (bar.width / label_char_px).floor().max(0.0) as usize
            } else {
                0
            };
            return Self {
                guest: reservation.guest_display_name.ellipsize(fit),
                secondary: None,
                compact,
            };
        }

        let nights = match bar.total_nights {
            0 => "day use".to_string(),
            1 => "1 night".to_string(),
            n => format!("{n} nights"),
        };
        Self {
            guest: reservation.guest_display_name.clone(),
            secondary: Some(format!("{} · {}", nights, reservation.status.label())),
            compact,
        }
    }
}
