use crate::core::aliases::{ReservationId, UnitId};
use crate::core::models::{Reservation, Stay, Unit};
use chrono::{Duration, NaiveDateTime};
use serde::Serialize;

/// Gap under which a check-in right after a check-out is flagged.
pub const TIGHT_TURNAROUND_HOURS: i64 = 2;

pub fn default_turnaround_threshold() -> Duration {
    Duration::hours(TIGHT_TURNAROUND_HOURS)
}

// Non-cancelled reservations with a valid stay.
fn occupying(reservations: &[Reservation]) -> impl Iterator<Item = (&Reservation, Stay)> {
    reservations
        .iter()
        .filter(|r| r.status.occupies_unit())
        .filter_map(|r| r.stay().ok().map(|stay| (r, stay)))
}

/// Units free for the whole of `[check_in, check_out)`, in input order.
/// Cancelled and malformed reservations never block a unit.
pub fn available_units<'a>(
    units: &'a [Unit],
    reservations: &[Reservation],
    check_in: NaiveDateTime,
    check_out: NaiveDateTime,
) -> Vec<&'a Unit> {
    let busy: Vec<UnitId> = occupying(reservations)
        .filter(|(_, stay)| stay.overlaps(check_in, check_out))
        .map(|(r, _)| r.unit_id)
        .collect();
    units.iter().filter(|u| !busy.contains(&u.id)).collect()
}

/// Which end of the reservation is squeezed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TurnaroundSide {
    /// Checks in shortly after the neighbour checks out.
    Incoming,
    /// Checks out shortly before the neighbour checks in.
    Outgoing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Turnaround {
    pub reservation_id: ReservationId,
    /// The stay on the other side of the gap.
    pub neighbour_id: ReservationId,
    pub side: TurnaroundSide,
    #[serde(skip)]
    pub gap: Duration,
}

impl Turnaround {
    /// `"1h30min"`
    pub fn gap_label(&self) -> String {
        let minutes = self.gap.num_minutes();
        format!("{}h{:02}min", minutes / 60, minutes % 60)
    }
}

/// Gaps shorter than `threshold` between stays on the same unit, seen from
/// both sides. A previous check-out in `(check_in - threshold, check_in]`
/// gives an `Incoming` entry; a next check-in in
/// `[check_out, check_out + threshold)` gives an `Outgoing` one. Only the
/// closest neighbour is reported on each side.
pub fn tight_turnarounds(reservations: &[Reservation], threshold: Duration) -> Vec<Turnaround> {
    let stays: Vec<(&Reservation, Stay)> = occupying(reservations).collect();
    let mut out = Vec::new();
    for (r, stay) in &stays {
        let neighbours = || {
            stays
                .iter()
                .filter(move |(o, _)| o.unit_id == r.unit_id && o.id != r.id)
        };

        let earliest_check_out = stay.check_in - threshold;
        let previous = neighbours()
            .filter(|(_, o)| o.check_out > earliest_check_out && o.check_out <= stay.check_in)
            .max_by_key(|(_, o)| o.check_out);
        if let Some((prev, prev_stay)) = previous {
            out.push(Turnaround {
                reservation_id: r.id,
                neighbour_id: prev.id,
                side: TurnaroundSide::Incoming,
                gap: stay.check_in - prev_stay.check_out,
            });
        }

        let latest_check_in = stay.check_out + threshold;
        let next = neighbours()
            .filter(|(_, o)| o.check_in >= stay.check_out && o.check_in < latest_check_in)
            .min_by_key(|(_, o)| o.check_in);
        if let Some((next, next_stay)) = next {
            out.push(Turnaround {
                reservation_id: r.id,
                neighbour_id: next.id,
                side: TurnaroundSide::Outgoing,
                gap: next_stay.check_in - stay.check_out,
            });
        }
    }
    out
}
