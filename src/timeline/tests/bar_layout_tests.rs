use super::{approx, d, stay};
use crate::core::types::ReservationStatus;
use crate::timeline::bar_layout::{BarLabel, layout, try_layout};
use crate::timeline::window::VisibleWindow;

const W: f64 = 100.0;

fn june() -> VisibleWindow {
    VisibleWindow::new(d(2024, 6, 1), 30)
}

#[test]
fn bar_starts_thirty_percent_in_and_ends_twenty_percent_in() {
    let r = stay(1, 1, "2024-06-03T14:00:00", "2024-06-05T11:00:00");
    let bar = layout(&r, &june(), W).unwrap();
    assert!(approx(bar.left, 230.0));
    assert!(approx(bar.width, 190.0));
    assert_eq!(bar.total_nights, 2);
    assert_eq!(bar.clipped_nights, 2);
    assert!(!bar.is_same_day_check_in_out);
}

#[test]
fn same_day_stay_covers_trailing_seventy_percent() {
    let r = stay(1, 1, "2024-06-10T08:00", "2024-06-10T12:00");
    let bar = layout(&r, &june(), W).unwrap();
    assert!(bar.is_same_day_check_in_out);
    assert_eq!(bar.total_nights, 0);
    assert!(approx(bar.left, 930.0));
    assert!(approx(bar.width, 70.0));
}

#[test]
fn mixed_offsets_compare_as_instants() {
    // 11:00 UTC in, 12:00 UTC out: 08:00 to 09:00 board time.
    let r = stay(1, 1, "2024-06-10T14:00:00+03:00", "2024-06-10T12:00:00Z");
    let parsed = r.stay().unwrap();
    assert_eq!(parsed.check_out - parsed.check_in, chrono::Duration::hours(1));

    let bar = layout(&r, &june(), W).unwrap();
    assert!(bar.is_same_day_check_in_out);
    assert!(approx(bar.left, 930.0));
}

#[test]
fn utc_times_land_on_the_board_calendar_day() {
    // 01:30 UTC on the 12th is still the evening of the 11th on the board.
    let r = stay(1, 1, "2024-06-10T17:00:00Z", "2024-06-12T01:30:00Z");
    let bar = layout(&r, &june(), W).unwrap();
    assert_eq!(bar.total_nights, 1);
    assert!(approx(bar.left, 930.0));
    assert!(approx(bar.width, 90.0));
}

#[test]
fn same_day_stay_outside_window_is_hidden() {
    let r = stay(1, 1, "2024-07-01T08:00", "2024-07-01T12:00");
    assert!(layout(&r, &june(), W).is_none());
}

#[test]
fn stay_spanning_window_fills_it() {
    let r = stay(1, 1, "2024-05-20T14:00", "2024-07-10T11:00");
    let bar = layout(&r, &june(), W).unwrap();
    assert!(approx(bar.left, 0.0));
    assert!(approx(bar.width, 3000.0));
    assert_eq!(bar.clipped_nights, 30);
    assert_eq!(bar.total_nights, 51);
}

#[test]
fn partial_overlap_at_left_edge_is_clipped() {
    let r = stay(1, 1, "2024-05-30T14:00", "2024-06-03T11:00");
    let bar = layout(&r, &june(), W).unwrap();
    assert!(approx(bar.left, 0.0));
    assert!(approx(bar.right(), 220.0));
    assert_eq!(bar.clipped_nights, 2);
    assert_eq!(bar.total_nights, 4);
}

#[test]
fn partial_overlap_at_right_edge_is_clipped() {
    let r = stay(1, 1, "2024-06-29T14:00", "2024-07-02T11:00");
    let bar = layout(&r, &june(), W).unwrap();
    assert!(approx(bar.left, 2830.0));
    assert!(approx(bar.right(), 3000.0));
    assert_eq!(bar.clipped_nights, 2);
    assert_eq!(bar.total_nights, 3);
}

#[test]
fn stays_outside_window_are_not_rendered() {
    let before = stay(1, 1, "2024-05-28T14:00", "2024-06-01T10:00");
    let after = stay(2, 1, "2024-07-01T14:00", "2024-07-03T10:00");
    assert!(layout(&before, &june(), W).is_none());
    assert!(layout(&after, &june(), W).is_none());
}

#[test]
fn malformed_stays_are_not_rendered() {
    let backwards = stay(1, 1, "2024-06-10T14:00", "2024-06-10T12:00");
    let garbage = stay(2, 1, "soon", "2024-06-10T12:00");
    let reversed_days = stay(3, 1, "2024-06-12T14:00", "2024-06-10T12:00");
    for r in [&backwards, &garbage, &reversed_days] {
        assert!(layout(r, &june(), W).is_none());
        assert!(try_layout(r, &june(), W).is_err());
    }
}

#[test]
fn zero_cell_width_yields_nothing() {
    let r = stay(1, 1, "2024-06-03T14:00", "2024-06-05T11:00");
    assert!(layout(&r, &june(), 0.0).is_none());
}

#[test]
fn layout_is_idempotent() {
    let r = stay(1, 1, "2024-06-03T14:00", "2024-06-05T11:00");
    assert_eq!(layout(&r, &june(), W), layout(&r, &june(), W));
}

#[test]
fn wide_bar_shows_full_label() {
    let r = stay(1, 1, "2024-06-03T14:00", "2024-06-05T11:00");
    let bar = layout(&r, &june(), W).unwrap();
    let label = BarLabel::for_bar(&r, &bar, 60.0, 7.0);
    assert!(!label.compact);
    assert_eq!(label.guest, "Maria Silva");
    assert_eq!(label.secondary.as_deref(), Some("2 nights · confirmed"));
}

#[test]
fn compact_bar_hides_secondary_and_truncates_guest() {
    let r = stay(1, 1, "2024-06-03T14:00", "2024-06-04T11:00")
        .with_status(ReservationStatus::CheckedIn);
    // One night at 20px per day is 18px wide.
    let bar = layout(&r, &june(), 20.0).unwrap();
    let label = BarLabel::for_bar(&r, &bar, 60.0, 7.0);
    assert!(label.compact);
    assert!(label.secondary.is_none());
    assert_eq!(label.guest, "M…");
}
