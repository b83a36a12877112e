use bookboard::core::snapshot::BoardSnapshot;
use bookboard::logging::Logger;
use bookboard::timeline::board::{BoardSettings, RecordingObserver};
use bookboard::timeline::packages::NoPackages;
use bookboard::timeline::selection::{SelectionEdge, SelectionRange};
use bookboard::timeline::TimelineBoard;
use rust_decimal::Decimal;

use crate::common::{d, unit};

const A: i64 = 10;
const B: i64 = 20;
const C: i64 = 30;

fn snapshot() -> BoardSnapshot {
    BoardSnapshot {
        units: vec![unit(A, "Chalé A"), unit(B, "Chalé B"), unit(C, "Chalé C")],
        ..BoardSnapshot::default()
    }
}

fn board() -> TimelineBoard {
    let settings = BoardSettings {
        window_days: 14,
        ..BoardSettings::default()
    };
    TimelineBoard::new(settings, d(2024, 6, 1), 800.0)
}

#[test]
fn rectangle_spans_every_row_between_the_clicks() {
    let snapshot = snapshot();
    let order = snapshot.unit_order();
    let obs = RecordingObserver::new();
    let mut board = board();

    board.click_cell(A, d(2024, 6, 3), &order, &obs);
    let state = board.click_cell(C, d(2024, 6, 7), &order, &obs).unwrap();
    let expected: Vec<SelectionRange> = [A, B, C]
        .into_iter()
        .map(|unit_id| SelectionRange {
            unit_id,
            start: d(2024, 6, 3),
            end: d(2024, 6, 7),
        })
        .collect();
    assert_eq!(state.ranges(), expected.as_slice());
    assert!(!state.is_selecting());

    let (logger, _) = Logger::capturing();
    let frame = board.frame(&snapshot, &NoPackages, &logger);
    let middle = frame.row(B).unwrap();
    assert_eq!(middle.cells[2].selection_edge, Some(SelectionEdge::Start));
    assert_eq!(middle.cells[6].selection_edge, Some(SelectionEdge::End));
    assert!(middle.cells[4].selected);
    assert!(!middle.cells[7].selected);

    // Mon..Thu at base rate plus the Friday weekend rate.
    assert_eq!(frame.selection_totals.len(), 3);
    for total in &frame.selection_totals {
        assert_eq!(total.nights, 5);
        assert_eq!(total.total, Decimal::from(4 * 200 + 260));
    }
}

#[test]
fn clear_then_single_click_waits_for_second_corner() {
    let snapshot = snapshot();
    let order = snapshot.unit_order();
    let obs = RecordingObserver::new();
    let mut board = board();

    board.click_cell(A, d(2024, 6, 3), &order, &obs);
    board.click_cell(C, d(2024, 6, 7), &order, &obs);
    board.clear_selection();
    assert!(board.selection().ranges().is_empty());

    let state = board.click_cell(B, d(2024, 6, 1), &order, &obs).unwrap();
    assert!(state.is_selecting());
    assert!(state.is_anchor(B, d(2024, 6, 1)));
    assert!(state.ranges().is_empty());

    let (logger, _) = Logger::capturing();
    let frame = board.frame(&snapshot, &NoPackages, &logger);
    assert!(frame.selection_totals.is_empty());
    assert!(frame.row(B).unwrap().cells[0].is_anchor);
}

#[test]
fn third_click_starts_over() {
    let snapshot = snapshot();
    let order = snapshot.unit_order();
    let obs = RecordingObserver::new();
    let mut board = board();

    board.click_cell(A, d(2024, 6, 3), &order, &obs);
    board.click_cell(B, d(2024, 6, 4), &order, &obs);
    let state = board.click_cell(C, d(2024, 6, 9), &order, &obs).unwrap();
    assert!(state.is_selecting());
    assert!(state.ranges().is_empty());
}
