use bookboard::core::models::PriceOverrides;
use bookboard::core::snapshot::BoardSnapshot;
use bookboard::core::types::{NavDirection, PriceTier};
use bookboard::logging::Logger;
use bookboard::timeline::bar_layout::layout;
use bookboard::timeline::board::{
    BoardEvent, BoardObserver, BoardSettings, ObserverSet, RecordingObserver,
};
use bookboard::timeline::holidays::easter_sunday;
use bookboard::timeline::packages::SnapshotPackages;
use bookboard::timeline::pricing::resolve;
use bookboard::timeline::{HolidayCalendar, LoggerObserver, TimelineBoard, VisibleWindow};
use rust_decimal::Decimal;

use crate::common::{SNAPSHOT_JSON, d, stay, unit};

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn easter_matches_reference_tables() {
    let reference = [
        (1900, d(1900, 4, 15)),
        (1961, d(1961, 4, 2)),
        (2000, d(2000, 4, 23)),
        (2019, d(2019, 4, 21)),
        (2024, d(2024, 3, 31)),
        (2025, d(2025, 4, 20)),
        (2100, d(2100, 3, 28)),
    ];
    for (year, expected) in reference {
        assert_eq!(easter_sunday(year), Some(expected), "year {year}");
    }
}

#[test]
fn movable_holidays_follow_easter() {
    let holidays = HolidayCalendar::for_years([2025]);
    assert_eq!(holidays.get(d(2025, 3, 4)), Some("Carnaval"));
    assert_eq!(holidays.get(d(2025, 4, 18)), Some("Sexta-feira Santa"));
    assert_eq!(holidays.get(d(2025, 6, 19)), Some("Corpus Christi"));
    assert!(!holidays.contains(d(2025, 4, 20)));
}

#[test]
fn holiday_on_saturday_uses_holiday_price() {
    // 2022-01-01 is a Saturday.
    let chalet = unit(1, "Chalé 1");
    let holidays = HolidayCalendar::for_years([2022]);
    let overrides = PriceOverrides::new();

    let price = resolve(&chalet, d(2022, 1, 1), &overrides, &holidays);
    assert_eq!(price.tier, PriceTier::Holiday);
    assert_eq!(price.amount, Decimal::from(300));
    assert_eq!(price, resolve(&chalet, d(2022, 1, 1), &overrides, &holidays));

    let mut custom = PriceOverrides::new();
    custom.insert(1, d(2022, 1, 1), Decimal::from(999));
    let price = resolve(&chalet, d(2022, 1, 1), &custom, &holidays);
    assert_eq!(price.tier, PriceTier::Custom);
}

#[test]
fn reversed_stay_has_no_bar() {
    let window = VisibleWindow::new(d(2024, 6, 1), 30);
    let reversed = stay(1, 1, "2024-06-10T14:00", "2024-06-10T12:00");
    assert!(layout(&reversed, &window, 80.0).is_none());
}

#[test]
fn same_day_stay_covers_seventy_percent_of_its_cell() {
    let window = VisibleWindow::new(d(2024, 6, 1), 30);
    let day_use = stay(1, 1, "2024-06-10T09:00", "2024-06-10T17:00");
    let bar = layout(&day_use, &window, 80.0).unwrap();
    assert!(bar.is_same_day_check_in_out);
    assert!(approx(bar.width, 56.0));
    assert!(approx(bar.left, 9.3 * 80.0));
    assert_eq!(bar, layout(&day_use, &window, 80.0).unwrap());
}

#[test]
fn stay_spanning_the_window_fills_it() {
    let window = VisibleWindow::new(d(2024, 6, 1), 14);
    let long_stay = stay(1, 1, "2024-05-20T14:00", "2024-07-02T11:00");
    let bar = layout(&long_stay, &window, 80.0).unwrap();
    assert!(approx(bar.left, 0.0));
    assert!(approx(bar.width, 14.0 * 80.0));
    assert_eq!(bar.clipped_nights, 14);
    assert_eq!(bar.total_nights, 43);
}

#[test]
fn one_bad_record_does_not_blank_the_board() {
    let snapshot: BoardSnapshot = serde_json::from_str(SNAPSHOT_JSON).unwrap();
    let settings = BoardSettings {
        window_days: 30,
        ..BoardSettings::default()
    };
    let board = TimelineBoard::new(settings, d(2024, 6, 1), 800.0);
    let (logger, captured) = Logger::capturing();

    let packages = SnapshotPackages::new(&snapshot.packages);
    let frame = board.frame(&snapshot, &packages, &logger);

    assert_eq!(frame.rows.len(), 2);
    assert_eq!(frame.skipped_reservations, vec![11]);
    assert!(captured.contains("Skipping reservation 11"));

    let vista = frame.row(1).unwrap();
    assert_eq!(vista.bars.len(), 1);
    assert_eq!(vista.cells[3].price.tier, PriceTier::Custom);
    assert_eq!(vista.cells[3].price.amount, Decimal::from(400));

    let suite = frame.row(2).unwrap();
    assert!(suite.bars.is_empty());
    assert_eq!(
        suite.cells[19].package.as_ref().map(|p| p.name.as_str()),
        Some("Festa Junina")
    );
    assert!(suite.cells[24].package.is_none());
}

#[test]
fn navigation_reports_direction_then_new_centre() {
    let settings = BoardSettings {
        window_days: 30,
        ..BoardSettings::default()
    };
    let mut board = TimelineBoard::new(settings, d(2024, 6, 1), 800.0);
    let (logger, _) = Logger::capturing();
    let logged = LoggerObserver::new(logger);
    let recorded = RecordingObserver::new();
    let observers = ObserverSet::new(vec![&logged as &dyn BoardObserver, &recorded]);

    board.viewport_mut().on_scroll(0.0, &observers);
    board
        .viewport_mut()
        .navigate(NavDirection::Right, &observers);

    assert_eq!(
        recorded.events(),
        vec![
            BoardEvent::VisibleDateChanged { date: d(2024, 6, 6) },
            BoardEvent::Navigated {
                direction: NavDirection::Right
            },
            BoardEvent::VisibleDateChanged {
                date: d(2024, 6, 13)
            },
        ]
    );
}
