use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use std::sync::atomic::{AtomicUsize, Ordering};

use bookboard::core::aliases::UnitId;
use bookboard::core::models::{Reservation, Unit};
use chrono::NaiveDate;
use rust_decimal::Decimal;

pub fn binary_path() -> String {
    let raw = PathBuf::from(env!("CARGO_BIN_EXE_bookboard"));
    if raw.is_absolute() {
        return raw.to_string_lossy().to_string();
    }
    let from_manifest = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join(&raw);
    if from_manifest.exists() {
        return from_manifest.to_string_lossy().to_string();
    }
    raw.to_string_lossy().to_string()
}

static COUNTER: AtomicUsize = AtomicUsize::new(0);

pub fn make_temp_dir(prefix: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "{prefix}-{}-{}",
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos(),
        COUNTER.fetch_add(1, Ordering::Relaxed)
    ));
    let _ = fs::create_dir_all(&dir);
    dir
}

pub fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

/// Base 200, weekend 260, holiday 300.
pub fn unit(id: UnitId, name: &str) -> Unit {
    Unit::new(id, name, Decimal::from(200))
        .with_weekend_price(Decimal::from(260))
        .with_holiday_price(Decimal::from(300))
}

pub fn stay(id: i64, unit_id: UnitId, check_in: &str, check_out: &str) -> Reservation {
    Reservation::new(id, unit_id, check_in, check_out, "Maria Silva")
}

pub const SNAPSHOT_JSON: &str = r##"{
  "units": [
    { "id": 1, "name": "Chalé Vista", "type": "CHALET", "base_price": "250.00",
      "weekend_price": "320.00", "color_hex": "#2E7D32" },
    { "id": 2, "name": "Suíte 2", "type": "SUITE", "base_price": 180 }
  ],
  "reservations": [
    { "id": 10, "unit_id": 1, "check_in": "2024-06-03T14:00", "check_out": "2024-06-05T11:00",
      "status": "CONFIRMED", "guest_display_name": "Maria Silva" },
    { "id": 11, "unit_id": 2, "check_in": "2024-06-10T14:00", "check_out": "2024-06-10T12:00",
      "guest_display_name": "Broken Record" }
  ],
  "price_overrides": [ { "unit_id": 1, "date": "2024-06-04", "price": "400" } ],
  "packages": [
    { "id": 5, "unit_id": 2, "name": "Festa Junina", "color": "#FF9800",
      "start_date": "2024-06-20", "end_date": "2024-06-24" }
  ]
}"##;

pub fn write_snapshot(dir: &Path) -> PathBuf {
    let path = dir.join("snapshot.json");
    fs::write(&path, SNAPSHOT_JSON).unwrap();
    path
}

/// Runs the board host inside `dir` with its logs kept there too.
pub fn run_board(dir: &Path, args: &[&str]) -> Output {
    Command::new(binary_path())
        .current_dir(dir)
        .args(["--logs", "logs"])
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .expect("failed to run binary")
}

fn strip_ansi_and_control(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '\x1B' {
            if matches!(chars.peek(), Some('[')) {
                let _ = chars.next();
                for nc in chars.by_ref() {
                    if nc.is_ascii_alphabetic() {
                        break;
                    }
                }
            }
            continue;
        }
        if c.is_control() {
            continue;
        }
        out.push(c);
    }

    out
}

pub fn normalized_lines(output: &[u8]) -> Vec<String> {
    String::from_utf8_lossy(output)
        .lines()
        .map(strip_ansi_and_control)
        .map(|line| line.trim_end().to_string())
        .collect()
}
