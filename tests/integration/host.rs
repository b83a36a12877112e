use crate::common::{make_temp_dir, normalized_lines, run_board, write_snapshot};

#[test]
fn renders_board_from_snapshot() {
    let dir = make_temp_dir("host");
    write_snapshot(&dir);

    let output = run_board(&dir, &["--snapshot", "snapshot.json", "--start", "2024-06-01"]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(output.status.success(), "board run failed: {stderr}");

    let lines = normalized_lines(&output.stdout);
    assert!(
        lines.iter().any(|l| l == "BOOKINGS 2024-06-01 - 2024-07-30"),
        "missing banner: {lines:?}"
    );
    assert!(lines.iter().any(|l| l.contains("Chalé Vista")));
    assert!(lines.iter().any(|l| l == "RESERVATIONS"));
    assert!(lines.iter().any(|l| l == "Skipped malformed reservations: 11"));
    assert!(lines.iter().any(|l| l.contains("Festa Junina")));

    assert!(stderr.contains("using defaults"));
    assert!(stderr.contains("Skipping reservation 11"));
}

#[test]
fn session_is_written_to_the_log_dir() {
    let dir = make_temp_dir("host");
    write_snapshot(&dir);

    let output = run_board(&dir, &["--snapshot", "snapshot.json", "--start", "2024-06-01"]);
    assert!(output.status.success());

    let logs: Vec<_> = std::fs::read_dir(dir.join("logs"))
        .unwrap()
        .filter_map(|e| e.ok())
        .collect();
    assert_eq!(logs.len(), 1);
    let content = std::fs::read_to_string(logs[0].path()).unwrap();
    assert!(content.contains("Loaded 2 units, 2 reservations"));
    assert!(content.contains("Rendered 2 units from 2024-06-01 to 2024-07-30"));
}

#[test]
fn fails_without_a_snapshot() {
    let dir = make_temp_dir("host");
    let output = run_board(&dir, &["--start", "2024-06-01"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Missing configuration item: snapshot"),
        "stderr did not name the snapshot: {stderr}"
    );
}

#[test]
fn rejects_unknown_arguments() {
    let dir = make_temp_dir("host");
    let output = run_board(&dir, &["--bogus"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Unknown argument: --bogus"), "stderr: {stderr}");
}

#[test]
fn rejects_bad_start_date() {
    let dir = make_temp_dir("host");
    write_snapshot(&dir);
    let output = run_board(&dir, &["--snapshot", "snapshot.json", "--start", "June 1st"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.to_lowercase().contains("parse"), "stderr: {stderr}");
}
