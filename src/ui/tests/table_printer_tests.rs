use crate::ui::table_printer::TablePrinter;

#[test]
fn renders_banner_header_and_rows() {
    let printer = TablePrinter::new();
    let rows = vec![
        vec!["1".to_string(), "Chalé".to_string()],
        vec!["10".to_string(), "Suíte 2".to_string()],
    ];
    let mut buf = Vec::new();
    printer
        .render_table("Units", &["ID", "NAME"], &rows, "none", &mut buf)
        .unwrap();
    let expected = "\
------------
UNITS
------------
ID | NAME
------------
1  | Chalé
10 | Suíte 2
------------
";
    assert_eq!(String::from_utf8(buf).unwrap(), expected);
}

#[test]
fn empty_table_shows_message() {
    let printer = TablePrinter::new();
    let rows: Vec<Vec<String>> = Vec::new();
    let mut buf = Vec::new();
    printer
        .render_table("Units", &["ID"], &rows, "No units.", &mut buf)
        .unwrap();
    assert_eq!(
        String::from_utf8(buf).unwrap(),
        "---------\nUNITS\n---------\nNo units.\n---------\n"
    );
}

#[test]
fn table_width_counts_gaps() {
    let printer = TablePrinter::new();
    assert_eq!(printer.table_width(&[2, 5]), 10);
    assert_eq!(printer.table_width(&[]), 0);
}

#[test]
fn banner_is_at_least_as_wide_as_title() {
    let printer = TablePrinter::new();
    let mut buf = Vec::new();
    printer.render_banner("abc", 2, &mut buf).unwrap();
    assert_eq!(String::from_utf8(buf).unwrap(), "---\nABC\n---\n");
}
