use std::io::Write;

use chrono::{Datelike, NaiveDate};

use crate::core::types::{LayoutProfile, PriceTier};
use crate::extensions::chrono::NaiveDateExt;
use crate::extensions::string::Ellipsize;
use crate::timeline::board::{BarView, BoardFrame, CellView, RowView};
use crate::ui::ansi::{
    FG_CUSTOM_PRICE, FG_HOLIDAY, FG_WEEKEND, STYLE_BOLD, STYLE_DIM, STYLE_RESET, STYLE_REVERSE,
    STYLE_UNDERLINE,
};
use crate::ui::table_printer::TablePrinter;
use crate::ui::width_util::WidthUtil;

// Pixels per terminal column when a profile is turned into text.
const PX_PER_CELL_CHAR: f64 = 16.0;
const PX_PER_SIDEBAR_CHAR: f64 = 10.0;
const MIN_CELL_CHARS: usize = 4;

/// Renders a [`BoardFrame`] as a text grid: a date header, then for every
/// unit a price line and a bar line, followed by tables for the bars, the
/// packages and the current selection.
#[derive(Debug, Clone)]
pub struct BoardPrinter {
    util: WidthUtil,
    tables: TablePrinter,
    cell_chars: usize,
    sidebar_chars: usize,
    color: bool,
}

impl BoardPrinter {
    pub fn new(profile: LayoutProfile) -> Self {
        Self {
            util: WidthUtil,
            tables: TablePrinter::new(),
            cell_chars: ((profile.cell_width / PX_PER_CELL_CHAR).round() as usize)
                .max(MIN_CELL_CHARS),
            sidebar_chars: ((profile.sidebar_width / PX_PER_SIDEBAR_CHAR).round() as usize)
                .max(MIN_CELL_CHARS),
            color: true,
        }
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    pub fn cell_chars(&self) -> usize {
        self.cell_chars
    }

    pub fn print(&self, frame: &BoardFrame) {
        let mut stdout = std::io::stdout();
        let _ = self.render(frame, &mut stdout);
    }

    pub fn render<W: Write + ?Sized>(
        &self,
        frame: &BoardFrame,
        out: &mut W,
    ) -> std::io::Result<()> {
        let grid_chars = frame.headers.len() * self.cell_chars;
        let title = format!("Bookings {} - {}", frame.start.iso(), frame.last.iso());
        self.tables
            .render_banner(&title, self.sidebar_chars + grid_chars, out)?;

        writeln!(out, "{}", self.month_line(frame))?;
        writeln!(out, "{}", self.day_line(frame))?;
        for row in &frame.rows {
            writeln!(out, "{}", self.price_line(row))?;
            writeln!(out, "{}", self.bar_line(row, frame.cell_width, grid_chars))?;
        }
        if frame.selection_suspended {
            writeln!(out, "(selection hidden while a filter is active)")?;
        }
        writeln!(out)?;

        self.render_bars(frame, out)?;
        self.render_packages(frame, out)?;
        self.render_selection(frame, out)
    }

    fn style(&self, style: &str, text: &str) -> String {
        if self.color {
            format!("{style}{text}{STYLE_RESET}")
        } else {
            text.to_string()
        }
    }

    fn month_line(&self, frame: &BoardFrame) -> String {
        let mut columns = vec![' '; frame.headers.len() * self.cell_chars];
        for (i, header) in frame.headers.iter().enumerate() {
            if i == 0 || header.is_month_start {
                let label = header.date.format("%b %Y").to_string();
                let from = i * self.cell_chars;
                for (slot, c) in columns[from..].iter_mut().zip(label.chars()) {
                    *slot = c;
                }
            }
        }
        let text: String = columns.into_iter().collect();
        format!(
            "{}{}",
            " ".repeat(self.sidebar_chars),
            self.style(STYLE_BOLD, text.trim_end())
        )
    }

    fn day_line(&self, frame: &BoardFrame) -> String {
        let mut line = self.util.fit("UNIT", self.sidebar_chars);
        for header in &frame.headers {
            let mark = if header.holiday.is_some() { "*" } else { "" };
            let day = format!("{:02}{mark}", header.date.day());
            let text = format!("{day:>w$}", w = self.cell_chars);
            let styled = if header.holiday.is_some() {
                self.style(FG_HOLIDAY, &text)
            } else if header.is_weekend {
                self.style(FG_WEEKEND, &text)
            } else {
                text
            };
            line.push_str(&styled);
        }
        line
    }

    fn cell_text(&self, cell: &CellView) -> String {
        let marker = if cell.is_anchor {
            '@'
        } else if cell.selected {
            '#'
        } else {
            match cell.price.tier {
                PriceTier::Custom => '!',
                PriceTier::Holiday => '*',
                PriceTier::Weekend => '+',
                PriceTier::Base => ' ',
            }
        };
        let amount = cell.price.amount.round_dp(0).to_string();
        let width = self.cell_chars - 1;
        format!("{:>width$}{marker}", amount.ellipsize(width))
    }

    fn price_line(&self, row: &RowView) -> String {
        let name = if row.dimmed {
            format!("~{}", row.unit_name)
        } else {
            row.unit_name.clone()
        };
        let mut line = self.util.fit(&name, self.sidebar_chars);
        for cell in &row.cells {
            let text = self.cell_text(cell);
            let styled = if cell.is_anchor {
                self.style(STYLE_UNDERLINE, &text)
            } else if cell.selected {
                self.style(STYLE_REVERSE, &text)
            } else if let (Some(tag), true) = (&cell.package, self.color) {
                tag.color.paint_bg(&text)
            } else if cell.price.tier == PriceTier::Custom {
                self.style(FG_CUSTOM_PRICE, &text)
            } else {
                text
            };
            line.push_str(&styled);
        }
        if row.dimmed {
            self.style(STYLE_DIM, &line)
        } else {
            line
        }
    }

    /// Bars scaled from pixels to columns; each bar shows its label.
    fn bar_line(&self, row: &RowView, cell_width: f64, grid_chars: usize) -> String {
        let mut columns: Vec<char> = vec![' '; grid_chars];
        let mut spans = Vec::new();
        let scale = if cell_width > 0.0 {
            self.cell_chars as f64 / cell_width
        } else {
            0.0
        };
        for bar in &row.bars {
            let start = ((bar.layout.left * scale).round() as usize).min(grid_chars);
            let end = ((bar.layout.right() * scale).round() as usize)
                .min(grid_chars)
                .max(start);
            if end == start {
                continue;
            }
            let text = self.bar_text(bar, end - start);
            for (slot, c) in columns[start..end].iter_mut().zip(text.chars()) {
                *slot = c;
            }
            spans.push((start, end));
        }

        let mut line = " ".repeat(self.sidebar_chars);
        if !self.color {
            line.extend(columns);
            return line.trim_end().to_string();
        }
        // Paint each span with the unit color.
        let mut cursor = 0;
        spans.sort_unstable();
        for (start, end) in spans {
            if start < cursor {
                continue;
            }
            line.extend(&columns[cursor..start]);
            let text: String = columns[start..end].iter().collect();
            line.push_str(&row.color.paint_bg(text));
            cursor = end;
        }
        line.extend(&columns[cursor..]);
        line.trim_end().to_string()
    }

    fn bar_text(&self, bar: &BarView, width: usize) -> String {
        let flag = if bar.tight_turnaround { "!" } else { "" };
        let text = match &bar.label.secondary {
            Some(secondary) => format!("{flag}{} ({secondary})", bar.label.guest),
            None => format!("{flag}{}", bar.label.guest),
        };
        let fitted = text.ellipsize(width);
        format!("{fitted:=<width$}")
    }

    fn render_bars<W: Write + ?Sized>(
        &self,
        frame: &BoardFrame,
        out: &mut W,
    ) -> std::io::Result<()> {
        let rows: Vec<Vec<String>> = frame
            .rows
            .iter()
            .flat_map(|row| {
                row.bars.iter().map(move |bar| {
                    vec![
                        bar.reservation_id.to_string(),
                        row.unit_name.clone(),
                        bar.label.guest.clone(),
                        bar.status.label().to_string(),
                        format!("{}/{}", bar.layout.clipped_nights, bar.layout.total_nights),
                        if bar.tight_turnaround {
                            "tight turnaround".to_string()
                        } else {
                            String::new()
                        },
                    ]
                })
            })
            .collect();
        self.tables.render_table(
            "Reservations",
            &["ID", "UNIT", "GUEST", "STATUS", "NIGHTS", "NOTE"],
            &rows,
            "No reservations in this window.",
            out,
        )?;
        if !frame.skipped_reservations.is_empty() {
            let ids: Vec<String> = frame
                .skipped_reservations
                .iter()
                .map(|id| id.to_string())
                .collect();
            writeln!(out, "Skipped malformed reservations: {}", ids.join(", "))?;
        }
        Ok(())
    }

    /// One table row per contiguous run of the same package on a unit.
    fn render_packages<W: Write + ?Sized>(
        &self,
        frame: &BoardFrame,
        out: &mut W,
    ) -> std::io::Result<()> {
        let mut rows: Vec<Vec<String>> = Vec::new();
        for row in &frame.rows {
            let mut runs: Vec<(String, NaiveDate, NaiveDate)> = Vec::new();
            let mut open = false;
            for cell in &row.cells {
                match (&cell.package, runs.last_mut()) {
                    (Some(tag), Some(last)) if open && last.0 == tag.name => last.2 = cell.date,
                    (Some(tag), _) => {
                        runs.push((tag.name.clone(), cell.date, cell.date));
                        open = true;
                    }
                    (None, _) => open = false,
                }
            }
            rows.extend(runs.into_iter().map(|(name, first, last)| {
                vec![row.unit_name.clone(), name, first.iso(), last.iso()]
            }));
        }
        if rows.is_empty() {
            return Ok(());
        }
        self.tables
            .render_table("Packages", &["UNIT", "PACKAGE", "FROM", "TO"], &rows, "", out)
    }

    fn render_selection<W: Write + ?Sized>(
        &self,
        frame: &BoardFrame,
        out: &mut W,
    ) -> std::io::Result<()> {
        if frame.selection_totals.is_empty() {
            return Ok(());
        }
        let rows: Vec<Vec<String>> = frame
            .selection_totals
            .iter()
            .map(|t| {
                let unit = frame
                    .row(t.unit_id)
                    .map(|r| r.unit_name.clone())
                    .unwrap_or_else(|| t.unit_id.to_string());
                vec![
                    unit,
                    t.start.iso(),
                    t.end.iso(),
                    t.nights.to_string(),
                    t.total.round_dp(2).to_string(),
                ]
            })
            .collect();
        self.tables.render_table(
            "Selection",
            &["UNIT", "FROM", "TO", "NIGHTS", "TOTAL"],
            &rows,
            "",
            out,
        )
    }
}
