use crate::ui::width_util::WidthUtil;
use std::io::Write;

const COLUMN_GAP: &str = " | ";

/// Plain `|`-separated tables under an upper-case banner.
#[derive(Debug, Clone, Default)]
pub struct TablePrinter {
    util: WidthUtil,
}

impl TablePrinter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render_banner<W: Write + ?Sized>(
        &self,
        title: &str,
        width: usize,
        out: &mut W,
    ) -> std::io::Result<()> {
        let rule = "-".repeat(width.max(self.util.visible_width(title)).max(1));
        writeln!(out, "{rule}")?;
        writeln!(out, "{}", title.to_uppercase())?;
        writeln!(out, "{rule}")
    }

    /// Nothing but the banner and `empty_message` when `rows` is empty.
    pub fn render_table<T: AsRef<str>, W: Write + ?Sized>(
        &self,
        title: &str,
        headers: &[&str],
        rows: &[Vec<T>],
        empty_message: &str,
        out: &mut W,
    ) -> std::io::Result<()> {
        let widths = self.column_widths(headers, rows);
        let total = self.table_width(&widths);

        if rows.is_empty() {
            let width = total.max(self.util.visible_width(empty_message));
            self.render_banner(title, width, out)?;
            writeln!(out, "{empty_message}")?;
            return writeln!(out, "{}", "-".repeat(width.max(1)));
        }

        self.render_banner(title, total, out)?;
        writeln!(out, "{}", self.line(headers, &widths))?;
        writeln!(out, "{}", "-".repeat(total.max(1)))?;
        for row in rows {
            writeln!(out, "{}", self.line(row, &widths))?;
        }
        writeln!(out, "{}", "-".repeat(total.max(1)))
    }

    pub fn table_width(&self, widths: &[usize]) -> usize {
        match widths.len() {
            0 => 0,
            n => widths.iter().sum::<usize>() + (n - 1) * COLUMN_GAP.len(),
        }
    }

    fn column_widths<T: AsRef<str>>(&self, headers: &[&str], rows: &[Vec<T>]) -> Vec<usize> {
        let mut widths: Vec<usize> = headers
            .iter()
            .map(|h| self.util.visible_width(h))
            .collect();
        for row in rows {
            for (w, cell) in widths.iter_mut().zip(row) {
                *w = (*w).max(self.util.visible_width(cell.as_ref()));
            }
        }
        widths
    }

    fn line<T: AsRef<str>>(&self, cells: &[T], widths: &[usize]) -> String {
        cells
            .iter()
            .zip(widths)
            .map(|(cell, &w)| self.util.pad_visible(cell.as_ref(), w))
            .collect::<Vec<_>>()
            .join(COLUMN_GAP)
            .trim_end()
            .to_string()
    }
}
