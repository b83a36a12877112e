use terminal_size::{Width, terminal_size};

use crate::extensions::string::Ellipsize;
use crate::ui::ascii::ESC;

type CharIter<'a> = std::iter::Peekable<std::str::Chars<'a>>;

/// Column arithmetic that ignores escape sequences.
#[derive(Debug, Default, Clone)]
pub struct WidthUtil;

impl WidthUtil {
    pub fn strip_ansi(s: &str) -> String {
        let mut out = String::with_capacity(s.len());
        let mut chars = s.chars().peekable();
        while let Some(c) = chars.next() {
            if c == ESC && chars.peek() == Some(&'[') {
                Self::consume_csi(&mut chars);
                continue;
            }
            out.push(c);
        }
        out
    }

    fn consume_csi(chars: &mut CharIter<'_>) {
        let _ = chars.next(); // '['
        for c in chars.by_ref() {
            // Final byte of a CSI sequence.
            if c.is_ascii_alphabetic() {
                break;
            }
        }
    }

    pub fn visible_width(&self, s: &str) -> usize {
        Self::strip_ansi(s).chars().count()
    }

    pub fn pad_visible(&self, s: &str, width: usize) -> String {
        let w = self.visible_width(s);
        if w >= width {
            return s.to_string();
        }
        format!("{s}{}", " ".repeat(width - w))
    }

    /// Plain text cut to `width` columns (with `…`) and padded to exactly
    /// `width`.
    pub fn fit(&self, s: &str, width: usize) -> String {
        self.pad_visible(&s.ellipsize(width), width)
    }

    /// Terminal width in columns, if stdout is a terminal.
    pub fn terminal_columns(&self) -> Option<usize> {
        terminal_size().map(|(Width(w), _)| w as usize)
    }

    /// Best-effort terminal width (defaults to 80).
    pub fn terminal_width(&self) -> usize {
        self.terminal_columns().unwrap_or(80)
    }
}
