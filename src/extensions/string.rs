pub trait ToDashSeparators {
    /// Returns a copy with all `/` replaced by `-` and leading/trailing
    /// whitespace trimmed.
    fn to_dash_separators(&self) -> String;
}

impl ToDashSeparators for str {
    fn to_dash_separators(&self) -> String {
        self.trim().replace('/', "-")
    }
}

impl ToDashSeparators for String {
    fn to_dash_separators(&self) -> String {
        self.as_str().to_dash_separators()
    }
}

pub trait Ellipsize {
    /// Keep at most `max_chars` characters, replacing the tail with `…` when
    /// anything was cut. `max_chars == 0` yields an empty string.
    fn ellipsize(&self, max_chars: usize) -> String;
}

impl Ellipsize for str {
    fn ellipsize(&self, max_chars: usize) -> String {
        let count = self.chars().count();
        if count <= max_chars {
            return self.to_string();
        }
        if max_chars == 0 {
            return String::new();
        }
        let mut out: String = self.chars().take(max_chars - 1).collect();
        out.push('…');
        out
    }
}
