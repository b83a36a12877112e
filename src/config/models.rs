use crate::core::types::{Bool, LayoutProfile, SelectionHistory};
use crate::errors::{Error, Result};
use crate::logging::LogLevel;
use serde::{Deserialize, Serialize};
use std::fmt;

pub trait ConfigItem<T> {
    fn get_value(&self) -> &T;
    fn set_value(&mut self, new_value: &str) -> Result<()>;
    fn description(&self) -> &str;
}

/// A value type that can be edited from text (CLI or config editor).
pub trait ConfigValue: Sized + fmt::Display {
    fn parse_value(raw: &str) -> Result<Self>;
}

/// `{ "value": ..., "description": ... }` as stored in the config file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item<T> {
    pub value: T,
    pub description: String,
}

impl<T> Item<T> {
    pub fn new(value: T, description: impl Into<String>) -> Self {
        Self {
            value,
            description: description.into(),
        }
    }
}

impl<T: ConfigValue> ConfigItem<T> for Item<T> {
    fn get_value(&self) -> &T {
        &self.value
    }
    fn set_value(&mut self, new_value: &str) -> Result<()> {
        self.value = T::parse_value(new_value)?;
        Ok(())
    }
    fn description(&self) -> &str {
        &self.description
    }
}

/// Whole number of visible days, bounded to keep a frame cheap to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct WindowDays(pub u32);

impl WindowDays {
    pub const MAX: u32 = 366;
}

impl TryFrom<u32> for WindowDays {
    type Error = String;
    fn try_from(v: u32) -> std::result::Result<Self, Self::Error> {
        if v == 0 || v > Self::MAX {
            return Err(format!(
                "window days must be between 1 and {}, got {v}",
                Self::MAX
            ));
        }
        Ok(WindowDays(v))
    }
}

impl From<WindowDays> for u32 {
    fn from(v: WindowDays) -> u32 {
        v.0
    }
}

impl fmt::Display for WindowDays {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl ConfigValue for WindowDays {
    fn parse_value(raw: &str) -> Result<Self> {
        let n: u32 = raw
            .trim()
            .parse()
            .map_err(|_| Error::Parse(format!("Invalid day count: '{}'.", raw.trim())))?;
        WindowDays::try_from(n).map_err(Error::Parse)
    }
}

/// Day-cells moved by one keyboard navigation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrollStep(pub u32);

impl fmt::Display for ScrollStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl ConfigValue for ScrollStep {
    fn parse_value(raw: &str) -> Result<Self> {
        match raw.trim().parse::<u32>() {
            Ok(n) if n > 0 => Ok(ScrollStep(n)),
            _ => Err(Error::Parse(format!(
                "Invalid scroll step: '{}'. Expected a positive number of days.",
                raw.trim()
            ))),
        }
    }
}

/// Bars narrower than this many pixels get a compact label.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pixels(pub f64);

impl fmt::Display for Pixels {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}px", self.0)
    }
}

impl ConfigValue for Pixels {
    fn parse_value(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        let number = trimmed.strip_suffix("px").unwrap_or(trimmed).trim();
        match number.parse::<f64>() {
            Ok(v) if v.is_finite() && v >= 0.0 => Ok(Pixels(v)),
            _ => Err(Error::Parse(format!(
                "Invalid pixel value: '{}'.",
                trimmed
            ))),
        }
    }
}

impl ConfigValue for LayoutProfile {
    fn parse_value(raw: &str) -> Result<Self> {
        LayoutProfile::try_from_str(raw)
    }
}

impl ConfigValue for SelectionHistory {
    fn parse_value(raw: &str) -> Result<Self> {
        SelectionHistory::try_from(raw)
    }
}

impl ConfigValue for LogLevel {
    fn parse_value(raw: &str) -> Result<Self> {
        LogLevel::try_from(raw)
    }
}

impl ConfigValue for Bool {
    fn parse_value(raw: &str) -> Result<Self> {
        Bool::try_from_str(raw)
    }
}

// Defaults for keys that may be absent from an older config file.

pub(crate) fn default_window_days() -> Item<WindowDays> {
    Item::new(WindowDays(60), "Number of days materialized on the board.")
}

pub(crate) fn default_desktop_profile() -> Item<LayoutProfile> {
    Item::new(
        LayoutProfile::DESKTOP,
        "Cell/sidebar width in pixels on desktop.",
    )
}

pub(crate) fn default_mobile_profile() -> Item<LayoutProfile> {
    Item::new(
        LayoutProfile::MOBILE,
        "Cell/sidebar width in pixels on mobile.",
    )
}

pub(crate) fn default_compact_bar_threshold() -> Item<Pixels> {
    Item::new(
        Pixels(60.0),
        "Bars narrower than this hide secondary text.",
    )
}

pub(crate) fn default_scroll_step_days() -> Item<ScrollStep> {
    Item::new(ScrollStep(7), "Days moved by one arrow-key step.")
}

pub(crate) fn default_selection_history() -> Item<SelectionHistory> {
    Item::new(
        SelectionHistory::Replace,
        SelectionHistory::Replace.help(),
    )
}

pub(crate) fn default_log_level() -> Item<LogLevel> {
    Item::new(LogLevel::Info, "Lowest level written to the log.")
}

pub(crate) fn default_file_logging() -> Item<Bool> {
    Item::new(Bool(true), "Enable writing log messages to file.")
}
