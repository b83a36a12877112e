pub mod models;

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{AsRefStr, Display, EnumIter as EnumIterDerive, EnumString};

use crate::config::models::{
    ConfigItem, Item, Pixels, ScrollStep, WindowDays, default_compact_bar_threshold,
    default_desktop_profile, default_file_logging, default_log_level, default_mobile_profile,
    default_scroll_step_days, default_selection_history, default_window_days,
};
use crate::core::types::{Bool, LayoutProfile, SelectionHistory, ViewportClass};
use crate::errors::{Error, Result};
use crate::extensions::enums::valid_csv;
use crate::logging::LogLevel;

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIterDerive, EnumString, Display, AsRefStr)]
#[strum(ascii_case_insensitive, serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ConfigKey {
    WindowDays,
    DesktopProfile,
    MobileProfile,
    CompactBarThreshold,
    ScrollStepDays,
    SelectionHistory,
    LogLevel,
    FileLoggingEnabled,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(default = "default_window_days")]
    pub window_days: Item<WindowDays>,
    #[serde(default = "default_desktop_profile")]
    pub desktop_profile: Item<LayoutProfile>,
    #[serde(default = "default_mobile_profile")]
    pub mobile_profile: Item<LayoutProfile>,
    #[serde(default = "default_compact_bar_threshold")]
    pub compact_bar_threshold: Item<Pixels>,
    #[serde(default = "default_scroll_step_days")]
    pub scroll_step_days: Item<ScrollStep>,
    #[serde(default = "default_selection_history")]
    pub selection_history: Item<SelectionHistory>,
    #[serde(default = "default_log_level")]
    pub log_level: Item<LogLevel>,
    #[serde(default = "default_file_logging")]
    pub file_logging_enabled: Item<Bool>,
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            window_days: default_window_days(),
            desktop_profile: default_desktop_profile(),
            mobile_profile: default_mobile_profile(),
            compact_bar_threshold: default_compact_bar_threshold(),
            scroll_step_days: default_scroll_step_days(),
            selection_history: default_selection_history(),
            log_level: default_log_level(),
            file_logging_enabled: default_file_logging(),
        }
    }
}

/// (key, description, current value) as shown by the host.
pub type ConfigRow = (String, String, String);

#[derive(Debug, Clone)]
pub struct Config {
    path: PathBuf,
    data: ConfigFile,
    pub last_change: Option<(String, String, String)>,
}

impl Config {
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if !path.exists() {
            return Err(Error::config(format!(
                "Configuration file '{}' not found.",
                path.display()
            )));
        }
        let text = fs::read_to_string(&path)
            .map_err(|e| Error::config(format!("Failed to read {}: {}", path.display(), e)))?;
        let data: ConfigFile = serde_json::from_str(&text)
            .map_err(|e| Error::config(format!("Invalid JSON in '{}': {}", path.display(), e)))?;
        Ok(Self {
            path,
            data,
            last_change: None,
        })
    }

    /// Defaults bound to `path`; nothing is written until the first edit.
    pub fn with_defaults<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            data: ConfigFile::default(),
            last_change: None,
        }
    }

    pub fn view(&self) -> &ConfigFile {
        &self.data
    }

    pub fn window_days(&self) -> u32 {
        self.data.window_days.get_value().0
    }
    pub fn profile(&self, class: ViewportClass) -> LayoutProfile {
        match class {
            ViewportClass::Desktop => *self.data.desktop_profile.get_value(),
            ViewportClass::Mobile => *self.data.mobile_profile.get_value(),
        }
    }
    pub fn compact_bar_threshold(&self) -> f64 {
        self.data.compact_bar_threshold.get_value().0
    }
    pub fn scroll_step_days(&self) -> u32 {
        self.data.scroll_step_days.get_value().0
    }
    pub fn selection_history(&self) -> SelectionHistory {
        *self.data.selection_history.get_value()
    }
    pub fn log_level(&self) -> LogLevel {
        *self.data.log_level.get_value()
    }
    pub fn file_logging_enabled(&self) -> bool {
        self.data.file_logging_enabled.get_value().0
    }

    fn row_for(&self, key: ConfigKey) -> ConfigRow {
        let d = &self.data;
        let (description, value) = match key {
            ConfigKey::WindowDays => (d.window_days.description(), d.window_days.value.to_string()),
            ConfigKey::DesktopProfile => (
                d.desktop_profile.description(),
                d.desktop_profile.value.to_string(),
            ),
            ConfigKey::MobileProfile => (
                d.mobile_profile.description(),
                d.mobile_profile.value.to_string(),
            ),
            ConfigKey::CompactBarThreshold => (
                d.compact_bar_threshold.description(),
                d.compact_bar_threshold.value.to_string(),
            ),
            ConfigKey::ScrollStepDays => (
                d.scroll_step_days.description(),
                d.scroll_step_days.value.to_string(),
            ),
            ConfigKey::SelectionHistory => (
                d.selection_history.description(),
                d.selection_history.value.to_string(),
            ),
            ConfigKey::LogLevel => (d.log_level.description(), d.log_level.value.to_string()),
            ConfigKey::FileLoggingEnabled => (
                d.file_logging_enabled.description(),
                d.file_logging_enabled.value.to_string(),
            ),
        };
        (key.to_string(), description.to_string(), value)
    }

    pub fn rows(&self) -> Vec<ConfigRow> {
        ConfigKey::iter().map(|key| self.row_for(key)).collect()
    }

    pub fn set_key(&mut self, key: ConfigKey, new_value: &str) -> Result<()> {
        let (_, _, old) = self.row_for(key);
        self.edit(|cfg| Self::apply(cfg, key, new_value))?;
        let (_, _, new_val) = self.row_for(key);
        // Kept for the host to log.
        self.last_change = Some((key.to_string(), old, new_val));
        Ok(())
    }

    pub fn take_last_change(&mut self) -> Option<(String, String, String)> {
        self.last_change.take()
    }

    pub fn set(&mut self, key_str: &str, new_value: &str) -> Result<()> {
        let key = Self::parse_key(key_str)?;
        self.set_key(key, new_value)
    }

    pub fn set_many<I, K, V>(&mut self, pairs: I) -> Result<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        self.edit(|cfg| {
            for (k, v) in pairs {
                let key = Self::parse_key(k.as_ref())?;
                Self::apply(cfg, key, v.as_ref())?;
            }
            Ok(())
        })
    }

    fn parse_key(key_str: &str) -> Result<ConfigKey> {
        ConfigKey::from_str(key_str.trim()).map_err(|_| {
            Error::Parse(format!(
                "Unknown configuration key '{}'. Valid keys: {}",
                key_str,
                valid_csv::<ConfigKey>()
            ))
        })
    }

    fn apply(cfg: &mut ConfigFile, key: ConfigKey, value: &str) -> Result<()> {
        match key {
            ConfigKey::WindowDays => cfg.window_days.set_value(value),
            ConfigKey::DesktopProfile => cfg.desktop_profile.set_value(value),
            ConfigKey::MobileProfile => cfg.mobile_profile.set_value(value),
            ConfigKey::CompactBarThreshold => cfg.compact_bar_threshold.set_value(value),
            ConfigKey::ScrollStepDays => cfg.scroll_step_days.set_value(value),
            ConfigKey::SelectionHistory => cfg.selection_history.set_value(value),
            ConfigKey::LogLevel => cfg.log_level.set_value(value),
            ConfigKey::FileLoggingEnabled => cfg.file_logging_enabled.set_value(value),
        }
    }

    /// Changes are applied to a copy and only kept once the file is written.
    fn edit<F>(&mut self, f: F) -> Result<()>
    where
        F: FnOnce(&mut ConfigFile) -> Result<()>,
    {
        let mut draft = self.data.clone();
        f(&mut draft)?;
        Self::save(&self.path, &draft)?;
        self.data = draft;
        Ok(())
    }

    fn save(path: &Path, data: &ConfigFile) -> Result<()> {
        let json = serde_json::to_string_pretty(data)
            .map_err(|e| Error::config(format!("Failed to encode config: {}", e)))?;
        fs::write(path, json)
            .map_err(|e| Error::config(format!("Failed to write {}: {}", path.display(), e)))
    }
}
