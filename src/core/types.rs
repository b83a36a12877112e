use crate::errors::{Error, Result};
use crate::extensions::enums::{parse_enum, valid_csv};
use crate::extensions::string::ToDashSeparators;
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use strum::IntoEnumIterator;
use strum_macros::{AsRefStr, Display, EnumIter as EnumIterDerive, EnumString};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    EnumString,
    Display,
    AsRefStr,
    EnumIterDerive,
    Serialize,
    Deserialize,
)]
#[strum(ascii_case_insensitive, serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UnitType {
    #[default]
    Chalet,
    Suite,
    Room,
    Apartment,
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    EnumString,
    Display,
    AsRefStr,
    EnumIterDerive,
    Serialize,
    Deserialize,
)]
#[strum(ascii_case_insensitive, serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CleanlinessStatus {
    #[default]
    Clean,
    Dirty,
    Inspecting,
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    EnumString,
    Display,
    AsRefStr,
    EnumIterDerive,
    Serialize,
    Deserialize,
)]
#[strum(ascii_case_insensitive, serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReservationStatus {
    #[default]
    Pending,
    Confirmed,
    CheckedIn,
    CheckedOut,
    Cancelled,
}

impl ReservationStatus {
    pub fn try_from(s: &str) -> Result<Self> {
        parse_enum(s, "reservation status")
    }

    /// Cancelled stays neither occupy a unit nor appear on the board.
    pub fn occupies_unit(self) -> bool {
        !matches!(self, ReservationStatus::Cancelled)
    }

    pub fn label(self) -> &'static str {
        match self {
            ReservationStatus::Pending => "pending",
            ReservationStatus::Confirmed => "confirmed",
            ReservationStatus::CheckedIn => "checked in",
            ReservationStatus::CheckedOut => "checked out",
            ReservationStatus::Cancelled => "cancelled",
        }
    }
}

/// Which precedence level produced a cell's price.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumString, Display, AsRefStr, EnumIterDerive, Serialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PriceTier {
    Custom,
    Holiday,
    Weekend,
    Base,
}

/// Supplied by the host; the board never measures the screen itself.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    EnumString,
    Display,
    AsRefStr,
    EnumIterDerive,
    Serialize,
    Deserialize,
)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ViewportClass {
    #[default]
    Desktop,
    Mobile,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, AsRefStr, EnumIterDerive, Serialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum NavDirection {
    Left,
    Right,
}

/// What a new first click does to rectangles completed earlier.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    EnumString,
    Display,
    AsRefStr,
    EnumIterDerive,
    Serialize,
    Deserialize,
)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum SelectionHistory {
    #[default]
    Replace,
    Accumulate,
}

impl SelectionHistory {
    pub fn try_from(s: &str) -> Result<Self> {
        parse_enum(s, "selection history")
    }

    pub fn help(&self) -> &'static str {
        match self {
            SelectionHistory::Replace => "A new first click discards the previous selection.",
            SelectionHistory::Accumulate => {
                "Completed selections are kept until explicitly cleared."
            }
        }
    }
}

// =====
// Dates
// =====

#[derive(Copy, Clone, Debug, EnumIterDerive, AsRefStr, EnumString)]
enum InstantFormat {
    #[strum(serialize = "%Y-%m-%dT%H:%M:%S%.f")]
    DateTimeSeconds,
    #[strum(serialize = "%Y-%m-%dT%H:%M")]
    DateTimeMinutes,
    #[strum(serialize = "%Y-%m-%d %H:%M:%S")]
    SpacedSeconds,
    #[strum(serialize = "%Y-%m-%d %H:%M")]
    SpacedMinutes,
}

/// Parse a calendar date. Accepts `YYYY-MM-DD` and `YYYY/MM/DD`.
pub fn parse_iso_date(input: &str) -> Result<NaiveDate> {
    let input = input.to_dash_separators();
    NaiveDate::parse_from_str(&input, "%Y-%m-%d").map_err(|_| {
        Error::Parse(format!(
            "Invalid date: '{}'. Expected YYYY-MM-DD.",
            input
        ))
    })
}

/// Brasília time, which has had no daylight saving since 2019.
pub const BOARD_UTC_OFFSET_HOURS: i32 = -3;

/// Offset every datetime on the board is expressed in.
pub fn board_offset() -> FixedOffset {
    FixedOffset::east_opt(BOARD_UTC_OFFSET_HOURS * 3600).unwrap_or_else(|| Utc.fix())
}

/// Parse an API datetime as wall-clock time at [`board_offset`].
///
/// Values carrying an offset (`Z`, `-03:00`, `+01:00`) are converted, so
/// stays written with different offsets compare as the instants they are and
/// land on the board's calendar day. Naive datetimes and bare dates
/// (midnight) are taken as board time already.
pub fn parse_iso_instant(input: &str) -> Result<NaiveDateTime> {
    parse_iso_instant_at(input, board_offset())
}

/// Same as [`parse_iso_instant`] for an explicit board offset.
pub fn parse_iso_instant_at(input: &str, offset: FixedOffset) -> Result<NaiveDateTime> {
    let trimmed = input.trim();
    let with_offset = DateTime::parse_from_rfc3339(trimmed)
        .or_else(|_| DateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M%:z"));
    if let Ok(dt) = with_offset {
        return Ok(dt.with_timezone(&offset).naive_local());
    }
    if let Some(utc) = trimmed.strip_suffix('Z').and_then(parse_naive_instant) {
        return Ok(offset.from_utc_datetime(&utc).naive_local());
    }
    if let Some(local) = parse_naive_instant(trimmed) {
        return Ok(local);
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date.and_time(NaiveTime::MIN));
    }
    Err(Error::Parse(format!(
        "Invalid datetime: '{}'. Expected ISO 8601, e.g. 2025-11-23T14:00:00Z.",
        trimmed
    )))
}

fn parse_naive_instant(input: &str) -> Option<NaiveDateTime> {
    InstantFormat::iter().find_map(|f| NaiveDateTime::parse_from_str(input, f.as_ref()).ok())
}

// =====
// Color
// =====

/// `#RRGGBB` display color of a unit or package.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HexColor {
    r: u8,
    g: u8,
    b: u8,
}

impl HexColor {
    pub const DEFAULT_UNIT: HexColor = HexColor {
        r: 0x4A,
        g: 0x90,
        b: 0xE2,
    };
    pub const RESET: &'static str = crate::csi!("0m");

    pub fn try_from_str(s: &str) -> Result<Self> {
        let raw = s.trim();
        let hex = raw.strip_prefix('#').unwrap_or(raw);
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(Error::Parse(format!(
                "Invalid color: '{}'. Expected #RRGGBB.",
                raw
            )));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .map_err(|e| Error::Parse(format!("Invalid color '{raw}': {e}")))
        };
        Ok(Self {
            r: channel(0)?,
            g: channel(2)?,
            b: channel(4)?,
        })
    }

    /// 24-bit background escape, used to paint bars in the text board.
    pub fn ansi_bg(&self) -> String {
        format!("\x1B[48;2;{};{};{}m", self.r, self.g, self.b)
    }

    pub fn paint_bg<S: AsRef<str>>(&self, s: S) -> String {
        format!("{}{}{}", self.ansi_bg(), s.as_ref(), Self::RESET)
    }
}

impl Default for HexColor {
    fn default() -> Self {
        Self::DEFAULT_UNIT
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl Serialize for HexColor {
    fn serialize<S: Serializer>(
        &self,
        serializer: S,
    ) -> std::result::Result<<S as Serializer>::Ok, <S as Serializer>::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for HexColor {
    fn deserialize<D: Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<HexColor, <D as Deserializer<'de>>::Error> {
        let s = String::deserialize(deserializer)?;
        HexColor::try_from_str(&s).map_err(serde::de::Error::custom)
    }
}

// ==============
// Layout profile
// ==============

/// Pixel sizes for one viewport class, written `"<cell>/<sidebar>"`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutProfile {
    pub cell_width: f64,
    pub sidebar_width: f64,
}

impl LayoutProfile {
    pub const DESKTOP: LayoutProfile = LayoutProfile {
        cell_width: 80.0,
        sidebar_width: 200.0,
    };
    pub const MOBILE: LayoutProfile = LayoutProfile {
        cell_width: 50.0,
        sidebar_width: 110.0,
    };

    pub fn try_from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let (cell, sidebar) = s.split_once('/').ok_or_else(|| {
            Error::Parse(format!(
                "Invalid layout profile: '{}'. Expected '<cell>/<sidebar>', e.g. 80/200.",
                s
            ))
        })?;
        let cell_width = Self::parse_px(cell, "cell width")?;
        let sidebar_width = Self::parse_px(sidebar, "sidebar width")?;
        if cell_width <= 0.0 {
            return Err(Error::Parse(format!(
                "Cell width must be positive, got '{}'.",
                cell.trim()
            )));
        }
        Ok(Self {
            cell_width,
            sidebar_width,
        })
    }

    fn parse_px(raw: &str, what: &str) -> Result<f64> {
        let v = f64::from_str(raw.trim())
            .map_err(|_| Error::Parse(format!("Invalid {what}: '{}'.", raw.trim())))?;
        if !v.is_finite() || v < 0.0 {
            return Err(Error::Parse(format!("Invalid {what}: '{}'.", raw.trim())));
        }
        Ok(v)
    }
}

impl fmt::Display for LayoutProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.cell_width, self.sidebar_width)
    }
}

impl Serialize for LayoutProfile {
    fn serialize<S: Serializer>(
        &self,
        serializer: S,
    ) -> std::result::Result<<S as Serializer>::Ok, <S as Serializer>::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for LayoutProfile {
    fn deserialize<D: Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<LayoutProfile, <D as Deserializer<'de>>::Error> {
        let s = String::deserialize(deserializer)?;
        LayoutProfile::try_from_str(&s).map_err(serde::de::Error::custom)
    }
}

// ====
// Bool
// ====

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display, AsRefStr, EnumIterDerive)]
#[strum(ascii_case_insensitive)]
pub enum BoolFormat {
    #[strum(serialize = "true", serialize = "yes", serialize = "on", to_string = "True")]
    TextTrue,

    #[strum(serialize = "false", serialize = "no", serialize = "off", to_string = "False")]
    TextFalse,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bool(pub bool);

impl Bool {
    pub fn try_from_str(s: &str) -> Result<Self> {
        match BoolFormat::from_str(s.trim()) {
            Ok(fmt) => Ok(Bool(matches!(fmt, BoolFormat::TextTrue))),
            Err(_) => Err(Error::Parse(format!(
                "Invalid string value for boolean: '{}'. Valid values: {}",
                s,
                valid_csv::<BoolFormat>()
            ))),
        }
    }
}

impl fmt::Display for Bool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", if self.0 { "True" } else { "False" })
    }
}

impl Serialize for Bool {
    fn serialize<S: Serializer>(
        &self,
        serializer: S,
    ) -> std::result::Result<<S as Serializer>::Ok, <S as Serializer>::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Bool {
    fn deserialize<D: Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<Bool, <D as Deserializer<'de>>::Error> {
        let b = String::deserialize(deserializer)?;
        Bool::try_from_str(&b).map_err(serde::de::Error::custom)
    }
}
