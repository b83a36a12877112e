use std::str::FromStr;

use strum::IntoEnumIterator;

use crate::errors::{Error, Result};

trait EnumValidCsv: IntoEnumIterator + AsRef<str> + Sized {
    fn valid_csv() -> String {
        Self::iter()
            .map(|v| v.as_ref().to_owned())
            .collect::<Vec<_>>()
            .join(", ")
    }
}
impl<T> EnumValidCsv for T where T: IntoEnumIterator + AsRef<str> + Sized {}

pub fn valid_csv<T>() -> String
where
    T: IntoEnumIterator + AsRef<str> + Sized,
{
    <T as EnumValidCsv>::valid_csv()
}

/// Parse a strum enum from user text, listing the accepted spellings on failure.
/// `what` names the value in the message, e.g. "reservation status".
pub fn parse_enum<T>(s: &str, what: &str) -> Result<T>
where
    T: FromStr + IntoEnumIterator + AsRef<str>,
{
    T::from_str(s.trim()).map_err(|_| {
        Error::Parse(format!(
            "Invalid {what}: '{}'. Valid values: {}",
            s.trim(),
            valid_csv::<T>()
        ))
    })
}
