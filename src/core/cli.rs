use crate::core::types::parse_iso_date;
use crate::errors::{Error, Result, require_parse};
use chrono::NaiveDate;
use std::path::PathBuf;

/// Command-line options of the board host.
#[derive(Debug, Clone, PartialEq)]
pub struct CliPaths {
    pub config_path: PathBuf,
    pub snapshot_path: Option<PathBuf>,
    pub logs_dir: PathBuf,
    /// First day of the window; today when absent.
    pub start: Option<NaiveDate>,
    /// Forces the mobile profile regardless of terminal width.
    pub mobile: bool,
}

impl Default for CliPaths {
    fn default() -> Self {
        Self {
            config_path: PathBuf::from("config.json"),
            snapshot_path: None,
            logs_dir: PathBuf::from("logs"),
            start: None,
            mobile: false,
        }
    }
}

impl CliPaths {
    pub fn from_env() -> Result<Self> {
        Self::from_args(std::env::args().skip(1))
    }

    pub fn from_args<I>(mut args: I) -> Result<Self>
    where
        I: Iterator<Item = String>,
    {
        let mut paths = Self::default();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--config" => {
                    paths.config_path = Self::next_path(&mut args, "--config")?;
                }
                "--snapshot" => {
                    paths.snapshot_path = Some(Self::next_path(&mut args, "--snapshot")?);
                }
                "--logs" => {
                    paths.logs_dir = Self::next_path(&mut args, "--logs")?;
                }
                "--start" => {
                    let raw = Self::next_value(&mut args, "--start")?;
                    paths.start = Some(parse_iso_date(&raw)?);
                }
                "--mobile" => paths.mobile = true,
                _ => return Err(Error::parse(format!("Unknown argument: {arg}"))),
            }
        }
        Ok(paths)
    }

    fn next_value<I>(args: &mut I, flag: &str) -> Result<String>
    where
        I: Iterator<Item = String>,
    {
        require_parse(args.next(), format!("Missing value for {flag}"))
    }

    fn next_path<I>(args: &mut I, flag: &str) -> Result<PathBuf>
    where
        I: Iterator<Item = String>,
    {
        Self::next_value(args, flag).map(PathBuf::from)
    }
}
