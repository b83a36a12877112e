use thiserror::Error;

// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the fallible plumbing around the board (config, snapshot
/// loading, argument parsing). Rendering itself never fails: malformed records
/// are dropped and logged instead.
#[derive(Error, Debug)]
pub enum Error {
    // ---- Parsing ------------------------------------------------------------
    /// Bad date/enum/number text coming from config or the command line.
    #[error("Parse error: {0}")]
    Parse(String),

    // ---- Config -------------------------------------------------------------
    /// Any issue initializing/reading config (file missing, invalid JSON, etc.)
    #[error("Config error: {0}")]
    Config(String),

    /// Specific missing config item.
    #[error("Missing configuration item: {item}")]
    ConfigItemMissing { item: &'static str },

    // ---- Snapshot -----------------------------------------------------------
    /// The external data snapshot could not be read as a whole.
    #[error("Snapshot error: {0}")]
    Snapshot(String),

    // ---- Plumbing / Wrappers ------------------------------------------------
    #[error("{0}")]
    Domain(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub fn parse<S: Into<String>>(msg: S) -> Self {
        Error::Parse(msg.into())
    }
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Error::Config(msg.into())
    }
    pub fn snapshot<S: Into<String>>(msg: S) -> Self {
        Error::Snapshot(msg.into())
    }
}

/// Map an `Option<T>` into `Result<T, Error::Parse>` with a custom message.
pub fn require_parse<T, S: Into<String>>(opt: Option<T>, msg: S) -> Result<T> {
    opt.ok_or_else(|| Error::Parse(msg.into()))
}

/// Map an `Option<T>` into `Result<T, Error::ConfigItemMissing>` with a static key.
pub fn require_config_item<T>(opt: Option<T>, item: &'static str) -> Result<T> {
    opt.ok_or_else(|| Error::ConfigItemMissing { item })
}
