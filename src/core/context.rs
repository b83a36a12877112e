use crate::config::Config;
use crate::core::cli::CliPaths;
use crate::core::snapshot::{BoardSnapshot, JsonSnapshotSource, SnapshotSource};
use crate::errors::{Result, require_config_item};
use crate::logging::{LogTarget, Logger};
use chrono::{Local, NaiveDate};

/// What the host holds for one session: configuration, the logger and the
/// options it was started with.
#[derive(Debug)]
pub struct AppContext {
    pub config: Config,
    pub logger: Logger,
    pub paths: CliPaths,
}

impl AppContext {
    /// A missing config file is not fatal; defaults are used and written on
    /// the first edit. An unreadable one is.
    pub fn new_with_paths(paths: CliPaths) -> Result<Self> {
        let logger = Logger::new();
        Self::with_logger(paths, logger)
    }

    pub fn with_logger(paths: CliPaths, logger: Logger) -> Result<Self> {
        let config = if paths.config_path.exists() {
            Config::load_from(&paths.config_path)?
        } else {
            logger.warn(
                format!(
                    "Configuration file '{}' not found; using defaults.",
                    paths.config_path.display()
                ),
                LogTarget::ConsoleOnly,
            );
            Config::with_defaults(&paths.config_path)
        };

        logger.set_log_dir(&paths.logs_dir);
        logger.set_min_level(config.log_level());
        logger.set_file_logging_enabled(config.file_logging_enabled());

        Ok(Self {
            config,
            logger,
            paths,
        })
    }

    pub fn start_date(&self) -> NaiveDate {
        self.paths
            .start
            .unwrap_or_else(|| Local::now().date_naive())
    }

    pub fn snapshot_source(&self) -> Result<JsonSnapshotSource> {
        let path = require_config_item(self.paths.snapshot_path.as_ref(), "snapshot")?;
        Ok(JsonSnapshotSource::new(path))
    }

    pub fn load_snapshot(&self) -> Result<BoardSnapshot> {
        let source = self.snapshot_source()?;
        let snapshot = source.load()?;
        self.logger.info(
            format!(
                "Loaded {} units, {} reservations from {}",
                snapshot.units.len(),
                snapshot.reservations.len(),
                source.path().display()
            ),
            LogTarget::FileOnly,
        );
        Ok(snapshot)
    }
}
