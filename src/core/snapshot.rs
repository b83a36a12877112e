use crate::core::aliases::UnitId;
use crate::core::models::{Package, PriceOverride, PriceOverrides, Reservation, Unit};
use crate::errors::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Everything the board reads from the back-office API, as one read-only
/// snapshot. Unit order is the row order of the board.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    #[serde(default)]
    pub units: Vec<Unit>,
    #[serde(default)]
    pub reservations: Vec<Reservation>,
    #[serde(default)]
    pub price_overrides: Vec<PriceOverride>,
    #[serde(default)]
    pub packages: Vec<Package>,
}

impl BoardSnapshot {
    pub fn unit_order(&self) -> Vec<UnitId> {
        self.units.iter().map(|u| u.id).collect()
    }

    pub fn unit(&self, id: UnitId) -> Option<&Unit> {
        self.units.iter().find(|u| u.id == id)
    }

    pub fn overrides(&self) -> PriceOverrides {
        PriceOverrides::from_records(&self.price_overrides)
    }

    pub fn reservations_for(&self, unit_id: UnitId) -> impl Iterator<Item = &Reservation> {
        self.reservations.iter().filter(move |r| r.unit_id == unit_id)
    }
}

/// Where the host gets its snapshot from. The HTTP client of the real back
/// office lives outside this crate; tests and the CLI read JSON.
pub trait SnapshotSource {
    fn load(&self) -> Result<BoardSnapshot>;
}

impl SnapshotSource for BoardSnapshot {
    fn load(&self) -> Result<BoardSnapshot> {
        Ok(self.clone())
    }
}

#[derive(Debug, Clone)]
pub struct JsonSnapshotSource {
    path: PathBuf,
}

impl JsonSnapshotSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SnapshotSource for JsonSnapshotSource {
    fn load(&self) -> Result<BoardSnapshot> {
        if !self.path.exists() {
            return Err(Error::snapshot(format!(
                "Snapshot file '{}' not found.",
                self.path.display()
            )));
        }
        let text = fs::read_to_string(&self.path).map_err(|e| {
            Error::snapshot(format!("Failed to read {}: {}", self.path.display(), e))
        })?;
        serde_json::from_str(&text).map_err(|e| {
            Error::snapshot(format!(
                "Invalid JSON in '{}': {}",
                self.path.display(),
                e
            ))
        })
    }
}
