use crate::core::aliases::UnitId;
use crate::core::models::{Package, PackageTag};
use chrono::NaiveDate;

/// `(unit, date) -> tag` as consumed by the board.
pub trait PackageLookup {
    fn package_for(&self, unit_id: UnitId, date: NaiveDate) -> Option<PackageTag>;
}

/// Lookup over a package snapshot. Ranges are inclusive; on overlap the
/// most recently created package wins, ties going to the higher id.
#[derive(Debug, Clone, Copy)]
pub struct SnapshotPackages<'a> {
    packages: &'a [Package],
}

impl<'a> SnapshotPackages<'a> {
    pub fn new(packages: &'a [Package]) -> Self {
        Self { packages }
    }
}

impl PackageLookup for SnapshotPackages<'_> {
    fn package_for(&self, unit_id: UnitId, date: NaiveDate) -> Option<PackageTag> {
        self.packages
            .iter()
            .filter(|p| p.start_date <= p.end_date && p.covers(unit_id, date))
            .max_by_key(|p| (p.created(), p.id))
            .map(|p| PackageTag {
                name: p.name.clone(),
                color: p.color,
            })
    }
}

/// No packages at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPackages;

impl PackageLookup for NoPackages {
    fn package_for(&self, _unit_id: UnitId, _date: NaiveDate) -> Option<PackageTag> {
        None
    }
}

impl<F> PackageLookup for F
where
    F: Fn(UnitId, NaiveDate) -> Option<PackageTag>,
{
    fn package_for(&self, unit_id: UnitId, date: NaiveDate) -> Option<PackageTag> {
        self(unit_id, date)
    }
}
