pub type UnitId = i64;
pub type ReservationId = i64;
pub type PackageId = i64;
/// `"{unitId}-{YYYY-MM-DD}"`, the composite key of a price override.
pub type OverrideKey = String;
