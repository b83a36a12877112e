// SGR styles used by the board printer.

pub const STYLE_RESET: &str = crate::csi!("0m");
pub const STYLE_BOLD: &str = crate::csi!("1m");
/// Rows outside the focused unit.
pub const STYLE_DIM: &str = crate::csi!("2m");
/// Live anchor of an in-progress selection.
pub const STYLE_UNDERLINE: &str = crate::csi!("4m");
/// Selected cells.
pub const STYLE_REVERSE: &str = crate::csi!("7m");
pub const FG_HOLIDAY: &str = crate::csi!("31m");
pub const FG_WEEKEND: &str = crate::csi!("36m");
pub const FG_CUSTOM_PRICE: &str = crate::csi!("33m");
