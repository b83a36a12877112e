pub mod ansi;
pub mod ascii;
pub mod board_printer;
mod table_printer;
#[cfg(test)]
mod tests;
pub mod width_util;
