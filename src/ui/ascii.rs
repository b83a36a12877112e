// Escape-sequence building blocks for the text board.

/// ESC as a char, the first byte of every CSI sequence.
pub const ESC: char = '\x1B';

/// `csi!("0m")` expands to the string literal `"\x1B[0m"`.
#[macro_export]
macro_rules! csi {
    ($suffix:literal) => {
        concat!("\x1B[", $suffix)
    };
}
