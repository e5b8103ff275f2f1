mod bitboard;
mod color;
mod dir;
mod file;
mod piece;
mod rank;
mod slider;
mod square;

pub use bitboard::*;
pub use color::*;
pub use dir::*;
pub use file::*;
pub use piece::*;
pub use rank::*;
pub use slider::*;
pub use square::*;
