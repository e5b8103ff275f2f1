pub use damson_types::*;

mod board {
    mod analysis;
    mod fen;
    mod make;
    #[allow(clippy::module_inception)]
    mod board;
    mod movegen;
    mod perft;

    pub use board::*;
    pub use fen::*;
    pub use make::*;
    pub use movegen::*;
    pub use perft::*;
}

mod search {
    mod history;
    mod info;
    mod move_picker;
    #[allow(clippy::module_inception)]
    mod search;
    mod searcher;
    mod time;
    mod ttable;
    mod window;

    pub use history::*;
    pub use info::*;
    pub use move_picker::*;
    pub use search::*;
    pub use searcher::*;
    pub use time::*;
    pub use ttable::*;
    pub use window::*;
}

mod attacks;
mod book;
mod chess_move;
mod engine;
mod eval;
mod score;
mod uci;
mod zobrist;

pub use attacks::*;
pub use board::*;
pub use book::*;
pub use chess_move::*;
pub use engine::*;
pub use eval::*;
pub use score::*;
pub use search::*;
pub use uci::*;
pub use zobrist::*;
