pub mod board;
pub mod catalog;
pub mod effects;
pub mod piece;
pub mod scoring;
pub mod state;

pub use board::{Board, Cell};
pub use catalog::{PieceSource, RandomSource, Shape};
#[cfg(test)]
pub use catalog::SequenceSource;
pub use piece::Piece;
pub use state::{Game, Phase, Snapshot};
