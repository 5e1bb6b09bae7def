pub mod board;
pub mod error;
pub mod r#move;
pub mod piece;
pub mod setup;
pub mod types;

pub use board::{Board, BoardState};
pub use error::RulesError;
pub use piece::{MoveStep, Piece, PieceKind};
pub use r#move::Move;
pub use setup::{parse_fen, START_FEN};
pub use types::{CastlingRights, Side, Square};
