use thiserror::Error;

/// Errors raised by the rules engine.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RulesError {
    #[error("illegal move '{0}'")]
    IllegalMove(String),

    #[error("no move to take back")]
    NothingToUndo,

    #[error("invalid FEN: {0}")]
    InvalidFen(String),

    #[error("invalid move text '{0}'")]
    InvalidMoveText(String),
}
