pub mod config;
pub mod difficulty;
pub mod eval;
pub mod position;
pub mod pst;
pub mod search;

pub use config::AIConfig;
pub use difficulty::Difficulty;
pub use eval::{evaluate, evaluate_with, MATE_SCORE};
pub use position::SearchPosition;
pub use search::{ChessAI, ChoiceKind, MoveChoice, SearchError};
