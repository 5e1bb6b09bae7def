//! 終局判定

use super::{has_legal_move, is_fifty_move_draw, is_in_check, is_insufficient_material};
use crate::core::{Board, Move, Side};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DrawReason {
    Stalemate,
    FiftyMoveRule,
    InsufficientMaterial,
    ThreefoldRepetition,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    Ongoing,
    Checkmate { winner: Side },
    Draw(DrawReason),
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            GameStatus::Ongoing => write!(f, "in progress"),
            GameStatus::Checkmate { winner } => write!(f, "Checkmate! {} wins", winner),
            GameStatus::Draw(DrawReason::Stalemate) => write!(f, "Draw by stalemate"),
            GameStatus::Draw(DrawReason::FiftyMoveRule) => write!(f, "Draw by the fifty-move rule"),
            GameStatus::Draw(DrawReason::InsufficientMaterial) => {
                write!(f, "Draw by insufficient material")
            }
            GameStatus::Draw(DrawReason::ThreefoldRepetition) => {
                write!(f, "Draw by threefold repetition")
            }
        }
    }
}

impl Board {
    pub fn legal_moves(&self) -> Vec<Move> {
        super::legal_moves(self.state())
    }

    pub fn in_check(&self) -> bool {
        is_in_check(self.state(), self.side_to_move())
    }

    pub fn is_checkmate(&self) -> bool {
        self.in_check() && !has_legal_move(self.state())
    }

    pub fn is_stalemate(&self) -> bool {
        !self.in_check() && !has_legal_move(self.state())
    }

    pub fn is_insufficient_material(&self) -> bool {
        is_insufficient_material(self.state())
    }

    /// The current position has occurred at least twice before.
    ///
    /// Only positions since the last capture or pawn move can repeat, so the
    /// scan stops after `halfmove_clock` earlier positions.
    pub fn is_threefold_repetition(&self) -> bool {
        let current = self.state().hash;
        let window = self.state().halfmove_clock as usize;
        self.history_hashes()
            .rev()
            .take(window)
            .filter(|&h| h == current)
            .count()
            >= 2
    }

    pub fn is_draw(&self) -> bool {
        is_fifty_move_draw(self.state())
            || self.is_stalemate()
            || self.is_insufficient_material()
            || self.is_threefold_repetition()
    }

    pub fn is_game_over(&self) -> bool {
        self.status() != GameStatus::Ongoing
    }

    pub fn status(&self) -> GameStatus {
        let state = self.state();
        if !has_legal_move(state) {
            return if is_in_check(state, state.side_to_move) {
                GameStatus::Checkmate {
                    winner: state.side_to_move.opponent(),
                }
            } else {
                GameStatus::Draw(DrawReason::Stalemate)
            };
        }
        if is_fifty_move_draw(state) {
            GameStatus::Draw(DrawReason::FiftyMoveRule)
        } else if is_insufficient_material(state) {
            GameStatus::Draw(DrawReason::InsufficientMaterial)
        } else if self.is_threefold_repetition() {
            GameStatus::Draw(DrawReason::ThreefoldRepetition)
        } else {
            GameStatus::Ongoing
        }
    }
}
