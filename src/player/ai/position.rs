//! The engine's view of a game position.
//!
//! Search never builds or repairs positions; it only asks the rules engine for
//! moves, plays one, reads a few facts back and takes the move back again.

use crate::core::{Board, CastlingRights, Move, Piece, RulesError, Side};
use std::fmt;

pub trait SearchPosition {
    type Move: Clone + fmt::Display;

    /// All legal moves for the side to move.
    fn legal_moves(&self) -> Vec<Self::Move>;

    /// Plays `mv` in place. An illegal move must be rejected without touching
    /// the position.
    fn apply(&mut self, mv: &Self::Move) -> Result<(), RulesError>;

    /// Reverts the most recent successful `apply`.
    fn undo(&mut self) -> Result<(), RulesError>;

    fn is_game_over(&self) -> bool;
    fn is_checkmate(&self) -> bool;
    fn is_draw(&self) -> bool;
    fn is_stalemate(&self) -> bool;
    fn in_check(&self) -> bool;
    fn turn(&self) -> Side;

    /// Every square in scan order: index 0 = a8, index 63 = h1.
    fn board_contents(&self) -> [Option<Piece>; 64];

    fn castling_rights(&self, side: Side) -> CastlingRights;
}

impl SearchPosition for Board {
    type Move = Move;

    fn legal_moves(&self) -> Vec<Move> {
        Board::legal_moves(self)
    }

    fn apply(&mut self, mv: &Move) -> Result<(), RulesError> {
        Board::apply(self, mv)
    }

    fn undo(&mut self) -> Result<(), RulesError> {
        Board::undo(self).map(|_| ())
    }

    fn is_game_over(&self) -> bool {
        Board::is_game_over(self)
    }

    fn is_checkmate(&self) -> bool {
        Board::is_checkmate(self)
    }

    fn is_draw(&self) -> bool {
        Board::is_draw(self)
    }

    fn is_stalemate(&self) -> bool {
        Board::is_stalemate(self)
    }

    fn in_check(&self) -> bool {
        Board::in_check(self)
    }

    fn turn(&self) -> Side {
        self.side_to_move()
    }

    fn board_contents(&self) -> [Option<Piece>; 64] {
        self.state().squares
    }

    fn castling_rights(&self, side: Side) -> CastlingRights {
        self.state().castling_rights(side)
    }
}
