use super::error::RulesError;
use super::piece::{Piece, PieceKind};
use super::r#move::Move;
use super::setup;
use super::types::{CastlingRights, Side, Square};

/// 局面のスナップショット
///
/// Plain `Copy` data so the move generator can copy-make freely and the
/// undo history can restore a previous position exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoardState {
    /// Scan order: index 0 = a8, index 63 = h1.
    pub squares: [Option<Piece>; 64],
    pub side_to_move: Side,
    /// Indexed by `Side::index()`.
    pub castling: [CastlingRights; 2],
    /// Square a pawn skipped over on the previous move.
    pub en_passant: Option<Square>,
    pub halfmove_clock: u32,
    pub fullmove_number: u32,
    /// Zobrist Hash (現在の盤面ハッシュ)
    pub hash: u64,
}

impl BoardState {
    pub fn empty() -> Self {
        BoardState {
            squares: [None; 64],
            side_to_move: Side::White,
            castling: [CastlingRights::NONE; 2],
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
            hash: 0,
        }
    }

    pub fn get_piece(&self, sq: Square) -> Option<Piece> {
        self.squares[sq.index()]
    }

    pub fn place_piece(&mut self, sq: Square, piece: Piece) {
        self.squares[sq.index()] = Some(piece);
    }

    pub fn remove_piece(&mut self, sq: Square) -> Option<Piece> {
        self.squares[sq.index()].take()
    }

    pub fn find_king(&self, side: Side) -> Option<Square> {
        self.squares
            .iter()
            .position(|p| *p == Some(Piece::new(PieceKind::King, side)))
            .map(Square::from_index)
    }

    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.squares
            .iter()
            .enumerate()
            .filter_map(|(i, p)| p.map(|p| (Square::from_index(i), p)))
    }

    pub fn castling_rights(&self, side: Side) -> CastlingRights {
        self.castling[side.index()]
    }
}

/// 盤面
///
/// The current position plus every earlier position of the game, so moves can
/// be taken back one at a time and repetitions can be counted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    state: BoardState,
    /// 局面履歴 (直前の局面と、そこで指された手)
    history: Vec<(BoardState, Move)>,
}

impl Default for Board {
    fn default() -> Self {
        Board::new()
    }
}

impl Board {
    /// Standard starting position.
    pub fn new() -> Self {
        Board::from_state(setup::start_position())
    }

    pub fn from_state(state: BoardState) -> Self {
        Board {
            state,
            history: Vec::new(),
        }
    }

    pub fn from_fen(fen: &str) -> Result<Self, RulesError> {
        Ok(Board::from_state(setup::parse_fen(fen)?))
    }

    pub fn to_fen(&self) -> String {
        setup::to_fen(&self.state)
    }

    pub fn state(&self) -> &BoardState {
        &self.state
    }

    pub fn get_piece(&self, sq: Square) -> Option<Piece> {
        self.state.get_piece(sq)
    }

    pub fn side_to_move(&self) -> Side {
        self.state.side_to_move
    }

    pub fn last_move(&self) -> Option<Move> {
        self.history.last().map(|(_, mv)| *mv)
    }

    /// Moves played since this board was set up, oldest first.
    pub fn moves_played(&self) -> impl Iterator<Item = Move> + '_ {
        self.history.iter().map(|(_, mv)| *mv)
    }

    pub fn ply_count(&self) -> usize {
        self.history.len()
    }

    /// Hashes of earlier positions, newest last.
    pub fn history_hashes(&self) -> impl DoubleEndedIterator<Item = u64> + '_ {
        self.history.iter().map(|(s, _)| s.hash)
    }

    /// 移動適用 (in place)
    ///
    /// The move must be legal for the side to move; otherwise the board is
    /// left untouched and an error is returned. A pawn move to the last rank
    /// without a promotion piece promotes to a queen.
    pub fn apply(&mut self, mv: &Move) -> Result<(), RulesError> {
        let resolved = crate::logic::resolve_move(&self.state, mv)
            .ok_or_else(|| RulesError::IllegalMove(mv.to_string()))?;
        let next = crate::logic::apply_move(&self.state, &resolved);
        self.history.push((self.state, resolved));
        self.state = next;
        Ok(())
    }

    /// Takes back the most recent `apply`, returning the move that was undone.
    pub fn undo(&mut self) -> Result<Move, RulesError> {
        let (prev, mv) = self.history.pop().ok_or(RulesError::NothingToUndo)?;
        self.state = prev;
        Ok(mv)
    }
}
