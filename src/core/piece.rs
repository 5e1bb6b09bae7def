use super::types::Side;
use serde::{Deserialize, Serialize};

/// 駒の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    pub const ALL: [PieceKind; 6] = [
        PieceKind::Pawn,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
        PieceKind::King,
    ];

    /// Pieces a pawn may promote to, in generation order.
    pub const PROMOTIONS: [PieceKind; 4] = [
        PieceKind::Queen,
        PieceKind::Rook,
        PieceKind::Bishop,
        PieceKind::Knight,
    ];

    pub fn index(self) -> usize {
        match self {
            PieceKind::Pawn => 0,
            PieceKind::Knight => 1,
            PieceKind::Bishop => 2,
            PieceKind::Rook => 3,
            PieceKind::Queen => 4,
            PieceKind::King => 5,
        }
    }

    /// Lowercase FEN / UCI letter.
    pub fn letter(self) -> char {
        match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        }
    }

    pub fn from_letter(c: char) -> Option<PieceKind> {
        match c.to_ascii_lowercase() {
            'p' => Some(PieceKind::Pawn),
            'n' => Some(PieceKind::Knight),
            'b' => Some(PieceKind::Bishop),
            'r' => Some(PieceKind::Rook),
            'q' => Some(PieceKind::Queen),
            'k' => Some(PieceKind::King),
            _ => None,
        }
    }

    pub fn is_minor(self) -> bool {
        matches!(self, PieceKind::Knight | PieceKind::Bishop)
    }
}

/// 移動の特性
#[derive(Debug, Clone, Copy)]
pub enum MoveStep {
    Step(i32, i32),  // 指定した相対座標へ1マス移動
    Slide(i32, i32), // 指定した方向へ障害物があるまで移動
}

const KING_STEPS: [MoveStep; 8] = [
    MoveStep::Step(-1, -1),
    MoveStep::Step(0, -1),
    MoveStep::Step(1, -1),
    MoveStep::Step(-1, 0),
    MoveStep::Step(1, 0),
    MoveStep::Step(-1, 1),
    MoveStep::Step(0, 1),
    MoveStep::Step(1, 1),
];

const KNIGHT_STEPS: [MoveStep; 8] = [
    MoveStep::Step(-2, -1),
    MoveStep::Step(-2, 1),
    MoveStep::Step(2, -1),
    MoveStep::Step(2, 1),
    MoveStep::Step(-1, -2),
    MoveStep::Step(-1, 2),
    MoveStep::Step(1, -2),
    MoveStep::Step(1, 2),
];

const ROOK_SLIDES: [MoveStep; 4] = [
    MoveStep::Slide(0, -1),
    MoveStep::Slide(0, 1),
    MoveStep::Slide(-1, 0),
    MoveStep::Slide(1, 0),
];

const BISHOP_SLIDES: [MoveStep; 4] = [
    MoveStep::Slide(-1, -1),
    MoveStep::Slide(-1, 1),
    MoveStep::Slide(1, -1),
    MoveStep::Slide(1, 1),
];

const QUEEN_SLIDES: [MoveStep; 8] = [
    MoveStep::Slide(0, -1),
    MoveStep::Slide(0, 1),
    MoveStep::Slide(-1, 0),
    MoveStep::Slide(1, 0),
    MoveStep::Slide(-1, -1),
    MoveStep::Slide(-1, 1),
    MoveStep::Slide(1, -1),
    MoveStep::Slide(1, 1),
];

/// 駒の定義
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub kind: PieceKind,
    pub side: Side,
}

impl Piece {
    pub fn new(kind: PieceKind, side: Side) -> Self {
        Piece { kind, side }
    }

    /// その駒が本来持っている「動きの定義」を返す
    ///
    /// Pawns move and capture differently, so their moves are produced by the
    /// generator itself and this returns an empty slice for them.
    pub fn movement_rules(&self) -> &'static [MoveStep] {
        match self.kind {
            PieceKind::King => &KING_STEPS,
            PieceKind::Knight => &KNIGHT_STEPS,
            PieceKind::Rook => &ROOK_SLIDES,
            PieceKind::Bishop => &BISHOP_SLIDES,
            PieceKind::Queen => &QUEEN_SLIDES,
            PieceKind::Pawn => &[],
        }
    }

    /// FEN letter: uppercase for White, lowercase for Black.
    pub fn fen_char(&self) -> char {
        let c = self.kind.letter();
        match self.side {
            Side::White => c.to_ascii_uppercase(),
            Side::Black => c,
        }
    }

    pub fn from_fen_char(c: char) -> Option<Piece> {
        let kind = PieceKind::from_letter(c)?;
        let side = if c.is_ascii_uppercase() {
            Side::White
        } else {
            Side::Black
        };
        Some(Piece::new(kind, side))
    }

    pub fn display_char(&self) -> char {
        match (self.side, self.kind) {
            (Side::White, PieceKind::King) => '♔',
            (Side::White, PieceKind::Queen) => '♕',
            (Side::White, PieceKind::Rook) => '♖',
            (Side::White, PieceKind::Bishop) => '♗',
            (Side::White, PieceKind::Knight) => '♘',
            (Side::White, PieceKind::Pawn) => '♙',
            (Side::Black, PieceKind::King) => '♚',
            (Side::Black, PieceKind::Queen) => '♛',
            (Side::Black, PieceKind::Rook) => '♜',
            (Side::Black, PieceKind::Bishop) => '♝',
            (Side::Black, PieceKind::Knight) => '♞',
            (Side::Black, PieceKind::Pawn) => '♟',
        }
    }
}
