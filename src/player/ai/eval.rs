//! # Evaluation Module
//!
//! Static evaluation of a position, always from White's point of view
//! (positive = White is better, negative = Black is better).
//!
//! ## Scoring Strategy
//! 1. **Terminal positions**: checkmate scores ±[`MATE_SCORE`], any draw scores 0.
//! 2. **Material + PST**: piece values plus piece-square bonuses.
//! 3. **Check**: the side in check loses [`CHECK_BONUS`].
//! 4. **Castling rights**: each side that can still castle gains [`CASTLING_BONUS`].
//! 5. **Center**: while plenty of material remains, pieces on d4/d5/e4/e5 score
//!    [`CENTER_BONUS`] each.
//!
//! ## Values
//! Piece values are on a compressed scale (pawn 10, queen 90, king 900) that
//! sits next to PST bonuses of similar size, so placement matters about as
//! much as a pawn.

use super::config::EvaluationConfig;
use super::position::SearchPosition;
use super::pst::get_pst_value;
use crate::core::{Piece, PieceKind, Side};

pub const MATE_SCORE: i32 = 99_999;
pub const CHECK_BONUS: i32 = 50;
pub const CASTLING_BONUS: i32 = 20;
pub const CENTER_BONUS: i32 = 10;
/// Above this much total material the center bonus is active.
pub const OPENING_MATERIAL: i32 = 1500;

const VAL_PAWN: i32 = 10;
const VAL_KNIGHT: i32 = 30;
const VAL_BISHOP: i32 = 30;
const VAL_ROOK: i32 = 50;
const VAL_QUEEN: i32 = 90;
const VAL_KING: i32 = 900;

/// d4, d5, e4, e5 as scan indices.
const CENTER: [usize; 4] = [35, 27, 36, 28];

/// Returns the static material value of a piece kind.
pub fn piece_val(k: PieceKind) -> i32 {
    match k {
        PieceKind::Pawn => VAL_PAWN,
        PieceKind::Knight => VAL_KNIGHT,
        PieceKind::Bishop => VAL_BISHOP,
        PieceKind::Rook => VAL_ROOK,
        PieceKind::Queen => VAL_QUEEN,
        PieceKind::King => VAL_KING,
    }
}

fn signed(side: Side, value: i32) -> i32 {
    match side {
        Side::White => value,
        Side::Black => -value,
    }
}

/// Evaluates the position with the stock settings (middlegame king table
/// everywhere).
pub fn evaluate<P: SearchPosition>(pos: &P) -> i32 {
    evaluate_with(pos, &EvaluationConfig::default())
}

/// Evaluates the position and returns a score from White's perspective.
pub fn evaluate_with<P: SearchPosition>(pos: &P, config: &EvaluationConfig) -> i32 {
    if pos.is_checkmate() {
        // The side to move is the one that got mated.
        return signed(pos.turn(), -MATE_SCORE);
    }
    if pos.is_draw() || pos.is_stalemate() {
        return 0;
    }

    let squares = pos.board_contents();
    let endgame = config.endgame_king_table && is_endgame(&squares);

    // 1. Material & PST
    let mut score = 0;
    let mut total_material = 0;
    for (idx, piece) in squares.iter().enumerate() {
        if let Some(p) = piece {
            let mat = piece_val(p.kind);
            let pst = get_pst_value(p.kind, idx, p.side, endgame);
            score += signed(p.side, mat + pst);
            total_material += mat;
        }
    }

    // 2. Check: being in check is bad for the side to move
    if pos.in_check() {
        score += signed(pos.turn(), -CHECK_BONUS);
    }

    // 3. Castling rights
    for side in [Side::White, Side::Black] {
        if pos.castling_rights(side).any() {
            score += signed(side, CASTLING_BONUS);
        }
    }

    // 4. Center control while the board is still full
    if total_material > OPENING_MATERIAL {
        for idx in CENTER {
            if let Some(p) = squares[idx] {
                score += signed(p.side, CENTER_BONUS);
            }
        }
    }

    score
}

/// No queens, or every side with a queen has at most one minor piece besides
/// it (and nothing else).
pub fn is_endgame(squares: &[Option<Piece>; 64]) -> bool {
    [Side::White, Side::Black].iter().all(|&side| {
        let mut queens = 0;
        let mut minors = 0;
        let mut others = 0;
        for p in squares.iter().flatten().filter(|p| p.side == side) {
            match p.kind {
                PieceKind::Queen => queens += 1,
                PieceKind::Knight | PieceKind::Bishop => minors += 1,
                PieceKind::Rook => others += 1,
                PieceKind::Pawn | PieceKind::King => {}
            }
        }
        queens == 0 || (minors <= 1 && others == 0)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Board, Square};

    // e2 and e7 mirror onto each other
    const PAWNS_BALANCED: i32 = 0;

    fn board(fen: &str) -> Board {
        Board::from_fen(fen).unwrap()
    }

    #[test]
    fn test_piece_values() {
        assert_eq!(piece_val(PieceKind::Pawn), 10);
        assert_eq!(piece_val(PieceKind::Knight), piece_val(PieceKind::Bishop));
        assert_eq!(piece_val(PieceKind::Rook), 50);
        assert_eq!(piece_val(PieceKind::Queen), 90);
        assert_eq!(piece_val(PieceKind::King), 900);
    }

    #[test]
    fn test_center_squares() {
        let names: Vec<String> = CENTER
            .iter()
            .map(|&i| Square::from_index(i).to_string())
            .collect();
        assert_eq!(names, vec!["d4", "d5", "e4", "e5"]);
    }

    #[test]
    fn test_start_position_is_balanced() {
        assert_eq!(evaluate(&Board::new()), 0);
    }

    #[test]
    fn test_opening_moves() {
        // e4: pawn leaves e2 (-20) for e4 (+20) and takes a center square
        let mut b = Board::new();
        b.apply(&"e2e4".parse().unwrap()).unwrap();
        assert_eq!(evaluate(&b), 50);

        // Nf3: g1 (-40) to f3 (+10), no center square
        let mut b = Board::new();
        b.apply(&"g1f3".parse().unwrap()).unwrap();
        assert_eq!(evaluate(&b), 50);

        // black mirrors: ...e5 brings it back to zero
        let mut b = Board::new();
        b.apply(&"e2e4".parse().unwrap()).unwrap();
        b.apply(&"e7e5".parse().unwrap()).unwrap();
        assert_eq!(evaluate(&b), 0);
    }

    #[test]
    fn test_mate_scores_follow_side_to_move() {
        // fool's mate: White to move and mated
        let mut b = Board::new();
        for m in ["f2f3", "e7e5", "g2g4", "d8h4"] {
            b.apply(&m.parse().unwrap()).unwrap();
        }
        assert_eq!(evaluate(&b), -MATE_SCORE);

        // back-rank mate: Black to move and mated
        assert_eq!(evaluate(&board("R5k1/5ppp/8/8/8/8/8/6K1 b - - 0 1")), MATE_SCORE);
    }

    #[test]
    fn test_draws_score_zero() {
        assert_eq!(evaluate(&board("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1")), 0);
        assert_eq!(evaluate(&board("4k3/8/8/8/8/8/8/4KN2 w - - 0 1")), 0);
        assert_eq!(evaluate(&board("4k3/8/8/8/8/8/8/R3K3 w - - 100 80")), 0);
    }

    #[test]
    fn test_check_penalises_side_to_move() {
        // rook on d1 and e1 read the same bonus; only the check differs
        let black_in_check = board("4k3/8/8/8/8/8/8/4R1K1 b - - 0 1");
        let quiet = board("4k3/8/8/8/8/8/8/3R2K1 b - - 0 1");
        assert_eq!(evaluate(&black_in_check), evaluate(&quiet) + CHECK_BONUS);
    }

    #[test]
    fn test_castling_rights_bonus() {
        let both = board("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
        let white_only = board("r3k2r/8/8/8/8/8/8/R3K2R w KQ - 0 1");
        let none = board("r3k2r/8/8/8/8/8/8/R3K2R w - - 0 1");
        assert_eq!(evaluate(&white_only) - evaluate(&none), CASTLING_BONUS);
        assert_eq!(evaluate(&both), evaluate(&none));
    }

    #[test]
    fn test_endgame_king_table_is_opt_in() {
        let b = board("8/4p3/8/8/8/3K4/4P3/7k w - - 0 1");
        let corrected = EvaluationConfig {
            endgame_king_table: true,
        };
        // middlegame: Kd3 -20, kh1 -30 mirrored
        assert_eq!(evaluate(&b), -20 + 30 + PAWNS_BALANCED);
        // endgame: Kd3 +30, kh1 -50 mirrored
        assert_eq!(evaluate_with(&b, &corrected), 30 + 50 + PAWNS_BALANCED);
    }

    #[test]
    fn test_is_endgame() {
        assert!(!is_endgame(&Board::new().state().squares));
        assert!(is_endgame(&board("4k3/8/8/8/8/8/8/4K3 w - - 0 1").state().squares));
        assert!(is_endgame(&board("3qk3/8/8/8/8/8/8/2BQK3 w - - 0 1").state().squares));
        assert!(!is_endgame(&board("3qk3/8/8/8/8/8/8/R2QK3 w - - 0 1").state().squares));
    }
}
