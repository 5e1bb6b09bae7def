//! FEN での局面の読み書き

use super::board::BoardState;
use super::error::RulesError;
use super::piece::{Piece, PieceKind};
use super::types::{CastlingRights, Side, Square};

pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

pub fn start_position() -> BoardState {
    let rows = [
        "rnbqkbnr", "pppppppp", "8", "8", "8", "8", "PPPPPPPP", "RNBQKBNR",
    ];
    let mut state = BoardState::empty();
    for (y, row) in rows.iter().enumerate() {
        let mut x = 0;
        for c in row.chars() {
            if let Some(n) = c.to_digit(10) {
                x += n as usize;
            } else if let Some(piece) = Piece::from_fen_char(c) {
                state.place_piece(Square::new(x, y), piece);
                x += 1;
            }
        }
    }
    state.castling = [CastlingRights::BOTH; 2];
    state.hash = crate::logic::zobrist::compute_hash(&state);
    state
}

/// FEN 文字列から局面を作る
///
/// The half-move clock and full-move number may be omitted, defaulting to
/// `0` and `1`.
pub fn parse_fen(fen: &str) -> Result<BoardState, RulesError> {
    let invalid = |why: &str| RulesError::InvalidFen(format!("{} in '{}'", why, fen));
    let fields: Vec<&str> = fen.split_whitespace().collect();
    if fields.len() != 4 && fields.len() != 6 {
        return Err(invalid("expected 4 or 6 fields"));
    }

    let mut state = BoardState::empty();

    let rows: Vec<&str> = fields[0].split('/').collect();
    if rows.len() != 8 {
        return Err(invalid("expected 8 ranks"));
    }
    for (y, row) in rows.iter().enumerate() {
        let mut x = 0;
        for c in row.chars() {
            if let Some(n) = c.to_digit(10) {
                if !(1..=8).contains(&n) {
                    return Err(invalid("bad empty-square count"));
                }
                x += n as usize;
            } else {
                let piece = Piece::from_fen_char(c).ok_or_else(|| invalid("unknown piece"))?;
                if x >= 8 {
                    return Err(invalid("rank too long"));
                }
                if piece.kind == PieceKind::Pawn && (y == 0 || y == 7) {
                    return Err(invalid("pawn on a back rank"));
                }
                state.place_piece(Square::new(x, y), piece);
                x += 1;
            }
        }
        if x != 8 {
            return Err(invalid("rank does not have 8 squares"));
        }
    }

    for side in [Side::White, Side::Black] {
        let kings = state
            .pieces()
            .filter(|(_, p)| p.kind == PieceKind::King && p.side == side)
            .count();
        if kings != 1 {
            return Err(invalid("each side needs exactly one king"));
        }
    }

    state.side_to_move = match fields[1] {
        "w" => Side::White,
        "b" => Side::Black,
        _ => return Err(invalid("bad side to move")),
    };

    if fields[2] != "-" {
        for c in fields[2].chars() {
            let rights = match c {
                'K' => &mut state.castling[Side::White.index()].king_side,
                'Q' => &mut state.castling[Side::White.index()].queen_side,
                'k' => &mut state.castling[Side::Black.index()].king_side,
                'q' => &mut state.castling[Side::Black.index()].queen_side,
                _ => return Err(invalid("bad castling field")),
            };
            *rights = true;
        }
    }

    state.en_passant = match fields[3] {
        "-" => None,
        s => {
            let sq = Square::parse(s).ok_or_else(|| invalid("bad en passant square"))?;
            if sq.rank() != 3 && sq.rank() != 6 {
                return Err(invalid("en passant square not on rank 3 or 6"));
            }
            Some(sq)
        }
    };

    if fields.len() == 6 {
        state.halfmove_clock = fields[4]
            .parse()
            .map_err(|_| invalid("bad half-move clock"))?;
        state.fullmove_number = fields[5]
            .parse()
            .map_err(|_| invalid("bad full-move number"))?;
    }

    state.hash = crate::logic::zobrist::compute_hash(&state);
    Ok(state)
}

pub fn to_fen(state: &BoardState) -> String {
    let mut out = String::new();
    for y in 0..8 {
        let mut empty = 0;
        for x in 0..8 {
            match state.get_piece(Square::new(x, y)) {
                Some(p) => {
                    if empty > 0 {
                        out.push_str(&empty.to_string());
                        empty = 0;
                    }
                    out.push(p.fen_char());
                }
                None => empty += 1,
            }
        }
        if empty > 0 {
            out.push_str(&empty.to_string());
        }
        if y < 7 {
            out.push('/');
        }
    }

    out.push(' ');
    out.push(match state.side_to_move {
        Side::White => 'w',
        Side::Black => 'b',
    });

    out.push(' ');
    out.push_str(&castling_string(state));

    out.push(' ');
    match state.en_passant {
        Some(sq) => out.push_str(&sq.to_string()),
        None => out.push('-'),
    }

    out.push_str(&format!(
        " {} {}",
        state.halfmove_clock, state.fullmove_number
    ));
    out
}

/// FEN castling field, e.g. `KQkq` or `-`.
pub fn castling_string(state: &BoardState) -> String {
    let white = state.castling_rights(Side::White);
    let black = state.castling_rights(Side::Black);
    let mut s = String::new();
    if white.king_side {
        s.push('K');
    }
    if white.queen_side {
        s.push('Q');
    }
    if black.king_side {
        s.push('k');
    }
    if black.queen_side {
        s.push('q');
    }
    if s.is_empty() {
        s.push('-');
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_position_matches_start_fen() {
        let parsed = parse_fen(START_FEN).unwrap();
        assert_eq!(parsed, start_position());
        assert_eq!(to_fen(&parsed), START_FEN);
    }

    #[test]
    fn test_fen_round_trip_keeps_all_fields() {
        let fen = "r3k2r/8/8/3pP3/8/8/8/R3K2R w Kq d6 3 17";
        let state = parse_fen(fen).unwrap();
        assert_eq!(state.en_passant, Square::parse("d6"));
        assert_eq!(state.halfmove_clock, 3);
        assert_eq!(state.fullmove_number, 17);
        assert_eq!(castling_string(&state), "Kq");
        assert_eq!(to_fen(&state), fen);
    }

    #[test]
    fn test_rejects_broken_fen() {
        assert!(parse_fen("").is_err());
        assert!(parse_fen("8/8/8/8/8/8/8/8 w - - 0 1").is_err()); // no kings
        assert!(parse_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP w KQkq - 0 1").is_err());
        assert!(parse_fen("4k3/8/8/8/8/8/8/4K3 x - - 0 1").is_err());
        assert!(parse_fen("4k3/8/8/8/8/8/8/4K3 w X - 0 1").is_err());
        assert!(parse_fen("4k3/9/8/8/8/8/8/4K3 w - - 0 1").is_err());
    }

    #[test]
    fn test_short_fen_uses_default_clocks() {
        let state = parse_fen("4k3/8/8/8/8/8/8/4K3 b - -").unwrap();
        assert_eq!(state.side_to_move, Side::Black);
        assert_eq!(state.halfmove_clock, 0);
        assert_eq!(state.fullmove_number, 1);
    }
}
