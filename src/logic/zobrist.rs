use crate::core::{BoardState, Piece, PieceKind, Side};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::OnceLock;

// 定数
const SQUARES: usize = 64;
const PIECE_TYPES: usize = 6;
const SIDES: usize = 2;
const TABLE_SEED: u64 = 0x5eed_c4e5_5b07_u64;

// Zobrist Hash用の乱数テーブル
struct ZobristTable {
    pieces: [[[u64; PIECE_TYPES]; SIDES]; SQUARES],
    castling: [[u64; 2]; SIDES],
    en_passant_file: [u64; 8],
    side_to_move: u64,
}

static ZOBRIST_TABLE: OnceLock<ZobristTable> = OnceLock::new();

fn get_zobrist_table() -> &'static ZobristTable {
    ZOBRIST_TABLE.get_or_init(|| {
        // 固定シード (hashes are identical across runs)
        let mut rng = StdRng::seed_from_u64(TABLE_SEED);
        let mut table = ZobristTable {
            pieces: [[[0; PIECE_TYPES]; SIDES]; SQUARES],
            castling: [[0; 2]; SIDES],
            en_passant_file: [0; 8],
            side_to_move: rng.gen(),
        };

        for sq in 0..SQUARES {
            for side in 0..SIDES {
                for k in 0..PIECE_TYPES {
                    table.pieces[sq][side][k] = rng.gen();
                }
            }
        }
        for side in 0..SIDES {
            table.castling[side] = [rng.gen(), rng.gen()];
        }
        for file in 0..8 {
            table.en_passant_file[file] = rng.gen();
        }

        table
    })
}

/// Hash of everything that makes two positions "the same" for repetition
/// purposes: placement, side to move, castling rights and en passant file.
pub fn compute_hash(state: &BoardState) -> u64 {
    let table = get_zobrist_table();
    let mut hash = 0;

    // 盤上の駒
    for (sq, piece) in state.pieces() {
        hash ^= table.pieces[sq.index()][piece.side.index()][piece.kind.index()];
    }

    for side in [Side::White, Side::Black] {
        let rights = state.castling_rights(side);
        if rights.king_side {
            hash ^= table.castling[side.index()][0];
        }
        if rights.queen_side {
            hash ^= table.castling[side.index()][1];
        }
    }

    // Only an en passant square that can actually be taken changes the position.
    if let Some(ep) = state.en_passant {
        let mover = state.side_to_move;
        let pawn = Some(Piece::new(PieceKind::Pawn, mover));
        let capturable = [-1, 1].iter().any(|&dx| {
            ep.offset(dx, -mover.forward())
                .map_or(false, |sq| state.get_piece(sq) == pawn)
        });
        if capturable {
            hash ^= table.en_passant_file[ep.x];
        }
    }

    // 手番
    if state.side_to_move == Side::Black {
        hash ^= table.side_to_move;
    }

    hash
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::setup::{parse_fen, start_position};

    #[test]
    fn test_hash_distinguishes_side_to_move() {
        let white = parse_fen("4k3/8/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        let black = parse_fen("4k3/8/8/8/8/8/8/4K3 b - - 0 1").unwrap();
        assert_ne!(compute_hash(&white), compute_hash(&black));
    }

    #[test]
    fn test_hash_ignores_move_counters() {
        let a = parse_fen("4k3/8/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        let b = parse_fen("4k3/8/8/8/8/8/8/4K3 w - - 12 40").unwrap();
        assert_eq!(a.hash, b.hash);
        assert_eq!(start_position().hash, compute_hash(&start_position()));
    }
}
