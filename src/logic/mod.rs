//! Chess rules: move generation, move application and attack detection.
//!
//! Everything here works on the copyable [`BoardState`]; [`crate::core::Board`]
//! layers the undo history on top.

pub mod status;
pub mod zobrist;

pub use status::{DrawReason, GameStatus};

use crate::core::{BoardState, Move, MoveStep, Piece, PieceKind, Side, Square};

/// 合法手生成 (自殺手を排除)
pub fn legal_moves(state: &BoardState) -> Vec<Move> {
    let side = state.side_to_move;
    pseudo_legal_moves(state)
        .into_iter()
        .filter(|mv| !is_in_check(&apply_move(state, mv), side))
        .collect()
}

/// Same answer as `!legal_moves(state).is_empty()` without building the list.
pub fn has_legal_move(state: &BoardState) -> bool {
    let side = state.side_to_move;
    pseudo_legal_moves(state)
        .iter()
        .any(|mv| !is_in_check(&apply_move(state, mv), side))
}

/// 疑似合法手生成 (王手放置などは考慮しない)
///
/// Squares are scanned a8 → h1, so the order of the result is stable.
pub fn pseudo_legal_moves(state: &BoardState) -> Vec<Move> {
    let mut moves = Vec::with_capacity(48);
    let player = state.side_to_move;

    for (from, piece) in state.pieces() {
        if piece.side == player {
            get_piece_moves(state, from, piece, &mut moves);
        }
    }

    moves
}

fn get_piece_moves(state: &BoardState, from: Square, piece: Piece, moves: &mut Vec<Move>) {
    if piece.kind == PieceKind::Pawn {
        get_pawn_moves(state, from, piece, moves);
        return;
    }

    for step in piece.movement_rules() {
        match *step {
            MoveStep::Step(dx, dy) => {
                if let Some(to) = from.offset(dx, dy) {
                    match state.get_piece(to) {
                        Some(target) if target.side == piece.side => {}
                        _ => moves.push(Move::new(from, to)),
                    }
                }
            }
            MoveStep::Slide(dx, dy) => {
                let mut curr = from;
                while let Some(to) = curr.offset(dx, dy) {
                    if let Some(target) = state.get_piece(to) {
                        if target.side != piece.side {
                            moves.push(Move::new(from, to));
                        }
                        break;
                    }
                    moves.push(Move::new(from, to));
                    curr = to;
                }
            }
        }
    }

    if piece.kind == PieceKind::King {
        get_castling_moves(state, from, piece.side, moves);
    }
}

fn get_pawn_moves(state: &BoardState, from: Square, piece: Piece, moves: &mut Vec<Move>) {
    let forward = piece.side.forward();
    let start_y = match piece.side {
        Side::White => 6,
        Side::Black => 1,
    };

    if let Some(to) = from.offset(0, forward) {
        if state.get_piece(to).is_none() {
            push_pawn_move(moves, from, to, piece.side);
            if from.y == start_y {
                if let Some(to2) = from.offset(0, forward * 2) {
                    if state.get_piece(to2).is_none() {
                        moves.push(Move::new(from, to2));
                    }
                }
            }
        }
    }

    for dx in [-1, 1] {
        if let Some(to) = from.offset(dx, forward) {
            match state.get_piece(to) {
                Some(target) if target.side != piece.side => {
                    push_pawn_move(moves, from, to, piece.side)
                }
                None if state.en_passant == Some(to) => moves.push(Move::new(from, to)),
                _ => {}
            }
        }
    }
}

fn push_pawn_move(moves: &mut Vec<Move>, from: Square, to: Square, side: Side) {
    if to.y == promotion_row(side) {
        for kind in PieceKind::PROMOTIONS {
            moves.push(Move::with_promotion(from, to, kind));
        }
    } else {
        moves.push(Move::new(from, to));
    }
}

fn promotion_row(side: Side) -> usize {
    match side {
        Side::White => 0,
        Side::Black => 7,
    }
}

fn home_row(side: Side) -> usize {
    match side {
        Side::White => 7,
        Side::Black => 0,
    }
}

fn get_castling_moves(state: &BoardState, from: Square, side: Side, moves: &mut Vec<Move>) {
    let row = home_row(side);
    if from != Square::new(4, row) {
        return;
    }
    let rights = state.castling_rights(side);
    if !rights.any() {
        return;
    }
    let enemy = side.opponent();
    if is_square_attacked(state, from, enemy) {
        return;
    }
    let rook = Some(Piece::new(PieceKind::Rook, side));
    let empty = |x: usize| state.get_piece(Square::new(x, row)).is_none();
    let safe = |x: usize| !is_square_attacked(state, Square::new(x, row), enemy);

    if rights.king_side
        && state.get_piece(Square::new(7, row)) == rook
        && empty(5)
        && empty(6)
        && safe(5)
        && safe(6)
    {
        moves.push(Move::new(from, Square::new(6, row)));
    }
    if rights.queen_side
        && state.get_piece(Square::new(0, row)) == rook
        && empty(1)
        && empty(2)
        && empty(3)
        && safe(2)
        && safe(3)
    {
        moves.push(Move::new(from, Square::new(2, row)));
    }
}

/// `by` 側の駒がそのマスに利いているか
pub fn is_square_attacked(state: &BoardState, sq: Square, by: Side) -> bool {
    // Pawns attack diagonally forward, so look one row "behind" the square.
    for dx in [-1, 1] {
        if let Some(from) = sq.offset(dx, -by.forward()) {
            if state.get_piece(from) == Some(Piece::new(PieceKind::Pawn, by)) {
                return true;
            }
        }
    }

    for kind in [PieceKind::Knight, PieceKind::King] {
        let attacker = Piece::new(kind, by);
        for step in attacker.movement_rules() {
            if let MoveStep::Step(dx, dy) = *step {
                if sq.offset(dx, dy).and_then(|from| state.get_piece(from)) == Some(attacker) {
                    return true;
                }
            }
        }
    }

    for (kind, rays) in [
        (PieceKind::Rook, Piece::new(PieceKind::Rook, by).movement_rules()),
        (PieceKind::Bishop, Piece::new(PieceKind::Bishop, by).movement_rules()),
    ] {
        for step in rays {
            if let MoveStep::Slide(dx, dy) = *step {
                let mut curr = sq;
                while let Some(next) = curr.offset(dx, dy) {
                    if let Some(p) = state.get_piece(next) {
                        if p.side == by && (p.kind == kind || p.kind == PieceKind::Queen) {
                            return true;
                        }
                        break;
                    }
                    curr = next;
                }
            }
        }
    }

    false
}

/// 王手されているか判定
pub fn is_in_check(state: &BoardState, side: Side) -> bool {
    match state.find_king(side) {
        Some(king) => is_square_attacked(state, king, side.opponent()),
        None => false,
    }
}

/// Checks `mv` against the legal moves of the side to move and fills in the
/// default queen promotion. Returns the move as it will actually be played.
pub fn resolve_move(state: &BoardState, mv: &Move) -> Option<Move> {
    let piece = state.get_piece(mv.from)?;
    if piece.side != state.side_to_move {
        return None;
    }

    let mut resolved = *mv;
    if piece.kind == PieceKind::Pawn && mv.to.y == promotion_row(piece.side) {
        resolved.promotion.get_or_insert(PieceKind::Queen);
    }

    let mut candidates = Vec::new();
    get_piece_moves(state, mv.from, piece, &mut candidates);
    if !candidates.contains(&resolved) {
        return None;
    }
    if is_in_check(&apply_move(state, &resolved), piece.side) {
        return None;
    }
    Some(resolved)
}

/// 移動適用
///
/// Copy-make: returns the position after `mv`. The move is assumed to be
/// pseudo-legal; use [`resolve_move`] first for untrusted input.
pub fn apply_move(state: &BoardState, mv: &Move) -> BoardState {
    let mut next = *state;
    let side = state.side_to_move;

    let mut piece = match next.remove_piece(mv.from) {
        Some(p) => p,
        None => return next,
    };
    let mut captured = next.remove_piece(mv.to);

    if piece.kind == PieceKind::Pawn {
        // en passant: the captured pawn sits beside the mover, not on `to`
        if captured.is_none() && mv.from.x != mv.to.x && state.en_passant == Some(mv.to) {
            captured = next.remove_piece(Square::new(mv.to.x, mv.from.y));
        }
        if mv.to.y == promotion_row(side) {
            piece.kind = mv.promotion.unwrap_or(PieceKind::Queen);
        }
    }

    if piece.kind == PieceKind::King && mv.from.x.abs_diff(mv.to.x) == 2 {
        let row = mv.from.y;
        let (rook_from, rook_to) = if mv.to.x == 6 { (7, 5) } else { (0, 3) };
        if let Some(rook) = next.remove_piece(Square::new(rook_from, row)) {
            next.place_piece(Square::new(rook_to, row), rook);
        }
    }

    next.place_piece(mv.to, piece);

    if piece.kind == PieceKind::King {
        next.castling[side.index()] = crate::core::CastlingRights::NONE;
    }
    for sq in [mv.from, mv.to] {
        clear_rook_right(&mut next, sq);
    }

    next.en_passant = if piece.kind == PieceKind::Pawn && mv.from.y.abs_diff(mv.to.y) == 2 {
        Some(Square::new(mv.from.x, (mv.from.y + mv.to.y) / 2))
    } else {
        None
    };

    if piece.kind == PieceKind::Pawn || captured.is_some() {
        next.halfmove_clock = 0;
    } else {
        next.halfmove_clock += 1;
    }
    if side == Side::Black {
        next.fullmove_number += 1;
    }
    next.side_to_move = side.opponent();
    next.hash = zobrist::compute_hash(&next);
    next
}

/// A move from or onto a rook's home corner ends that castling right.
fn clear_rook_right(state: &mut BoardState, sq: Square) {
    for side in [Side::White, Side::Black] {
        if sq.y != home_row(side) {
            continue;
        }
        let rights = &mut state.castling[side.index()];
        match sq.x {
            0 => rights.queen_side = false,
            7 => rights.king_side = false,
            _ => {}
        }
    }
}

/// 詰み判定
pub fn is_checkmate(state: &BoardState) -> bool {
    is_in_check(state, state.side_to_move) && !has_legal_move(state)
}

pub fn is_stalemate(state: &BoardState) -> bool {
    !is_in_check(state, state.side_to_move) && !has_legal_move(state)
}

/// K v K, K+minor v K, or only same-coloured bishops left besides the kings.
pub fn is_insufficient_material(state: &BoardState) -> bool {
    let others: Vec<(Square, Piece)> = state
        .pieces()
        .filter(|(_, p)| p.kind != PieceKind::King)
        .collect();

    match others.as_slice() {
        [] => true,
        [(_, p)] => p.kind.is_minor(),
        _ => {
            others.iter().all(|(_, p)| p.kind == PieceKind::Bishop) && {
                let first = others[0].0.is_light();
                others.iter().all(|(sq, _)| sq.is_light() == first)
            }
        }
    }
}

pub fn is_fifty_move_draw(state: &BoardState) -> bool {
    state.halfmove_clock >= 100
}
