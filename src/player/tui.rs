use crate::core::{Board, Move, PieceKind, Side, Square};
use crate::display::{render_board, DisplayState};
use crate::player::PlayerController;
use async_trait::async_trait;
use crossterm::event::{self, Event, KeyCode, KeyEvent};
use std::time::Duration;

pub struct TuiController {
    side: Side,
    name: String,
}

impl TuiController {
    pub fn new(side: Side, name: &str) -> Self {
        Self {
            side,
            name: name.to_string(),
        }
    }

    fn ask_promotion(
        &self,
        board: &Board,
        state: &mut DisplayState,
        candidates: &[Move],
    ) -> anyhow::Result<Option<Move>> {
        state.status_msg = Some("Promote to [q]ueen, [r]ook, [b]ishop or k[n]ight?".to_string());
        render_board(board, state)?;
        loop {
            if let Event::Key(KeyEvent {
                code: KeyCode::Char(c),
                ..
            }) = event::read()?
            {
                if let Some(kind) = PieceKind::from_letter(c).filter(|k| PieceKind::PROMOTIONS.contains(k)) {
                    return Ok(candidates.iter().find(|m| m.promotion == Some(kind)).copied());
                }
            }
        }
    }
}

/// Cursor step for an arrow key, as seen from `perspective`.
fn step_cursor(cursor: Square, code: KeyCode, perspective: Side) -> Square {
    let (dx, dy) = match code {
        KeyCode::Up => (0, -1),
        KeyCode::Down => (0, 1),
        KeyCode::Left => (-1, 0),
        KeyCode::Right => (1, 0),
        _ => (0, 0),
    };
    let (dx, dy) = match perspective {
        Side::White => (dx, dy),
        Side::Black => (-dx, -dy),
    };
    cursor.offset(dx, dy).unwrap_or(cursor)
}

#[async_trait]
impl PlayerController for TuiController {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_human(&self) -> bool {
        true
    }

    async fn choose_move(&self, board: &Board, legal_moves: &[Move]) -> anyhow::Result<Option<Move>> {
        let mut state = DisplayState::for_board(board, self.side);
        let turn_msg = if board.in_check() {
            format!("{}'s turn ({}) - CHECK", self.name, self.side)
        } else {
            format!("{}'s turn ({})", self.name, self.side)
        };
        state.status_msg = Some(turn_msg.clone());

        // 初期カーソル位置をキングに合わせる
        if let Some(king) = board.state().find_king(self.side) {
            state.cursor = king;
        }

        loop {
            render_board(board, &state)?;
            print!("[Arrows]: Move | [Enter]: Select | [Esc]: Cancel | [q]: Resign\r\n");

            if !event::poll(Duration::from_millis(100))? {
                continue;
            }
            let Event::Key(KeyEvent { code, .. }) = event::read()? else {
                continue;
            };

            match code {
                KeyCode::Char('q') => return Ok(None),
                KeyCode::Esc => {
                    state.selected = None;
                    state.highlights.clear();
                    state.status_msg = Some(turn_msg.clone());
                }
                KeyCode::Up | KeyCode::Down | KeyCode::Left | KeyCode::Right => {
                    state.cursor = step_cursor(state.cursor, code, self.side);
                }
                KeyCode::Enter | KeyCode::Char(' ') => {
                    if let Some(from) = state.selected {
                        // 移動先確定
                        let to = state.cursor;
                        if from == to {
                            state.selected = None;
                            state.highlights.clear();
                            continue;
                        }
                        let found: Vec<Move> = legal_moves
                            .iter()
                            .filter(|m| m.from == from && m.to == to)
                            .copied()
                            .collect();
                        match found.len() {
                            0 => {}
                            1 => return Ok(Some(found[0])),
                            _ => {
                                if let Some(mv) = self.ask_promotion(board, &mut state, &found)? {
                                    return Ok(Some(mv));
                                }
                            }
                        }
                    } else if let Some(piece) = board.get_piece(state.cursor) {
                        // 移動元選択
                        if piece.side == self.side {
                            state.selected = Some(state.cursor);
                            state.highlights = legal_moves
                                .iter()
                                .filter(|m| m.from == state.cursor)
                                .map(|m| m.to)
                                .collect();
                        }
                    }
                }
                _ => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_follows_perspective() {
        let e2 = Square::parse("e2").unwrap();
        assert_eq!(step_cursor(e2, KeyCode::Up, Side::White), Square::parse("e3").unwrap());
        assert_eq!(step_cursor(e2, KeyCode::Up, Side::Black), Square::parse("e1").unwrap());
        assert_eq!(step_cursor(e2, KeyCode::Left, Side::Black), Square::parse("f2").unwrap());
        let a1 = Square::parse("a1").unwrap();
        assert_eq!(step_cursor(a1, KeyCode::Left, Side::White), a1);
    }
}
