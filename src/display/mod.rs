use crate::core::{Board, Move, Side, Square};
use crossterm::{cursor, queue, style::Stylize, terminal};
use std::io::{self, stdout, Write};

pub struct DisplayState {
    pub cursor: Square,
    pub selected: Option<Square>,
    pub highlights: Vec<Square>,
    pub status_msg: Option<String>,
    pub last_move: Option<Move>,
    pub perspective: Side,
    pub show_cursor: bool,
    /// Moves played so far, UCI text.
    pub history: Vec<String>,
}

impl Default for DisplayState {
    fn default() -> Self {
        Self {
            cursor: Square::default(),
            selected: None,
            highlights: Vec::new(),
            status_msg: None,
            last_move: None,
            perspective: Side::White,
            show_cursor: true,
            history: Vec::new(),
        }
    }
}

impl DisplayState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fills in everything that follows from the board itself.
    pub fn for_board(board: &Board, perspective: Side) -> Self {
        Self {
            last_move: board.last_move(),
            perspective,
            history: board.moves_played().map(|m| m.to_string()).collect(),
            ..Self::default()
        }
    }
}

/// Number of history rows shown beside the board.
const HISTORY_ROWS: usize = 8;

/// `1. e2e4 e7e5` style lines, newest last.
pub fn history_lines(history: &[String]) -> Vec<String> {
    history
        .chunks(2)
        .enumerate()
        .map(|(i, pair)| match pair {
            [white, black] => format!("{:>3}. {:<6}{}", i + 1, white, black),
            [white] => format!("{:>3}. {}", i + 1, white),
            _ => String::new(),
        })
        .collect()
}

pub fn render_board(board: &Board, state: &DisplayState) -> io::Result<()> {
    let mut out = stdout();

    // 画面クリア（スクロール防止）
    queue!(
        out,
        terminal::Clear(terminal::ClearType::All),
        cursor::MoveTo(0, 0)
    )?;

    write!(out, "=== Chess ===\r\n")?;
    if let Some(msg) = &state.status_msg {
        write!(out, "{}\r\n", msg.clone().bold().yellow())?;
    } else {
        write!(out, "\r\n")?;
    }
    write!(out, "\r\n")?;

    let flipped = state.perspective == Side::Black;
    let files: String = (0..8)
        .map(|i| {
            let x = if flipped { 7 - i } else { i };
            format!(" {} ", (b'a' + x as u8) as char)
        })
        .collect();

    let lines = history_lines(&state.history);
    let recent = &lines[lines.len().saturating_sub(HISTORY_ROWS)..];

    write!(out, "    {}\r\n", files)?;
    write!(out, "   +{}+   Moves\r\n", "---".repeat(8))?;

    for i in 0..8 {
        let y = if flipped { 7 - i } else { i };
        write!(out, " {} |", 8 - y)?;

        for j in 0..8 {
            let x = if flipped { 7 - j } else { j };
            let sq = Square::new(x, y);
            let piece = board.get_piece(sq);

            let is_cursor = state.show_cursor && state.cursor == sq;
            let is_selected = state.selected == Some(sq);
            let is_highlight = state.highlights.contains(&sq);
            let is_last_move = state
                .last_move
                .map(|mv| mv.from == sq || mv.to == sq)
                .unwrap_or(false);

            let symbol = piece.map(|p| p.display_char()).unwrap_or(if sq.is_light() {
                '.'
            } else {
                ':'
            });

            let (prefix, suffix) = if is_cursor {
                ('[', ']')
            } else if is_selected {
                ('|', '|')
            } else if is_highlight {
                ('(', ')')
            } else if is_last_move {
                ('{', '}')
            } else {
                (' ', ' ')
            };
            let cell = format!("{}{}{}", prefix, symbol, suffix);

            if is_cursor {
                write!(out, "{}", cell.yellow())?;
            } else if is_selected {
                write!(out, "{}", cell.blue())?;
            } else if is_highlight {
                write!(out, "{}", cell.green())?;
            } else if is_last_move {
                write!(out, "{}", cell.red())?;
            } else if let Some(p) = piece {
                match p.side {
                    Side::White => write!(out, "{}", cell.cyan())?,
                    Side::Black => write!(out, "{}", cell.magenta())?,
                }
            } else {
                write!(out, "{}", cell.dark_grey())?;
            }
        }

        write!(out, "| {}", 8 - y)?;
        if let Some(line) = recent.get(i) {
            write!(out, "   {}", line)?;
        }
        write!(out, "\r\n")?;
    }

    write!(out, "   +{}+\r\n", "---".repeat(8))?;
    write!(out, "    {}\r\n", files)?;
    write!(out, "\r\n{} to move\r\n", board.side_to_move())?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_lines_pair_moves() {
        let history: Vec<String> = ["e2e4", "e7e5", "g1f3"].iter().map(|s| s.to_string()).collect();
        let lines = history_lines(&history);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "  1. e2e4  e7e5");
        assert_eq!(lines[1], "  2. g1f3");
    }

    #[test]
    fn test_state_for_board() {
        let mut board = Board::new();
        board.apply(&"d2d4".parse().unwrap()).unwrap();
        let state = DisplayState::for_board(&board, Side::Black);
        assert_eq!(state.history, vec!["d2d4".to_string()]);
        assert_eq!(state.last_move.map(|m| m.to_string()), Some("d2d4".to_string()));
        assert_eq!(state.perspective, Side::Black);
    }
}
