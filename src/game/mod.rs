use crate::core::{Board, Side};
use crate::display::{render_board, DisplayState};
use crate::logic::GameStatus;
use crate::player::PlayerController;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PerspectiveMode {
    Fixed(Side),
    AutoFlip,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOutcome {
    Finished(GameStatus),
    Resigned { winner: Side },
}

impl GameOutcome {
    pub fn winner(&self) -> Option<Side> {
        match self {
            GameOutcome::Finished(GameStatus::Checkmate { winner }) => Some(*winner),
            GameOutcome::Resigned { winner } => Some(*winner),
            GameOutcome::Finished(_) => None,
        }
    }

    pub fn message(&self) -> String {
        match self {
            GameOutcome::Finished(status) => status.to_string(),
            GameOutcome::Resigned { winner } => format!("{} resigned. {} wins!", winner.opponent(), winner),
        }
    }
}

pub struct Game {
    pub board: Board,
    pub perspective_mode: PerspectiveMode,
    /// Draw the board on every turn.
    pub render: bool,
}

impl Game {
    pub fn new(board: Board) -> Self {
        Game {
            board,
            perspective_mode: PerspectiveMode::AutoFlip,
            render: true,
        }
    }

    fn perspective(&self) -> Side {
        match self.perspective_mode {
            PerspectiveMode::Fixed(side) => side,
            PerspectiveMode::AutoFlip => self.board.side_to_move(),
        }
    }

    /// Plays until the game ends or a player resigns.
    pub async fn play(
        &mut self,
        white: &dyn PlayerController,
        black: &dyn PlayerController,
    ) -> anyhow::Result<GameOutcome> {
        loop {
            let status = self.board.status();
            if status != GameStatus::Ongoing {
                info!(%status, plies = self.board.ply_count(), "game over");
                let outcome = GameOutcome::Finished(status);
                self.show(Some(outcome.message()))?;
                return Ok(outcome);
            }

            let side = self.board.side_to_move();
            let controller = match side {
                Side::White => white,
                Side::Black => black,
            };

            if !controller.is_human() {
                let check = if self.board.in_check() { " (CHECK)" } else { "" };
                self.show(Some(format!("{} ({}) is thinking{}...", controller.name(), side, check)))?;
            }

            let moves = self.board.legal_moves();
            let Some(mv) = controller.choose_move(&self.board, &moves).await? else {
                let outcome = GameOutcome::Resigned {
                    winner: side.opponent(),
                };
                info!(player = controller.name(), %side, "resigned");
                self.show(Some(outcome.message()))?;
                return Ok(outcome);
            };

            debug!(player = controller.name(), %side, mv = %mv, "move");
            self.board
                .apply(&mv)
                .with_context(|| format!("{} played an illegal move {}", controller.name(), mv))?;
        }
    }

    fn show(&self, msg: Option<String>) -> anyhow::Result<()> {
        if self.render {
            let mut state = DisplayState::for_board(&self.board, self.perspective());
            state.show_cursor = false;
            state.status_msg = msg;
            render_board(&self.board, &state)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Move;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Plays a fixed list of moves, then resigns.
    struct Scripted {
        moves: Mutex<Vec<&'static str>>,
    }

    impl Scripted {
        fn new(moves: &[&'static str]) -> Self {
            let mut moves = moves.to_vec();
            moves.reverse();
            Self {
                moves: Mutex::new(moves),
            }
        }
    }

    #[async_trait]
    impl PlayerController for Scripted {
        async fn choose_move(&self, _board: &Board, _legal: &[Move]) -> anyhow::Result<Option<Move>> {
            let next = self.moves.lock().unwrap().pop();
            Ok(next.map(|s| s.parse::<Move>()).transpose()?)
        }

        fn name(&self) -> &str {
            "script"
        }
    }

    fn silent_game() -> Game {
        let mut game = Game::new(Board::new());
        game.render = false;
        game
    }

    #[tokio::test]
    async fn test_play_until_checkmate() {
        let white = Scripted::new(&["f2f3", "g2g4"]);
        let black = Scripted::new(&["e7e5", "d8h4"]);
        let mut game = silent_game();
        let outcome = game.play(&white, &black).await.unwrap();
        assert_eq!(
            outcome,
            GameOutcome::Finished(GameStatus::Checkmate { winner: Side::Black })
        );
        assert_eq!(outcome.winner(), Some(Side::Black));
        assert_eq!(game.board.ply_count(), 4);
    }

    #[tokio::test]
    async fn test_resignation() {
        let white = Scripted::new(&["e2e4"]);
        let black = Scripted::new(&["e7e5"]);
        let mut game = silent_game();
        let outcome = game.play(&white, &black).await.unwrap();
        assert_eq!(outcome, GameOutcome::Resigned { winner: Side::Black });
    }

    #[tokio::test]
    async fn test_illegal_move_is_an_error() {
        let white = Scripted::new(&["e2e5"]);
        let black = Scripted::new(&[]);
        let mut game = silent_game();
        assert!(game.play(&white, &black).await.is_err());
        assert_eq!(game.board, Board::new());
    }
}
