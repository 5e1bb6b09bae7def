use crate::core::{Board, Move};
use crate::player::ai::{ChessAI, Difficulty};
use crate::player::PlayerController;
use anyhow::Context;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, trace};

/// Computer opponent backed by [`ChessAI`].
pub struct EngineController {
    name: String,
    difficulty: Difficulty,
    engine: Arc<Mutex<ChessAI>>,
}

impl EngineController {
    pub fn new(name: &str, difficulty: Difficulty) -> Self {
        Self::with_engine(name, difficulty, ChessAI::new())
    }

    pub fn with_engine(name: &str, difficulty: Difficulty, engine: ChessAI) -> Self {
        Self {
            name: name.to_string(),
            difficulty,
            engine: Arc::new(Mutex::new(engine)),
        }
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }
}

#[async_trait]
impl PlayerController for EngineController {
    fn name(&self) -> &str {
        &self.name
    }

    async fn choose_move(&self, board: &Board, _legal_moves: &[Move]) -> anyhow::Result<Option<Move>> {
        // Search works on its own copy; the game board is never touched.
        let mut scratch = board.clone();
        let difficulty = self.difficulty;
        let mut engine = Arc::clone(&self.engine).lock_owned().await;
        if engine.config().thinking.enabled {
            let delay = engine.thinking_time(difficulty);
            trace!(player = %self.name, ms = delay.as_millis() as u64, "thinking");
            tokio::time::sleep(delay).await;
        }
        // the search is CPU bound and stays off the runtime threads
        let result = tokio::task::spawn_blocking(move || engine.select_move(&mut scratch, difficulty))
            .await
            .with_context(|| format!("{} search task died", self.name))?;
        if let Err(e) = &result {
            error!(player = %self.name, fen = %board.to_fen(), error = %e, "search aborted");
        }
        result.with_context(|| format!("{} failed to search {}", self.name, board.to_fen()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::ai::AIConfig;

    #[tokio::test(start_paused = true)]
    async fn test_engine_controller_leaves_board_alone() {
        let mut config = AIConfig::default();
        config.search.random_move_rate = 0.0;
        let engine = ChessAI::with_config(config, 5);
        let controller = EngineController::with_engine("Computer", Difficulty::Beginner, engine);

        let board = Board::new();
        let legal = board.legal_moves();
        let mv = controller.choose_move(&board, &legal).await.unwrap().unwrap();
        assert!(legal.contains(&mv));
        assert_eq!(board, Board::new());
        assert!(!controller.is_human());
    }

    #[tokio::test(start_paused = true)]
    async fn test_engine_controller_waits_before_searching() {
        let mut config = AIConfig::default();
        config.search.random_move_rate = 0.0;
        config.thinking.enabled = true;
        let controller = EngineController::with_engine(
            "Computer",
            Difficulty::Intermediate,
            ChessAI::with_config(config, 9),
        );
        let board = Board::from_fen("6k1/5ppp/8/8/8/8/5PPP/3R2K1 w - - 0 1").unwrap();
        let start = tokio::time::Instant::now();
        let mv = controller.choose_move(&board, &board.legal_moves()).await.unwrap();
        assert!(mv.is_some());
        let waited = start.elapsed().as_millis() as u64;
        assert!(waited >= *Difficulty::Intermediate.delay_range_ms().start());
    }

    #[tokio::test(start_paused = true)]
    async fn test_engine_controller_has_nothing_to_play_after_mate() {
        let controller = EngineController::with_engine(
            "Computer",
            Difficulty::Expert,
            ChessAI::with_config(AIConfig::default(), 1),
        );
        let board = Board::from_fen("R5k1/5ppp/8/8/8/8/8/6K1 b - - 0 1").unwrap();
        assert!(controller.choose_move(&board, &[]).await.unwrap().is_none());
    }
}
