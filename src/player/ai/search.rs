use super::config::AIConfig;
use super::difficulty::Difficulty;
use super::eval;
use super::position::SearchPosition;
use crate::core::{RulesError, Side};

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, trace};

/// The rules engine broke its side of the apply/undo contract. The search is
/// abandoned; the position is left as it was before the failing call.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("rules engine rejected move {mv} it had listed as legal")]
    Rejected {
        mv: String,
        #[source]
        source: RulesError,
    },
    #[error("rules engine failed to undo a move")]
    Undo(#[source] RulesError),
}

/// How the engine arrived at its answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChoiceKind {
    /// Beginner skipped the search.
    Random,
    /// The best move of the full-depth search.
    Searched,
    /// Picked among moves whose quick probe landed near the best value.
    Varied,
}

#[derive(Debug, Clone)]
pub struct MoveChoice<M> {
    pub mv: M,
    pub kind: ChoiceKind,
    /// Best value of the full-depth search (absent for random picks).
    pub score: Option<i32>,
}

pub struct ChessAI {
    rng: StdRng,
    config: AIConfig,
}

impl Default for ChessAI {
    fn default() -> Self {
        Self::new()
    }
}

impl ChessAI {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
            config: AIConfig::get().clone(),
        }
    }

    /// Reproducible engine: the same seed replays the same random choices.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_config(AIConfig::get().clone(), seed)
    }

    pub fn with_config(config: AIConfig, seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            config,
        }
    }

    pub fn config(&self) -> &AIConfig {
        &self.config
    }

    /// Picks a move for the side to move, or `None` when there is nothing to
    /// play.
    pub fn select_move<P: SearchPosition>(
        &mut self,
        pos: &mut P,
        difficulty: Difficulty,
    ) -> Result<Option<P::Move>, SearchError> {
        Ok(self
            .select_move_detailed(pos, difficulty)?
            .map(|choice| choice.mv))
    }

    pub fn select_move_detailed<P: SearchPosition>(
        &mut self,
        pos: &mut P,
        difficulty: Difficulty,
    ) -> Result<Option<MoveChoice<P::Move>>, SearchError> {
        let moves = pos.legal_moves();
        if moves.is_empty() {
            debug!(%difficulty, "no legal moves");
            return Ok(None);
        }

        if difficulty == Difficulty::Beginner
            && self.rng.gen::<f64>() < self.config.search.random_move_rate
        {
            if let Some(mv) = moves.choose(&mut self.rng) {
                debug!(%difficulty, mv = %mv, "random move");
                return Ok(Some(MoveChoice {
                    mv: mv.clone(),
                    kind: ChoiceKind::Random,
                    score: None,
                }));
            }
        }

        let maximizing = pos.turn() == Side::White;
        let (best_idx, best_value) = self.search_root(pos, &moves, difficulty.depth(), maximizing)?;
        let mut choice = MoveChoice {
            mv: moves[best_idx].clone(),
            kind: ChoiceKind::Searched,
            score: Some(best_value),
        };

        if difficulty != Difficulty::Expert {
            let window = self.config.search.similarity_window;
            let mut similar = Vec::new();
            for mv in &moves {
                let probe = self.probe(pos, mv, !maximizing)?;
                if (i64::from(probe) - i64::from(best_value)).abs() < i64::from(window) {
                    similar.push(mv);
                }
            }
            if let Some(mv) = similar.choose(&mut self.rng) {
                choice.mv = (*mv).clone();
                choice.kind = ChoiceKind::Varied;
                trace!(candidates = similar.len(), "variety pass");
            }
        }

        debug!(
            %difficulty,
            mv = %choice.mv,
            score = best_value,
            kind = ?choice.kind,
            "move selected"
        );
        Ok(Some(choice))
    }

    /// Full-depth search without any of the randomised steps.
    pub fn best_move_at_depth<P: SearchPosition>(
        &mut self,
        pos: &mut P,
        depth: usize,
    ) -> Result<Option<(P::Move, i32)>, SearchError> {
        let moves = pos.legal_moves();
        if moves.is_empty() {
            return Ok(None);
        }
        let maximizing = pos.turn() == Side::White;
        let (idx, value) = self.search_root(pos, &moves, depth, maximizing)?;
        Ok(Some((moves[idx].clone(), value)))
    }

    /// Draws a thinking time for `difficulty`.
    pub fn thinking_time(&mut self, difficulty: Difficulty) -> Duration {
        difficulty.thinking_time(&mut self.rng)
    }

    /// `select_move` after a short pause that makes the engine feel like it is
    /// thinking. Dropping the future cancels the pause.
    pub async fn select_move_with_delay<P: SearchPosition>(
        &mut self,
        pos: &mut P,
        difficulty: Difficulty,
    ) -> Result<Option<P::Move>, SearchError> {
        if self.config.thinking.enabled {
            let delay = self.thinking_time(difficulty);
            trace!(ms = delay.as_millis() as u64, "thinking");
            tokio::time::sleep(delay).await;
        }
        self.select_move(pos, difficulty)
    }

    // Ties keep the earliest move.
    fn search_root<P: SearchPosition>(
        &mut self,
        pos: &mut P,
        moves: &[P::Move],
        depth: usize,
        maximizing: bool,
    ) -> Result<(usize, i32), SearchError> {
        let mut best_idx = 0;
        let mut best_value = if maximizing { i32::MIN } else { i32::MAX };

        for (i, mv) in moves.iter().enumerate() {
            apply(pos, mv)?;
            let result = self.minimax(pos, depth.saturating_sub(1), i32::MIN, i32::MAX, !maximizing);
            undo(pos)?;
            let value = result?;
            trace!(mv = %mv, value, "root move");

            let improved = if maximizing {
                value > best_value
            } else {
                value < best_value
            };
            if improved {
                best_value = value;
                best_idx = i;
            }
        }

        Ok((best_idx, best_value))
    }

    fn probe<P: SearchPosition>(
        &mut self,
        pos: &mut P,
        mv: &P::Move,
        maximizing: bool,
    ) -> Result<i32, SearchError> {
        apply(pos, mv)?;
        let result = self.minimax(pos, 0, i32::MIN, i32::MAX, maximizing);
        undo(pos)?;
        result
    }

    fn minimax<P: SearchPosition>(
        &mut self,
        pos: &mut P,
        depth: usize,
        mut alpha: i32,
        mut beta: i32,
        maximizing: bool,
    ) -> Result<i32, SearchError> {
        if depth == 0 || pos.is_game_over() {
            return Ok(eval::evaluate_with(&*pos, &self.config.evaluation));
        }

        let moves = pos.legal_moves();
        if moves.is_empty() {
            return Ok(eval::evaluate_with(&*pos, &self.config.evaluation));
        }

        if maximizing {
            let mut max_eval = i32::MIN;
            for mv in &moves {
                apply(pos, mv)?;
                let result = self.minimax(pos, depth - 1, alpha, beta, false);
                undo(pos)?;
                let eval = result?;
                max_eval = max_eval.max(eval);
                alpha = alpha.max(eval);
                if beta <= alpha {
                    break;
                }
            }
            Ok(max_eval)
        } else {
            let mut min_eval = i32::MAX;
            for mv in &moves {
                apply(pos, mv)?;
                let result = self.minimax(pos, depth - 1, alpha, beta, true);
                undo(pos)?;
                let eval = result?;
                min_eval = min_eval.min(eval);
                beta = beta.min(eval);
                if beta <= alpha {
                    break;
                }
            }
            Ok(min_eval)
        }
    }
}

fn apply<P: SearchPosition>(pos: &mut P, mv: &P::Move) -> Result<(), SearchError> {
    pos.apply(mv).map_err(|source| SearchError::Rejected {
        mv: mv.to_string(),
        source,
    })
}

fn undo<P: SearchPosition>(pos: &mut P) -> Result<(), SearchError> {
    pos.undo().map_err(SearchError::Undo)
}
