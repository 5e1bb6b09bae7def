use crate::core::{Board, Move};
use async_trait::async_trait;

/// プレイヤー操作のtrait
///
/// `Ok(None)` means the player resigned (or quit the TUI).
#[async_trait]
pub trait PlayerController: Send + Sync {
    async fn choose_move(&self, board: &Board, legal_moves: &[Move])
        -> anyhow::Result<Option<Move>>;
    fn name(&self) -> &str;
    fn is_human(&self) -> bool {
        false
    }
}
