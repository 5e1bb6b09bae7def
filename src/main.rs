use chess_bot::core::{Board, Side};
use chess_bot::game::{Game, PerspectiveMode};
use chess_bot::player::ai::Difficulty;
use chess_bot::player::{EngineController, PlayerController, TuiController};
use crossterm::event::{self, Event, KeyCode};
use crossterm::{execute, terminal};
use std::io;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // stderr stays quiet unless RUST_LOG asks for more; the board owns stdout
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    // ターミナル初期化
    terminal::enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, terminal::EnterAlternateScreen)?;

    let res = run().await;

    // ターミナル復帰
    execute!(io::stdout(), terminal::LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;

    res
}

/// Blocks until one of `keys` is pressed; `q` aborts with `None`.
fn read_choice(keys: &[char]) -> anyhow::Result<Option<char>> {
    loop {
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                match key.code {
                    KeyCode::Char('q') => return Ok(None),
                    KeyCode::Char(c) if keys.contains(&c) => return Ok(Some(c)),
                    _ => {}
                }
            }
        }
    }
}

async fn run() -> anyhow::Result<()> {
    print!("=== Chess ===\r\n");
    print!("\r\nSelect players:\r\n");
    print!("1. Human vs Human\r\n");
    print!("2. Human vs Computer\r\n");
    print!("[q] Quit\r\n");

    let Some(mode) = read_choice(&['1', '2'])? else {
        return Ok(());
    };

    let (white, black, perspective): (
        Box<dyn PlayerController>,
        Box<dyn PlayerController>,
        PerspectiveMode,
    ) = if mode == '1' {
        (
            Box::new(TuiController::new(Side::White, "White")),
            Box::new(TuiController::new(Side::Black, "Black")),
            PerspectiveMode::AutoFlip,
        )
    } else {
        print!("\r\nPlay as:\r\n");
        print!("w. White\r\n");
        print!("b. Black\r\n");
        let Some(colour) = read_choice(&['w', 'b'])? else {
            return Ok(());
        };

        print!("\r\nSelect difficulty:\r\n");
        for (i, difficulty) in Difficulty::ALL.iter().enumerate() {
            print!("{}. {} (depth {})\r\n", i + 1, difficulty, difficulty.depth());
        }
        let Some(level) = read_choice(&['1', '2', '3', '4'])? else {
            return Ok(());
        };
        let difficulty = level
            .to_digit(10)
            .and_then(|d| Difficulty::ALL.get(d as usize - 1).copied())
            .unwrap_or_default();

        let engine_name = format!("Computer ({})", difficulty);
        if colour == 'w' {
            (
                Box::new(TuiController::new(Side::White, "You")),
                Box::new(EngineController::new(&engine_name, difficulty)),
                PerspectiveMode::Fixed(Side::White),
            )
        } else {
            (
                Box::new(EngineController::new(&engine_name, difficulty)),
                Box::new(TuiController::new(Side::Black, "You")),
                PerspectiveMode::Fixed(Side::Black),
            )
        }
    };

    let mut game = Game::new(Board::new());
    game.perspective_mode = perspective;
    let outcome = game.play(white.as_ref(), black.as_ref()).await?;

    print!("\r\n{}\r\n", outcome.message());
    print!("Moves: {}\r\n", game.board.ply_count());
    print!("Press [q] to exit.\r\n");
    read_choice(&[])?;

    Ok(())
}
