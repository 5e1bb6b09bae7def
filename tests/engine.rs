use chess_bot::core::{Board, Move, Side};
use chess_bot::player::ai::{
    evaluate, AIConfig, ChessAI, ChoiceKind, Difficulty, SearchPosition, MATE_SCORE,
};
use std::collections::HashSet;

const MATE_IN_TWO: &str = "3r2k1/5ppp/8/8/8/8/4RPPP/4R1K1 w - - 0 1";

fn engine(random_move_rate: f64, seed: u64) -> ChessAI {
    let mut config = AIConfig::default();
    config.search.random_move_rate = random_move_rate;
    ChessAI::with_config(config, seed)
}

fn board(fen: &str) -> Board {
    Board::from_fen(fen).unwrap()
}

fn after(board: &Board, mv: &str) -> Board {
    let mut next = board.clone();
    next.apply(&mv.parse().unwrap()).unwrap();
    next
}

/// Plain minimax without pruning, same root policy as the engine.
fn full_minimax(pos: &mut Board, depth: usize, maximizing: bool) -> i32 {
    if depth == 0 || pos.is_game_over() {
        return evaluate(&*pos);
    }
    let mut values = Vec::new();
    for mv in SearchPosition::legal_moves(pos) {
        pos.apply(&mv).unwrap();
        values.push(full_minimax(pos, depth - 1, !maximizing));
        pos.undo().unwrap();
    }
    if maximizing {
        values.into_iter().max().unwrap()
    } else {
        values.into_iter().min().unwrap()
    }
}

fn full_best(pos: &mut Board, depth: usize) -> (Move, i32) {
    let maximizing = pos.side_to_move() == Side::White;
    let mut best: Option<(Move, i32)> = None;
    for mv in pos.legal_moves() {
        pos.apply(&mv).unwrap();
        let value = full_minimax(pos, depth - 1, !maximizing);
        pos.undo().unwrap();
        let better = match best {
            None => true,
            Some((_, b)) if maximizing => value > b,
            Some((_, b)) => value < b,
        };
        if better {
            best = Some((mv, value));
        }
    }
    best.unwrap()
}

#[test]
fn opening_moves_score_as_expected() {
    let start = Board::new();
    let expected = [
        ("e2e4", 50),
        ("d2d4", 50),
        ("g1f3", 50),
        ("b1c3", 50),
        ("e2e3", 20),
        ("g1h3", 10),
        ("c2c4", -10),
    ];
    for (mv, score) in expected {
        assert_eq!(evaluate(&after(&start, mv)), score, "{}", mv);
    }
}

#[test]
fn beginner_without_random_branch_picks_a_top_opening_move() {
    let top: HashSet<&str> = ["e2e4", "d2d4", "g1f3", "b1c3"].into_iter().collect();
    let mut seen = HashSet::new();
    for seed in 0..40 {
        let mut ai = engine(0.0, seed);
        let mut pos = Board::new();
        let mv = ai.select_move(&mut pos, Difficulty::Beginner).unwrap().unwrap();
        let text = mv.to_string();
        assert!(top.contains(text.as_str()), "unexpected {}", text);
        seen.insert(text);
        assert_eq!(pos, Board::new());
    }
    // the variety pass spreads the choice over the tied moves
    assert!(seen.len() > 1);
}

#[test]
fn mate_in_two_needs_depth_three() {
    let mut ai = engine(0.0, 1);
    let mut pos = board(MATE_IN_TWO);

    let (mv, value) = ai.best_move_at_depth(&mut pos, 3).unwrap().unwrap();
    assert_eq!(mv.to_string(), "e2e8");
    assert_eq!(value, MATE_SCORE);

    let (_, shallow) = ai.best_move_at_depth(&mut pos, 1).unwrap().unwrap();
    assert!(shallow < MATE_SCORE);

    let mv = ai.select_move(&mut pos, Difficulty::Expert).unwrap().unwrap();
    assert_eq!(mv.to_string(), "e2e8");
    assert_eq!(pos, board(MATE_IN_TWO));
}

#[test]
fn pruning_never_changes_the_result() {
    let positions = [
        "r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3",
        "6k1/5ppp/8/8/8/8/5PPP/3R2K1 b - - 0 1",
        "4k3/8/3q4/8/8/2N5/8/4K2R w K - 0 1",
        MATE_IN_TWO,
    ];
    let mut ai = engine(0.0, 9);
    for fen in positions {
        for depth in 1..=3 {
            let mut pos = board(fen);
            let pruned = ai.best_move_at_depth(&mut pos, depth).unwrap().unwrap();
            let full = full_best(&mut pos, depth);
            assert_eq!(pruned, full, "{} at depth {}", fen, depth);
        }
    }
}

#[test]
fn terminal_positions_return_no_move() {
    let mut ai = engine(0.3, 4);
    for fen in [
        "rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3",
        "7k/5Q2/6K1/8/8/8/8/8 b - - 0 1",
    ] {
        let mut pos = board(fen);
        for difficulty in Difficulty::ALL {
            assert_eq!(ai.select_move(&mut pos, difficulty).unwrap(), None);
        }
    }
    assert_eq!(
        evaluate(&board("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3")),
        -MATE_SCORE
    );
    assert_eq!(evaluate(&board("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1")), 0);
}

#[test]
fn variety_pass_stays_near_the_best_value() {
    let fen = "r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3";
    for difficulty in [Difficulty::Intermediate, Difficulty::Advanced] {
        for seed in 0..6 {
            let mut ai = engine(0.0, seed);
            let mut pos = board(fen);
            let choice = ai
                .select_move_detailed(&mut pos, difficulty)
                .unwrap()
                .unwrap();
            let best = choice.score.unwrap();
            match choice.kind {
                ChoiceKind::Varied => {
                    let probe = evaluate(&after(&pos, &choice.mv.to_string()));
                    assert!((probe - best).abs() < 10, "probe {} best {}", probe, best);
                }
                ChoiceKind::Searched => {
                    let (searched, _) = ai.best_move_at_depth(&mut pos, difficulty.depth()).unwrap().unwrap();
                    assert_eq!(choice.mv, searched);
                }
                ChoiceKind::Random => panic!("random branch is disabled"),
            }
        }
    }
}

#[test]
fn beginner_plays_randomly_about_thirty_percent_of_the_time() {
    let mut ai = engine(0.3, 2024);
    let trials = 1000;
    let mut random = 0;
    for _ in 0..trials {
        let mut pos = Board::new();
        let choice = ai
            .select_move_detailed(&mut pos, Difficulty::Beginner)
            .unwrap()
            .unwrap();
        if choice.kind == ChoiceKind::Random {
            assert!(choice.score.is_none());
            random += 1;
        }
    }
    let rate = random as f64 / trials as f64;
    assert!((0.25..=0.35).contains(&rate), "rate {}", rate);
}

#[test]
fn other_tiers_never_take_the_random_branch() {
    let mut ai = engine(1.0, 3);
    for difficulty in [Difficulty::Intermediate, Difficulty::Expert] {
        let mut pos = board("6k1/5ppp/8/8/8/8/5PPP/3R2K1 w - - 0 1");
        let choice = ai.select_move_detailed(&mut pos, difficulty).unwrap().unwrap();
        assert_ne!(choice.kind, ChoiceKind::Random);
    }
    let mut pos = Board::new();
    let choice = ai.select_move_detailed(&mut pos, Difficulty::Beginner).unwrap().unwrap();
    assert_eq!(choice.kind, ChoiceKind::Random);
}

#[test]
fn expert_repeats_itself() {
    let fen = "4k3/8/3q4/8/8/2N5/8/4K2R w K - 0 1";
    let mut ai = engine(0.3, 77);
    let mut pos = board(fen);
    let first = ai.select_move(&mut pos, Difficulty::Expert).unwrap();
    for _ in 0..2 {
        assert_eq!(ai.select_move(&mut pos, Difficulty::Expert).unwrap(), first);
    }
    assert_eq!(pos, board(fen));
}
