//! Terminal demo for the Amazons engine
//!
//! Analyzes the starting position, then plays the engine against itself
//! with a board dump and live evaluation after every move. Set
//! `RUST_LOG=debug` to see per-move search diagnostics.

use std::time::Instant;

use tracing_subscriber::EnvFilter;

use amazons::{
    apply_move, evaluate, has_any_legal_move, legal_moves, AIEngine, Board, IllegalMove, Player,
};

fn main() -> Result<(), IllegalMove> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let board = Board::new();
    println!("Initial position:\n{board}");
    println!(
        "Black: {} legal moves, White: {} legal moves\n",
        legal_moves(&board, Player::Black).len(),
        legal_moves(&board, Player::White).len(),
    );

    let engine = AIEngine::new();
    play_self(&engine, board, 2)?;
    Ok(())
}

/// Engine vs engine at a fixed difficulty, until one side cannot move.
fn play_self(engine: &AIEngine, mut board: Board, difficulty: u8) -> Result<(), IllegalMove> {
    let mut player = Player::Black;
    let mut move_no = 1u32;

    loop {
        if !has_any_legal_move(&board, player) {
            println!("{player:?} cannot move. {:?} wins!", player.opponent());
            break;
        }

        let start = Instant::now();
        let Some(mv) = engine.get_move(&board, player, difficulty) else {
            break;
        };
        board = apply_move(&board, mv)?;

        println!(
            "--- move {move_no}: {player:?} plays {mv} ({} ms) ---",
            start.elapsed().as_millis()
        );
        println!("{board}");
        println!("evaluation (for White): {}\n", evaluate(&board, Player::White));

        player = player.opponent();
        move_no += 1;
    }

    Ok(())
}
