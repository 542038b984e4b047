use std::{thread, time::Duration};

use clap::Parser;
use minesweeper_ai::*;
use rand::{SeedableRng, rngs::StdRng};

/// Autonomous minesweeper bot: reveals deduced safe cells, guesses otherwise.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Number of rows on the board.
    #[arg(long, default_value_t = 8)]
    height: usize,

    /// Number of columns on the board.
    #[arg(long, default_value_t = 8)]
    width: usize,

    /// Number of mines to place.
    #[arg(long, default_value_t = 8)]
    mines: usize,

    /// Seed for mine placement and guesses, for reproducible games.
    #[arg(long)]
    seed: Option<u64>,

    /// Pause between moves, in milliseconds.
    #[arg(long, default_value_t = 500)]
    delay_ms: u64,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    // --- 1. Initialization ---
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let bounds = Bounds::new(args.height, args.width);
    let board = Minesweeper::random(bounds, args.mines, &mut rng)?;
    let mut game = Game::new(board);
    let delay = Duration::from_millis(args.delay_ms);

    println!("--- Autonomous Minesweeper Bot ---");
    println!("Strategy: Prioritize logically safe moves, guess randomly otherwise.");
    println!("Initial Board:");
    print_board(&game);
    thread::sleep(delay);

    // --- 2. Game Loop ---
    let mut move_count = 0;
    while game.state() == GameState::Playing {
        move_count += 1;
        println!("\n--- Move #{move_count} ---");

        let Some(next) = game.step(&mut rng)? else {
            println!("No valid moves left for the bot to make.");
            break;
        };

        match next.kind {
            MoveKind::Safe => println!("Logic found a guaranteed safe cell."),
            MoveKind::Random => println!("No logically safe move found. Made a random guess..."),
        }
        println!("Bot reveals {}...", next.cell);
        print_board(&game);

        thread::sleep(delay);
    }

    // --- 3. Final Result ---
    println!("\n--- Game Over ---");
    println!(
        "Known safes: {}, known mines: {}, sentences left: {}",
        game.ai().safes().len(),
        game.ai().mines().len(),
        game.ai().knowledge().len()
    );

    match game.state() {
        GameState::Won => println!("Result: The bot won!"),
        GameState::Lost => {
            println!("Result: The bot hit a mine and lost.");
            print!("{}", game.board());
        }
        GameState::Playing => println!("Result: The game ended unexpectedly."),
    }
    Ok(())
}

fn print_board(game: &Game) {
    let bounds = game.bounds();

    // Print header
    print!("   ");
    for col in 0..bounds.width {
        print!("{col:^3}");
    }
    println!("\n  +{}", "---".repeat(bounds.width));

    // Print rows
    for row in 0..bounds.height {
        print!("{row:^2}|");
        for col in 0..bounds.width {
            let cell = Cell::new(row, col);
            let display = if game.exploded() == Some(cell) {
                " * ".to_string()
            } else if let Some(count) = game.revealed().get(&cell) {
                format!(" {count} ")
            } else if game.ai().mines().contains(&cell) {
                " F ".to_string()
            } else {
                " ■ ".to_string()
            };
            print!("{display}");
        }
        println!();
    }
    println!();
}
