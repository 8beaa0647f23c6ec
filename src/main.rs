//! Fullboard command line.
//!
//! ## Usage
//!
//! - `fullboard demo` - Play a short ko fight and print the board
//! - `fullboard bench` - Random playouts, reporting moves per second
//! - `fullboard score` - Resolve dead stones of a random game
//!
//! Logging is controlled with `RUST_LOG` (default `fullboard=info`).

use std::time::Instant;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use tracing::{debug, info};

use fullboard::constants::{DEFAULT_ZOBRIST_SEED, MAX_GAME_LEN, PASS};
use fullboard::playout::{playout, playout_with, random_move};
use fullboard::{Color, Position, Zobrist};

/// Fullboard: an incremental Go board for tree search
#[derive(Parser)]
#[command(name = "fullboard")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Seed of the Zobrist random-constant table
    #[arg(long, global = true, default_value_t = DEFAULT_ZOBRIST_SEED)]
    zobrist_seed: u64,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a short ko fight and print the board after each move
    Demo {
        #[arg(long, default_value_t = 5)]
        size: usize,
    },
    /// Run random playouts and report throughput
    Bench {
        #[arg(long, default_value_t = 9)]
        size: usize,
        /// Number of playouts
        #[arg(long, default_value_t = 1000)]
        playouts: usize,
        /// Seed of the move generator
        #[arg(long, default_value_t = 1)]
        seed: u64,
        /// Check every invariant after every move (slow)
        #[arg(long)]
        verify: bool,
    },
    /// Play a random opening, then remove dead stones using random
    /// terminal samples until one agrees with the live board
    Score {
        #[arg(long, default_value_t = 9)]
        size: usize,
        #[arg(long, default_value_t = 7.5)]
        komi: f32,
        #[arg(long, default_value_t = 1)]
        seed: u64,
        /// Random moves played before scoring
        #[arg(long, default_value_t = 60)]
        moves: usize,
        /// Terminal samples to try
        #[arg(long, default_value_t = 32)]
        samples: usize,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fullboard=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let zobrist = Zobrist::shared(cli.zobrist_seed);

    match cli.command {
        Some(Commands::Bench {
            size,
            playouts,
            seed,
            verify,
        }) => {
            let mut pos = Position::new(zobrist, size, 7.5).context("creating board")?;
            run_bench(&mut pos, playouts, seed, verify)
        }
        Some(Commands::Score {
            size,
            komi,
            seed,
            moves,
            samples,
        }) => {
            let mut pos = Position::new(zobrist, size, komi).context("creating board")?;
            run_score(&mut pos, seed, moves, samples)
        }
        Some(Commands::Demo { size }) => {
            let mut pos = Position::new(zobrist, size, 7.5).context("creating board")?;
            run_demo(&mut pos)
        }
        None => {
            let mut pos = Position::new(zobrist, 5, 7.5).context("creating board")?;
            run_demo(&mut pos)
        }
    }
}

fn run_demo(pos: &mut Position) -> Result<()> {
    println!("Fullboard: incremental Go board\n");

    // black C1 gets captured by white D1 played into black's eye
    for text in ["C1", "B1", "D2", "C2", "E1", "D1"] {
        let vertex = pos
            .board()
            .text_to_move(text)
            .with_context(|| format!("demo move {text}"))?;
        if !pos.is_move_legal(pos.to_move(), vertex) {
            bail!("demo move {text} is illegal");
        }
        pos.play_move(vertex);
    }
    println!("{pos}");

    if let Some(ko) = pos.ko_move() {
        println!("Ko: black may not retake at {}", pos.board().move_to_text(ko));
    }
    pos.board()
        .check_invariants()
        .context("demo position inconsistent")?;
    println!("Hashes match full recomputation.");
    Ok(())
}

fn run_bench(pos: &mut Position, playouts: usize, seed: u64, verify: bool) -> Result<()> {
    let mut rng = fastrand::Rng::with_seed(seed);
    let mut total_moves = 0;
    let start = Instant::now();

    for i in 0..playouts {
        pos.reset_game();
        let played = if verify {
            playout_with(pos, &mut rng, MAX_GAME_LEN, |p| p.board().check_invariants())
                .with_context(|| format!("playout {i} after move {}", pos.movenum()))?
        } else {
            playout(pos, &mut rng, MAX_GAME_LEN)
        };
        total_moves += played;
        debug!(playout = i, played, score = pos.final_score(), "playout done");
    }

    let secs = start.elapsed().as_secs_f64();
    info!(
        playouts,
        total_moves,
        secs,
        moves_per_sec = total_moves as f64 / secs.max(f64::EPSILON),
        verify,
        "bench finished"
    );
    println!(
        "{playouts} playouts, {total_moves} moves in {secs:.3}s ({:.0} moves/s)",
        total_moves as f64 / secs.max(f64::EPSILON)
    );
    Ok(())
}

fn run_score(pos: &mut Position, seed: u64, moves: usize, samples: usize) -> Result<()> {
    let mut rng = fastrand::Rng::with_seed(seed);
    for _ in 0..moves {
        let vertex = random_move(pos, &mut rng);
        pos.play_move(vertex);
        if vertex == PASS && pos.passes() >= 2 {
            break;
        }
    }
    println!("{pos}");

    for sample in 0..samples {
        let mut terminal = pos.clone();
        playout(&mut terminal, &mut rng, MAX_GAME_LEN);

        let mut live = pos.clone();
        if live.board_mut().remove_dead_stones(terminal.board()) {
            info!(sample, "terminal sample agrees with live board");
            println!("{live}");
            println!(
                "Prisoners: black {} white {}",
                live.board().prisoners(Color::Black),
                live.board().prisoners(Color::White)
            );
            println!("Score (B-W-komi): {:.1}", live.final_score());
            return Ok(());
        }
        debug!(sample, "terminal sample disagrees, retrying");
    }
    bail!("no consistent terminal sample in {samples} tries");
}
