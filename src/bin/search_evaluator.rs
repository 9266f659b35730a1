use bejeweled_solver::engine::{Board, Tile, BOARD_SIZE};
use bejeweled_solver::search::{find_optimal_move, find_optimal_move_parallel, Move};
use clap::Parser;
use flexi_logger::Logger;
use log::{info, warn};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::error::Error;
use std::time::{Duration, Instant};

#[derive(Parser, Debug)]
#[command(name = "search_evaluator")]
#[command(about = "Compare sequential and parallel move search on seeded random boards")]
struct Args {
    /// Number of random boards to evaluate
    #[arg(short, long, default_value_t = 200)]
    boards: u64,

    /// Seed of the first board; board i uses seed + i
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Fraction of cells cleared to Empty on every board (0.0 - 1.0)
    #[arg(long, default_value_t = 0.1)]
    empty_ratio: f64,

    /// Worker threads for the parallel search (0 = rayon default)
    #[arg(short, long, default_value_t = 0)]
    workers: usize,
}

/// A seeded random board with roughly `empty_ratio` of its cells emptied.
fn make_board(seed: u64, empty_ratio: f64) -> Board {
    let mut board = Board::new_random_with_seed(seed);
    let mut rng = SmallRng::seed_from_u64(seed.wrapping_mul(31).wrapping_add(7));
    for r in 0..BOARD_SIZE {
        for c in 0..BOARD_SIZE {
            if rng.gen_bool(empty_ratio) {
                board.set_tile(r, c, Tile::Empty);
            }
        }
    }
    board
}

fn timed<T>(f: impl FnOnce() -> T) -> (T, Duration) {
    let start = Instant::now();
    let out = f();
    (out, start.elapsed())
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let _logger = Logger::try_with_env_or_str("info")?
        .format(flexi_logger::colored_default_format)
        .start()?;

    if !(0.0..=1.0).contains(&args.empty_ratio) {
        return Err(format!("--empty-ratio must be within 0.0 and 1.0, got {}", args.empty_ratio).into());
    }
    if args.workers > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(args.workers)
            .build_global()?;
    }

    info!(
        "Evaluating {} boards starting at seed {} with {} rayon workers",
        args.boards,
        args.seed,
        rayon::current_num_threads()
    );

    let mut sequential_total = Duration::ZERO;
    let mut parallel_total = Duration::ZERO;
    let mut disagreements = 0u64;
    let mut no_move = 0u64;

    for i in 0..args.boards {
        let seed = args.seed + i;
        let original = make_board(seed, args.empty_ratio);

        let mut board = original.clone();
        let (sequential, seq_time): (Option<Move>, _) = timed(|| find_optimal_move(&mut board));
        let (parallel, par_time) = timed(|| find_optimal_move_parallel(&board));
        sequential_total += seq_time;
        parallel_total += par_time;

        if board != original {
            warn!("Board {} (seed {}) was modified by the search", i, seed);
        }
        if sequential != parallel {
            disagreements += 1;
            warn!(
                "Board {} (seed {}): sequential {:?} vs parallel {:?}\n{}",
                i, seed, sequential, parallel, original
            );
        }
        if sequential.is_none() {
            no_move += 1;
        }
    }

    let per_board = |total: Duration| {
        if args.boards == 0 {
            0.0
        } else {
            total.as_secs_f64() * 1e6 / args.boards as f64
        }
    };

    println!("\n--- Evaluation Complete ---");
    println!("Boards evaluated: {}", args.boards);
    println!("Boards without a scoring move: {}", no_move);
    println!("Disagreements: {}", disagreements);
    println!("Sequential: {:>10.1} us/board", per_board(sequential_total));
    println!("Parallel:   {:>10.1} us/board", per_board(parallel_total));

    if disagreements > 0 {
        return Err(format!("{} boards produced different moves", disagreements).into());
    }
    Ok(())
}
