use bejeweled_solver::search::{rank_moves, rank_moves_parallel, select_best, SearchMode};
use bejeweled_solver::utils::load_board_file;
use clap::Parser;
use flexi_logger::Logger;
use log::info;
use std::error::Error;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Search implementation to use
    #[clap(short, long, value_enum, default_value_t = SearchMode::Sequential)]
    mode: SearchMode,

    /// Also print every candidate move with its score
    #[clap(short, long)]
    ranking: bool,

    /// Path to the board file (8x8 grid format)
    board_file: PathBuf,
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let _logger = Logger::try_with_env_or_str("info")?
        .format(flexi_logger::colored_default_format)
        .start()?;

    let mut board = load_board_file(&args.board_file)?;
    println!("Loaded board from {}\n", args.board_file.display());
    println!("Board state:\n{}\n", board);

    let evals = match args.mode {
        SearchMode::Sequential => rank_moves(&mut board),
        SearchMode::Parallel => rank_moves_parallel(&board),
    };
    info!("Evaluated {} candidate moves ({:?})", evals.len(), args.mode);

    if args.ranking {
        println!("Candidates ({}):", evals.len());
        for (i, eval) in evals.iter().enumerate() {
            println!("  {:>3}: {}  score {}", i + 1, eval.mv, eval.score);
        }
        println!();
    }

    match select_best(&evals) {
        Some(best) => {
            println!("Best move: {}  (score {})", best.mv, best.score);
            let mut after = board.clone();
            after.swap(best.mv.src(), best.mv.dst());
            println!(
                "Board after the swap:\n{}\n",
                after.to_string_with_highlight(Some(best.mv.dst()))
            );
        }
        None => println!("No move found.\n"),
    }

    Ok(())
}
