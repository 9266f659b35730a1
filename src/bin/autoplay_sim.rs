use bejeweled_solver::capture::{render_board, Frame, GridRegion};
use bejeweled_solver::driver::{AutoplayConfig, Autoplayer, Pointer, ScreenSource};
use bejeweled_solver::engine::{Board, Coord, Tile, BOARD_SIZE};
use bejeweled_solver::error::{Result, SolverError};
use bejeweled_solver::evaluation::{down_run, right_run, MATCH_THRESHOLD};
use bejeweled_solver::palette::{Bgr, Palette};
use bejeweled_solver::search::SearchMode;
use bejeweled_solver::utils::load_board_file;
use clap::Parser;
use flexi_logger::Logger;
use log::{debug, info};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::cell::RefCell;
use std::error::Error;
use std::path::PathBuf;
use std::rc::Rc;

const CELL_PIXELS: usize = 12;
const BACKGROUND: Bgr = Bgr::new(0, 0, 0);

#[derive(Parser, Debug)]
#[command(name = "autoplay_sim")]
#[command(about = "Run the autoplay loop against a simulated match-3 game")]
struct Args {
    /// Number of capture/search/click cycles to run
    #[arg(short, long, default_value_t = 20)]
    cycles: u64,

    /// Seed for the starting board and for refilling cleared cells
    #[arg(long, default_value_t = 514514)]
    seed: u64,

    /// Start from this board file instead of a random board
    #[arg(long)]
    board_file: Option<PathBuf>,

    /// Leave cleared cells empty instead of refilling them
    #[arg(long, default_value_t = false)]
    no_refill: bool,

    /// Search implementation to use
    #[arg(short, long, value_enum, default_value_t = SearchMode::Parallel)]
    mode: SearchMode,

    /// Use the nominal click, poll and back-off delays
    #[arg(long, default_value_t = false)]
    real_time: bool,
}

/// The simulated game: swaps on a pair of adjacent clicks, then clears every run of
/// `MATCH_THRESHOLD` or more and optionally refills the cleared cells.
struct SimGame {
    board: Board,
    region: GridRegion,
    palette: Palette,
    pending_click: Option<Coord>,
    rng: SmallRng,
    refill: bool,
    cleared: usize,
}

impl SimGame {
    fn click(&mut self, x: i32, y: i32) -> Result<()> {
        let cell = self
            .region
            .cell_at(x, y)
            .ok_or_else(|| SolverError::Pointer(format!("click ({}, {}) outside the grid", x, y)))?;

        match self.pending_click.take() {
            None => self.pending_click = Some(cell),
            Some(first) => {
                let distance = first.0.abs_diff(cell.0) + first.1.abs_diff(cell.1);
                if distance == 1 {
                    self.board.swap(first, cell);
                    self.clear_runs();
                } else {
                    // Not a neighbour: the second click becomes the new selection.
                    self.pending_click = Some(cell);
                }
            }
        }
        Ok(())
    }

    fn clear_runs(&mut self) {
        let mut marked = [[false; BOARD_SIZE]; BOARD_SIZE];
        for r in 0..BOARD_SIZE {
            for c in 0..BOARD_SIZE {
                let right = right_run(&self.board, r, c);
                if right >= MATCH_THRESHOLD {
                    (0..right as usize).for_each(|i| marked[r][c + i] = true);
                }
                let down = down_run(&self.board, r, c);
                if down >= MATCH_THRESHOLD {
                    (0..down as usize).for_each(|i| marked[r + i][c] = true);
                }
            }
        }

        for r in 0..BOARD_SIZE {
            for c in 0..BOARD_SIZE {
                if !marked[r][c] {
                    continue;
                }
                self.cleared += 1;
                let tile = if self.refill {
                    Tile::COLORS[self.rng.gen_range(0..Tile::COLORS.len())]
                } else {
                    Tile::Empty
                };
                self.board.set_tile(r, c, tile);
            }
        }
        debug!("Simulated board after clearing:\n{}", self.board);
    }
}

struct SimScreen(Rc<RefCell<SimGame>>);

impl ScreenSource for SimScreen {
    fn capture(&mut self, _region: &GridRegion) -> Result<Frame> {
        let game = self.0.borrow();
        render_board(&game.board, &game.palette, CELL_PIXELS, BACKGROUND)
    }
}

struct SimPointer(Rc<RefCell<SimGame>>);

impl Pointer for SimPointer {
    fn click(&mut self, x: i32, y: i32) -> Result<()> {
        self.0.borrow_mut().click(x, y)
    }
}

fn main() -> std::result::Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let _logger = Logger::try_with_env_or_str("info")?
        .format(flexi_logger::colored_default_format)
        .start()?;

    let board = match &args.board_file {
        Some(path) => load_board_file(path)?,
        None => Board::new_random_with_seed(args.seed),
    };
    let side = (CELL_PIXELS * BOARD_SIZE) as i32;
    let region = GridRegion::from_corners((0, 0), (side, side))?;
    let palette = Palette::default();

    println!("Initial board state:\n{}\n", board);

    let game = Rc::new(RefCell::new(SimGame {
        board,
        region,
        palette: palette.clone(),
        pending_click: None,
        rng: SmallRng::seed_from_u64(args.seed),
        refill: !args.no_refill,
        cleared: 0,
    }));

    let base = if args.real_time {
        AutoplayConfig::default()
    } else {
        AutoplayConfig::without_delays()
    };
    let config = AutoplayConfig {
        search_mode: args.mode,
        max_cycles: Some(args.cycles),
        ..base
    };
    info!("Running {} cycles, poll delay {:?}", args.cycles, config.poll_delay);

    let mut autoplayer = Autoplayer::new(
        SimScreen(Rc::clone(&game)),
        SimPointer(Rc::clone(&game)),
        region,
        palette,
        config,
    );
    let stats = autoplayer.run(&|| false)?;

    let game = game.borrow();
    println!("Final board state:\n{}\n", game.board);
    println!("--- Simulation Complete ---");
    println!("Cycles: {}", stats.cycles);
    println!("Moves played: {}", stats.moves);
    println!("Repeated moves: {}", stats.repeated_moves);
    println!("Idle cycles: {}", stats.idle_cycles);
    println!("Tiles cleared: {}", game.cleared);

    Ok(())
}
