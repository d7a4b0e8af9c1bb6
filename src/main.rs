use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;
use crossterm::style::Stylize;
use tracing_subscriber::EnvFilter;

use tile_search::config::{Algorithm, ConfigError, SolverConfig};
use tile_search::domain::TilePuzzle;
use tile_search::puzzle::{moves, TileNode};
use tile_search::solver::solve;

#[derive(Parser)]
#[command(name = "tile-search")]
#[command(about = "Search algorithms for solving the sliding tiles puzzle")]
struct Cli {
    /// TOML configuration file; flags below override it
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Initial state, e.g. "0 1 2 3 4 5 6 7 8 9 10 11 12 13 14 15"
    #[arg(short, long)]
    initial_state: Option<String>,

    /// Goal state, e.g. "1 2 3 7 4 5 6 0 8 9 10 11 12 13 14 15"
    #[arg(short, long)]
    goal_state: Option<String>,

    #[arg(short, long, value_enum)]
    search_algorithm: Option<Algorithm>,

    #[arg(long)]
    width: Option<usize>,

    #[arg(long)]
    height: Option<usize>,

    /// Draw a random solvable initial state when none is given
    #[arg(long)]
    shuffle_seed: Option<u64>,

    #[arg(long)]
    max_moves: Option<u32>,

    /// Closed set slots for `astar`
    #[arg(long)]
    closed_capacity: Option<usize>,

    /// Closed set slots for `astar_pool`
    #[arg(long)]
    pool_closed_capacity: Option<usize>,
}

impl Cli {
    fn into_config(self) -> Result<SolverConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => SolverConfig::load(path)?,
            None => SolverConfig::default(),
        };

        if let Some(initial_state) = self.initial_state {
            config.initial_state = initial_state;
        }
        if let Some(goal_state) = self.goal_state {
            config.goal_state = goal_state;
        }
        if let Some(algorithm) = self.search_algorithm {
            config.search_algorithm = algorithm;
        }
        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if let Some(seed) = self.shuffle_seed {
            config.shuffle_seed = Some(seed);
        }
        if let Some(max_moves) = self.max_moves {
            config.max_moves = max_moves;
        }
        if let Some(capacity) = self.closed_capacity {
            config.closed_capacity = capacity;
        }
        if let Some(capacity) = self.pool_closed_capacity {
            config.pool_closed_capacity = capacity;
        }

        config.validate()?;
        Ok(config)
    }
}

fn setup(config: &SolverConfig) -> Result<(TilePuzzle, TileNode), ConfigError> {
    let puzzle = config.puzzle()?;
    let initial = config.initial_node(&puzzle)?;
    Ok((puzzle, initial))
}

fn render(node: &TileNode) -> String {
    let mut out = String::new();
    for row in node.tiles().chunks(node.dimensions().width()) {
        for &tile in row {
            let cell = format!("{:2} ", tile);
            if tile == 0 {
                out.push_str(&cell.bold().yellow().to_string());
            } else {
                out.push_str(&cell);
            }
        }
        out.push('\n');
    }
    out
}

fn main() -> ExitCode {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("tile_search=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = match Cli::parse().into_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Invalid argument: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let timer = Instant::now();

    let (puzzle, initial) = match setup(&config) {
        Ok(setup) => setup,
        Err(e) => {
            eprintln!("Invalid argument: {}", e);
            return ExitCode::FAILURE;
        }
    };

    println!("{} ms to initialize", timer.elapsed().as_millis());
    println!("Initial Puzzle:\n{}", render(&initial));

    let solution = match solve(&config, &puzzle, initial) {
        Ok(solution) => solution,
        Err(e) => {
            eprintln!("Search failed: {}", e);
            return ExitCode::FAILURE;
        }
    };

    println!(
        "{} ms to solve (including initialization)",
        timer.elapsed().as_millis()
    );
    println!("algorithm: {}", config.search_algorithm);
    println!("{}", solution.stats);

    match &solution.path {
        Some(path) => {
            println!("n moves: {}", path.len() - 1);
            let blank_moves: Vec<String> = moves(path).iter().map(|m| m.to_string()).collect();
            println!("moves: {}", blank_moves.join(" "));
            println!("sequence:");
            for node in path {
                println!("{}", render(node));
            }
        }
        None => println!("no solution found"),
    }

    ExitCode::SUCCESS
}
