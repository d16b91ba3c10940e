//! Command line interface: read a point set, improve a tour, save it.

use clap::Parser;
use env_logger::{Builder, Env};
use lateral_tsp::config::Config;
use lateral_tsp::problem::Problem;
use lateral_tsp::tour::Tour;
use lateral_tsp::utils::{save_file_path, save_tour};
use lateral_tsp::{LateralSolver, Length};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "lateral-tsp")]
#[command(version)]
#[command(about = "2-opt hill climbing with escalating lateral perturbations")]
struct Cli {
    /// Point set file, one `x y` (or `id x y`) per line
    points: PathBuf,

    /// Optional starting tour, whitespace-separated point ids
    tour: Option<PathBuf>,

    /// JSON configuration file; flags below override it
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory improved tours are saved to
    #[arg(short, long)]
    save_dir: Option<PathBuf>,

    /// Only report phase results, not every hill-climb move
    #[arg(short, long)]
    quiet: bool,

    /// Stop after plain 2-opt
    #[arg(long)]
    no_perturbation: bool,

    /// Maximum number of perturbation rounds
    #[arg(long)]
    max_rounds: Option<u32>,

    /// Time limit in seconds, checked between perturbation rounds
    #[arg(short, long)]
    time_limit: Option<f64>,

    /// Start from a random permutation with this seed instead of the identity
    #[arg(long)]
    shuffle: Option<u64>,
}

fn init_logger() {
    Builder::from_env(Env::default().default_filter_or("info"))
        .format(|buf, record| writeln!(buf, "{}", record.args()))
        .init();
}

fn build_config(cli: &Cli) -> lateral_tsp::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::from_json_file(path)?,
        None => Config::new(),
    };
    if let Some(directory) = &cli.save_dir {
        config = config.with_save_directory(directory);
    }
    if cli.quiet {
        config = config.with_verbose(false);
    }
    if cli.no_perturbation {
        config = config.with_perturbation(false);
    }
    if let Some(rounds) = cli.max_rounds {
        config = config.with_max_rounds(rounds);
    }
    if let Some(seconds) = cli.time_limit {
        config = config.with_time_limit(Duration::from_secs_f64(seconds));
    }
    Ok(config)
}

fn run(cli: Cli) -> lateral_tsp::Result<()> {
    let config = build_config(&cli)?;
    let problem = Problem::from_file(&cli.points)?;
    log::info!(
        "Loaded {} with {} points",
        problem.name,
        problem.point_count()
    );

    let initial_order = match cli.shuffle {
        Some(seed) => problem.shuffled_tour(seed),
        None => problem.initial_tour(cli.tour.as_deref())?,
    };

    let initial_length = problem.tour_length(&initial_order);
    log::info!("Initial tour length: {}", initial_length);

    let save_directory = config.save_directory.clone();
    let mut saved_length = initial_length;
    let mut solver = LateralSolver::new(problem, config).with_initial_tour(initial_order);
    let final_length = solver
        .run_with(|problem, tour| save_tour_to(problem, tour, &save_directory, &mut saved_length))?
        .length();

    log::info!("final length: {}", final_length);
    log::info!("{}", solver.statistics().format());
    Ok(())
}

/// Write `tour` if it is shorter than the last one written.
fn save_tour_to(
    problem: &Problem,
    tour: &Tour,
    directory: &Path,
    saved_length: &mut Length,
) -> lateral_tsp::Result<()> {
    let length = tour.length();
    if length >= *saved_length {
        return Ok(());
    }

    let path = save_file_path(directory, &problem.name, length);
    save_tour(&tour.order()?, &path)?;
    log::info!("Saved tour of length {} to {}", length, path.display());
    *saved_length = length;
    Ok(())
}

fn main() -> ExitCode {
    init_logger();
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            log::error!("{}", error);
            ExitCode::FAILURE
        }
    }
}
