use std::{
    fs,
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::{Context, bail};
use clap::Args;
use dispatch_optimizer::{
    parsers::{
        parser::DatasetParser,
        ride_file::RideFileParser,
        solution_file::{read_solution_file, write_solution_file},
    },
    problem::ride_assignment_problem::RideAssignmentProblem,
    solver::{
        evaluation::evaluate_solution,
        score::Score,
        search::RandomizedSearch,
        search_params::{DEFAULT_ROUNDS, SearchParams, Threads},
        statistics::SearchStatistics,
    },
    timer_debug,
};
use indicatif::{ProgressBar, ProgressStyle};
use jiff::{SignedDuration, Timestamp};
use tracing::info;

use crate::{
    file_utils::{PROBLEM_EXTENSION, SOLUTION_EXTENSION, read_problem_names},
    tables,
};

#[derive(Args)]
pub struct SolveArgs {
    /// Folder holding the `.in` problem files
    #[arg(long, env = "DISPATCH_DATA_DIR", default_value = "data")]
    pub data_dir: PathBuf,

    /// Folder the `.out` solution files are written to
    #[arg(long, env = "DISPATCH_OUT_DIR", default_value = "out")]
    pub out_dir: PathBuf,

    #[arg(short, long, default_value_t = DEFAULT_ROUNDS)]
    pub rounds: usize,

    /// Seed of the search, random when omitted
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Number of rounds planned in parallel, 0 uses every core
    #[arg(short, long, default_value_t = 1)]
    pub threads: usize,

    /// Writes the search statistics as JSON to this file, or into this folder with `--all`
    #[arg(long)]
    pub statistics: Option<PathBuf>,

    /// Reads the written solution back and checks it against the problem
    #[arg(long)]
    pub verify: bool,

    /// Solves every problem of the data folder
    #[arg(long)]
    pub all: bool,
}

pub struct SolveReport {
    pub problem: String,
    pub score: Score,
    pub assigned_rides: usize,
    pub ride_count: usize,
    pub duration: SignedDuration,
}

pub fn run(problem_name: &str, args: &SolveArgs) -> Result<SolveReport, anyhow::Error> {
    let started_at = Timestamp::now();
    let input = args
        .data_dir
        .join(format!("{problem_name}.{PROBLEM_EXTENSION}"));

    let problem = timer_debug!("Parsing", RideFileParser.parse(&input))
        .with_context(|| format!("Failed to read problem {}", input.display()))?;

    info!(
        "Solving {}: {} rides, {} vehicles, bonus {}, {} steps",
        problem_name,
        problem.ride_count(),
        problem.fleet_size(),
        problem.bonus(),
        problem.steps()
    );

    let mut search = RandomizedSearch::new(
        Arc::new(problem),
        SearchParams {
            rounds: args.rounds,
            seed: args.seed,
            threads: Threads::from(args.threads),
            ..SearchParams::default()
        },
    )?;

    let outcome = search.run();

    fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("Failed to create {}", args.out_dir.display()))?;
    let output = args
        .out_dir
        .join(format!("{problem_name}.{SOLUTION_EXTENSION}"));
    write_solution_file(outcome.best.routes(), &output)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    info!(
        "{}: score {} ({} rides assigned), written to {}",
        problem_name,
        outcome.best.score(),
        outcome.best.assigned_rides(),
        output.display()
    );
    info!("{}", tables::pool_weights_table(&search));

    if args.verify {
        verify_solution(search.problem(), &output, outcome.best.score())?;
    }

    if let Some(path) = &args.statistics {
        let path = if args.all {
            path.join(format!("{problem_name}.json"))
        } else {
            path.clone()
        };
        write_statistics(&outcome.statistics, &path)?;
    }

    Ok(SolveReport {
        problem: problem_name.to_string(),
        score: outcome.best.score(),
        assigned_rides: outcome.best.assigned_rides(),
        ride_count: search.problem().ride_count(),
        duration: Timestamp::now().duration_since(started_at),
    })
}

pub fn run_all(args: &SolveArgs) -> Result<(), anyhow::Error> {
    let names = read_problem_names(&args.data_dir)
        .with_context(|| format!("Failed to list {}", args.data_dir.display()))?;

    if names.is_empty() {
        bail!(
            "No .{} files found in {}",
            PROBLEM_EXTENSION,
            args.data_dir.display()
        );
    }

    if let Some(folder) = &args.statistics {
        fs::create_dir_all(folder)
            .with_context(|| format!("Failed to create {}", folder.display()))?;
    }

    let bar = ProgressBar::new(names.len() as u64);
    bar.set_style(ProgressStyle::default_bar().template("[{bar:40}] {pos}/{len} {msg}")?);

    let mut reports = Vec::with_capacity(names.len());
    for name in &names {
        bar.set_message(name.clone());
        reports.push(run(name, args)?);
        bar.inc(1);
    }

    bar.finish_and_clear();

    println!("{}", tables::results_table(&reports));

    Ok(())
}

fn verify_solution(
    problem: &RideAssignmentProblem,
    output: &Path,
    expected: Score,
) -> Result<(), anyhow::Error> {
    let routes = read_solution_file(output)
        .with_context(|| format!("Failed to read back {}", output.display()))?;
    let evaluation = evaluate_solution(problem, &routes)
        .with_context(|| format!("{} is not a feasible solution", output.display()))?;

    if evaluation.score != expected {
        bail!(
            "{} scores {} but the search reported {}",
            output.display(),
            evaluation.score,
            expected
        );
    }

    info!(
        "Verified {}: {} rides, {} with bonus, score {}",
        output.display(),
        evaluation.assigned_rides,
        evaluation.bonus_rides,
        evaluation.score
    );

    Ok(())
}

fn write_statistics(statistics: &SearchStatistics, path: &Path) -> Result<(), anyhow::Error> {
    let file =
        fs::File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    serde_json::to_writer_pretty(std::io::BufWriter::new(file), statistics)
        .with_context(|| format!("Failed to write statistics to {}", path.display()))?;

    info!("Wrote search statistics to {}", path.display());

    Ok(())
}
