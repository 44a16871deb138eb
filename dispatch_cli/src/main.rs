use clap::{Parser, ValueEnum};
use mimalloc::MiMalloc;
use tracing::level_filters::LevelFilter;

use crate::solve::SolveArgs;

mod file_utils;
mod solve;
mod tables;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum LogLevel {
    Debug,
    Info,
    None,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::None => LevelFilter::OFF,
        }
    }
}

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    /// Problem to solve, read from `<data-dir>/<problem>.in`
    #[arg(default_value = "a_example")]
    problem: String,

    #[command(flatten)]
    args: SolveArgs,

    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    log_level: LogLevel,
}

fn main() -> Result<(), anyhow::Error> {
    dotenvy::from_filename("./.env.local").ok();
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(LevelFilter::from(cli.log_level))
        .init();

    if cli.args.all {
        solve::run_all(&cli.args)
    } else {
        solve::run(&cli.problem, &cli.args).map(|_| ())
    }
}
