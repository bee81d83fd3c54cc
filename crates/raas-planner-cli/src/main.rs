use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use raas_planner_cli::output::OutputFormat;
use raas_planner_lib::RaasData;

mod commands;

/// Environment variable consulted when `--data` is not given.
const DATA_ENV: &str = "RAAS_PLANNER_DATA";

#[derive(Parser, Debug)]
#[command(author, version, about = "RAAS capture point planning utilities")]
struct Cli {
    /// Layer data JSON file. Falls back to the RAAS_PLANNER_DATA environment variable.
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    /// Output format written to stdout.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List every map and its layers.
    Maps,
    /// Replay a main base selection and clicks, then print the classification.
    Plan(commands::plan::PlanArgs),
    /// Print the per-lane shortest paths from a main base to a point.
    Path(commands::path::PathArgs),
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let data = load_data(cli.data)?;

    match cli.command {
        Command::Maps => commands::maps::handle_maps(&data, cli.format),
        Command::Plan(args) => commands::plan::handle_plan(&data, &args, cli.format),
        Command::Path(args) => commands::path::handle_path(&data, &args, cli.format),
    }
}

fn load_data(flag: Option<PathBuf>) -> Result<RaasData> {
    let path = flag
        .or_else(|| std::env::var_os(DATA_ENV).map(PathBuf::from))
        .with_context(|| format!("no layer data file given; pass --data or set {DATA_ENV}"))?;
    RaasData::from_path(&path)
        .with_context(|| format!("failed to load layer data from {}", path.display()))
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
