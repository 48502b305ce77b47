use std::error::Error;

use clap::{Parser, Subcommand};
use commands::{
    assign::{self, AssignArgs},
    simulate::{self, SimulateArgs},
    summary::{self, SummaryArgs},
};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser, Debug)]
#[command(name = "xpa-sim", about = "Deterministic experiment assignment CLI")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Assign a single identifier and print its variant.
    Assign(AssignArgs),
    /// Build a simulated assignment table.
    Simulate(SimulateArgs),
    /// Report the per-variant distribution over sequential identifiers.
    Summary(SummaryArgs),
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("xpa_sim=info,xpa_core=warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Assign(args) => assign::run(&args),
        Command::Simulate(args) => simulate::run(&args),
        Command::Summary(args) => summary::run(&args),
    }
}
