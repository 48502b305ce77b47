use std::error::Error;
use std::path::PathBuf;

use clap::{Args, ValueEnum};
use tracing::info;
use xpa_sim::{
    n_different_users, random_users, render_html, render_text, same_user_n_times,
    to_canonical_json_bytes, to_csv_bytes, write_bytes, ColorMap,
};

use super::ExperimentArgs;

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Identifier 1 repeated.
    SameUser,
    /// Sequential identifiers starting at 0.
    DifferentUsers,
    /// Identifiers drawn from a seeded RNG.
    Random,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Csv,
    Html,
    Text,
}

#[derive(Args, Debug)]
pub struct SimulateArgs {
    #[arg(long, value_enum, default_value_t = Mode::DifferentUsers)]
    pub mode: Mode,
    /// Number of rows.
    #[arg(long, default_value_t = 1000)]
    pub n: usize,
    /// Seed for `--mode random`.
    #[arg(long, default_value_t = 2017)]
    pub seed: u64,
    #[arg(long, value_enum, default_value_t = Format::Text)]
    pub format: Format,
    /// Write to a file instead of stdout.
    #[arg(long)]
    pub out: Option<PathBuf>,
    #[command(flatten)]
    pub experiment: ExperimentArgs,
}

pub fn run(args: &SimulateArgs) -> Result<(), Box<dyn Error>> {
    let assigner = args.experiment.assigner()?;
    let table = match args.mode {
        Mode::SameUser => same_user_n_times(&assigner, args.n)?,
        Mode::DifferentUsers => n_different_users(&assigner, args.n)?,
        Mode::Random => random_users(&assigner, args.n, args.seed)?,
    };
    let colors = ColorMap::default();
    let bytes = match args.format {
        Format::Json => to_canonical_json_bytes(&table)?,
        Format::Csv => to_csv_bytes(&table)?,
        Format::Html => render_html(&table, &colors).into_bytes(),
        Format::Text => render_text(&table, &colors).into_bytes(),
    };
    match &args.out {
        Some(path) => {
            write_bytes(path, &bytes)?;
            info!(rows = table.len(), path = %path.display(), "table written");
        }
        None => print!("{}", String::from_utf8(bytes)?),
    }
    Ok(())
}
