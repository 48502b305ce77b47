use std::error::Error;

use clap::Args;
use xpa_sim::{n_different_users, to_canonical_json_bytes};

use super::ExperimentArgs;

#[derive(Args, Debug)]
pub struct SummaryArgs {
    /// Number of sequential identifiers to assign.
    #[arg(long, default_value_t = 100_000)]
    pub n: usize,
    #[command(flatten)]
    pub experiment: ExperimentArgs,
}

pub fn run(args: &SummaryArgs) -> Result<(), Box<dyn Error>> {
    let assigner = args.experiment.assigner()?;
    let table = n_different_users(&assigner, args.n)?;
    let summary = table.summary(assigner.config().labels());
    let json = to_canonical_json_bytes(&summary)?;
    println!("{}", String::from_utf8(json)?);
    Ok(())
}
