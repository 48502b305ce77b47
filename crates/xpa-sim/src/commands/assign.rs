use std::error::Error;

use clap::Args;
use xpa_sim::to_canonical_json_bytes;

use super::ExperimentArgs;

#[derive(Args, Debug)]
pub struct AssignArgs {
    /// Identifier to assign.
    #[arg(long)]
    pub id: String,
    /// Print identifier, key, hash prefix, bucket and label as JSON.
    #[arg(long)]
    pub json: bool,
    #[command(flatten)]
    pub experiment: ExperimentArgs,
}

pub fn run(args: &AssignArgs) -> Result<(), Box<dyn Error>> {
    let assigner = args.experiment.assigner()?;
    if args.json {
        let trace = assigner.explain(args.id.as_str())?;
        let json = to_canonical_json_bytes(&trace)?;
        println!("{}", String::from_utf8(json)?);
    } else {
        println!("{}", assigner.assign(args.id.as_str())?);
    }
    Ok(())
}
