pub mod assign;
pub mod simulate;
pub mod summary;

use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use tracing::info;
use xpa_core::{Assigner, AssignmentConfig, HashAlgorithm};

/// Experiment options shared by every subcommand.
#[derive(Args, Debug, Clone)]
pub struct ExperimentArgs {
    /// YAML or JSON experiment configuration; defaults to the colour experiment.
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Override the experiment name used to namespace keys.
    #[arg(long)]
    pub experiment: Option<String>,
    /// Override the hash algorithm (md5, sha256, siphash13).
    #[arg(long)]
    pub hash: Option<HashAlgorithm>,
}

impl ExperimentArgs {
    pub fn assigner(&self) -> Result<Assigner, Box<dyn Error>> {
        let mut config = match &self.config {
            Some(path) => AssignmentConfig::from_path(path)?,
            None => AssignmentConfig::default(),
        };
        if let Some(name) = &self.experiment {
            config = config.with_experiment(name.clone());
        }
        if let Some(hash) = self.hash {
            config = config.with_hash(hash);
        }
        let assigner = Assigner::new(config)?;
        info!(
            experiment = %assigner.config().experiment_name,
            buckets = assigner.config().num_buckets,
            hash = %assigner.config().hash,
            "experiment loaded"
        );
        Ok(assigner)
    }
}
