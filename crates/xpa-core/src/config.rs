//! Experiment configuration: bucket count, boundaries and hash selection.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{AssignError, ErrorInfo};
use crate::hash::HashAlgorithm;
use crate::key::validate_experiment_name;

/// One contiguous slice of the bucket space mapped to a variant label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Boundary {
    /// Number of consecutive buckets assigned to `label`.
    pub width: u64,
    /// Variant label returned for buckets inside this slice.
    pub label: String,
}

impl Boundary {
    /// Creates a boundary entry.
    pub fn new(width: u64, label: impl Into<String>) -> Self {
        Self {
            width,
            label: label.into(),
        }
    }
}

/// Experiment parameters consumed by the assigner.
///
/// Missing fields fall back to the two-arm colour experiment:
/// `color`, 20 buckets, `[(10, red), (10, blue)]`, MD5.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentConfig {
    /// Namespace appended to every identifier before hashing.
    #[serde(default = "default_experiment_name")]
    pub experiment_name: String,
    /// Size of the bucket space.
    #[serde(default = "default_num_buckets")]
    pub num_buckets: u64,
    /// Ordered partition of the bucket space.
    #[serde(default = "default_boundaries")]
    pub boundaries: Vec<Boundary>,
    /// Hash used to map keys to buckets.
    #[serde(default)]
    pub hash: HashAlgorithm,
}

fn default_experiment_name() -> String {
    "color".to_string()
}

fn default_num_buckets() -> u64 {
    20
}

fn default_boundaries() -> Vec<Boundary> {
    vec![Boundary::new(10, "red"), Boundary::new(10, "blue")]
}

impl Default for AssignmentConfig {
    fn default() -> Self {
        Self {
            experiment_name: default_experiment_name(),
            num_buckets: default_num_buckets(),
            boundaries: default_boundaries(),
            hash: HashAlgorithm::default(),
        }
    }
}

impl AssignmentConfig {
    /// Creates a configuration with the default hash algorithm.
    pub fn new(
        experiment_name: impl Into<String>,
        num_buckets: u64,
        boundaries: Vec<Boundary>,
    ) -> Self {
        Self {
            experiment_name: experiment_name.into(),
            num_buckets,
            boundaries,
            hash: HashAlgorithm::default(),
        }
    }

    /// Returns the configuration with a different hash algorithm.
    pub fn with_hash(mut self, hash: HashAlgorithm) -> Self {
        self.hash = hash;
        self
    }

    /// Returns the configuration with a different experiment namespace.
    pub fn with_experiment(mut self, experiment_name: impl Into<String>) -> Self {
        self.experiment_name = experiment_name.into();
        self
    }

    /// Rejects configurations whose boundaries do not partition the bucket space.
    pub fn validate(&self) -> Result<(), AssignError> {
        validate_experiment_name(&self.experiment_name)?;
        if self.num_buckets == 0 {
            return Err(AssignError::config(
                "zero-buckets",
                "num_buckets must be positive",
            ));
        }
        if self.boundaries.is_empty() {
            return Err(AssignError::InvalidConfiguration(
                ErrorInfo::new("empty-boundaries", "at least one boundary is required")
                    .with_context("num_buckets", self.num_buckets.to_string()),
            ));
        }
        let mut total: u64 = 0;
        for (idx, boundary) in self.boundaries.iter().enumerate() {
            if boundary.label.is_empty() {
                return Err(AssignError::InvalidConfiguration(
                    ErrorInfo::new("empty-label", "boundary label must not be empty")
                        .with_context("index", idx.to_string()),
                ));
            }
            total = total.checked_add(boundary.width).ok_or_else(|| {
                AssignError::InvalidConfiguration(
                    ErrorInfo::new("width-overflow", "boundary widths overflow u64")
                        .with_context("index", idx.to_string()),
                )
            })?;
        }
        if total != self.num_buckets {
            return Err(AssignError::InvalidConfiguration(
                ErrorInfo::new(
                    "width-mismatch",
                    "boundary widths must sum to num_buckets",
                )
                .with_context("num_buckets", self.num_buckets.to_string())
                .with_context("width_sum", total.to_string())
                .with_hint("adjust the widths or the bucket count"),
            ));
        }
        Ok(())
    }

    /// Labels in boundary order, zero-width entries included.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.boundaries.iter().map(|b| b.label.as_str())
    }

    /// Loads a configuration from a `.yaml`, `.yml` or `.json` file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, AssignError> {
        let path = path.as_ref();
        let data = fs::read(path).map_err(|err| {
            AssignError::Io(
                ErrorInfo::new("config-read", "failed to read configuration")
                    .with_context("path", path.display().to_string())
                    .with_hint(err.to_string()),
            )
        })?;
        let config: Self = match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => serde_json::from_slice(&data).map_err(|err| {
                AssignError::Serde(
                    ErrorInfo::new("config-json", err.to_string())
                        .with_context("path", path.display().to_string()),
                )
            })?,
            _ => serde_yaml::from_slice(&data).map_err(|err| {
                AssignError::Serde(
                    ErrorInfo::new("config-yaml", err.to_string())
                        .with_context("path", path.display().to_string()),
                )
            })?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Serializes the configuration as YAML.
    pub fn to_yaml_string(&self) -> Result<String, AssignError> {
        serde_yaml::to_string(self)
            .map_err(|err| AssignError::Serde(ErrorInfo::new("config-yaml", err.to_string())))
    }
}
