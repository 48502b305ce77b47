//! Deterministic bucket assignment.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::config::{AssignmentConfig, Boundary};
use crate::errors::{AssignError, ErrorInfo};
use crate::hash::StableHash;
use crate::key::{AssignmentKey, Identifier, IntoIdentifier};

/// Full trace of a single assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    /// Canonical identifier.
    pub identifier: Identifier,
    /// Hashed key, `identifier|experiment`.
    pub key: String,
    /// 60-bit hash prefix of the key.
    pub hash_prefix: u64,
    /// Bucket in `[0, num_buckets)`.
    pub bucket: u64,
    /// Selected variant label.
    pub label: String,
}

/// Reduces a key to its bucket in `[0, num_buckets)`.
///
/// `num_buckets` must be positive; [`Assigner`] guarantees it.
pub fn bucket_for(key: &AssignmentKey, num_buckets: u64, hash: &dyn StableHash) -> u64 {
    reduce_prefix(hash.hash_prefix(key.as_bytes()), num_buckets)
}

fn reduce_prefix(hash_prefix: u64, num_buckets: u64) -> u64 {
    hash_prefix % num_buckets
}

/// Walks the ordered boundaries and returns the label covering `bucket`.
pub fn label_for_bucket(boundaries: &[Boundary], bucket: u64) -> Option<&str> {
    let mut upper: u64 = 0;
    for boundary in boundaries {
        upper = upper.saturating_add(boundary.width);
        if bucket < upper {
            return Some(boundary.label.as_str());
        }
    }
    None
}

struct Resolved<'a> {
    key: AssignmentKey,
    hash_prefix: u64,
    bucket: u64,
    label: &'a str,
}

// Single path from identifier to label; `config` must already be validated.
fn resolve<'a>(
    config: &'a AssignmentConfig,
    identifier: &Identifier,
) -> Result<Resolved<'a>, AssignError> {
    let key = AssignmentKey::new(identifier, &config.experiment_name)?;
    let hash_prefix = config.hash.hash_prefix(key.as_bytes());
    let bucket = reduce_prefix(hash_prefix, config.num_buckets);
    trace!(bucket, experiment = %config.experiment_name, "resolving bucket");
    let label = label_for_bucket(&config.boundaries, bucket).ok_or_else(|| {
        AssignError::InvalidConfiguration(
            ErrorInfo::new("bucket-uncovered", "bucket lies outside every boundary")
                .with_context("bucket", bucket.to_string())
                .with_context("num_buckets", config.num_buckets.to_string()),
        )
    })?;
    Ok(Resolved {
        key,
        hash_prefix,
        bucket,
        label,
    })
}

/// Validated assigner for a single experiment.
///
/// Construction checks the configuration once; every call afterwards is a
/// pure function of the identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assigner {
    config: AssignmentConfig,
}

impl Assigner {
    /// Validates `config` and wraps it.
    pub fn new(config: AssignmentConfig) -> Result<Self, AssignError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Returns the validated configuration.
    pub fn config(&self) -> &AssignmentConfig {
        &self.config
    }

    /// Builds the assignment key for `identifier`.
    pub fn key(&self, identifier: impl IntoIdentifier) -> Result<AssignmentKey, AssignError> {
        let identifier = identifier.into_identifier()?;
        AssignmentKey::new(&identifier, &self.config.experiment_name)
    }

    /// Returns the bucket of `identifier`.
    pub fn bucket(&self, identifier: impl IntoIdentifier) -> Result<u64, AssignError> {
        let identifier = identifier.into_identifier()?;
        Ok(resolve(&self.config, &identifier)?.bucket)
    }

    /// Returns the variant label of `identifier`.
    pub fn assign(&self, identifier: impl IntoIdentifier) -> Result<&str, AssignError> {
        let identifier = identifier.into_identifier()?;
        Ok(resolve(&self.config, &identifier)?.label)
    }

    /// Same as [`Assigner::assign`] but keeps every intermediate value.
    pub fn explain(&self, identifier: impl IntoIdentifier) -> Result<Assignment, AssignError> {
        let identifier = identifier.into_identifier()?;
        let resolved = resolve(&self.config, &identifier)?;
        Ok(Assignment {
            key: resolved.key.as_str().to_string(),
            hash_prefix: resolved.hash_prefix,
            bucket: resolved.bucket,
            label: resolved.label.to_string(),
            identifier,
        })
    }
}

/// Assigns `identifier` to a variant under `config`.
///
/// The configuration is validated before anything is hashed.
pub fn assign_variant(
    identifier: impl IntoIdentifier,
    config: &AssignmentConfig,
) -> Result<String, AssignError> {
    config.validate()?;
    let identifier = identifier.into_identifier()?;
    Ok(resolve(config, &identifier)?.label.to_string())
}

/// The notebook's colour experiment: `color`, 20 buckets, red below 10.
pub fn choose_color_assignment(identifier: impl IntoIdentifier) -> Result<String, AssignError> {
    assign_variant(identifier, &AssignmentConfig::default())
}
