#![deny(missing_docs)]
#![doc = "Deterministic hash-based experiment variant assignment.\n\nAn identifier and an experiment name are joined into `identifier|experiment`, hashed, truncated to 60 bits and reduced modulo the bucket count; ordered boundaries then map the bucket to a variant label."]

pub mod assign;
pub mod config;
pub mod errors;
pub mod hash;
pub mod key;
pub mod rng;

pub use assign::{
    assign_variant, bucket_for, choose_color_assignment, label_for_bucket, Assigner, Assignment,
};
pub use config::{AssignmentConfig, Boundary};
pub use errors::{AssignError, ErrorInfo};
pub use hash::{HashAlgorithm, Md5Prefix, Sha256Prefix, SipHash13, StableHash};
pub use key::{AssignmentKey, Identifier, IntoIdentifier, KEY_DELIMITER};
pub use rng::{derive_substream_seed, RngHandle};
