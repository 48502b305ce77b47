//! Stable hashing of assignment keys.
//!
//! Every algorithm is reduced to the same 60-bit value: the first 15
//! hexadecimal digits of its output read as an unsigned integer. Bucketing only
//! ever sees that prefix, so swapping algorithms never changes the bucketing
//! contract. None of these hashes is used for any security property.

use std::fmt;
use std::hash::Hasher;
use std::str::FromStr;

use md5::{Digest, Md5};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use siphasher::sip::SipHasher13;

use crate::errors::{AssignError, ErrorInfo};

/// Number of hexadecimal digits retained from a digest.
pub const PREFIX_HEX_DIGITS: usize = 15;

/// Number of bits retained from a digest.
pub const PREFIX_BITS: u32 = (PREFIX_HEX_DIGITS as u32) * 4;

/// Maps a byte string to a stable 60-bit unsigned integer.
pub trait StableHash: Send + Sync {
    /// Returns the first [`PREFIX_HEX_DIGITS`] hex digits of the hash of `bytes`.
    fn hash_prefix(&self, bytes: &[u8]) -> u64;
}

/// Reads the leading 60 bits of a digest, i.e. `int(hexdigest[:15], 16)`.
pub fn prefix_from_digest(digest: &[u8]) -> u64 {
    let mut head = [0u8; 8];
    let take = digest.len().min(head.len());
    head[..take].copy_from_slice(&digest[..take]);
    u64::from_be_bytes(head) >> (64 - PREFIX_BITS)
}

/// MD5 digest prefix; the reference algorithm.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Md5Prefix;

impl StableHash for Md5Prefix {
    fn hash_prefix(&self, bytes: &[u8]) -> u64 {
        prefix_from_digest(&Md5::digest(bytes))
    }
}

/// SHA-256 digest prefix.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Sha256Prefix;

impl StableHash for Sha256Prefix {
    fn hash_prefix(&self, bytes: &[u8]) -> u64 {
        prefix_from_digest(&Sha256::digest(bytes))
    }
}

/// SipHash-1-3 with fixed zero keys, truncated to its top 60 bits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SipHash13;

impl StableHash for SipHash13 {
    fn hash_prefix(&self, bytes: &[u8]) -> u64 {
        let mut hasher = SipHasher13::new_with_keys(0, 0);
        hasher.write(bytes);
        hasher.finish() >> (64 - PREFIX_BITS)
    }
}

/// Serializable selector over the built-in [`StableHash`] implementations.
///
/// Parsing is case-insensitive and accepts `sip13` for [`HashAlgorithm::Siphash13`],
/// both from the command line and from configuration files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum HashAlgorithm {
    /// [`Md5Prefix`].
    #[default]
    Md5,
    /// [`Sha256Prefix`].
    Sha256,
    /// [`SipHash13`].
    Siphash13,
}

impl HashAlgorithm {
    /// Stable lowercase name used in configuration files.
    pub fn name(&self) -> &'static str {
        match self {
            HashAlgorithm::Md5 => "md5",
            HashAlgorithm::Sha256 => "sha256",
            HashAlgorithm::Siphash13 => "siphash13",
        }
    }
}

impl StableHash for HashAlgorithm {
    fn hash_prefix(&self, bytes: &[u8]) -> u64 {
        match self {
            HashAlgorithm::Md5 => Md5Prefix.hash_prefix(bytes),
            HashAlgorithm::Sha256 => Sha256Prefix.hash_prefix(bytes),
            HashAlgorithm::Siphash13 => SipHash13.hash_prefix(bytes),
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HashAlgorithm {
    type Err = AssignError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "md5" => Ok(HashAlgorithm::Md5),
            "sha256" => Ok(HashAlgorithm::Sha256),
            "siphash13" | "sip13" => Ok(HashAlgorithm::Siphash13),
            other => Err(AssignError::InvalidConfiguration(
                ErrorInfo::new("unknown-hash", "unsupported hash algorithm")
                    .with_context("algorithm", other)
                    .with_hint("expected one of md5, sha256, siphash13"),
            )),
        }
    }
}

impl TryFrom<String> for HashAlgorithm {
    type Error = AssignError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
