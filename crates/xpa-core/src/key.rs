//! Identifiers and the assignment keys derived from them.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::{AssignError, ErrorInfo};

/// Separator between the identifier and the experiment name in a key.
pub const KEY_DELIMITER: char = '|';

/// Canonical string form of an opaque user identifier.
///
/// Integers render in decimal and strings are kept verbatim. The canonical
/// form is never empty and never contains [`KEY_DELIMITER`], which keeps
/// `identifier|experiment` injective.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Identifier(String);

impl Identifier {
    /// Validates and wraps a canonical identifier string.
    pub fn new(raw: impl Into<String>) -> Result<Self, AssignError> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(AssignError::InvalidIdentifier(
                ErrorInfo::new("empty-identifier", "identifier has an empty canonical form")
                    .with_hint("use a stable, non-empty user id"),
            ));
        }
        if raw.contains(KEY_DELIMITER) {
            return Err(AssignError::InvalidIdentifier(
                ErrorInfo::new(
                    "delimiter-in-identifier",
                    "identifier contains the key delimiter",
                )
                .with_context("identifier", raw.as_str())
                .with_context("delimiter", KEY_DELIMITER.to_string())
                .with_hint("strip or encode '|' before assignment"),
            ));
        }
        Ok(Self(raw))
    }

    /// Returns the canonical string form.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Identifier {
    type Error = AssignError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Identifier::new(value)
    }
}

impl TryFrom<&str> for Identifier {
    type Error = AssignError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Identifier::new(value)
    }
}

impl From<Identifier> for String {
    fn from(value: Identifier) -> Self {
        value.0
    }
}

macro_rules! integer_identifier {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Identifier {
                fn from(value: $ty) -> Self {
                    Identifier(value.to_string())
                }
            }

            impl IntoIdentifier for $ty {
                fn into_identifier(self) -> Result<Identifier, AssignError> {
                    Ok(Identifier::from(self))
                }
            }
        )*
    };
}

/// Values that can be turned into an [`Identifier`].
pub trait IntoIdentifier {
    /// Converts the value into its canonical identifier.
    fn into_identifier(self) -> Result<Identifier, AssignError>;
}

integer_identifier!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);

impl IntoIdentifier for Identifier {
    fn into_identifier(self) -> Result<Identifier, AssignError> {
        Ok(self)
    }
}

impl IntoIdentifier for &Identifier {
    fn into_identifier(self) -> Result<Identifier, AssignError> {
        Ok(self.clone())
    }
}

impl IntoIdentifier for &str {
    fn into_identifier(self) -> Result<Identifier, AssignError> {
        Identifier::new(self)
    }
}

impl IntoIdentifier for String {
    fn into_identifier(self) -> Result<Identifier, AssignError> {
        Identifier::new(self)
    }
}

impl IntoIdentifier for &String {
    fn into_identifier(self) -> Result<Identifier, AssignError> {
        Identifier::new(self.as_str())
    }
}

/// Checks that an experiment name can namespace assignment keys.
pub fn validate_experiment_name(name: &str) -> Result<(), AssignError> {
    if name.is_empty() {
        return Err(AssignError::config(
            "empty-experiment",
            "experiment name must not be empty",
        ));
    }
    if name.contains(KEY_DELIMITER) {
        return Err(AssignError::InvalidConfiguration(
            ErrorInfo::new(
                "delimiter-in-experiment",
                "experiment name contains the key delimiter",
            )
            .with_context("experiment", name),
        ));
    }
    Ok(())
}

/// The string `identifier|experiment` whose UTF-8 bytes are hashed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AssignmentKey(String);

impl AssignmentKey {
    /// Builds the key for `identifier` within the `experiment` namespace.
    pub fn new(identifier: &Identifier, experiment: &str) -> Result<Self, AssignError> {
        validate_experiment_name(experiment)?;
        Ok(Self(format!("{identifier}{KEY_DELIMITER}{experiment}")))
    }

    /// Returns the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the UTF-8 bytes fed to the hash.
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl fmt::Display for AssignmentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
