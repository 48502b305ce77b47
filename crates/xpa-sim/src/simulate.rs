//! Simulated assignment tables built by calling the assigner once per row.

use serde::{Deserialize, Serialize};
use tracing::debug;
use xpa_core::{AssignError, Assigner, Identifier, IntoIdentifier, RngHandle};

/// Identifier used by [`same_user_n_times`].
pub const FIXED_USER: u64 = 1;

/// Upper bound (exclusive) for identifiers drawn by [`random_users`].
pub const RANDOM_ID_SPACE: u64 = 1 << 32;

/// One `{identifier, label}` row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentRow {
    /// Canonical identifier that was assigned.
    pub identifier: Identifier,
    /// Variant label returned by the assigner.
    pub label: String,
}

/// Table of assignments; `key` names the label column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentTable {
    /// Label column name; the experiment name.
    pub key: String,
    /// Rows in assignment order.
    pub rows: Vec<AssignmentRow>,
}

/// Count and share of a single label within a table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelCount {
    /// Variant label.
    pub label: String,
    /// Rows carrying `label`.
    pub count: usize,
    /// `count / total`, zero for an empty table.
    pub fraction: f64,
}

/// Per-label distribution of a table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    /// Label column name of the summarised table.
    pub key: String,
    /// Number of rows.
    pub total: usize,
    /// Per-label counts, boundary order first.
    pub labels: Vec<LabelCount>,
}

impl AssignmentTable {
    /// Assigns every identifier in order.
    pub fn from_identifiers<I>(assigner: &Assigner, identifiers: I) -> Result<Self, AssignError>
    where
        I: IntoIterator,
        I::Item: IntoIdentifier,
    {
        let rows = identifiers
            .into_iter()
            .map(|id| {
                let identifier = id.into_identifier()?;
                let label = assigner.assign(&identifier)?.to_string();
                Ok(AssignmentRow { identifier, label })
            })
            .collect::<Result<Vec<_>, AssignError>>()?;
        debug!(
            experiment = %assigner.config().experiment_name,
            rows = rows.len(),
            "built assignment table"
        );
        Ok(Self {
            key: assigner.config().experiment_name.clone(),
            rows,
        })
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Labels in row order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().map(|row| row.label.as_str())
    }

    /// Counts labels, listing `ordered` labels first and any others after in
    /// order of first appearance.
    pub fn summary<'a>(&self, ordered: impl IntoIterator<Item = &'a str>) -> Summary {
        let mut labels: Vec<LabelCount> = Vec::new();
        for label in ordered {
            if !labels.iter().any(|entry| entry.label == label) {
                labels.push(LabelCount {
                    label: label.to_string(),
                    count: 0,
                    fraction: 0.0,
                });
            }
        }
        for row in &self.rows {
            match labels.iter_mut().find(|entry| entry.label == row.label) {
                Some(entry) => entry.count += 1,
                None => labels.push(LabelCount {
                    label: row.label.clone(),
                    count: 1,
                    fraction: 0.0,
                }),
            }
        }
        let total = self.rows.len();
        if total > 0 {
            for entry in &mut labels {
                entry.fraction = entry.count as f64 / total as f64;
            }
        }
        Summary {
            key: self.key.clone(),
            total,
            labels,
        }
    }
}

impl Summary {
    /// Share of `label`, zero when absent.
    pub fn fraction(&self, label: &str) -> f64 {
        self.labels
            .iter()
            .find(|entry| entry.label == label)
            .map(|entry| entry.fraction)
            .unwrap_or(0.0)
    }
}

/// `n` rows, all for identifier [`FIXED_USER`].
pub fn same_user_n_times(assigner: &Assigner, n: usize) -> Result<AssignmentTable, AssignError> {
    AssignmentTable::from_identifiers(assigner, std::iter::repeat(FIXED_USER).take(n))
}

/// `n` rows for the sequential identifiers `0..n`.
pub fn n_different_users(assigner: &Assigner, n: usize) -> Result<AssignmentTable, AssignError> {
    AssignmentTable::from_identifiers(assigner, 0..n as u64)
}

/// `n` rows for identifiers drawn from a seeded RNG over [`RANDOM_ID_SPACE`].
pub fn random_users(
    assigner: &Assigner,
    n: usize,
    seed: u64,
) -> Result<AssignmentTable, AssignError> {
    let mut rng = RngHandle::substream(seed, 0);
    let identifiers: Vec<Identifier> = (0..n)
        .map(|_| rng.next_identifier(RANDOM_ID_SPACE))
        .collect();
    AssignmentTable::from_identifiers(assigner, identifiers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use xpa_core::AssignmentConfig;

    fn default_assigner() -> Assigner {
        Assigner::new(AssignmentConfig::default()).unwrap()
    }

    #[test]
    fn summary_keeps_boundary_order_and_zero_counts() {
        let assigner = default_assigner();
        let table = same_user_n_times(&assigner, 10).unwrap();
        let summary = table.summary(["blue", "red", "green"]);
        let labels: Vec<_> = summary.labels.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, vec!["blue", "red", "green"]);
        assert_eq!(summary.labels[1].count, 10);
        assert_eq!(summary.fraction("red"), 1.0);
        assert_eq!(summary.fraction("green"), 0.0);
    }

    #[test]
    fn empty_table_has_zero_fractions() {
        let table = n_different_users(&default_assigner(), 0).unwrap();
        assert!(table.is_empty());
        let summary = table.summary(["red", "blue"]);
        assert_eq!(summary.total, 0);
        assert!(summary.labels.iter().all(|e| e.fraction == 0.0));
    }
}
