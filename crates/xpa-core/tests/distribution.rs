use std::collections::BTreeMap;

use xpa_core::{Assigner, AssignmentConfig, Boundary, HashAlgorithm};

fn tally(assigner: &Assigner, n: u64) -> BTreeMap<String, u64> {
    let mut counts = BTreeMap::new();
    for id in 0..n {
        *counts
            .entry(assigner.assign(id).expect("assign").to_string())
            .or_insert(0) += 1;
    }
    counts
}

#[test]
fn sequential_users_split_evenly() {
    let n = 100_000;
    for hash in [HashAlgorithm::Md5, HashAlgorithm::Sha256, HashAlgorithm::Siphash13] {
        let assigner =
            Assigner::new(AssignmentConfig::default().with_hash(hash)).expect("config");
        let counts = tally(&assigner, n);
        for label in ["red", "blue"] {
            let share = counts[label] as f64 / n as f64;
            assert!(
                (0.45..=0.55).contains(&share),
                "{hash}: {label} share {share}"
            );
        }
    }
}

#[test]
fn uneven_weights_are_respected() {
    let n = 50_000;
    let config = AssignmentConfig::new(
        "size",
        100,
        vec![Boundary::new(20, "big"), Boundary::new(80, "small")],
    );
    let counts = tally(&Assigner::new(config).expect("config"), n);
    let big = counts["big"] as f64 / n as f64;
    assert!((0.18..=0.22).contains(&big), "big share {big}");
}

#[test]
fn zero_width_label_is_never_chosen() {
    let config = AssignmentConfig::new(
        "color",
        20,
        vec![
            Boundary::new(10, "red"),
            Boundary::new(0, "green"),
            Boundary::new(10, "blue"),
        ],
    );
    let counts = tally(&Assigner::new(config).expect("config"), 5_000);
    assert!(!counts.contains_key("green"));
}
