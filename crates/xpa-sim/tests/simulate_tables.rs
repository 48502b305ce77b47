use xpa_core::{Assigner, AssignmentConfig, Boundary};
use xpa_sim::{n_different_users, random_users, same_user_n_times, AssignmentTable, FIXED_USER};

fn colour_assigner() -> Assigner {
    Assigner::new(AssignmentConfig::default()).expect("config")
}

#[test]
fn same_user_rows_share_one_label() {
    let table = same_user_n_times(&colour_assigner(), 1_000).expect("table");
    assert_eq!(table.len(), 1_000);
    assert_eq!(table.key, "color");
    assert!(table
        .rows
        .iter()
        .all(|row| row.identifier.as_str() == FIXED_USER.to_string()));
    assert!(table.labels().all(|label| label == "red"));
}

#[test]
fn different_users_are_sequential_and_balanced() {
    let assigner = colour_assigner();
    let table = n_different_users(&assigner, 100_000).expect("table");
    assert_eq!(table.rows[0].identifier.as_str(), "0");
    assert_eq!(table.rows[99_999].identifier.as_str(), "99999");
    assert_eq!(table.rows[1].label, "red");
    assert_eq!(table.rows[2].label, "blue");

    let summary = table.summary(assigner.config().labels());
    assert_eq!(summary.total, 100_000);
    assert_eq!(summary.labels[0].label, "red");
    for label in ["red", "blue"] {
        let share = summary.fraction(label);
        assert!((0.45..=0.55).contains(&share), "{label} share {share}");
    }
}

#[test]
fn random_users_are_reproducible_per_seed() {
    let assigner = colour_assigner();
    let a = random_users(&assigner, 500, 7).expect("table");
    let b = random_users(&assigner, 500, 7).expect("table");
    let c = random_users(&assigner, 500, 8).expect("table");
    assert_eq!(a, b);
    assert_ne!(a, c);
}

#[test]
fn tables_follow_the_configured_experiment() {
    let config = AssignmentConfig::new(
        "size",
        10,
        vec![Boundary::new(3, "big"), Boundary::new(7, "small")],
    );
    let assigner = Assigner::new(config).expect("config");
    let table = n_different_users(&assigner, 200).expect("table");
    assert_eq!(table.key, "size");
    assert!(table.labels().all(|label| label == "big" || label == "small"));
}

#[test]
fn string_identifiers_are_validated() {
    let err = AssignmentTable::from_identifiers(&colour_assigner(), ["alice", "bob|eve"]).unwrap_err();
    assert_eq!(err.info().code, "delimiter-in-identifier");
}
