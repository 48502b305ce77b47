use xpa_core::{
    choose_color_assignment, Assigner, AssignmentConfig, AssignmentKey, Identifier, Md5Prefix,
    StableHash,
};

#[test]
fn user_one_is_red() {
    let key = AssignmentKey::new(&Identifier::from(1u64), "color").expect("key");
    assert_eq!(key.as_str(), "1|color");
    assert_eq!(Md5Prefix.hash_prefix(key.as_bytes()), 972_594_691_278_647_349);

    let assigner = Assigner::new(AssignmentConfig::default()).expect("config");
    let trace = assigner.explain(1u64).expect("assign");
    assert_eq!(trace.hash_prefix, 972_594_691_278_647_349);
    assert_eq!(trace.bucket, 9);
    assert_eq!(trace.label, "red");
}

#[test]
fn known_buckets() {
    let assigner = Assigner::new(AssignmentConfig::default()).expect("config");
    let expected = [(0u64, 1u64, "red"), (2, 10, "blue"), (3, 5, "red"), (4, 17, "blue"), (42, 19, "blue")];
    for (id, bucket, label) in expected {
        assert_eq!(assigner.bucket(id).expect("bucket"), bucket, "id {id}");
        assert_eq!(assigner.assign(id).expect("assign"), label, "id {id}");
    }
}

#[test]
fn string_identifiers_hash_their_text() {
    // md5("alice|color") starts with afdcb1a80c40918
    let assigner = Assigner::new(AssignmentConfig::default()).expect("config");
    let trace = assigner.explain("alice").expect("assign");
    assert_eq!(trace.hash_prefix, 0xafdc_b1a8_0c40_918);
    assert_eq!(trace.bucket, 4);
    assert_eq!(trace.label, "red");
}

#[test]
fn color_shortcut_matches_default_assigner() {
    assert_eq!(choose_color_assignment(1u64).expect("assign"), "red");
    assert_eq!(choose_color_assignment(2u64).expect("assign"), "blue");
}
