use xpa_core::{AssignError, ErrorInfo};

fn sample_info(code: &str, message: &str) -> ErrorInfo {
    ErrorInfo::new(code, message)
        .with_context("num_buckets", "20")
        .with_context("width_sum", "19")
}

#[test]
fn display_includes_context_and_hint() {
    let err = AssignError::InvalidConfiguration(
        sample_info("width-mismatch", "widths disagree").with_hint("fix widths"),
    );
    assert_eq!(
        err.to_string(),
        "invalid configuration: widths disagree (code: width-mismatch) | context: [num_buckets=20, width_sum=19] | hint: fix widths"
    );
}

#[test]
fn errors_serialize_with_family_tag() {
    let err = AssignError::InvalidIdentifier(ErrorInfo::new("empty-identifier", "empty"));
    let json = serde_json::to_value(&err).expect("serialize");
    assert_eq!(json["family"], "InvalidIdentifier");
    assert_eq!(json["detail"]["code"], "empty-identifier");
    let decoded: AssignError = serde_json::from_value(json).expect("deserialize");
    assert_eq!(decoded, err);
}
