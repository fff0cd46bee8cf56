use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        RigError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        RigError::capacity("x")
            .to_string()
            .contains("atlas capacity error:")
    );
    assert!(
        RigError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = RigError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn serde_json_errors_convert_to_serde_variant() {
    let bad = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    let err = RigError::from(bad);
    assert!(matches!(err, RigError::Serde(_)));
}
