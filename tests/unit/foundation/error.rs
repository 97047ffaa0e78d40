use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        FramespanError::invalid_range("x")
            .to_string()
            .contains("invalid range:")
    );
    assert!(
        FramespanError::invalid_domain("x")
            .to_string()
            .contains("invalid domain:")
    );
    assert!(
        FramespanError::incompatible_value("x")
            .to_string()
            .contains("incompatible value:")
    );
    assert!(
        FramespanError::unsupported_value_type("x")
            .to_string()
            .contains("unsupported value type:")
    );
    assert!(
        FramespanError::UnknownDescriptor(7)
            .to_string()
            .contains("unknown descriptor: 7")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = FramespanError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
