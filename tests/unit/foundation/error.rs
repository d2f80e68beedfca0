use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        DebandError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        DebandError::format("x")
            .to_string()
            .contains("image format error:")
    );
    assert!(
        DebandError::evaluation("x")
            .to_string()
            .contains("evaluation error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = DebandError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
