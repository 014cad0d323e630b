use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        BlitError::UnknownFormat(63)
            .to_string()
            .contains("unknown color format code 63")
    );
    assert!(
        BlitError::unresolved("x")
            .to_string()
            .contains("unresolved image source:")
    );
    assert!(
        BlitError::malformed("x")
            .to_string()
            .contains("malformed image:")
    );
    assert!(
        BlitError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert_eq!(BlitError::EmptyRegion.to_string(), "empty draw region");
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = BlitError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
