use super::*;

#[test]
fn fields_land_on_documented_bits() {
    let h = ImageHeader::new(ColorFormat::TrueColorAlpha, 0xabc, 0x123)
        .unwrap()
        .with_chroma_keyed(true)
        .with_alpha_byte(true);
    assert_eq!(h.raw(), 0x123_abc_00 | (13 << 2) | 0b11);
    assert_eq!(h.to_le_bytes(), [0x37, 0xbc, 0x3a, 0x12]);

    let back = ImageHeader::from_le_bytes(h.to_le_bytes());
    assert!(back.chroma_keyed());
    assert!(back.alpha_byte());
    assert_eq!(back.format().unwrap(), ColorFormat::TrueColorAlpha);
    assert_eq!(back.width(), 0xabc);
    assert_eq!(back.height(), 0x123);
}

#[test]
fn flags_toggle_independently() {
    let h = ImageHeader::new(ColorFormat::Indexed1, 2, 2).unwrap();
    assert!(!h.chroma_keyed());
    assert!(!h.alpha_byte());
    let h = h.with_alpha_byte(true);
    assert!(h.alpha_byte() && !h.chroma_keyed());
    let h = h.with_alpha_byte(false).with_chroma_keyed(true);
    assert!(!h.alpha_byte() && h.chroma_keyed());
    assert_eq!(h.width(), 2);
    assert_eq!(h.format().unwrap(), ColorFormat::Indexed1);
}

#[test]
fn max_dimension_fits_and_overflow_is_rejected() {
    let h = ImageHeader::new(ColorFormat::Alpha8, MAX_DIMENSION, MAX_DIMENSION).unwrap();
    assert_eq!(h.width(), 4095);
    assert_eq!(h.height(), 4095);
    assert!(ImageHeader::new(ColorFormat::Alpha8, 4096, 1).is_err());
    assert!(ImageHeader::new(ColorFormat::Alpha8, 1, 4096).is_err());
}

#[test]
fn undefined_format_code_is_reported() {
    let h = ImageHeader::from_raw(63 << 2 | (1 << 8) | (1 << 20));
    assert_eq!(h.format_code(), 63);
    assert!(matches!(h.format(), Err(BlitError::UnknownFormat(63))));
}
