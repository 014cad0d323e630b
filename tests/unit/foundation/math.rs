use super::*;

#[test]
fn mul_div255_variants_align() {
    for x in [0u16, 1, 127, 255] {
        for y in [0u16, 1, 127, 255] {
            assert_eq!(u16::from(mul_div255_u8(x, y)), mul_div255_u16(x, y));
        }
    }
}

#[test]
fn mul_div255_full_scale_is_identity() {
    for x in 0u16..=255 {
        assert_eq!(u16::from(mul_div255_u8(x, 255)), x);
        assert_eq!(mul_div255_u8(x, 0), 0);
    }
}

#[test]
fn lerp_endpoints_are_exact() {
    for (d, s) in [(0u8, 255u8), (10, 200), (255, 0)] {
        assert_eq!(lerp_u8(d, s, 0), d);
        assert_eq!(lerp_u8(d, s, 255), s);
    }
    assert_eq!(lerp_u8(255, 0, 128), 127);
}

#[test]
fn expand_level_spreads_evenly() {
    assert_eq!(expand_level(0, 1), 0);
    assert_eq!(expand_level(1, 1), 255);
    assert_eq!(
        (0..4).map(|v| expand_level(v, 2)).collect::<Vec<_>>(),
        vec![0, 85, 170, 255]
    );
    assert_eq!(expand_level(15, 4), 255);
    assert_eq!(expand_level(1, 4), 17);
    assert_eq!(expand_level(200, 8), 200);
}

#[test]
fn reduce_inverts_expand() {
    for bits in [1u32, 2, 3, 4, 5, 6, 8] {
        for v in 0..(1u32 << bits) {
            assert_eq!(reduce_level(expand_level(v, bits), bits), v, "bits={bits} v={v}");
        }
    }
}
