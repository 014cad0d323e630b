pub(crate) fn mul_div255_u16(x: u16, y: u16) -> u16 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u16
}

pub(crate) fn mul_div255_u8(x: u16, y: u16) -> u8 {
    mul_div255_u16(x, y) as u8
}

/// Move `dst` toward `src` by `a / 255`, rounding to nearest.
pub(crate) fn lerp_u8(dst: u8, src: u8, a: u8) -> u8 {
    let a = u32::from(a);
    let inv = 255 - a;
    ((u32::from(src) * a + u32::from(dst) * inv + 127) / 255) as u8
}

/// Expand an `bits`-wide level to the full 0..=255 range.
pub(crate) fn expand_level(v: u32, bits: u32) -> u8 {
    let max = (1u32 << bits) - 1;
    ((v.min(max) * 255 + max / 2) / max) as u8
}

/// Inverse of [`expand_level`]: nearest `bits`-wide level for a 0..=255 value.
pub(crate) fn reduce_level(c: u8, bits: u32) -> u32 {
    let max = (1u32 << bits) - 1;
    (u32::from(c) * max + 127) / 255
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
