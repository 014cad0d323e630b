//! Blit mode table.
//!
//! Every kernel takes the source color, the source alpha already scaled by the
//! draw opacity, and the current destination color, and returns the new
//! destination color or `None` to leave the pixel untouched. A scaled alpha of 0
//! never writes, whatever the mode.

use crate::foundation::core::Color;
use crate::foundation::math::{lerp_u8, mul_div255_u8};

/// Rule combining a source pixel with the destination.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlitMode {
    /// Copy, blending by alpha.
    #[default]
    Over,
    /// Add the alpha-weighted source to the destination.
    Add,
    /// Multiply the destination by the source.
    Mult,
    /// Copy every source pixel that is not the transparent key.
    ChromaKey,
    /// Like `Over`, with alpha only from the image's own alpha channel.
    Alpha,
    /// Copy only onto destination pixels that are not the transparent key.
    Mask,
    /// Copy only where the caller's stencil test passes.
    Stencil,
}

impl BlitMode {
    pub const ALL: [BlitMode; 7] = [
        BlitMode::Over,
        BlitMode::Add,
        BlitMode::Mult,
        BlitMode::ChromaKey,
        BlitMode::Alpha,
        BlitMode::Mask,
        BlitMode::Stencil,
    ];

    /// Apply this mode to one pixel.
    ///
    /// Scalar form of the kernels [`crate::Compositor::draw_image`] runs; the
    /// compositor picks the same kernel once per call instead of per pixel.
    ///
    /// `key` is the transparent color for `ChromaKey` and `Mask`. The stencil
    /// test needs destination coordinates, so `Stencil` here is the plain copy
    /// performed once the test has passed.
    #[inline]
    pub fn apply(self, src: Color, alpha: u8, dst: Color, key: Color) -> Option<Color> {
        match self {
            BlitMode::Over | BlitMode::Alpha => blit_over(src, alpha, dst),
            BlitMode::Add => blit_add(src, alpha, dst),
            BlitMode::Mult => blit_mult(src, alpha, dst),
            BlitMode::ChromaKey => blit_chroma_key(src, alpha, key),
            BlitMode::Mask => blit_mask(src, alpha, dst, key),
            BlitMode::Stencil => blit_copy(src, alpha),
        }
    }
}

impl std::str::FromStr for BlitMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "over" => Ok(BlitMode::Over),
            "add" => Ok(BlitMode::Add),
            "mult" => Ok(BlitMode::Mult),
            "chroma_key" => Ok(BlitMode::ChromaKey),
            "alpha" => Ok(BlitMode::Alpha),
            "mask" => Ok(BlitMode::Mask),
            "stencil" => Ok(BlitMode::Stencil),
            _ => Err(format!("unknown blit mode '{s}'")),
        }
    }
}

#[inline]
pub(crate) fn blit_over(src: Color, alpha: u8, dst: Color) -> Option<Color> {
    match alpha {
        0 => None,
        255 => Some(src),
        a => Some(Color::rgb(
            lerp_u8(dst.r, src.r, a),
            lerp_u8(dst.g, src.g, a),
            lerp_u8(dst.b, src.b, a),
        )),
    }
}

#[inline]
pub(crate) fn blit_add(src: Color, alpha: u8, dst: Color) -> Option<Color> {
    if alpha == 0 {
        return None;
    }
    let a = u16::from(alpha);
    let add = |d: u8, s: u8| d.saturating_add(mul_div255_u8(u16::from(s), a));
    Some(Color::rgb(
        add(dst.r, src.r),
        add(dst.g, src.g),
        add(dst.b, src.b),
    ))
}

#[inline]
pub(crate) fn blit_mult(src: Color, alpha: u8, dst: Color) -> Option<Color> {
    if alpha == 0 {
        return None;
    }
    let mul = |d: u8, s: u8| lerp_u8(d, mul_div255_u8(u16::from(d), u16::from(s)), alpha);
    Some(Color::rgb(
        mul(dst.r, src.r),
        mul(dst.g, src.g),
        mul(dst.b, src.b),
    ))
}

#[inline]
pub(crate) fn blit_chroma_key(src: Color, alpha: u8, key: Color) -> Option<Color> {
    if src == key { None } else { blit_copy(src, alpha) }
}

#[inline]
pub(crate) fn blit_mask(src: Color, alpha: u8, dst: Color, key: Color) -> Option<Color> {
    if dst == key { None } else { blit_copy(src, alpha) }
}

/// Binary copy: drawn fully unless fully transparent.
#[inline]
pub(crate) fn blit_copy(src: Color, alpha: u8) -> Option<Color> {
    if alpha == 0 { None } else { Some(src) }
}

#[cfg(test)]
#[path = "../../tests/unit/blit/mode.rs"]
mod tests;
