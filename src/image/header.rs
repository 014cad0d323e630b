//! Packed 32-bit image header.
//!
//! Layout, least significant bit first:
//!
//! | bits   | field          |
//! |--------|----------------|
//! | 0      | `chroma_keyed` |
//! | 1      | `alpha_byte`   |
//! | 2..8   | `format`       |
//! | 8..20  | `width`        |
//! | 20..32 | `height`       |
//!
//! Serialized as a little-endian `u32`. Fields are read and written with explicit
//! shifts so pre-generated image data stays binary compatible.

use crate::foundation::error::{BlitError, BlitResult};
use crate::image::format::ColorFormat;

const CHROMA_SHIFT: u32 = 0;
const ALPHA_BYTE_SHIFT: u32 = 1;
const FORMAT_SHIFT: u32 = 2;
const FORMAT_MASK: u32 = 0x3f;
const WIDTH_SHIFT: u32 = 8;
const HEIGHT_SHIFT: u32 = 20;
const DIM_MASK: u32 = 0xfff;

/// Largest width or height a header can carry.
pub const MAX_DIMENSION: u32 = DIM_MASK;

/// Size of a serialized header in bytes.
pub const HEADER_LEN: usize = 4;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ImageHeader(u32);

impl ImageHeader {
    /// Pack a header; fails if a dimension does not fit in 12 bits.
    pub fn new(format: ColorFormat, width: u32, height: u32) -> BlitResult<Self> {
        if width > MAX_DIMENSION || height > MAX_DIMENSION {
            return Err(BlitError::validation(format!(
                "image {width}x{height} exceeds {MAX_DIMENSION}x{MAX_DIMENSION}"
            )));
        }
        Ok(Self(
            (u32::from(format.code()) << FORMAT_SHIFT)
                | (width << WIDTH_SHIFT)
                | (height << HEIGHT_SHIFT),
        ))
    }

    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u32 {
        self.0
    }

    pub fn from_le_bytes(bytes: [u8; HEADER_LEN]) -> Self {
        Self(u32::from_le_bytes(bytes))
    }

    pub fn to_le_bytes(self) -> [u8; HEADER_LEN] {
        self.0.to_le_bytes()
    }

    pub fn chroma_keyed(self) -> bool {
        (self.0 >> CHROMA_SHIFT) & 1 == 1
    }

    pub fn alpha_byte(self) -> bool {
        (self.0 >> ALPHA_BYTE_SHIFT) & 1 == 1
    }

    /// Raw 6-bit format code, possibly not a defined format.
    pub fn format_code(self) -> u8 {
        ((self.0 >> FORMAT_SHIFT) & FORMAT_MASK) as u8
    }

    pub fn format(self) -> BlitResult<ColorFormat> {
        let code = self.format_code();
        ColorFormat::from_code(code).ok_or(BlitError::UnknownFormat(code))
    }

    pub fn width(self) -> u32 {
        (self.0 >> WIDTH_SHIFT) & DIM_MASK
    }

    pub fn height(self) -> u32 {
        (self.0 >> HEIGHT_SHIFT) & DIM_MASK
    }

    pub fn with_chroma_keyed(self, on: bool) -> Self {
        self.with_bit(CHROMA_SHIFT, on)
    }

    pub fn with_alpha_byte(self, on: bool) -> Self {
        self.with_bit(ALPHA_BYTE_SHIFT, on)
    }

    fn with_bit(self, shift: u32, on: bool) -> Self {
        if on {
            Self(self.0 | (1 << shift))
        } else {
            Self(self.0 & !(1 << shift))
        }
    }
}

impl std::fmt::Debug for ImageHeader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageHeader")
            .field("chroma_keyed", &self.chroma_keyed())
            .field("alpha_byte", &self.alpha_byte())
            .field("format", &self.format_code())
            .field("width", &self.width())
            .field("height", &self.height())
            .finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/image/header.rs"]
mod tests;
