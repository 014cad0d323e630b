//! Per-pixel decoding of every [`ColorFormat`] into a `(color, alpha)` pair.
//!
//! Sub-byte pixels are packed most-significant-bit first: pixel 0 of a row sits
//! in the top bits of the row's first byte. Multi-byte palette pixels store the
//! index byte before the alpha byte; true-color pixels store their color bytes
//! in the layout of the active [`ColorDepth`].

use crate::foundation::core::{Color, ColorDepth};
use crate::foundation::error::{BlitError, BlitResult};
use crate::foundation::math::expand_level;
use crate::image::descriptor::{ImageDescriptor, Palette};
use crate::image::format::{ColorFormat, FormatFamily};

/// Values supplied by the caller (usually from a style) that decoding needs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DecodeParams {
    pub depth: ColorDepth,
    /// Color of alpha-only images.
    pub foreground: Color,
    /// Color treated as transparent in chroma-keyed images.
    pub chroma_key: Color,
    /// When false the header `chroma_keyed` flag is ignored.
    pub apply_chroma_key: bool,
}

impl Default for DecodeParams {
    fn default() -> Self {
        Self {
            depth: ColorDepth::default(),
            foreground: Color::BLACK,
            chroma_key: Color::TRANSP,
            apply_chroma_key: true,
        }
    }
}

/// Where a pixel lives inside the data slice.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct PixelLayout {
    pub(crate) bpp: u32,
    pub(crate) stride: usize,
    pub(crate) little_endian: bool,
}

impl PixelLayout {
    pub(crate) fn new(format: ColorFormat, width: u32, depth: ColorDepth) -> Self {
        Self {
            bpp: format.bits_per_pixel(depth),
            stride: format.row_stride(width, depth),
            little_endian: format.family() == FormatFamily::TrueColor,
        }
    }

    /// Byte offset of the pixel and, for sub-byte pixels, its right shift.
    #[inline]
    fn locate(self, x: u32, y: u32) -> (usize, u32) {
        let bit = x as usize * self.bpp as usize;
        let byte = y as usize * self.stride + bit / 8;
        let shift = if self.bpp < 8 {
            8 - self.bpp - (bit % 8) as u32
        } else {
            0
        };
        (byte, shift)
    }

    #[inline]
    pub(crate) fn read(self, data: &[u8], x: u32, y: u32) -> u32 {
        let (byte, shift) = self.locate(x, y);
        if self.bpp < 8 {
            let mask = (1u32 << self.bpp) - 1;
            return (u32::from(data[byte]) >> shift) & mask;
        }
        let bytes = &data[byte..byte + self.bpp as usize / 8];
        if self.little_endian {
            bytes.iter().rev().fold(0, |acc, &b| (acc << 8) | u32::from(b))
        } else {
            bytes.iter().fold(0, |acc, &b| (acc << 8) | u32::from(b))
        }
    }

    pub(crate) fn write(self, data: &mut [u8], x: u32, y: u32, value: u32) {
        let (byte, shift) = self.locate(x, y);
        if self.bpp < 8 {
            let mask = ((1u32 << self.bpp) - 1) as u8;
            let v = (value as u8) & mask;
            data[byte] = (data[byte] & !(mask << shift)) | (v << shift);
            return;
        }
        let n = self.bpp as usize / 8;
        let bytes = &mut data[byte..byte + n];
        for (i, b) in bytes.iter_mut().enumerate() {
            let k = if self.little_endian { i } else { n - 1 - i };
            *b = (value >> (8 * k)) as u8;
        }
    }
}

/// Decoder bound to one validated image.
///
/// Construction validates the descriptor, so [`PixelDecoder::decode`] never
/// reads past the data for in-bounds coordinates.
#[derive(Clone, Copy, Debug)]
pub struct PixelDecoder<'a> {
    data: &'a [u8],
    palette: Option<Palette<'a>>,
    format: ColorFormat,
    layout: PixelLayout,
    width: u32,
    height: u32,
    chroma_keyed: bool,
    params: DecodeParams,
    true_color_key: Color,
}

impl<'a> PixelDecoder<'a> {
    pub fn new(desc: &ImageDescriptor<'a>, params: DecodeParams) -> BlitResult<Self> {
        let format = desc.validate(params.depth)?;
        Ok(Self {
            data: desc.data(),
            palette: desc.palette(),
            format,
            layout: PixelLayout::new(format, desc.width(), params.depth),
            width: desc.width(),
            height: desc.height(),
            chroma_keyed: params.apply_chroma_key && desc.header().chroma_keyed(),
            params,
            true_color_key: params.depth.quantize(params.chroma_key),
        })
    }

    pub fn format(&self) -> ColorFormat {
        self.format
    }

    /// Transparent key as it appears in decoded colors of this image.
    ///
    /// True-color pixels come back quantized to the active depth, so their key
    /// is quantized the same way; palette colors are stored exactly.
    pub fn source_key(&self) -> Color {
        match self.format.family() {
            FormatFamily::TrueColor => self.true_color_key,
            _ => self.params.chroma_key,
        }
    }

    /// Undecoded pixel value.
    ///
    /// Palette and alpha formats return the packed index/level bits; true-color
    /// formats return the pixel bytes read as a little-endian integer.
    #[inline]
    pub fn raw(&self, x: u32, y: u32) -> u32 {
        debug_assert!(x < self.width && y < self.height, "pixel ({x}, {y}) out of image");
        self.layout.read(self.data, x, y)
    }

    /// Color and alpha of the pixel at `(x, y)`.
    ///
    /// Coordinates must lie inside the image.
    #[inline]
    pub fn decode(&self, x: u32, y: u32) -> (Color, u8) {
        let raw = self.raw(x, y);
        match self.format.family() {
            FormatFamily::Indexed => {
                let c = self.palette_color(raw as usize);
                (c, self.key_alpha(c, self.params.chroma_key, 255))
            }
            FormatFamily::Alpha => (self.params.foreground, expand_level(raw, self.layout.bpp)),
            FormatFamily::AlphaIndexed => {
                let half = self.layout.bpp / 2;
                let c = self.palette_color((raw >> half) as usize);
                let a = expand_level(raw & ((1 << half) - 1), half);
                (c, self.key_alpha(c, self.params.chroma_key, a))
            }
            FormatFamily::TrueColor => {
                let depth = self.params.depth;
                let px = raw.to_le_bytes();
                let c = depth.read(&px);
                let a = match self.format {
                    ColorFormat::TrueColorAlpha if depth == ColorDepth::Argb8888 => px[3],
                    ColorFormat::TrueColorAlpha => px[depth.color_bytes()],
                    _ => 255,
                };
                (c, self.key_alpha(c, self.true_color_key, a))
            }
        }
    }

    #[inline]
    fn palette_color(&self, index: usize) -> Color {
        // Validation guarantees a full palette.
        self.palette
            .and_then(|p| p.get(index))
            .unwrap_or_default()
    }

    #[inline]
    fn key_alpha(&self, c: Color, key: Color, a: u8) -> u8 {
        if self.chroma_keyed && c == key { 0 } else { a }
    }
}

/// One-shot decode of a single pixel.
pub fn decode_pixel(
    desc: &ImageDescriptor<'_>,
    params: DecodeParams,
    x: u32,
    y: u32,
) -> BlitResult<(Color, u8)> {
    if x >= desc.width() || y >= desc.height() {
        return Err(BlitError::validation(format!(
            "pixel ({x}, {y}) outside {}x{} image",
            desc.width(),
            desc.height()
        )));
    }
    Ok(PixelDecoder::new(desc, params)?.decode(x, y))
}

#[cfg(test)]
#[path = "../../tests/unit/image/decode.rs"]
mod tests;
