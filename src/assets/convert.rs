//! Raster to binary image conversion.
//!
//! Input images come through the `image` crate as straight RGBA8. Pixels with
//! alpha below 128 count as transparent for formats without an alpha channel.

use anyhow::Context as _;

use crate::foundation::core::{Color, ColorDepth};
use crate::foundation::error::{BlitError, BlitResult};
use crate::foundation::math::reduce_level;
use crate::image::encode::ImageBuf;
use crate::image::format::{ColorFormat, FormatFamily};

/// Target layout of a conversion.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ConvertOpts {
    pub format: ColorFormat,
    pub depth: ColorDepth,
    /// Transparent pixels are replaced by this color and the image is marked
    /// chroma keyed. Ignored by alpha-only formats.
    pub chroma_key: Option<Color>,
}

impl ConvertOpts {
    pub fn new(format: ColorFormat) -> Self {
        Self {
            format,
            depth: ColorDepth::default(),
            chroma_key: None,
        }
    }
}

/// Decode `bytes` (PNG, JPEG, ...) and convert them.
pub fn convert_image_bytes(bytes: &[u8], opts: &ConvertOpts) -> BlitResult<ImageBuf> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    convert_rgba(&dyn_img.to_rgba8(), opts)
}

/// Pack an RGBA8 image into `opts.format`.
#[tracing::instrument(skip(src), fields(width = src.width(), height = src.height()))]
pub fn convert_rgba(src: &image::RgbaImage, opts: &ConvertOpts) -> BlitResult<ImageBuf> {
    let (width, height) = src.dimensions();
    let format = opts.format;
    let keyed = opts.chroma_key.is_some() && format.family() != FormatFamily::Alpha;
    let mut out = ImageBuf::new(format, width, height, opts.depth)?.with_chroma_keyed(keyed);
    let bpp = format.bits_per_pixel(opts.depth);

    let visible = |px: &image::Rgba<u8>| -> (Color, u8) {
        let [r, g, b, a] = px.0;
        match opts.chroma_key {
            Some(key) if a < 128 => (key, 0),
            _ => (Color::rgb(r, g, b), a),
        }
    };

    match format.family() {
        FormatFamily::TrueColor => {
            for (x, y, px) in src.enumerate_pixels() {
                let (c, a) = visible(px);
                out.set_color(x, y, c, a)?;
            }
        }
        FormatFamily::Alpha => {
            for (x, y, px) in src.enumerate_pixels() {
                out.set_raw(x, y, reduce_level(px.0[3], bpp))?;
            }
        }
        FormatFamily::Indexed => {
            let mut palette = PaletteBuilder::new(format)?;
            for (x, y, px) in src.enumerate_pixels() {
                let index = palette.index_of(visible(px).0)?;
                out.set_raw(x, y, index)?;
            }
            out.set_palette(&palette.colors)?;
        }
        FormatFamily::AlphaIndexed => {
            let half = bpp / 2;
            let mut palette = PaletteBuilder::new(format)?;
            for (x, y, px) in src.enumerate_pixels() {
                let (c, a) = visible(px);
                let index = palette.index_of(c)?;
                out.set_raw(x, y, (index << half) | reduce_level(a, half))?;
            }
            out.set_palette(&palette.colors)?;
        }
    }
    tracing::debug!(%format, chroma_keyed = keyed, "image converted");
    Ok(out)
}

/// Distinct colors in first-seen order, bounded by the format's palette size.
struct PaletteBuilder {
    format: ColorFormat,
    capacity: usize,
    colors: Vec<Color>,
}

impl PaletteBuilder {
    fn new(format: ColorFormat) -> BlitResult<Self> {
        let capacity = format
            .palette_size()
            .ok_or_else(|| BlitError::validation(format!("{format} has no palette")))?;
        Ok(Self {
            format,
            capacity,
            colors: Vec::new(),
        })
    }

    fn index_of(&mut self, c: Color) -> BlitResult<u32> {
        if let Some(i) = self.colors.iter().position(|p| *p == c) {
            return Ok(i as u32);
        }
        if self.colors.len() == self.capacity {
            return Err(BlitError::validation(format!(
                "image has more than {} distinct colors, too many for {}",
                self.capacity, self.format
            )));
        }
        self.colors.push(c);
        Ok(self.colors.len() as u32 - 1)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/convert.rs"]
mod tests;
