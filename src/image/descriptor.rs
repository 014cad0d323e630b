use crate::foundation::core::{Area, Color, ColorDepth};
use crate::foundation::error::{BlitError, BlitResult};
use crate::image::format::ColorFormat;
use crate::image::header::{HEADER_LEN, ImageHeader};

/// Bytes per palette entry: `[b, g, r, a]`.
pub const PALETTE_ENTRY_LEN: usize = 4;

/// Borrowed color table of 4-byte `[b, g, r, a]` entries.
///
/// The entry alpha byte is kept for layout compatibility; decoding ignores it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette<'a>(&'a [u8]);

impl<'a> Palette<'a> {
    pub fn new(bytes: &'a [u8]) -> BlitResult<Self> {
        if !bytes.len().is_multiple_of(PALETTE_ENTRY_LEN) {
            return Err(BlitError::malformed(format!(
                "palette length {} is not a multiple of {PALETTE_ENTRY_LEN}",
                bytes.len()
            )));
        }
        Ok(Self(bytes))
    }

    pub fn len(self) -> usize {
        self.0.len() / PALETTE_ENTRY_LEN
    }

    pub fn is_empty(self) -> bool {
        self.0.is_empty()
    }

    pub fn bytes(self) -> &'a [u8] {
        self.0
    }

    pub fn get(self, index: usize) -> Option<Color> {
        let e = self
            .0
            .get(index * PALETTE_ENTRY_LEN..(index + 1) * PALETTE_ENTRY_LEN)?;
        Some(Color::rgb(e[2], e[1], e[0]))
    }

    /// Serialize colors into palette bytes (alpha byte set to 0xff).
    pub fn encode(colors: &[Color]) -> Vec<u8> {
        colors.iter().flat_map(|c| [c.b, c.g, c.r, 0xff]).collect()
    }
}

/// Non-owning view of an image: header, pixel bytes and optional palette.
///
/// The descriptor never copies or frees pixel data; whoever owns the bytes
/// (a `static` array, a [`crate::PreparedImageStore`], an [`crate::ImageBuf`])
/// must outlive it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageDescriptor<'a> {
    header: ImageHeader,
    data: &'a [u8],
    palette: Option<Palette<'a>>,
}

impl<'a> ImageDescriptor<'a> {
    pub fn new(header: ImageHeader, data: &'a [u8], palette: Option<Palette<'a>>) -> Self {
        Self {
            header,
            data,
            palette,
        }
    }

    /// Split a serialized image into header, palette and pixel views.
    ///
    /// Layout: 4-byte little-endian header, then `palette_size * 4` palette
    /// bytes for palette formats, then row-major pixel data.
    pub fn from_bytes(bytes: &'a [u8]) -> BlitResult<Self> {
        let Some((head, rest)) = bytes.split_first_chunk::<HEADER_LEN>() else {
            return Err(BlitError::malformed(format!(
                "{} bytes is shorter than the image header",
                bytes.len()
            )));
        };
        let header = ImageHeader::from_le_bytes(*head);
        let format = header.format()?;

        let Some(entries) = format.palette_size() else {
            return Ok(Self::new(header, rest, None));
        };
        let palette_len = entries * PALETTE_ENTRY_LEN;
        if rest.len() < palette_len {
            return Err(BlitError::malformed(format!(
                "{format} image needs a {palette_len}-byte palette, found {} bytes",
                rest.len()
            )));
        }
        let (palette, data) = rest.split_at(palette_len);
        Ok(Self::new(header, data, Some(Palette::new(palette)?)))
    }

    pub fn header(&self) -> ImageHeader {
        self.header
    }

    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    pub fn palette(&self) -> Option<Palette<'a>> {
        self.palette
    }

    pub fn width(&self) -> u32 {
        self.header.width()
    }

    pub fn height(&self) -> u32 {
        self.header.height()
    }

    /// Format pixels are actually laid out in.
    ///
    /// A `TrueColor` header with `alpha_byte` set stores one alpha byte after
    /// every color, exactly like `TrueColorAlpha`.
    pub fn pixel_format(&self) -> BlitResult<ColorFormat> {
        match self.header.format()? {
            ColorFormat::TrueColor if self.header.alpha_byte() => Ok(ColorFormat::TrueColorAlpha),
            f => Ok(f),
        }
    }

    pub fn row_stride(&self, depth: ColorDepth) -> BlitResult<usize> {
        Ok(self.pixel_format()?.row_stride(self.width(), depth))
    }

    /// Area the image covers when its top-left corner sits at `(x, y)`.
    pub fn area_at(&self, x: i32, y: i32) -> Area {
        Area::from_size(x, y, self.width(), self.height())
    }

    /// Check that the payload matches the header for the given depth.
    pub fn validate(&self, depth: ColorDepth) -> BlitResult<ColorFormat> {
        let format = self.pixel_format()?;

        if let Some(needed) = format.palette_size() {
            let have = self.palette.map_or(0, |p| p.len());
            if have < needed {
                return Err(BlitError::malformed(format!(
                    "{format} image needs {needed} palette entries, found {have}"
                )));
            }
        }

        let needed = format.row_stride(self.width(), depth) * self.height() as usize;
        if self.data.len() < needed {
            return Err(BlitError::malformed(format!(
                "{}x{} {format} image needs {needed} data bytes, found {}",
                self.width(),
                self.height(),
                self.data.len()
            )));
        }
        Ok(format)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/image/descriptor.rs"]
mod tests;
