use crate::foundation::core::{Color, ColorDepth};
use crate::foundation::error::{BlitError, BlitResult};
use crate::image::decode::PixelLayout;
use crate::image::descriptor::{ImageDescriptor, PALETTE_ENTRY_LEN, Palette};
use crate::image::format::{ColorFormat, FormatFamily};
use crate::image::header::{HEADER_LEN, ImageHeader};

/// Owned image in the binary layout [`ImageDescriptor`] reads.
///
/// This is the producer side of the format: converters and tests pack pixels
/// here, then hand out a borrowed descriptor or serialize it with
/// [`ImageBuf::to_bytes`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageBuf {
    header: ImageHeader,
    format: ColorFormat,
    depth: ColorDepth,
    layout: PixelLayout,
    palette: Vec<u8>,
    data: Vec<u8>,
}

impl ImageBuf {
    /// Zero-filled image; palette formats get an all-black palette.
    pub fn new(
        format: ColorFormat,
        width: u32,
        height: u32,
        depth: ColorDepth,
    ) -> BlitResult<Self> {
        let header = ImageHeader::new(format, width, height)?;
        let layout = PixelLayout::new(format, width, depth);
        let palette = match format.palette_size() {
            Some(n) => Palette::encode(&vec![Color::BLACK; n]),
            None => Vec::new(),
        };
        Ok(Self {
            header,
            format,
            depth,
            layout,
            palette,
            data: vec![0; layout.stride * height as usize],
        })
    }

    pub fn with_chroma_keyed(mut self, on: bool) -> Self {
        self.header = self.header.with_chroma_keyed(on);
        self
    }

    pub fn header(&self) -> ImageHeader {
        self.header
    }

    pub fn depth(&self) -> ColorDepth {
        self.depth
    }

    pub fn format(&self) -> ColorFormat {
        self.format
    }

    pub fn width(&self) -> u32 {
        self.header.width()
    }

    pub fn height(&self) -> u32 {
        self.header.height()
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Fill the leading palette entries; the rest keep their previous value.
    pub fn set_palette(&mut self, colors: &[Color]) -> BlitResult<()> {
        let capacity = self.palette.len() / PALETTE_ENTRY_LEN;
        if colors.len() > capacity {
            return Err(BlitError::validation(format!(
                "{} palette colors do not fit a {}-entry {} palette",
                colors.len(),
                capacity,
                self.format()
            )));
        }
        let bytes = Palette::encode(colors);
        self.palette[..bytes.len()].copy_from_slice(&bytes);
        Ok(())
    }

    /// Store an undecoded pixel value (see [`crate::PixelDecoder::raw`]).
    pub fn set_raw(&mut self, x: u32, y: u32, value: u32) -> BlitResult<()> {
        self.check_bounds(x, y)?;
        self.layout.write(&mut self.data, x, y, value);
        Ok(())
    }

    /// Store a true-color pixel, with `alpha` used only by formats that carry one.
    pub fn set_color(&mut self, x: u32, y: u32, color: Color, alpha: u8) -> BlitResult<()> {
        let format = self.format();
        if format.family() != FormatFamily::TrueColor {
            return Err(BlitError::validation(format!(
                "set_color needs a true-color image, not {format}"
            )));
        }
        let mut px = [0u8; 4];
        self.depth.write(color, &mut px);
        if format == ColorFormat::TrueColorAlpha {
            let at = match self.depth {
                ColorDepth::Argb8888 => 3,
                d => d.color_bytes(),
            };
            px[at] = alpha;
        }
        self.set_raw(x, y, u32::from_le_bytes(px))
    }

    /// Borrowed view over this buffer.
    pub fn descriptor(&self) -> ImageDescriptor<'_> {
        let palette = Palette::new(&self.palette).ok().filter(|p| !p.is_empty());
        ImageDescriptor::new(self.header, &self.data, palette)
    }

    /// Header, palette and pixel bytes as one blob.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(HEADER_LEN + self.palette.len() + self.data.len());
        out.extend_from_slice(&self.header.to_le_bytes());
        out.extend_from_slice(&self.palette);
        out.extend_from_slice(&self.data);
        out
    }

    fn check_bounds(&self, x: u32, y: u32) -> BlitResult<()> {
        if x >= self.width() || y >= self.height() {
            return Err(BlitError::validation(format!(
                "pixel ({x}, {y}) outside {}x{} image",
                self.width(),
                self.height()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/image/encode.rs"]
mod tests;
