use crate::foundation::core::ColorDepth;

/// Pixel encodings an image can be stored in.
///
/// The discriminants are the 6-bit `format` codes of [`crate::ImageHeader`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
#[repr(u8)]
pub enum ColorFormat {
    /// 2-color palette.
    Indexed1 = 0,
    /// 4-color palette.
    Indexed2 = 1,
    /// 16-color palette.
    Indexed4 = 2,
    /// 256-color palette.
    Indexed8 = 3,
    /// One color, drawn or not.
    Alpha1 = 4,
    /// One color, 4 alpha levels.
    Alpha2 = 5,
    /// One color, 16 alpha levels.
    Alpha4 = 6,
    /// One color, 256 alpha levels.
    Alpha8 = 7,
    /// 1-bit index + 1-bit alpha.
    AlphaIndexed2 = 8,
    /// 2-bit index + 2-bit alpha.
    AlphaIndexed4 = 9,
    /// 4-bit index + 4-bit alpha.
    AlphaIndexed8 = 10,
    /// 8-bit index + 8-bit alpha.
    AlphaIndexed16 = 11,
    /// Color stored in the active [`ColorDepth`].
    TrueColor = 12,
    /// Same as `TrueColor`, every pixel followed by an alpha value.
    TrueColorAlpha = 13,
}

/// Which decoding path a format takes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormatFamily {
    Indexed,
    Alpha,
    AlphaIndexed,
    TrueColor,
}

impl ColorFormat {
    pub const ALL: [ColorFormat; 14] = [
        ColorFormat::Indexed1,
        ColorFormat::Indexed2,
        ColorFormat::Indexed4,
        ColorFormat::Indexed8,
        ColorFormat::Alpha1,
        ColorFormat::Alpha2,
        ColorFormat::Alpha4,
        ColorFormat::Alpha8,
        ColorFormat::AlphaIndexed2,
        ColorFormat::AlphaIndexed4,
        ColorFormat::AlphaIndexed8,
        ColorFormat::AlphaIndexed16,
        ColorFormat::TrueColor,
        ColorFormat::TrueColorAlpha,
    ];

    /// Map a header code to a format; `None` is the unknown-format sentinel.
    pub fn from_code(code: u8) -> Option<ColorFormat> {
        Self::ALL.get(usize::from(code)).copied()
    }

    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn family(self) -> FormatFamily {
        match self {
            ColorFormat::Indexed1
            | ColorFormat::Indexed2
            | ColorFormat::Indexed4
            | ColorFormat::Indexed8 => FormatFamily::Indexed,
            ColorFormat::Alpha1
            | ColorFormat::Alpha2
            | ColorFormat::Alpha4
            | ColorFormat::Alpha8 => FormatFamily::Alpha,
            ColorFormat::AlphaIndexed2
            | ColorFormat::AlphaIndexed4
            | ColorFormat::AlphaIndexed8
            | ColorFormat::AlphaIndexed16 => FormatFamily::AlphaIndexed,
            ColorFormat::TrueColor | ColorFormat::TrueColorAlpha => FormatFamily::TrueColor,
        }
    }

    /// Bits one pixel occupies in a row; true-color formats depend on `depth`.
    pub fn bits_per_pixel(self, depth: ColorDepth) -> u32 {
        match self {
            ColorFormat::Indexed1 | ColorFormat::Alpha1 => 1,
            ColorFormat::Indexed2 | ColorFormat::Alpha2 | ColorFormat::AlphaIndexed2 => 2,
            ColorFormat::Indexed4 | ColorFormat::Alpha4 | ColorFormat::AlphaIndexed4 => 4,
            ColorFormat::Indexed8 | ColorFormat::Alpha8 | ColorFormat::AlphaIndexed8 => 8,
            ColorFormat::AlphaIndexed16 => 16,
            ColorFormat::TrueColor => depth.bits(),
            ColorFormat::TrueColorAlpha => depth.alpha_pixel_bytes() as u32 * 8,
        }
    }

    /// Number of palette entries, `None` for formats without a palette.
    pub fn palette_size(self) -> Option<usize> {
        match self {
            ColorFormat::Indexed1 | ColorFormat::AlphaIndexed2 => Some(2),
            ColorFormat::Indexed2 | ColorFormat::AlphaIndexed4 => Some(4),
            ColorFormat::Indexed4 | ColorFormat::AlphaIndexed8 => Some(16),
            ColorFormat::Indexed8 | ColorFormat::AlphaIndexed16 => Some(256),
            _ => None,
        }
    }

    /// Number of distinct alpha values a pixel can encode, `None` when alpha is
    /// not part of the pixel value (indexed, plain true color).
    pub fn alpha_levels(self) -> Option<u32> {
        match self {
            ColorFormat::Alpha1 | ColorFormat::AlphaIndexed2 => Some(2),
            ColorFormat::Alpha2 | ColorFormat::AlphaIndexed4 => Some(4),
            ColorFormat::Alpha4 | ColorFormat::AlphaIndexed8 => Some(16),
            ColorFormat::Alpha8 | ColorFormat::AlphaIndexed16 | ColorFormat::TrueColorAlpha => {
                Some(256)
            }
            _ => None,
        }
    }

    /// Bytes in one row of `width` pixels; partial trailing bytes are padding.
    pub fn row_stride(self, width: u32, depth: ColorDepth) -> usize {
        (width as usize * self.bits_per_pixel(depth) as usize).div_ceil(8)
    }
}

impl std::fmt::Display for ColorFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ColorFormat::Indexed1 => "indexed-1",
            ColorFormat::Indexed2 => "indexed-2",
            ColorFormat::Indexed4 => "indexed-4",
            ColorFormat::Indexed8 => "indexed-8",
            ColorFormat::Alpha1 => "alpha-1",
            ColorFormat::Alpha2 => "alpha-2",
            ColorFormat::Alpha4 => "alpha-4",
            ColorFormat::Alpha8 => "alpha-8",
            ColorFormat::AlphaIndexed2 => "alpha-indexed-2",
            ColorFormat::AlphaIndexed4 => "alpha-indexed-4",
            ColorFormat::AlphaIndexed8 => "alpha-indexed-8",
            ColorFormat::AlphaIndexed16 => "alpha-indexed-16",
            ColorFormat::TrueColor => "true-color",
            ColorFormat::TrueColorAlpha => "true-color-alpha",
        };
        f.write_str(name)
    }
}

impl std::str::FromStr for ColorFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|f| f.to_string() == s)
            .ok_or_else(|| format!("unknown color format '{s}'"))
    }
}

impl TryFrom<String> for ColorFormat {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<ColorFormat> for String {
    fn from(f: ColorFormat) -> Self {
        f.to_string()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/image/format.rs"]
mod tests;
