use crate::foundation::math::{expand_level, reduce_level};

/// Axis-aligned integer rectangle with inclusive bounds.
///
/// An area whose `x2 < x1` or `y2 < y1` is empty.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(from = "[i32; 4]", into = "[i32; 4]")]
pub struct Area {
    /// Left edge (inclusive).
    pub x1: i32,
    /// Top edge (inclusive).
    pub y1: i32,
    /// Right edge (inclusive).
    pub x2: i32,
    /// Bottom edge (inclusive).
    pub y2: i32,
}

impl Area {
    /// Build an area from its inclusive corners.
    pub const fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Build an area from a top-left corner and a size in pixels.
    ///
    /// A zero width or height gives an empty area. The far edge saturates at
    /// `i32::MAX`.
    pub fn from_size(x: i32, y: i32, width: u32, height: u32) -> Self {
        if width == 0 || height == 0 {
            return Self::new(0, 0, -1, -1);
        }
        let w = i32::try_from(width - 1).unwrap_or(i32::MAX);
        let h = i32::try_from(height - 1).unwrap_or(i32::MAX);
        Self {
            x1: x,
            y1: y,
            x2: x.saturating_add(w),
            y2: y.saturating_add(h),
        }
    }

    /// Width in pixels (0 when empty).
    pub fn width(self) -> u32 {
        (i64::from(self.x2) - i64::from(self.x1) + 1).max(0) as u32
    }

    /// Height in pixels (0 when empty).
    pub fn height(self) -> u32 {
        (i64::from(self.y2) - i64::from(self.y1) + 1).max(0) as u32
    }

    /// Number of pixels covered.
    pub fn size(self) -> usize {
        self.width() as usize * self.height() as usize
    }

    pub fn is_empty(self) -> bool {
        self.x2 < self.x1 || self.y2 < self.y1
    }

    pub fn contains(self, x: i32, y: i32) -> bool {
        self.x1 <= x && x <= self.x2 && self.y1 <= y && y <= self.y2
    }

    /// Common part of two areas, `None` if they do not overlap.
    pub fn intersect(self, other: Area) -> Option<Area> {
        let out = Area {
            x1: self.x1.max(other.x1),
            y1: self.y1.max(other.y1),
            x2: self.x2.min(other.x2),
            y2: self.y2.min(other.y2),
        };
        if out.is_empty() { None } else { Some(out) }
    }
}

impl From<[i32; 4]> for Area {
    fn from(v: [i32; 4]) -> Self {
        Self::new(v[0], v[1], v[2], v[3])
    }
}

impl From<Area> for [i32; 4] {
    fn from(a: Area) -> Self {
        [a.x1, a.y1, a.x2, a.y2]
    }
}

/// Straight (non-premultiplied) 24-bit color.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const LIME: Color = Color::rgb(0, 255, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);
    /// Default transparent key used for chroma keying and masking.
    pub const TRANSP: Color = Color::LIME;

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Storage depth of true-color pixels in image data.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorDepth {
    /// One byte per color: `rrrgggbb`.
    Rgb332,
    /// Two bytes per color, little-endian `rrrrrggggggbbbbb`.
    #[default]
    Rgb565,
    /// Four bytes per color: `[b, g, r, a]`.
    Argb8888,
}

impl ColorDepth {
    pub fn bits(self) -> u32 {
        match self {
            ColorDepth::Rgb332 => 8,
            ColorDepth::Rgb565 => 16,
            ColorDepth::Argb8888 => 32,
        }
    }

    pub fn color_bytes(self) -> usize {
        self.bits() as usize / 8
    }

    /// Bytes per pixel once an alpha channel is attached.
    ///
    /// `Argb8888` keeps the alpha in its fourth byte instead of appending one.
    pub fn alpha_pixel_bytes(self) -> usize {
        match self {
            ColorDepth::Rgb332 => 2,
            ColorDepth::Rgb565 => 3,
            ColorDepth::Argb8888 => 4,
        }
    }

    /// Decode one color from the first `color_bytes()` of `bytes`.
    pub fn read(self, bytes: &[u8]) -> Color {
        match self {
            ColorDepth::Rgb332 => {
                let v = u32::from(bytes[0]);
                Color::rgb(
                    expand_level(v >> 5, 3),
                    expand_level((v >> 2) & 0x7, 3),
                    expand_level(v & 0x3, 2),
                )
            }
            ColorDepth::Rgb565 => {
                let v = u32::from(u16::from_le_bytes([bytes[0], bytes[1]]));
                Color::rgb(
                    expand_level(v >> 11, 5),
                    expand_level((v >> 5) & 0x3f, 6),
                    expand_level(v & 0x1f, 5),
                )
            }
            ColorDepth::Argb8888 => Color::rgb(bytes[2], bytes[1], bytes[0]),
        }
    }

    /// Encode `c` into the first `color_bytes()` of `out`.
    pub fn write(self, c: Color, out: &mut [u8]) {
        match self {
            ColorDepth::Rgb332 => {
                let v =
                    (reduce_level(c.r, 3) << 5) | (reduce_level(c.g, 3) << 2) | reduce_level(c.b, 2);
                out[0] = v as u8;
            }
            ColorDepth::Rgb565 => {
                let v = (reduce_level(c.r, 5) << 11)
                    | (reduce_level(c.g, 6) << 5)
                    | reduce_level(c.b, 5);
                out[..2].copy_from_slice(&(v as u16).to_le_bytes());
            }
            ColorDepth::Argb8888 => {
                out[0] = c.b;
                out[1] = c.g;
                out[2] = c.r;
                out[3] = 0xff;
            }
        }
    }

    /// Nearest color representable at this depth.
    pub fn quantize(self, c: Color) -> Color {
        let mut buf = [0u8; 4];
        self.write(c, &mut buf);
        self.read(&buf)
    }
}

/// Opacity in `0..=255`; [`Opa::COVER`] leaves alphas untouched.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct Opa(pub u8);

impl Opa {
    pub const TRANSP: Opa = Opa(0);
    pub const COVER: Opa = Opa(255);

    /// Opacity from a percentage, clamped to 100 and rounded to nearest.
    pub fn from_percent(pct: u8) -> Self {
        let pct = u16::from(pct.min(100));
        Opa(((pct * 255 + 50) / 100) as u8)
    }
}

impl Default for Opa {
    fn default() -> Self {
        Opa::COVER
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
