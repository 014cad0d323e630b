use crate::blit::mode::{
    BlitMode, blit_add, blit_chroma_key, blit_copy, blit_mask, blit_mult, blit_over,
};
use crate::foundation::core::{Area, Color, ColorDepth, Opa};
use crate::foundation::error::{BlitError, BlitResult};
use crate::foundation::math::mul_div255_u8;
use crate::image::decode::{DecodeParams, PixelDecoder};
use crate::image::source::{ImageSource, Resolver};

/// Per-coordinate gate for [`BlitMode::Stencil`].
pub trait Stencil {
    fn test(&self, x: i32, y: i32) -> bool;
}

impl<F> Stencil for F
where
    F: Fn(i32, i32) -> bool,
{
    fn test(&self, x: i32, y: i32) -> bool {
        self(x, y)
    }
}

/// Stencil that lets every pixel through.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoStencil;

impl Stencil for NoStencil {
    fn test(&self, _x: i32, _y: i32) -> bool {
        true
    }
}

/// Already-resolved style values an image draw consumes.
pub struct ImageStyle<'s, S: Stencil = NoStencil> {
    pub mode: BlitMode,
    /// Color of alpha-only images.
    pub foreground: Color,
    /// Transparent key for chroma keying and masking.
    pub transparent_key: Color,
    /// Image opacity, combined with the call's opacity scale.
    pub opa: Opa,
    pub stencil: Option<&'s S>,
}

impl ImageStyle<'static, NoStencil> {
    pub fn new(mode: BlitMode) -> Self {
        Self {
            mode,
            foreground: Color::BLACK,
            transparent_key: Color::TRANSP,
            opa: Opa::COVER,
            stencil: None,
        }
    }
}

impl Default for ImageStyle<'static, NoStencil> {
    fn default() -> Self {
        Self::new(BlitMode::Over)
    }
}

impl<'s, S: Stencil> ImageStyle<'s, S> {
    pub fn with_foreground(mut self, color: Color) -> Self {
        self.foreground = color;
        self
    }

    pub fn with_transparent_key(mut self, color: Color) -> Self {
        self.transparent_key = color;
        self
    }

    pub fn with_opa(mut self, opa: Opa) -> Self {
        self.opa = opa;
        self
    }

    pub fn with_stencil<'t, T: Stencil>(self, stencil: &'t T) -> ImageStyle<'t, T> {
        ImageStyle {
            mode: self.mode,
            foreground: self.foreground,
            transparent_key: self.transparent_key,
            opa: self.opa,
            stencil: Some(stencil),
        }
    }
}

/// Destination pixels covering `area` of the screen, row-major.
#[derive(Debug)]
pub struct DrawBuffer<'a> {
    pixels: &'a mut [Color],
    area: Area,
}

impl<'a> DrawBuffer<'a> {
    pub fn new(pixels: &'a mut [Color], area: Area) -> BlitResult<Self> {
        if area.is_empty() || pixels.len() != area.size() {
            return Err(BlitError::validation(format!(
                "draw buffer has {} pixels, area {:?} needs {}",
                pixels.len(),
                area,
                area.size()
            )));
        }
        Ok(Self { pixels, area })
    }

    pub fn area(&self) -> Area {
        self.area
    }

    pub fn pixels(&self) -> &[Color] {
        self.pixels
    }

    /// Pixel at screen coordinate `(x, y)`.
    pub fn get(&self, x: i32, y: i32) -> Option<Color> {
        self.index(x, y).map(|i| self.pixels[i])
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if !self.area.contains(x, y) {
            return None;
        }
        let w = self.area.width() as usize;
        Some((y - self.area.y1) as usize * w + (x - self.area.x1) as usize)
    }
}

/// Why a draw call left the buffer untouched.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SkipReason {
    UnknownFormat(u8),
    UnresolvedSource,
    MalformedImage,
    EmptyRegion,
}

impl From<&BlitError> for SkipReason {
    fn from(err: &BlitError) -> Self {
        match err {
            BlitError::UnknownFormat(code) => SkipReason::UnknownFormat(*code),
            BlitError::EmptyRegion => SkipReason::EmptyRegion,
            BlitError::MalformedImage(_) | BlitError::Validation(_) => SkipReason::MalformedImage,
            BlitError::UnresolvedSource(_) | BlitError::Other(_) => SkipReason::UnresolvedSource,
        }
    }
}

/// Outcome of [`Compositor::draw_image`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DrawStatus {
    /// The clipped region was processed; `pixels` destination pixels were written.
    Drawn { pixels: usize },
    Skipped(SkipReason),
}

impl DrawStatus {
    pub fn is_drawn(self) -> bool {
        matches!(self, DrawStatus::Drawn { .. })
    }

    pub fn pixels_written(self) -> usize {
        match self {
            DrawStatus::Drawn { pixels } => pixels,
            DrawStatus::Skipped(_) => 0,
        }
    }
}

/// Draws images into a [`DrawBuffer`].
#[derive(Clone, Copy, Debug)]
pub struct Compositor<'r> {
    resolver: Resolver<'r>,
}

impl<'r> Compositor<'r> {
    pub fn new(resolver: Resolver<'r>) -> Self {
        Self { resolver }
    }

    pub fn resolver(&self) -> &Resolver<'r> {
        &self.resolver
    }

    /// Draw `source` with its top-left corner at `coords`' top-left.
    ///
    /// Only pixels inside `coords`, `clip` and the buffer are touched. Failures
    /// never propagate: an unresolvable or malformed image, or an empty region,
    /// is reported as [`DrawStatus::Skipped`].
    pub fn draw_image<S: Stencil>(
        &self,
        dst: &mut DrawBuffer<'_>,
        coords: Area,
        clip: Area,
        source: ImageSource<'_>,
        style: &ImageStyle<'_, S>,
        opa_scale: Opa,
    ) -> DrawStatus {
        match self.try_draw_image(dst, coords, clip, source, style, opa_scale) {
            Ok(pixels) => {
                tracing::trace!(pixels, mode = ?style.mode, "image drawn");
                DrawStatus::Drawn { pixels }
            }
            Err(err) => {
                tracing::debug!(error = %err, mode = ?style.mode, "image draw skipped");
                DrawStatus::Skipped(SkipReason::from(&err))
            }
        }
    }

    fn try_draw_image<S: Stencil>(
        &self,
        dst: &mut DrawBuffer<'_>,
        coords: Area,
        clip: Area,
        source: ImageSource<'_>,
        style: &ImageStyle<'_, S>,
        opa_scale: Opa,
    ) -> BlitResult<usize> {
        let desc = self.resolver.resolve(source)?;
        let region = desc
            .area_at(coords.x1, coords.y1)
            .intersect(coords)
            .and_then(|a| a.intersect(clip))
            .and_then(|a| a.intersect(dst.area))
            .ok_or(BlitError::EmptyRegion)?;

        let decoder = PixelDecoder::new(
            &desc,
            DecodeParams {
                depth: self.resolver.depth(),
                foreground: style.foreground,
                chroma_key: style.transparent_key,
                apply_chroma_key: style.mode != BlitMode::Alpha,
            },
        )?;
        let opa = mul_div255_u8(u16::from(style.opa.0), u16::from(opa_scale.0));
        let src_key = decoder.source_key();
        let dst_key = style.transparent_key;
        let walk = Walk {
            region,
            origin: (coords.x1, coords.y1),
            opa,
        };

        // Mode dispatch happens once per call; each arm monomorphizes its own pixel loop.
        let written = match style.mode {
            BlitMode::Over | BlitMode::Alpha => {
                walk.run(dst, &decoder, |s, a, d, _, _| blit_over(s, a, d))
            }
            BlitMode::Add => walk.run(dst, &decoder, |s, a, d, _, _| blit_add(s, a, d)),
            BlitMode::Mult => walk.run(dst, &decoder, |s, a, d, _, _| blit_mult(s, a, d)),
            BlitMode::ChromaKey => {
                walk.run(dst, &decoder, |s, a, _, _, _| blit_chroma_key(s, a, src_key))
            }
            BlitMode::Mask => {
                walk.run(dst, &decoder, |s, a, d, _, _| blit_mask(s, a, d, dst_key))
            }
            BlitMode::Stencil => match style.stencil {
                Some(stencil) => walk.run(dst, &decoder, |s, a, _, x, y| {
                    if stencil.test(x, y) { blit_copy(s, a) } else { None }
                }),
                None => walk.run(dst, &decoder, |s, a, _, _, _| blit_copy(s, a)),
            },
        };
        Ok(written)
    }
}

/// Clipped region walk shared by every mode.
struct Walk {
    region: Area,
    origin: (i32, i32),
    opa: u8,
}

impl Walk {
    #[inline(always)]
    fn run<F>(
        &self,
        dst: &mut DrawBuffer<'_>,
        decoder: &PixelDecoder<'_>,
        mut kernel: F,
    ) -> usize
    where
        F: FnMut(Color, u8, Color, i32, i32) -> Option<Color>,
    {
        if self.opa == 0 {
            return 0;
        }
        let dst_w = dst.area.width() as usize;
        let row_len = self.region.width() as usize;
        let mut written = 0;

        for y in self.region.y1..=self.region.y2 {
            let sy = (y - self.origin.1) as u32;
            let row_start =
                (y - dst.area.y1) as usize * dst_w + (self.region.x1 - dst.area.x1) as usize;
            let row = &mut dst.pixels[row_start..row_start + row_len];

            for (px, x) in row.iter_mut().zip(self.region.x1..) {
                let sx = (x - self.origin.0) as u32;
                let (color, alpha) = decoder.decode(sx, sy);
                let alpha = if self.opa == 255 {
                    alpha
                } else {
                    mul_div255_u8(u16::from(alpha), u16::from(self.opa))
                };
                if let Some(out) = kernel(color, alpha, *px, x, y) {
                    *px = out;
                    written += 1;
                }
            }
        }
        written
    }
}

/// Draw with a resolver that only knows in-memory sources.
pub fn draw_image<S: Stencil>(
    dst: &mut DrawBuffer<'_>,
    coords: Area,
    clip: Area,
    source: ImageSource<'_>,
    style: &ImageStyle<'_, S>,
    opa_scale: Opa,
    depth: ColorDepth,
) -> DrawStatus {
    Compositor::new(Resolver::new(depth)).draw_image(dst, coords, clip, source, style, opa_scale)
}

#[cfg(test)]
#[path = "../../tests/unit/blit/compositor.rs"]
mod tests;
