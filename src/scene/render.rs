use std::path::Path;

use crate::assets::store::PreparedImageStore;
use crate::blit::compositor::{Compositor, DrawBuffer, DrawStatus, ImageStyle, Stencil};
use crate::foundation::core::{Area, Color, Opa};
use crate::foundation::error::BlitResult;
use crate::image::header::MAX_DIMENSION;
use crate::image::source::{ImageSource, Resolver};
use crate::scene::model::{DrawSpec, ImageRef, Scene};

/// Rendered canvas, row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl Frame {
    pub fn new(width: u32, height: u32, fill: Color) -> Self {
        Self {
            width,
            height,
            pixels: vec![fill; width as usize * height as usize],
        }
    }

    pub fn get(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    /// Opaque RGBA8 bytes, tightly packed.
    pub fn to_rgba8(&self) -> Vec<u8> {
        self.pixels
            .iter()
            .flat_map(|c| [c.r, c.g, c.b, 0xff])
            .collect()
    }
}

/// Totals of one [`render_scene`] pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    pub drawn: usize,
    pub skipped: usize,
    pub pixels: usize,
}

/// Checkerboard stencil with square cells.
#[derive(Clone, Copy, Debug)]
pub struct Checker {
    pub cell: u32,
}

impl Stencil for Checker {
    fn test(&self, x: i32, y: i32) -> bool {
        let cell = self.cell.max(1) as i32;
        (x.div_euclid(cell) + y.div_euclid(cell)).rem_euclid(2) == 0
    }
}

/// Draw every entry of `scene` over its background.
///
/// All images must already be in `store`; no IO happens here. Draws whose
/// image cannot be resolved are skipped and counted, not reported as errors.
#[tracing::instrument(skip_all, fields(draws = scene.draws.len()))]
pub fn render_scene(scene: &Scene, store: &PreparedImageStore) -> BlitResult<(Frame, RenderStats)> {
    scene.validate()?;
    let canvas = scene.canvas;
    let mut frame = Frame::new(canvas.width, canvas.height, canvas.background.into());

    let symbols = store.symbol_table(&scene.symbols)?;
    let resolver = Resolver::new(scene.config.color_depth)
        .with_loader(store)
        .with_symbols(&symbols);
    let compositor = Compositor::new(resolver);
    let mut dst = DrawBuffer::new(&mut frame.pixels, canvas.area())?;

    let mut stats = RenderStats::default();
    for (i, draw) in scene.draws.iter().enumerate() {
        let style = ImageStyle::new(draw.mode)
            .with_foreground(draw.foreground.into())
            .with_transparent_key(scene.config.chroma_key.into())
            .with_opa(draw.opa);
        let status = match draw.stencil {
            Some(cell) => {
                let checker = Checker { cell };
                draw_one(&compositor, &mut dst, draw, &style.with_stencil(&checker))
            }
            None => draw_one(&compositor, &mut dst, draw, &style),
        };
        if status.is_drawn() {
            stats.drawn += 1;
            stats.pixels += status.pixels_written();
        } else {
            tracing::debug!(index = i, ?status, "draw skipped");
            stats.skipped += 1;
        }
    }
    tracing::debug!(?stats, "scene rendered");
    Ok((frame, stats))
}

fn draw_one<S: Stencil>(
    compositor: &Compositor<'_>,
    dst: &mut DrawBuffer<'_>,
    draw: &DrawSpec,
    style: &ImageStyle<'_, S>,
) -> DrawStatus {
    let source = match &draw.image {
        ImageRef::File { file } => ImageSource::File(Path::new(file)),
        ImageRef::Symbol { symbol } => ImageSource::Symbol(symbol),
    };
    // The image's own size bounds the drawn area; coords only place it.
    let coords = Area::from_size(draw.x, draw.y, MAX_DIMENSION, MAX_DIMENSION);
    let clip = draw.clip.unwrap_or_else(|| dst.area());
    compositor.draw_image(dst, coords, clip, source, style, Opa::COVER)
}

/// Load the scene at `path`, read its images relative to the file, and render it.
pub fn render_scene_file(path: impl AsRef<Path>) -> BlitResult<(Frame, RenderStats)> {
    let path = path.as_ref();
    let scene = Scene::from_path(path)?;
    let root = path.parent().unwrap_or_else(|| Path::new("."));
    let store = PreparedImageStore::prepare(root, scene.image_paths())?;
    render_scene(&scene, &store)
}

impl From<&Frame> for image::RgbaImage {
    fn from(frame: &Frame) -> Self {
        image::RgbaImage::from_fn(frame.width, frame.height, |x, y| {
            let c = frame.get(x, y).unwrap_or_default();
            image::Rgba([c.r, c.g, c.b, 0xff])
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/render.rs"]
mod tests;
