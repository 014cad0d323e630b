use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::assets::store::normalize_rel_path;
use crate::blit::mode::BlitMode;
use crate::foundation::core::{Area, Color, ColorDepth, Opa};
use crate::foundation::error::{BlitError, BlitResult};
use crate::scene::color::ColorDef;

/// Largest canvas side accepted from scene files.
pub const MAX_CANVAS_DIMENSION: u32 = 8192;

/// JSON-facing description of one frame: a canvas and the images drawn on it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scene {
    #[serde(default)]
    pub config: RenderConfig,
    pub canvas: CanvasSpec,
    /// Symbol name to image path, relative to the scene file.
    #[serde(default)]
    pub symbols: BTreeMap<String, String>,
    #[serde(default)]
    pub draws: Vec<DrawSpec>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RenderConfig {
    #[serde(default)]
    pub color_depth: ColorDepth,
    #[serde(default = "default_chroma_key")]
    pub chroma_key: ColorDef,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            color_depth: ColorDepth::default(),
            chroma_key: default_chroma_key(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CanvasSpec {
    pub width: u32,
    pub height: u32,
    #[serde(default = "default_background")]
    pub background: ColorDef,
}

impl CanvasSpec {
    pub fn area(&self) -> Area {
        Area::from_size(0, 0, self.width, self.height)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ImageRef {
    File { file: String },
    Symbol { symbol: String },
}

/// One `draw_image` call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrawSpec {
    pub image: ImageRef,
    #[serde(default)]
    pub x: i32,
    #[serde(default)]
    pub y: i32,
    /// Defaults to the whole canvas.
    #[serde(default)]
    pub clip: Option<Area>,
    #[serde(default)]
    pub mode: BlitMode,
    #[serde(default)]
    pub opa: Opa,
    #[serde(default = "default_foreground")]
    pub foreground: ColorDef,
    /// Checkerboard cell size for the `stencil` mode.
    #[serde(default)]
    pub stencil: Option<u32>,
}

fn default_chroma_key() -> ColorDef {
    ColorDef(Color::TRANSP)
}

fn default_background() -> ColorDef {
    ColorDef(Color::WHITE)
}

fn default_foreground() -> ColorDef {
    ColorDef(Color::BLACK)
}

impl Scene {
    /// Parse a scene from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> BlitResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| BlitError::validation(format!("parse scene JSON: {e}")))
    }

    pub fn from_json(s: &str) -> BlitResult<Self> {
        serde_json::from_str(s).map_err(|e| BlitError::validation(format!("parse scene JSON: {e}")))
    }

    /// Parse a scene from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> BlitResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            BlitError::validation(format!("open scene JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Check values serde cannot: canvas bounds, paths, symbol references.
    pub fn validate(&self) -> BlitResult<()> {
        let CanvasSpec { width, height, .. } = self.canvas;
        let in_range = |v: u32| (1..=MAX_CANVAS_DIMENSION).contains(&v);
        if !in_range(width) || !in_range(height) {
            return Err(BlitError::validation(format!(
                "canvas {width}x{height} must be within 1..={MAX_CANVAS_DIMENSION} on both sides"
            )));
        }
        for path in self.symbols.values() {
            normalize_rel_path(path)?;
        }
        for (i, draw) in self.draws.iter().enumerate() {
            match &draw.image {
                ImageRef::File { file } => {
                    if let Err(BlitError::Validation(msg)) = normalize_rel_path(file) {
                        return Err(BlitError::validation(format!("draws[{i}]: {msg}")));
                    }
                }
                ImageRef::Symbol { symbol } if !self.symbols.contains_key(symbol) => {
                    return Err(BlitError::validation(format!(
                        "draws[{i}]: unknown symbol '{symbol}'"
                    )));
                }
                ImageRef::Symbol { .. } => {}
            }
            if draw.stencil == Some(0) {
                return Err(BlitError::validation(format!(
                    "draws[{i}]: stencil cell size must be > 0"
                )));
            }
        }
        Ok(())
    }

    /// Every image path the scene reads, deduplicated.
    pub fn image_paths(&self) -> Vec<&str> {
        let mut paths: Vec<&str> = self
            .draws
            .iter()
            .filter_map(|d| match &d.image {
                ImageRef::File { file } => Some(file.as_str()),
                ImageRef::Symbol { .. } => None,
            })
            .chain(self.symbols.values().map(String::as_str))
            .collect();
        paths.sort_unstable();
        paths.dedup();
        paths
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/model.rs"]
mod tests;
