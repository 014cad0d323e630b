//! pixblit draws compact-format images onto frame buffers.
//!
//! Images use a packed 32-bit header followed by an optional palette and
//! row-major pixel data: indexed, alpha-only, alpha+indexed and true-color
//! encodings, with sub-byte pixels packed MSB first. Drawing goes through a
//! [`Compositor`]:
//!
//! - Resolve an [`ImageSource`] (in-memory descriptor, serialized bytes, file
//!   from an [`ImageLoader`], or a named symbol)
//! - Clip it against the draw area, the clip rectangle and the [`DrawBuffer`]
//! - Combine each decoded pixel with the destination under a [`BlitMode`]
//!
//! [`Scene`] and [`render_scene`] wrap this in a JSON scene format rendered to
//! RGBA8, with images front-loaded by a [`PreparedImageStore`].
#![forbid(unsafe_code)]

mod assets;
mod blit;
mod foundation;
mod image;
mod scene;

pub use crate::foundation::core::{Area, Color, ColorDepth, Opa};
pub use crate::foundation::error::{BlitError, BlitResult};

pub use crate::image::decode::{DecodeParams, PixelDecoder, decode_pixel};
pub use crate::image::descriptor::{ImageDescriptor, PALETTE_ENTRY_LEN, Palette};
pub use crate::image::encode::ImageBuf;
pub use crate::image::format::{ColorFormat, FormatFamily};
pub use crate::image::header::{HEADER_LEN, ImageHeader, MAX_DIMENSION};
pub use crate::image::source::{ImageLoader, ImageSource, Resolver, SymbolTable};

pub use crate::blit::compositor::{
    Compositor, DrawBuffer, DrawStatus, ImageStyle, NoStencil, SkipReason, Stencil, draw_image,
};
pub use crate::blit::mode::BlitMode;

pub use crate::assets::convert::{ConvertOpts, convert_image_bytes, convert_rgba};
pub use crate::assets::store::{PreparedImageStore, normalize_rel_path};

pub use crate::scene::color::ColorDef;
pub use crate::scene::model::{
    CanvasSpec, DrawSpec, ImageRef, MAX_CANVAS_DIMENSION, RenderConfig, Scene,
};
pub use crate::scene::render::{
    Checker, Frame, RenderStats, render_scene, render_scene_file,
};
