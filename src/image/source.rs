use std::collections::HashMap;
use std::path::Path;

use crate::foundation::core::ColorDepth;
use crate::foundation::error::{BlitError, BlitResult};
use crate::image::descriptor::ImageDescriptor;

/// Opaque reference to an image, resolved right before drawing.
#[derive(Clone, Copy, Debug)]
pub enum ImageSource<'a> {
    /// Descriptor already in memory (compiled-in array, decoded buffer).
    Variable(ImageDescriptor<'a>),
    /// Serialized image bytes (header, palette, pixels) in memory.
    Bytes(&'a [u8]),
    /// Image provided by the file loader.
    File(&'a Path),
    /// Name of an image registered in a [`SymbolTable`].
    Symbol(&'a str),
    /// Source of unrecognized type; never resolves.
    Unknown,
}

impl<'a> From<ImageDescriptor<'a>> for ImageSource<'a> {
    fn from(desc: ImageDescriptor<'a>) -> Self {
        ImageSource::Variable(desc)
    }
}

impl<'a> From<&'a Path> for ImageSource<'a> {
    fn from(path: &'a Path) -> Self {
        ImageSource::File(path)
    }
}

/// File-loading collaborator.
///
/// Implementations own the image bytes and hand out borrowed descriptors, so
/// loading (IO, decoding) happens before drawing, not during it.
pub trait ImageLoader {
    fn load(&self, path: &Path) -> BlitResult<ImageDescriptor<'_>>;
}

/// Built-in images addressed by name (icons and the like).
#[derive(Clone, Debug, Default)]
pub struct SymbolTable<'a> {
    entries: HashMap<String, ImageDescriptor<'a>>,
}

impl<'a> SymbolTable<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `desc` under `name`, returning the entry it replaced.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        desc: ImageDescriptor<'a>,
    ) -> Option<ImageDescriptor<'a>> {
        self.entries.insert(name.into(), desc)
    }

    pub fn get(&self, name: &str) -> Option<ImageDescriptor<'a>> {
        self.entries.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Maps an [`ImageSource`] to a validated [`ImageDescriptor`].
#[derive(Clone, Copy)]
pub struct Resolver<'r> {
    depth: ColorDepth,
    loader: Option<&'r dyn ImageLoader>,
    symbols: Option<&'r SymbolTable<'r>>,
}

impl std::fmt::Debug for Resolver<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resolver")
            .field("depth", &self.depth)
            .field("has_loader", &self.loader.is_some())
            .field("symbols", &self.symbols.map_or(0, SymbolTable::len))
            .finish()
    }
}

impl<'r> Resolver<'r> {
    /// Resolver for in-memory sources only.
    pub fn new(depth: ColorDepth) -> Self {
        Self {
            depth,
            loader: None,
            symbols: None,
        }
    }

    pub fn with_loader(mut self, loader: &'r dyn ImageLoader) -> Self {
        self.loader = Some(loader);
        self
    }

    pub fn with_symbols(mut self, symbols: &'r SymbolTable<'r>) -> Self {
        self.symbols = Some(symbols);
        self
    }

    pub fn depth(&self) -> ColorDepth {
        self.depth
    }

    /// Resolve and validate `source` for this resolver's color depth.
    pub fn resolve<'a>(&self, source: ImageSource<'a>) -> BlitResult<ImageDescriptor<'a>>
    where
        'r: 'a,
    {
        let desc = match source {
            ImageSource::Variable(desc) => desc,
            ImageSource::Bytes(bytes) => ImageDescriptor::from_bytes(bytes)?,
            ImageSource::File(path) => {
                let loader = self.loader.ok_or_else(|| {
                    BlitError::unresolved(format!("no file loader for '{}'", path.display()))
                })?;
                loader.load(path)?
            }
            ImageSource::Symbol(name) => self
                .symbols
                .and_then(|s| s.get(name))
                .ok_or_else(|| BlitError::unresolved(format!("unregistered symbol '{name}'")))?,
            ImageSource::Unknown => {
                return Err(BlitError::unresolved("unknown source type"));
            }
        };
        desc.validate(self.depth)?;
        Ok(desc)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/image/source.rs"]
mod tests;
