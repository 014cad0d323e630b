use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::foundation::error::{BlitError, BlitResult};
use crate::image::descriptor::ImageDescriptor;
use crate::image::source::{ImageLoader, SymbolTable};

/// Serialized images read from disk ahead of drawing.
///
/// This front-loads file IO so draw calls only borrow bytes that are already in
/// memory. Entries are keyed by their normalized relative path.
#[derive(Clone, Debug, Default)]
pub struct PreparedImageStore {
    root: PathBuf,
    images: HashMap<String, Vec<u8>>,
}

impl PreparedImageStore {
    /// Empty store resolving relative paths against `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            images: HashMap::new(),
        }
    }

    /// Read and check every image in `paths`.
    #[tracing::instrument(skip_all)]
    pub fn prepare<'p>(
        root: impl AsRef<Path>,
        paths: impl IntoIterator<Item = &'p str>,
    ) -> BlitResult<Self> {
        let mut out = Self::new(root.as_ref());
        for path in paths {
            out.preload(path)?;
        }
        tracing::debug!(root = %out.root.display(), images = out.len(), "image store prepared");
        Ok(out)
    }

    /// Return root directory used when resolving relative image paths.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Read `path` from disk unless it is already loaded.
    pub fn preload(&mut self, path: &str) -> BlitResult<()> {
        let key = normalize_rel_path(path)?;
        if self.images.contains_key(&key) {
            return Ok(());
        }
        let bytes = self.read_bytes(&key)?;
        self.insert_bytes(&key, bytes)
    }

    /// Register serialized image bytes under `path` without touching the disk.
    pub fn insert_bytes(&mut self, path: &str, bytes: Vec<u8>) -> BlitResult<()> {
        let key = normalize_rel_path(path)?;
        ImageDescriptor::from_bytes(&bytes)?;
        tracing::trace!(path = %key, len = bytes.len(), "image registered");
        self.images.insert(key, bytes);
        Ok(())
    }

    pub fn get(&self, path: &str) -> Option<&[u8]> {
        let key = normalize_rel_path(path).ok()?;
        self.images.get(&key).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Build a symbol table mapping each name to an already loaded image.
    pub fn symbol_table(&self, symbols: &BTreeMap<String, String>) -> BlitResult<SymbolTable<'_>> {
        let mut table = SymbolTable::new();
        for (name, path) in symbols {
            let bytes = self.get(path).ok_or_else(|| {
                BlitError::unresolved(format!("symbol '{name}' refers to unloaded image '{path}'"))
            })?;
            table.register(name.as_str(), ImageDescriptor::from_bytes(bytes)?);
        }
        Ok(table)
    }

    fn read_bytes(&self, norm_path: &str) -> BlitResult<Vec<u8>> {
        let path = self.root.join(Path::new(norm_path));
        std::fs::read(&path)
            .with_context(|| format!("read image bytes from '{}'", path.display()))
            .map_err(BlitError::from)
    }
}

impl ImageLoader for PreparedImageStore {
    fn load(&self, path: &Path) -> BlitResult<ImageDescriptor<'_>> {
        let name = path
            .to_str()
            .ok_or_else(|| BlitError::unresolved(format!("non UTF-8 path '{}'", path.display())))?;
        let bytes = self
            .get(name)
            .ok_or_else(|| BlitError::unresolved(format!("image '{name}' was not prepared")))?;
        ImageDescriptor::from_bytes(bytes)
    }
}

/// Normalize and validate scene-relative image paths.
///
/// The result uses `/` separators without `.` segments. Absolute paths and
/// parent traversals (`..`) are rejected.
pub fn normalize_rel_path(source: &str) -> BlitResult<String> {
    let s = source.replace('\\', "/");
    if s.is_empty() {
        return Err(BlitError::validation("image path must be non-empty"));
    }
    if s.starts_with('/') {
        return Err(BlitError::validation("image paths must be relative"));
    }

    let mut parts = Vec::<&str>::new();
    for part in s.split('/') {
        match part {
            "" | "." => continue,
            ".." => return Err(BlitError::validation("image paths must not contain '..'")),
            p => parts.push(p),
        }
    }
    if parts.is_empty() {
        return Err(BlitError::validation("image path must contain a file name"));
    }
    Ok(parts.join("/"))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/store.rs"]
mod tests;
