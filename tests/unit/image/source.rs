use std::path::PathBuf;

use super::*;
use crate::foundation::core::Color;
use crate::image::encode::ImageBuf;
use crate::image::format::ColorFormat;

struct OneFile {
    path: PathBuf,
    bytes: Vec<u8>,
}

impl ImageLoader for OneFile {
    fn load(&self, path: &Path) -> BlitResult<ImageDescriptor<'_>> {
        if path != self.path {
            return Err(BlitError::unresolved(format!(
                "no such file '{}'",
                path.display()
            )));
        }
        ImageDescriptor::from_bytes(&self.bytes)
    }
}

fn icon() -> ImageBuf {
    let mut img = ImageBuf::new(ColorFormat::Indexed1, 2, 2, ColorDepth::Rgb565).unwrap();
    img.set_palette(&[Color::WHITE, Color::BLACK]).unwrap();
    img
}

#[test]
fn variable_and_bytes_resolve() {
    let img = icon();
    let r = Resolver::new(ColorDepth::Rgb565);
    let desc = r.resolve(img.descriptor().into()).unwrap();
    assert_eq!(desc.width(), 2);

    let bytes = img.to_bytes();
    let desc = r.resolve(ImageSource::Bytes(&bytes)).unwrap();
    assert_eq!(desc, img.descriptor());
}

#[test]
fn file_needs_a_loader() {
    let loader = OneFile {
        path: PathBuf::from("icons/ok.bin"),
        bytes: icon().to_bytes(),
    };
    let path = Path::new("icons/ok.bin");

    let bare = Resolver::new(ColorDepth::Rgb565);
    assert!(matches!(
        bare.resolve(path.into()),
        Err(BlitError::UnresolvedSource(_))
    ));

    let r = bare.with_loader(&loader);
    assert_eq!(r.resolve(path.into()).unwrap().height(), 2);
    assert!(matches!(
        r.resolve(Path::new("missing.bin").into()),
        Err(BlitError::UnresolvedSource(_))
    ));
}

#[test]
fn symbols_resolve_only_when_registered() {
    let img = icon();
    let mut table = SymbolTable::new();
    assert!(table.register("ok", img.descriptor()).is_none());
    assert!(table.register("ok", img.descriptor()).is_some());
    assert_eq!(table.len(), 1);

    let r = Resolver::new(ColorDepth::Rgb565).with_symbols(&table);
    assert!(r.resolve(ImageSource::Symbol("ok")).is_ok());
    assert!(matches!(
        r.resolve(ImageSource::Symbol("close")),
        Err(BlitError::UnresolvedSource(_))
    ));
}

#[test]
fn unknown_and_malformed_sources_fail() {
    let r = Resolver::new(ColorDepth::Rgb565);
    assert!(matches!(
        r.resolve(ImageSource::Unknown),
        Err(BlitError::UnresolvedSource(_))
    ));

    let bad = crate::image::header::ImageHeader::from_raw(50 << 2 | (2 << 8) | (2 << 20));
    let data = [0u8; 16];
    let desc = ImageDescriptor::new(bad, &data, None);
    assert!(matches!(
        r.resolve(desc.into()),
        Err(BlitError::UnknownFormat(50))
    ));

    let img = ImageBuf::new(ColorFormat::TrueColor, 4, 4, ColorDepth::Rgb332).unwrap();
    assert!(matches!(
        r.resolve(img.descriptor().into()),
        Err(BlitError::MalformedImage(_))
    ));
}
