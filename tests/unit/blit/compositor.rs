use super::*;
use crate::image::encode::ImageBuf;
use crate::image::format::ColorFormat;
use crate::image::header::ImageHeader;
use crate::image::source::SymbolTable;

const DEPTH: ColorDepth = ColorDepth::Rgb565;

fn solid(format: ColorFormat, w: u32, h: u32, color: Color) -> ImageBuf {
    let mut img = ImageBuf::new(format, w, h, DEPTH).unwrap();
    for y in 0..h {
        for x in 0..w {
            img.set_color(x, y, color, 255).unwrap();
        }
    }
    img
}

fn canvas(w: u32, h: u32, fill: Color) -> Vec<Color> {
    vec![fill; (w * h) as usize]
}

fn draw<S: Stencil>(
    px: &mut [Color],
    area: Area,
    img: &ImageBuf,
    at: (i32, i32),
    clip: Area,
    style: &ImageStyle<'_, S>,
    opa: Opa,
) -> DrawStatus {
    let mut buf = DrawBuffer::new(px, area).unwrap();
    let coords = img.descriptor().area_at(at.0, at.1);
    draw_image(&mut buf, coords, clip, img.descriptor().into(), style, opa, DEPTH)
}

#[test]
fn draw_buffer_rejects_size_mismatch() {
    let mut px = canvas(4, 4, Color::RED);
    assert!(DrawBuffer::new(&mut px, Area::new(0, 0, 3, 2)).is_err());
    assert!(DrawBuffer::new(&mut px, Area::new(0, 0, -1, 3)).is_err());
    let buf = DrawBuffer::new(&mut px, Area::new(10, 10, 13, 13)).unwrap();
    assert_eq!(buf.get(10, 10), Some(Color::RED));
    assert_eq!(buf.get(0, 0), None);
}

#[test]
fn empty_clip_writes_nothing() {
    let img = solid(ColorFormat::TrueColor, 3, 3, Color::BLUE);
    let mut px = canvas(8, 8, Color::RED);
    let area = Area::new(0, 0, 7, 7);

    let status = draw(
        &mut px,
        area,
        &img,
        (1, 1),
        Area::new(5, 5, 4, 4),
        &ImageStyle::new(BlitMode::Over),
        Opa::COVER,
    );
    assert_eq!(status, DrawStatus::Skipped(SkipReason::EmptyRegion));

    let status = draw(
        &mut px,
        area,
        &img,
        (1, 1),
        Area::new(6, 6, 7, 7),
        &ImageStyle::new(BlitMode::Over),
        Opa::COVER,
    );
    assert_eq!(status.pixels_written(), 0);
    assert!(px.iter().all(|c| *c == Color::RED));
}

#[test]
fn clip_and_buffer_offset_bound_the_writes() {
    let img = solid(ColorFormat::TrueColor, 4, 4, Color::BLUE);
    let mut px = canvas(4, 4, Color::RED);
    // The buffer covers screen rows/cols 10..=13.
    let area = Area::new(10, 10, 13, 13);

    let status = draw(
        &mut px,
        area,
        &img,
        (8, 9),
        Area::new(0, 0, 11, 100),
        &ImageStyle::new(BlitMode::Over),
        Opa::COVER,
    );
    // Image covers x 8..=11, y 9..=12; clip stops at x 11; buffer starts at 10.
    assert_eq!(status, DrawStatus::Drawn { pixels: 6 });
    let buf = DrawBuffer::new(&mut px, area).unwrap();
    for y in 10..=13 {
        for x in 10..=13 {
            let expect = if x <= 11 && y <= 12 {
                Color::BLUE
            } else {
                Color::RED
            };
            assert_eq!(buf.get(x, y), Some(expect), "({x}, {y})");
        }
    }
}

#[test]
fn source_pixels_map_from_image_origin() {
    let mut img = ImageBuf::new(ColorFormat::Indexed2, 3, 1, DEPTH).unwrap();
    img.set_palette(&[Color::RED, Color::LIME, Color::BLUE])
        .unwrap();
    for x in 0..3 {
        img.set_raw(x, 0, x).unwrap();
    }
    let mut px = canvas(3, 1, Color::WHITE);
    draw(
        &mut px,
        Area::new(0, 0, 2, 0),
        &img,
        (-1, 0),
        Area::new(0, 0, 2, 0),
        &ImageStyle::new(BlitMode::Over),
        Opa::COVER,
    );
    assert_eq!(px, vec![Color::LIME, Color::BLUE, Color::WHITE]);
}

#[test]
fn style_opa_and_scale_multiply() {
    let img = solid(ColorFormat::TrueColor, 1, 1, Color::WHITE);
    let mut px = canvas(1, 1, Color::BLACK);
    let style = ImageStyle::new(BlitMode::Over).with_opa(Opa(128));
    draw(
        &mut px,
        Area::new(0, 0, 0, 0),
        &img,
        (0, 0),
        Area::new(0, 0, 0, 0),
        &style,
        Opa(128),
    );
    // 128 * 128 / 255 = 64
    assert_eq!(px[0], Color::rgb(64, 64, 64));

    let status = draw(
        &mut px,
        Area::new(0, 0, 0, 0),
        &img,
        (0, 0),
        Area::new(0, 0, 0, 0),
        &style,
        Opa::TRANSP,
    );
    assert_eq!(status, DrawStatus::Drawn { pixels: 0 });
    assert_eq!(px[0], Color::rgb(64, 64, 64));
}

#[test]
fn chroma_key_skips_key_pixels_at_any_opacity() {
    let mut img = ImageBuf::new(ColorFormat::TrueColor, 2, 1, DEPTH).unwrap();
    img.set_color(0, 0, Color::TRANSP, 255).unwrap();
    img.set_color(1, 0, Color::BLUE, 255).unwrap();

    for opa in [Opa(1), Opa(128), Opa::COVER] {
        let mut px = canvas(2, 1, Color::RED);
        let status = draw(
            &mut px,
            Area::new(0, 0, 1, 0),
            &img,
            (0, 0),
            Area::new(0, 0, 1, 0),
            &ImageStyle::new(BlitMode::ChromaKey),
            opa,
        );
        assert_eq!(status, DrawStatus::Drawn { pixels: 1 });
        assert_eq!(px, vec![Color::RED, Color::BLUE]);
    }
}

#[test]
fn alpha_mode_ignores_chroma_flag_but_over_honors_it() {
    let img = solid(ColorFormat::TrueColor, 1, 1, Color::TRANSP).with_chroma_keyed(true);
    let mut px = canvas(1, 1, Color::RED);
    let one = Area::new(0, 0, 0, 0);

    let style = ImageStyle::new(BlitMode::Over);
    let status = draw(&mut px, one, &img, (0, 0), one, &style, Opa::COVER);
    assert_eq!(status.pixels_written(), 0);
    assert_eq!(px[0], Color::RED);

    let style = ImageStyle::new(BlitMode::Alpha);
    let status = draw(&mut px, one, &img, (0, 0), one, &style, Opa::COVER);
    assert_eq!(status.pixels_written(), 1);
    assert_eq!(px[0], Color::TRANSP);
}

#[test]
fn mask_never_overwrites_key_pixels() {
    let img = solid(ColorFormat::TrueColor, 3, 1, Color::BLUE);
    let mut px = vec![Color::TRANSP, Color::RED, Color::TRANSP];
    let status = draw(
        &mut px,
        Area::new(0, 0, 2, 0),
        &img,
        (0, 0),
        Area::new(0, 0, 2, 0),
        &ImageStyle::new(BlitMode::Mask),
        Opa(30),
    );
    assert_eq!(status, DrawStatus::Drawn { pixels: 1 });
    assert_eq!(px, vec![Color::TRANSP, Color::BLUE, Color::TRANSP]);
}

#[test]
fn stencil_gates_by_destination_coordinate() {
    let img = solid(ColorFormat::TrueColor, 4, 2, Color::BLUE);
    let mut px = canvas(4, 2, Color::WHITE);
    let checker = |x: i32, y: i32| (x + y) % 2 == 0;
    let style = ImageStyle::new(BlitMode::Stencil).with_stencil(&checker);
    let status = draw(
        &mut px,
        Area::new(0, 0, 3, 1),
        &img,
        (0, 0),
        Area::new(0, 0, 3, 1),
        &style,
        Opa::COVER,
    );
    assert_eq!(status, DrawStatus::Drawn { pixels: 4 });
    let b = Color::BLUE;
    let w = Color::WHITE;
    assert_eq!(px, vec![b, w, b, w, w, b, w, b]);
}

#[test]
fn stencil_mode_without_stencil_copies_everything() {
    let img = solid(ColorFormat::TrueColor, 2, 1, Color::BLUE);
    let mut px = canvas(2, 1, Color::WHITE);
    let status = draw(
        &mut px,
        Area::new(0, 0, 1, 0),
        &img,
        (0, 0),
        Area::new(0, 0, 1, 0),
        &ImageStyle::new(BlitMode::Stencil),
        Opa(10),
    );
    assert_eq!(status.pixels_written(), 2);
    assert_eq!(px, vec![Color::BLUE; 2]);
}

#[test]
fn unresolvable_sources_are_silent_noops() {
    let mut px = canvas(2, 2, Color::RED);
    let area = Area::new(0, 0, 1, 1);
    let style = ImageStyle::new(BlitMode::Over);

    let table = SymbolTable::new();
    let comp = Compositor::new(Resolver::new(DEPTH).with_symbols(&table));
    let mut buf = DrawBuffer::new(&mut px, area).unwrap();
    let status = comp.draw_image(
        &mut buf,
        area,
        area,
        ImageSource::Symbol("nope"),
        &style,
        Opa::COVER,
    );
    assert_eq!(status, DrawStatus::Skipped(SkipReason::UnresolvedSource));

    let header = ImageHeader::from_raw(30 << 2 | (2 << 8) | (2 << 20));
    let data = [0u8; 64];
    let bad = crate::image::descriptor::ImageDescriptor::new(header, &data, None);
    let status = comp.draw_image(&mut buf, area, area, bad.into(), &style, Opa::COVER);
    assert_eq!(status, DrawStatus::Skipped(SkipReason::UnknownFormat(30)));

    let short = ImageBuf::new(ColorFormat::TrueColor, 2, 2, ColorDepth::Rgb332).unwrap();
    let status = comp.draw_image(
        &mut buf,
        area,
        area,
        short.descriptor().into(),
        &style,
        Opa::COVER,
    );
    assert_eq!(status, DrawStatus::Skipped(SkipReason::MalformedImage));
    assert!(px.iter().all(|c| *c == Color::RED));
}

#[test]
fn symbols_draw_through_the_compositor() {
    let img = solid(ColorFormat::TrueColor, 1, 1, Color::BLUE);
    let mut table = SymbolTable::new();
    table.register("dot", img.descriptor());
    let comp = Compositor::new(Resolver::new(DEPTH).with_symbols(&table));

    let mut px = canvas(2, 1, Color::WHITE);
    let area = Area::new(0, 0, 1, 0);
    let mut buf = DrawBuffer::new(&mut px, area).unwrap();
    let status = comp.draw_image(
        &mut buf,
        Area::new(1, 0, 1, 0),
        area,
        ImageSource::Symbol("dot"),
        &ImageStyle::default(),
        Opa::COVER,
    );
    assert!(status.is_drawn());
    assert_eq!(px, vec![Color::WHITE, Color::BLUE]);
}

#[test]
fn chroma_key_matches_keys_the_depth_cannot_store_exactly() {
    let key = Color::rgb(0x12, 0x34, 0x56);
    assert_ne!(DEPTH.quantize(key), key);
    let img = solid(ColorFormat::TrueColor, 2, 1, key);

    let mut px = canvas(2, 1, Color::RED);
    let style = ImageStyle::new(BlitMode::ChromaKey).with_transparent_key(key);
    let one_row = Area::new(0, 0, 1, 0);
    let status = draw(&mut px, one_row, &img, (0, 0), one_row, &style, Opa::COVER);
    assert_eq!(status, DrawStatus::Drawn { pixels: 0 });
    assert_eq!(px, vec![Color::RED; 2]);
}

#[test]
fn mask_compares_the_destination_against_the_exact_key() {
    let key = Color::rgb(0x12, 0x34, 0x56);
    let img = solid(ColorFormat::TrueColor, 2, 1, Color::BLUE);
    let mut px = vec![key, DEPTH.quantize(key)];
    let style = ImageStyle::new(BlitMode::Mask).with_transparent_key(key);
    let one_row = Area::new(0, 0, 1, 0);
    let status = draw(&mut px, one_row, &img, (0, 0), one_row, &style, Opa::COVER);
    assert_eq!(status, DrawStatus::Drawn { pixels: 1 });
    assert_eq!(px, vec![key, Color::BLUE]);
}

#[test]
fn every_mode_draws_what_its_scalar_kernel_computes() {
    let depth = ColorDepth::Argb8888;
    let src = Color::rgb(10, 200, 30);
    let dst = Color::rgb(50, 60, 70);
    let mut img = ImageBuf::new(ColorFormat::TrueColorAlpha, 1, 1, depth).unwrap();
    img.set_color(0, 0, src, 100).unwrap();
    let one = Area::new(0, 0, 0, 0);

    for mode in BlitMode::ALL {
        let mut px = vec![dst];
        let mut buf = DrawBuffer::new(&mut px, one).unwrap();
        let style = ImageStyle::new(mode).with_opa(Opa(200));
        draw_image(&mut buf, one, one, img.descriptor().into(), &style, Opa::COVER, depth);

        // 100 * 200 / 255 = 78
        let expect = mode.apply(src, 78, dst, Color::TRANSP).unwrap_or(dst);
        assert_eq!(px[0], expect, "{mode:?}");
    }
}
