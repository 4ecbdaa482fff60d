use std::path::PathBuf;

use super::*;
use crate::config::settings::StampConfig;

#[test]
fn center_offset_rounds_half_to_even() {
    assert_eq!(center_offset(300, 100), (0, 100));
    assert_eq!(center_offset(100, 300), (100, 0));
    assert_eq!(center_offset(50, 50), (0, 0));
    assert_eq!(center_offset(11, 10), (0, 0));
    assert_eq!(center_offset(13, 10), (0, 2));
    assert_eq!(center_offset(10, 15), (2, 0));
}

#[test]
fn flatten_composites_over_white() {
    let mut src = RgbaImage::new(3, 1);
    src.put_pixel(0, 0, image::Rgba([0, 0, 0, 0]));
    src.put_pixel(1, 0, image::Rgba([0, 0, 0, 255]));
    src.put_pixel(2, 0, image::Rgba([0, 0, 0, 128]));
    let flat = flatten_on_white(&DynamicImage::ImageRgba8(src));
    assert_eq!(flat.get_pixel(0, 0), &image::Rgb([255, 255, 255]));
    assert_eq!(flat.get_pixel(1, 0), &image::Rgb([0, 0, 0]));
    assert_eq!(flat.get_pixel(2, 0), &image::Rgb([127, 127, 127]));
}

#[test]
fn wide_source_is_centered_vertically() {
    let src = RgbaImage::from_pixel(300, 100, image::Rgba([10, 20, 30, 255]));
    let out = compose(&DynamicImage::ImageRgba8(src));
    assert_eq!(out.dimensions(), (300, 300));

    // Source occupies rows 100..200.
    assert_eq!(out.get_pixel(150, 100), &image::Rgba([10, 20, 30, 255]));
    assert_eq!(out.get_pixel(150, 199), &image::Rgba([10, 20, 30, 255]));
    assert_eq!(out.get_pixel(150, 99), &image::Rgba([255, 255, 255, 255]));
    assert_eq!(out.get_pixel(150, 200), &image::Rgba([255, 255, 255, 255]));
}

#[test]
fn ellipse_reaches_every_edge() {
    let src = RgbaImage::from_pixel(300, 100, image::Rgba([10, 20, 30, 255]));
    let out = compose(&DynamicImage::ImageRgba8(src));
    assert_eq!(out.get_pixel(0, 150)[3], 255);
    assert_eq!(out.get_pixel(299, 150)[3], 255);
    assert_eq!(out.get_pixel(150, 0)[3], 255);
    assert_eq!(out.get_pixel(150, 299)[3], 255);
    assert_eq!(out.get_pixel(0, 0)[3], 0);
    assert_eq!(out.get_pixel(299, 0)[3], 0);
}

#[test]
fn transparent_source_becomes_white_inside_cutout() {
    let src = RgbaImage::from_pixel(20, 20, image::Rgba([0, 0, 0, 0]));
    let out = compose(&DynamicImage::ImageRgba8(src));
    assert_eq!(out.get_pixel(10, 10), &image::Rgba([255, 255, 255, 255]));
}

#[test]
fn render_ignores_directive_and_prefixes_name() {
    let cfg = StampConfig::default();
    let ctx = ShapeContext {
        config: &cfg,
        standard_size: None,
    };
    let src = DynamicImage::ImageRgba8(RgbaImage::from_pixel(
        8,
        4,
        image::Rgba([30, 30, 30, 255]),
    ));
    let name = ParsedName::parse("sticker&R.jpg").unwrap();
    let out = render(&src, &name, &ctx).unwrap();
    assert_eq!(out.len(), 1);
    assert_eq!(
        out[0].path,
        PathBuf::from("img/Processed/Stickers/resized_sticker&R.png")
    );
    assert_eq!(out[0].image.dimensions(), (8, 8));
    // No recoloring.
    assert_eq!(out[0].image.get_pixel(4, 4), &image::Rgba([30, 30, 30, 255]));
}
