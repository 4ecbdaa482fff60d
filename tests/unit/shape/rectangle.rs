use std::path::PathBuf;

use super::*;
use crate::config::settings::StampConfig;

fn source() -> RgbaImage {
    let mut img = RgbaImage::from_pixel(6, 4, image::Rgba([250, 250, 250, 255]));
    img.put_pixel(1, 1, image::Rgba([30, 30, 30, 255]));
    img.put_pixel(5, 3, image::Rgba([30, 30, 30, 0]));
    img
}

fn ctx(cfg: &StampConfig) -> ShapeContext<'_> {
    ShapeContext {
        config: cfg,
        standard_size: None,
    }
}

#[test]
fn compose_keeps_bounds_and_source_alpha() {
    let out = compose(&source());
    assert_eq!(out.dimensions(), (6, 4));
    assert_eq!(out, source());
    assert_eq!(out.get_pixel(5, 3)[3], 0);
}

#[test]
fn undirected_fans_out_into_color_buckets() {
    let cfg = StampConfig::default();
    let name = ParsedName::parse("stampA.jpg").unwrap();
    let out = render(&source(), &name, &ctx(&cfg)).unwrap();

    assert_eq!(out.len(), cfg.palette.len());
    assert_eq!(out.len(), 6);
    let expected = [
        "img/Processed/Rectangles/3 Red/stampA&R.png",
        "img/Processed/Rectangles/5 Seagreen/stampA&G.png",
        "img/Processed/Rectangles/6 Cornflour Blue/stampA&B.png",
        "img/Processed/Rectangles/4 Hot Pink/stampA&P.png",
        "img/Processed/Rectangles/7 Dark Violet/stampA&PP.png",
        "img/Processed/Rectangles/2 Black/stampA&Black.png",
    ];
    for (artifact, want) in out.iter().zip(expected) {
        assert_eq!(artifact.path, PathBuf::from(want));
        assert_eq!(artifact.image.dimensions(), (6, 4));
        assert_ne!(artifact.path.file_name().unwrap(), "stampA.png");
    }

    // Same geometry, only the ink color differs.
    for (artifact, entry) in out.iter().zip(cfg.palette.iter()) {
        assert_eq!(artifact.image.get_pixel(1, 1), &entry.rgba.to_pixel());
        assert_eq!(
            artifact.image.get_pixel(0, 0),
            &image::Rgba([250, 250, 250, 255])
        );
        assert_eq!(artifact.image.get_pixel(5, 3)[3], 0);
    }
}

#[test]
fn directed_goes_to_custom_bucket_once() {
    let cfg = StampConfig::default();
    let name = ParsedName::parse("stampA&B.jpg").unwrap();
    let out = render(&source(), &name, &ctx(&cfg)).unwrap();
    assert_eq!(out.len(), 1);
    assert_eq!(
        out[0].path,
        PathBuf::from("img/Processed/Rectangles/1 Custom/stampA&B.png")
    );
    assert_eq!(
        out[0].image.get_pixel(1, 1),
        &image::Rgba([100, 149, 237, 255])
    );
}

#[test]
fn unknown_or_expand_code_darkens_in_custom_bucket() {
    let cfg = StampConfig::default();
    for raw in ["stampA&Q.jpg", "stampA&E.jpg"] {
        let name = ParsedName::parse(raw).unwrap();
        let out = render(&source(), &name, &ctx(&cfg)).unwrap();
        assert_eq!(out.len(), 1);
        assert!(out[0].path.starts_with("img/Processed/Rectangles/1 Custom"));
        assert_eq!(out[0].image.get_pixel(1, 1), &image::Rgba([0, 0, 0, 255]));
    }
}
