use super::*;

#[test]
fn full_mask_touches_edge_midpoints_but_not_corners() {
    let m = ellipse_mask(100, 100, EllipseBounds::full(100, 100));
    assert_eq!(m.get_pixel(0, 50)[0], 255);
    assert_eq!(m.get_pixel(99, 50)[0], 255);
    assert_eq!(m.get_pixel(50, 0)[0], 255);
    assert_eq!(m.get_pixel(50, 99)[0], 255);
    assert_eq!(m.get_pixel(0, 0)[0], 0);
    assert_eq!(m.get_pixel(99, 99)[0], 0);
    assert_eq!(m.get_pixel(50, 50)[0], 255);
}

#[test]
fn inset_mask_clears_border_band() {
    let m = ellipse_mask(100, 100, EllipseBounds::inset(100, 100, 2.5));
    assert_eq!(m.get_pixel(0, 50)[0], 0);
    assert_eq!(m.get_pixel(1, 50)[0], 0);
    assert_eq!(m.get_pixel(3, 50)[0], 255);
    assert_eq!(m.get_pixel(97, 50)[0], 0);
    assert_eq!(m.get_pixel(96, 50)[0], 255);
}

#[test]
fn mask_is_symmetric() {
    let (w, h) = (37, 21);
    let m = ellipse_mask(w, h, EllipseBounds::full(w, h));
    for y in 0..h {
        for x in 0..w {
            assert_eq!(m.get_pixel(x, y), m.get_pixel(w - 1 - x, y));
            assert_eq!(m.get_pixel(x, y), m.get_pixel(x, h - 1 - y));
        }
    }
}

#[test]
fn degenerate_bounds_are_empty() {
    let m = ellipse_mask(4, 4, EllipseBounds::inset(4, 4, 2.5));
    assert!(m.pixels().all(|p| p[0] == 0));
}

#[test]
fn put_alpha_replaces_only_alpha() {
    let mut img = RgbaImage::from_pixel(2, 1, image::Rgba([1, 2, 3, 4]));
    let mut mask = GrayImage::new(2, 1);
    mask.put_pixel(1, 0, Luma([255]));
    put_alpha(&mut img, &mask);
    assert_eq!(img.get_pixel(0, 0), &image::Rgba([1, 2, 3, 0]));
    assert_eq!(img.get_pixel(1, 0), &image::Rgba([1, 2, 3, 255]));
}
