use image::{DynamicImage, RgbImage, RgbaImage, imageops};

use crate::{
    directive::parse::ParsedName,
    foundation::{core::Rgba8, error::StampResult},
    shape::{
        OutputArtifact, RESIZED_PREFIX, ShapeContext,
        mask::{EllipseBounds, ellipse_mask, put_alpha},
    },
};

/// Composite `src` over opaque white so no source transparency reaches the cutout.
pub fn flatten_on_white(src: &DynamicImage) -> RgbImage {
    let rgba = src.to_rgba8();
    RgbImage::from_fn(rgba.width(), rgba.height(), |x, y| {
        let p = rgba.get_pixel(x, y);
        let a = u16::from(p[3]);
        let over = |c: u8| ((u16::from(c) * a + 255 * (255 - a) + 127) / 255) as u8;
        image::Rgb([over(p[0]), over(p[1]), over(p[2])])
    })
}

/// Offset that centers a `width × height` image on a square of its larger side.
///
/// Halves round to even, so a difference of 1 centers at 0 and 3 at 2.
pub fn center_offset(width: u32, height: u32) -> (u32, u32) {
    let half = |d: u32| (f64::from(d) / 2.0).round_ties_even() as u32;
    if width > height {
        (0, half(width - height))
    } else {
        (half(height - width), 0)
    }
}

/// Center the flattened source on a white square and cut an edge-to-edge ellipse.
pub fn compose(src: &DynamicImage) -> RgbaImage {
    let flat = DynamicImage::ImageRgb8(flatten_on_white(src)).to_rgba8();
    let (w, h) = flat.dimensions();
    let side = w.max(h);
    let (ox, oy) = center_offset(w, h);

    let mut canvas = RgbaImage::from_pixel(side, side, Rgba8::WHITE.to_pixel());
    imageops::replace(&mut canvas, &flat, i64::from(ox), i64::from(oy));

    let mask = ellipse_mask(side, side, EllipseBounds::full(side, side));
    put_alpha(&mut canvas, &mask);
    canvas
}

pub(crate) fn render(
    src: &DynamicImage,
    name: &ParsedName,
    ctx: &ShapeContext<'_>,
) -> StampResult<Vec<OutputArtifact>> {
    if name.is_directed() {
        tracing::debug!(file = %name.raw, "stickers ignore color directives");
    }
    Ok(vec![OutputArtifact {
        path: ctx
            .config
            .sticker_dir
            .join(format!("{RESIZED_PREFIX}{}", name.normalized)),
        image: compose(src),
    }])
}

#[cfg(test)]
#[path = "../../tests/unit/shape/sticker.rs"]
mod tests;
