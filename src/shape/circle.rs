use image::{RgbaImage, imageops};

use crate::{
    directive::parse::{Directive, ParsedName},
    foundation::{core::Rgba8, core::SquareSide, error::StampResult},
    palette::substitute::substitute,
    shape::{
        OutputArtifact, RESIZED_PREFIX, ShapeContext,
        mask::{EllipseBounds, ellipse_mask, put_alpha},
    },
};

/// Offset of the source on the canvas; the canvas side is the larger source side plus twice
/// this margin.
pub const PASTE_OFFSET: u32 = 50;
/// Border cropped from every canvas edge.
pub const CROP_INSET: u32 = 20;
/// Inset of the mask ellipse from the crop bounds.
pub const MASK_INSET: f64 = 2.5;

/// Canvas and crop sizes for one circle source.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CircleGeometry {
    pub canvas_side: u32,
    pub crop_side: u32,
}

impl CircleGeometry {
    pub fn for_source(width: u32, height: u32) -> Self {
        let canvas_side = width.max(height) + 2 * PASTE_OFFSET;
        Self {
            canvas_side,
            crop_side: canvas_side - 2 * CROP_INSET,
        }
    }
}

/// Paste onto white, crop the border and cut the inset ellipse into the alpha channel.
pub fn compose(src: &RgbaImage) -> RgbaImage {
    let g = CircleGeometry::for_source(src.width(), src.height());

    let mut canvas = RgbaImage::from_pixel(g.canvas_side, g.canvas_side, Rgba8::WHITE.to_pixel());
    imageops::replace(
        &mut canvas,
        src,
        i64::from(PASTE_OFFSET),
        i64::from(PASTE_OFFSET),
    );

    let mut cropped =
        imageops::crop_imm(&canvas, CROP_INSET, CROP_INSET, g.crop_side, g.crop_side).to_image();
    let mask = ellipse_mask(
        g.crop_side,
        g.crop_side,
        EllipseBounds::inset(g.crop_side, g.crop_side, MASK_INSET),
    );
    put_alpha(&mut cropped, &mask);
    cropped
}

/// Resize to `side`, or to the smallest current dimension when no side was resolved.
pub fn standardize(img: &RgbaImage, side: Option<SquareSide>) -> RgbaImage {
    let SquareSide(side) = side.unwrap_or(SquareSide(img.width().min(img.height())));
    if img.dimensions() == (side, side) {
        return img.clone();
    }
    imageops::resize(img, side, side, imageops::FilterType::CatmullRom)
}

pub(crate) fn render(
    src: &RgbaImage,
    name: &ParsedName,
    ctx: &ShapeContext<'_>,
) -> StampResult<Vec<OutputArtifact>> {
    let composed = compose(src);
    let palette = &ctx.config.palette;
    let out_dir = &ctx.config.circle_dir;

    let color = match name.directive(palette) {
        Directive::Expand => {
            // One file per palette color; the `&E` name itself is never written.
            return Ok(palette
                .iter()
                .map(|entry| OutputArtifact {
                    path: out_dir.join(format!("{RESIZED_PREFIX}{}{}.png", name.stem, entry.code)),
                    image: standardize(&substitute(&composed, entry.rgba), ctx.standard_size),
                })
                .collect());
        }
        Directive::Color(code) => palette.get(&code).unwrap_or_else(|| palette.black()),
        Directive::Default => palette.black(),
        Directive::Unrecognized(code) => {
            tracing::warn!(file = %name.raw, code = %code, "unrecognized directive, using black");
            palette.black()
        }
    };

    Ok(vec![OutputArtifact {
        path: out_dir.join(format!("{RESIZED_PREFIX}{}", name.normalized)),
        image: standardize(&substitute(&composed, color), ctx.standard_size),
    }])
}

#[cfg(test)]
#[path = "../../tests/unit/shape/circle.rs"]
mod tests;
