use image::{RgbaImage, imageops};

use crate::{
    config::settings::CUSTOM_BUCKET,
    directive::parse::{Directive, MARKER, ParsedName},
    foundation::{core::Rgba8, error::StampResult},
    palette::substitute::substitute,
    shape::{OutputArtifact, ShapeContext},
};

/// Source pasted onto a white canvas of identical size. No crop, no mask: the source alpha
/// survives untouched.
pub fn compose(src: &RgbaImage) -> RgbaImage {
    let mut canvas = RgbaImage::from_pixel(src.width(), src.height(), Rgba8::WHITE.to_pixel());
    imageops::replace(&mut canvas, src, 0, 0);
    canvas
}

pub(crate) fn render(
    src: &RgbaImage,
    name: &ParsedName,
    ctx: &ShapeContext<'_>,
) -> StampResult<Vec<OutputArtifact>> {
    let canvas = compose(src);
    let palette = &ctx.config.palette;

    if name.is_directed() {
        let color = match name.directive(palette) {
            Directive::Color(code) => palette.get(&code).unwrap_or_else(|| palette.black()),
            other => {
                tracing::warn!(file = %name.raw, directive = ?other, "no single color for rectangle, using black");
                palette.black()
            }
        };
        return Ok(vec![OutputArtifact {
            path: ctx
                .config
                .rectangle_bucket(CUSTOM_BUCKET)?
                .join(&name.normalized),
            image: substitute(&canvas, color),
        }]);
    }

    palette
        .iter()
        .map(|entry| {
            Ok(OutputArtifact {
                path: ctx
                    .config
                    .rectangle_bucket(&entry.code)?
                    .join(format!("{}{MARKER}{}.png", name.base(), entry.code)),
                image: substitute(&canvas, entry.rgba),
            })
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/shape/rectangle.rs"]
mod tests;
