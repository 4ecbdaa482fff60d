use image::RgbaImage;

use crate::foundation::core::Rgba8;

/// Red channel values at or above this are treated as background, not ink.
pub const INK_RED_THRESHOLD: u8 = 200;

/// `true` when a pixel counts as ink: visible and darker than the threshold on red.
#[inline]
pub fn is_ink(px: &image::Rgba<u8>) -> bool {
    px[3] != 0 && px[0] < INK_RED_THRESHOLD
}

/// Replace every ink pixel with `color`, leaving all other pixels untouched.
pub fn substitute_in_place(img: &mut RgbaImage, color: Rgba8) {
    let target = color.to_pixel();
    for px in img.pixels_mut() {
        if is_ink(px) {
            *px = target;
        }
    }
}

/// Recolored copy of `img`; the input is left as is.
pub fn substitute(img: &RgbaImage, color: Rgba8) -> RgbaImage {
    let mut out = img.clone();
    substitute_in_place(&mut out, color);
    out
}

#[cfg(test)]
#[path = "../../tests/unit/palette/substitute.rs"]
mod tests;
