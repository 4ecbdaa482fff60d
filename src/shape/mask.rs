use image::{GrayImage, Luma, RgbaImage};

/// Axis-aligned ellipse bounds in continuous pixel space, where pixel `(x, y)` covers
/// `[x, x+1) × [y, y+1)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EllipseBounds {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl EllipseBounds {
    /// Ellipse touching all four edges of a `width × height` raster.
    pub fn full(width: u32, height: u32) -> Self {
        Self::inset(width, height, 0.0)
    }

    /// Ellipse pulled in by `inset` pixels from every edge.
    pub fn inset(width: u32, height: u32, inset: f64) -> Self {
        Self {
            x0: inset,
            y0: inset,
            x1: f64::from(width) - inset,
            y1: f64::from(height) - inset,
        }
    }

    /// `true` when the pixel centered at `(px, py)` lies inside or on the ellipse.
    pub fn contains(&self, px: f64, py: f64) -> bool {
        let rx = (self.x1 - self.x0) / 2.0;
        let ry = (self.y1 - self.y0) / 2.0;
        if rx <= 0.0 || ry <= 0.0 {
            return false;
        }
        let dx = (px - (self.x0 + rx)) / rx;
        let dy = (py - (self.y0 + ry)) / ry;
        dx * dx + dy * dy <= 1.0
    }
}

/// Binary `L` mask: 255 inside the ellipse, 0 outside.
pub fn ellipse_mask(width: u32, height: u32, bounds: EllipseBounds) -> GrayImage {
    GrayImage::from_fn(width, height, |x, y| {
        let inside = bounds.contains(f64::from(x) + 0.5, f64::from(y) + 0.5);
        Luma([if inside { 255 } else { 0 }])
    })
}

/// Overwrite the alpha channel of `img` with `mask`. Both must share dimensions.
pub fn put_alpha(img: &mut RgbaImage, mask: &GrayImage) {
    debug_assert_eq!(img.dimensions(), mask.dimensions());
    for (px, m) in img.pixels_mut().zip(mask.pixels()) {
        px[3] = m[0];
    }
}

#[cfg(test)]
#[path = "../../tests/unit/shape/mask.rs"]
mod tests;
