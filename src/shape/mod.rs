//! Per-shape geometric composition.
//!
//! Each [`Shape`] turns one decoded source into one or more [`OutputArtifact`]s. Composition
//! is pure; writing artifacts to disk is left to the caller so that partial fan-out output can
//! be reported per file.

use std::{
    fs::File,
    io::BufWriter,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use image::{
    ImageEncoder as _, RgbaImage,
    codecs::png::{CompressionType, FilterType, PngEncoder},
};
use serde::{Deserialize, Serialize};

use crate::{
    config::settings::StampConfig,
    directive::parse::ParsedName,
    foundation::{
        core::SquareSide,
        error::{StampError, StampResult},
    },
};

/// Circular stamp with inset border.
pub mod circle;
/// Elliptical alpha masks.
pub mod mask;
/// Rectangular stamp with per-color buckets.
pub mod rectangle;
/// Edge-to-edge circular sticker.
pub mod sticker;

/// Filename prefix of circle and sticker outputs.
pub const RESIZED_PREFIX: &str = "resized_";

/// Closed set of output shapes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Shape {
    Circle,
    Rectangle,
    CircleSticker,
}

/// Run-wide inputs shared read-only by every job.
#[derive(Clone, Copy, Debug)]
pub struct ShapeContext<'a> {
    pub config: &'a StampConfig,
    /// Side used by [`circle::standardize`]; resolved before any job starts.
    pub standard_size: Option<SquareSide>,
}

/// A finished raster and where it goes.
#[derive(Clone, Debug, PartialEq)]
pub struct OutputArtifact {
    pub path: PathBuf,
    pub image: RgbaImage,
}

impl OutputArtifact {
    /// Encode as PNG. `quality` (1..=100) selects the compression effort.
    pub fn save(&self, quality: u8) -> StampResult<()> {
        write_png(&self.path, &self.image, quality).map_err(|e| {
            StampError::save(format!("{}: {e:#}", self.path.display()))
        })
    }
}

fn write_png(path: &Path, img: &RgbaImage, quality: u8) -> anyhow::Result<()> {
    let f = File::create(path).with_context(|| format!("create '{}'", path.display()))?;
    let compression = match quality {
        90.. => CompressionType::Best,
        40..=89 => CompressionType::Default,
        _ => CompressionType::Fast,
    };
    PngEncoder::new_with_quality(BufWriter::new(f), compression, FilterType::Adaptive)
        .write_image(
            img.as_raw(),
            img.width(),
            img.height(),
            image::ExtendedColorType::Rgba8,
        )
        .with_context(|| format!("encode png '{}'", path.display()))
}

impl Shape {
    /// Stable lowercase name used in logs and the CLI.
    pub fn label(self) -> &'static str {
        match self {
            Self::Circle => "circle",
            Self::Rectangle => "rectangle",
            Self::CircleSticker => "circle_sticker",
        }
    }

    /// `false` for shapes that keep the source alpha instead of cutting an ellipse.
    pub fn has_mask(self) -> bool {
        !matches!(self, Self::Rectangle)
    }

    /// `true` when outputs are resized to the run's standard size.
    pub fn uses_standard_size(self) -> bool {
        matches!(self, Self::Circle)
    }

    /// Standard side implied by a source of the given dimensions when none is configured.
    pub fn fallback_standard_size(self, width: u32, height: u32) -> Option<SquareSide> {
        match self {
            Self::Circle => Some(SquareSide(
                circle::CircleGeometry::for_source(width, height).crop_side,
            )),
            Self::Rectangle | Self::CircleSticker => None,
        }
    }

    /// Compose every artifact for one decoded source.
    pub fn render(
        self,
        src: &image::DynamicImage,
        name: &ParsedName,
        ctx: &ShapeContext<'_>,
    ) -> StampResult<Vec<OutputArtifact>> {
        match self {
            Self::Circle => circle::render(&src.to_rgba8(), name, ctx),
            Self::Rectangle => rectangle::render(&src.to_rgba8(), name, ctx),
            Self::CircleSticker => sticker::render(src, name, ctx),
        }
    }

    /// Decode the (already renamed) source at `path` and compose its artifacts.
    #[tracing::instrument(skip(self, ctx), fields(shape = self.label()))]
    pub fn process(
        self,
        path: &Path,
        name: &ParsedName,
        ctx: &ShapeContext<'_>,
    ) -> StampResult<Vec<OutputArtifact>> {
        let src = open_source(path)?;
        self.render(&src, name, ctx)
    }
}

fn sniffed_reader(path: &Path) -> StampResult<image::ImageReader<std::io::BufReader<File>>> {
    // Renamed sources keep their original encoding, so the extension cannot be trusted.
    image::ImageReader::open(path)
        .and_then(|r| r.with_guessed_format())
        .map_err(|e| StampError::transform(format!("open '{}': {e}", path.display())))
}

/// Decode a source by content, not by extension.
pub fn open_source(path: &Path) -> StampResult<image::DynamicImage> {
    sniffed_reader(path)?
        .decode()
        .map_err(|e| StampError::transform(format!("decode '{}': {e}", path.display())))
}

/// Pixel dimensions of a source without decoding it fully.
pub fn source_dimensions(path: &Path) -> StampResult<(u32, u32)> {
    sniffed_reader(path)?
        .into_dimensions()
        .map_err(|e| StampError::transform(format!("read header '{}': {e}", path.display())))
}

#[cfg(test)]
#[path = "../../tests/unit/shape/mod.rs"]
mod tests;
