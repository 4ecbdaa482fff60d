use std::{
    collections::BTreeMap,
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use serde::{Deserialize, Serialize};

use crate::{
    foundation::error::{StampError, StampResult},
    palette::table::{BLACK, Palette},
};

/// Name of the rectangle bucket that receives every directed rectangle.
pub const CUSTOM_BUCKET: &str = "Custom";

/// Settings consumed by the batch pipeline.
///
/// Every field has a default, so a JSON file only needs to name what it changes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StampConfig {
    /// Flat directory scanned for source images.
    pub watch_dir: PathBuf,
    /// Flat directory receiving processed (renamed) sources.
    pub archive_dir: PathBuf,
    /// Circle stamp output directory.
    pub circle_dir: PathBuf,
    /// Circle sticker output directory.
    pub sticker_dir: PathBuf,
    /// Root of the rectangle output tree.
    pub rectangle_dir: PathBuf,
    /// Rectangle subdirectory per palette code, plus [`CUSTOM_BUCKET`].
    pub rectangle_subdirs: BTreeMap<String, String>,
    /// Ordered palette.
    pub palette: Palette,
    /// Case-insensitive filename suffixes eligible for processing.
    pub allowed_extensions: Vec<String>,
    /// Output quality, 1..=100.
    pub image_quality: u8,
    /// Fixed square side for standardized circle output. `None` derives it from the first job.
    pub standard_size: Option<u32>,
    /// Append-only activity log.
    pub log_path: PathBuf,
    /// Fixed worker pool size.
    pub workers: usize,
}

impl Default for StampConfig {
    fn default() -> Self {
        let subdirs = [
            (CUSTOM_BUCKET, "1 Custom"),
            (BLACK, "2 Black"),
            ("R", "3 Red"),
            ("P", "4 Hot Pink"),
            ("G", "5 Seagreen"),
            ("B", "6 Cornflour Blue"),
            ("PP", "7 Dark Violet"),
        ];
        Self {
            watch_dir: PathBuf::from("img"),
            archive_dir: PathBuf::from("img/zArchive"),
            circle_dir: PathBuf::from("img/Processed/Circles"),
            sticker_dir: PathBuf::from("img/Processed/Stickers"),
            rectangle_dir: PathBuf::from("img/Processed/Rectangles"),
            rectangle_subdirs: subdirs
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            palette: Palette::default(),
            allowed_extensions: ["jpg", "png", "jpeg", "webp"]
                .into_iter()
                .map(String::from)
                .collect(),
            image_quality: 100,
            standard_size: None,
            log_path: PathBuf::from("settings/log.txt"),
            workers: 4,
        }
    }
}

impl StampConfig {
    /// Read and validate a JSON config file.
    pub fn load(path: &Path) -> StampResult<Self> {
        let f = File::open(path)
            .with_context(|| format!("open config '{}'", path.display()))?;
        let cfg: Self = serde_json::from_reader(BufReader::new(f))
            .with_context(|| format!("parse config '{}'", path.display()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Defaults with every directory re-rooted under `root`, keeping the default layout.
    pub fn rooted_at(root: &Path) -> Self {
        let d = Self::default();
        Self {
            watch_dir: root.join(&d.watch_dir),
            archive_dir: root.join(&d.archive_dir),
            circle_dir: root.join(&d.circle_dir),
            sticker_dir: root.join(&d.sticker_dir),
            rectangle_dir: root.join(&d.rectangle_dir),
            log_path: root.join(&d.log_path),
            ..d
        }
    }

    /// Check cross-field invariants.
    pub fn validate(&self) -> StampResult<()> {
        if self.workers == 0 {
            return Err(StampError::config("workers must be >= 1"));
        }
        if !(1..=100).contains(&self.image_quality) {
            return Err(StampError::config("image_quality must be in 1..=100"));
        }
        if self.standard_size == Some(0) {
            return Err(StampError::config("standard_size must be >= 1 when set"));
        }
        if self.allowed_extensions.is_empty()
            || self.allowed_extensions.iter().any(|e| e.trim().is_empty())
        {
            return Err(StampError::config(
                "allowed_extensions must list at least one non-empty suffix",
            ));
        }
        if !self.rectangle_subdirs.contains_key(CUSTOM_BUCKET) {
            return Err(StampError::config(format!(
                "rectangle_subdirs is missing the '{CUSTOM_BUCKET}' bucket"
            )));
        }
        for entry in self.palette.iter() {
            if !self.rectangle_subdirs.contains_key(&entry.code) {
                return Err(StampError::config(format!(
                    "rectangle_subdirs has no folder for palette code '{}'",
                    entry.code
                )));
            }
        }
        Ok(())
    }

    /// `true` when `file_name` ends with an allowed suffix, ignoring case.
    pub fn is_eligible(&self, file_name: &str) -> bool {
        let lower = file_name.to_ascii_lowercase();
        self.allowed_extensions
            .iter()
            .any(|ext| lower.ends_with(&ext.to_ascii_lowercase()))
    }

    /// Rectangle folder for a palette code or [`CUSTOM_BUCKET`].
    pub fn rectangle_bucket(&self, key: &str) -> StampResult<PathBuf> {
        let sub = self.rectangle_subdirs.get(key).ok_or_else(|| {
            StampError::config(format!("no rectangle folder configured for '{key}'"))
        })?;
        Ok(self.rectangle_dir.join(sub))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/settings.rs"]
mod tests;
