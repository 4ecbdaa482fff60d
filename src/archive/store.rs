use std::path::{Path, PathBuf};

use crate::foundation::error::{StampError, StampResult};

/// Flat archive directory for processed sources.
#[derive(Clone, Debug)]
pub struct ArchiveStore {
    watch_dir: PathBuf,
    archive_dir: PathBuf,
}

impl ArchiveStore {
    pub fn new(watch_dir: impl Into<PathBuf>, archive_dir: impl Into<PathBuf>) -> Self {
        Self {
            watch_dir: watch_dir.into(),
            archive_dir: archive_dir.into(),
        }
    }

    pub fn archive_dir(&self) -> &Path {
        &self.archive_dir
    }

    /// Move `file_name` from the watch directory into the archive, replacing any entry of the
    /// same name. Returns the archived path.
    pub fn archive(&self, file_name: &str) -> StampResult<PathBuf> {
        let from = self.watch_dir.join(file_name);
        let to = self.archive_dir.join(file_name);
        std::fs::rename(&from, &to).map_err(|e| {
            StampError::archive(format!(
                "move '{}' to '{}': {e}",
                from.display(),
                to.display()
            ))
        })?;
        tracing::debug!(from = %from.display(), to = %to.display(), "archived source");
        Ok(to)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/archive/store.rs"]
mod tests;
