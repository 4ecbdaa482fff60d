use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::{
    config::settings::StampConfig,
    directive::parse::ParsedName,
    foundation::error::{StampError, StampResult},
};

/// A renamed source ready for a worker.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Job {
    pub name: ParsedName,
    /// Path of the normalized file inside the watch directory.
    pub path: PathBuf,
}

/// Result of scanning the watch directory.
#[derive(Debug, Default)]
pub struct Discovery {
    /// Parsed names in filename order.
    pub candidates: Vec<ParsedName>,
    /// Eligible files that will not be touched, with the reason.
    pub rejected: Vec<(String, StampError)>,
}

/// Eligible file names in `cfg.watch_dir`, sorted.
pub fn list_eligible(cfg: &StampConfig) -> StampResult<Vec<String>> {
    let dir = &cfg.watch_dir;
    let mut names = Vec::new();
    for entry in
        std::fs::read_dir(dir).with_context(|| format!("read watch dir '{}'", dir.display()))?
    {
        let entry = entry.with_context(|| format!("read entry in '{}'", dir.display()))?;
        if !entry.file_type().map(|t| t.is_file()).unwrap_or(false) {
            continue;
        }
        let Some(name) = entry.file_name().to_str().map(str::to_string) else {
            tracing::warn!(path = %entry.path().display(), "skipping non UTF-8 file name");
            continue;
        };
        if cfg.is_eligible(&name) {
            names.push(name);
        }
    }
    names.sort();
    Ok(names)
}

/// Scan and parse the watch directory without modifying it.
///
/// A name with no extension separator aborts the whole scan; ambiguous directives are set
/// aside in [`Discovery::rejected`].
pub fn discover(cfg: &StampConfig) -> StampResult<Discovery> {
    let mut out = Discovery::default();
    for raw in list_eligible(cfg)? {
        match ParsedName::parse(&raw) {
            Ok(name) => out.candidates.push(name),
            Err(e @ StampError::AmbiguousDirective(_)) => out.rejected.push((raw, e)),
            Err(e) => return Err(e),
        }
    }
    Ok(out)
}

/// Rename a source to its normalized `.png` name inside `watch_dir`.
///
/// Fails with [`StampError::NameCollision`] when another file already holds that name.
pub fn normalize(watch_dir: &Path, name: &ParsedName) -> StampResult<Job> {
    let target = watch_dir.join(&name.normalized);
    if name.needs_rename() {
        // `exists()` also matches the source itself on case-insensitive filesystems, so a
        // case-only rename is a collision only when another entry holds the exact name.
        let case_only = name.raw.eq_ignore_ascii_case(&name.normalized);
        let taken = if case_only {
            holds_exact_name(watch_dir, &name.normalized)?
        } else {
            target.exists()
        };
        if taken {
            return Err(StampError::NameCollision(name.normalized.clone()));
        }
        let from = watch_dir.join(&name.raw);
        std::fs::rename(&from, &target).with_context(|| {
            format!("rename '{}' to '{}'", from.display(), target.display())
        })?;
    }
    Ok(Job {
        name: name.clone(),
        path: target,
    })
}

fn holds_exact_name(dir: &Path, file_name: &str) -> StampResult<bool> {
    for entry in
        std::fs::read_dir(dir).with_context(|| format!("read watch dir '{}'", dir.display()))?
    {
        let entry = entry.with_context(|| format!("read entry in '{}'", dir.display()))?;
        if entry.file_name() == file_name {
            return Ok(true);
        }
    }
    Ok(false)
}

#[cfg(test)]
#[path = "../../tests/unit/dispatch/discover.rs"]
mod tests;
