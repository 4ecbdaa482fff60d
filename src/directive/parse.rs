use crate::{
    foundation::error::{StampError, StampResult},
    palette::table::Palette,
};

/// Marker that introduces a color directive inside a stem.
pub const MARKER: char = '&';

/// Directive code meaning "one output per palette entry" (circle only).
pub const EXPAND_CODE: &str = "E";

/// Extension every source is normalized to.
pub const NORMALIZED_EXT: &str = "png";

/// A raw filename split into the parts the pipeline keys on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParsedName {
    /// Name as found in the watch directory.
    pub raw: String,
    /// Everything up to and including the first `.`.
    pub stem: String,
    /// `stem` followed by [`NORMALIZED_EXT`].
    pub normalized: String,
    /// Directive code including its leading marker, e.g. `&PP`. `None` when undirected.
    pub directive_code: Option<String>,
}

/// Resolved color treatment for one job.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Directive {
    /// No marker in the stem; darken with the palette's black.
    Default,
    /// A known palette code.
    Color(String),
    /// One variant per palette entry.
    Expand,
    /// Marker present but the code is not in the palette; treated as black.
    Unrecognized(String),
}

impl ParsedName {
    /// Split `raw` at its first `.`.
    ///
    /// Rejects names with no `.` ([`StampError::MalformedFilename`]) and stems with more than
    /// one marker ([`StampError::AmbiguousDirective`]).
    pub fn parse(raw: &str) -> StampResult<Self> {
        let dot = raw
            .find('.')
            .ok_or_else(|| StampError::MalformedFilename(raw.to_string()))?;
        let stem = &raw[..=dot];

        let directive_code = match stem.matches(MARKER).count() {
            0 => None,
            1 => {
                let at = stem.find(MARKER).unwrap_or(0);
                // The last byte of the stem is always the '.'.
                Some(stem[at..stem.len() - 1].to_string())
            }
            _ => return Err(StampError::AmbiguousDirective(raw.to_string())),
        };

        Ok(Self {
            raw: raw.to_string(),
            stem: stem.to_string(),
            normalized: format!("{stem}{NORMALIZED_EXT}"),
            directive_code,
        })
    }

    /// `true` when the stem carries exactly one marker.
    pub fn is_directed(&self) -> bool {
        self.directive_code.is_some()
    }

    /// Stem with its trailing `.` removed.
    pub fn base(&self) -> &str {
        &self.stem[..self.stem.len() - 1]
    }

    /// `true` when the file already carries the normalized name.
    pub fn needs_rename(&self) -> bool {
        self.raw != self.normalized
    }

    /// Resolve the directive code against `palette`.
    pub fn directive(&self, palette: &Palette) -> Directive {
        let Some(code) = self.directive_code.as_deref() else {
            return Directive::Default;
        };
        let bare = code.trim_start_matches(MARKER);
        if bare == EXPAND_CODE {
            Directive::Expand
        } else if palette.get(bare).is_some() {
            Directive::Color(bare.to_string())
        } else {
            Directive::Unrecognized(bare.to_string())
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/directive/parse.rs"]
mod tests;
