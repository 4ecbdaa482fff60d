use serde::{Deserialize, Serialize};

use crate::{
    directive::parse::EXPAND_CODE,
    foundation::{
        core::Rgba8,
        error::{StampError, StampResult},
    },
};

/// Code of the implicit darken-for-print color.
pub const BLACK: &str = "Black";

/// One named palette color.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaletteEntry {
    /// Short code used in filename directives and output names.
    pub code: String,
    /// Substitution color.
    pub rgba: Rgba8,
}

/// Ordered code → color table.
///
/// Insertion order is the fan-out order for the expand and undirected-rectangle branches.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<PaletteEntry>", into = "Vec<PaletteEntry>")]
pub struct Palette {
    entries: Vec<PaletteEntry>,
}

impl Palette {
    /// Build a palette, rejecting empty, duplicate or reserved codes.
    pub fn new(entries: Vec<PaletteEntry>) -> StampResult<Self> {
        if entries.is_empty() {
            return Err(StampError::config("palette must not be empty"));
        }
        for (i, e) in entries.iter().enumerate() {
            if e.code.is_empty() {
                return Err(StampError::config("palette codes must be non-empty"));
            }
            if e.code.contains(['&', '.', '/', '\\']) {
                return Err(StampError::config(format!(
                    "palette code '{}' contains a reserved character",
                    e.code
                )));
            }
            if e.code == EXPAND_CODE {
                return Err(StampError::config(format!(
                    "palette code '{EXPAND_CODE}' is reserved for the expand directive"
                )));
            }
            if entries[..i].iter().any(|p| p.code == e.code) {
                return Err(StampError::config(format!(
                    "duplicate palette code '{}'",
                    e.code
                )));
            }
        }
        Ok(Self { entries })
    }

    /// Look up a color by code.
    pub fn get(&self, code: &str) -> Option<Rgba8> {
        self.entries.iter().find(|e| e.code == code).map(|e| e.rgba)
    }

    /// The default darkening color. Falls back to opaque black when the table has no
    /// `Black` entry.
    pub fn black(&self) -> Rgba8 {
        self.get(BLACK).unwrap_or(Rgba8::opaque(0, 0, 0))
    }

    /// Entries in fan-out order.
    pub fn iter(&self) -> impl Iterator<Item = &PaletteEntry> {
        self.entries.iter()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always `false` for a constructed palette.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for Palette {
    fn default() -> Self {
        let entry = |code: &str, rgba: Rgba8| PaletteEntry {
            code: code.to_string(),
            rgba,
        };
        Self {
            entries: vec![
                entry("R", Rgba8::opaque(255, 0, 0)),
                entry("G", Rgba8::opaque(119, 221, 119)),
                entry("B", Rgba8::opaque(100, 149, 237)),
                entry("P", Rgba8::opaque(255, 105, 180)),
                entry("PP", Rgba8::opaque(148, 0, 211)),
                entry(BLACK, Rgba8::opaque(0, 0, 0)),
            ],
        }
    }
}

impl TryFrom<Vec<PaletteEntry>> for Palette {
    type Error = StampError;

    fn try_from(entries: Vec<PaletteEntry>) -> StampResult<Self> {
        Self::new(entries)
    }
}

impl From<Palette> for Vec<PaletteEntry> {
    fn from(p: Palette) -> Self {
        p.entries
    }
}

#[cfg(test)]
#[path = "../../tests/unit/palette/table.rs"]
mod tests;
