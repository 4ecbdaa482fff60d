//! Filename directive grammar: `<name>[&<CODE>].<ext>`.

/// Stem and directive extraction.
pub mod parse;
