//! Fixed color table and the ink recoloring primitive every shape uses.

/// Pixel-level ink substitution.
pub mod substitute;
/// Ordered code → color table.
pub mod table;
