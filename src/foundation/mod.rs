/// Shared value types.
pub mod core;
/// Error taxonomy and result alias.
pub mod error;
