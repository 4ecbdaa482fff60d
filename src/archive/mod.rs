//! Audit trail and source tidy-up for a batch run.

/// Append-only activity log and its single writer.
pub mod log;
/// Move-to-archive of processed sources.
pub mod store;
