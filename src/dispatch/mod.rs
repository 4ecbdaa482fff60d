//! Job discovery and the bounded parallel batch run.

/// Watch directory scan and source renaming.
pub mod discover;
/// Worker pool fan-out and per-job fault isolation.
pub mod run;
