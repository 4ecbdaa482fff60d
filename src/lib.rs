//! stampworks turns raw line art dropped into a watch directory into print-ready stamps.
//!
//! A run scans the watch directory, reads an optional color directive from each filename
//! (`<name>[&<CODE>].<ext>`), composes the requested [`Shape`], recolors ink pixels from the
//! [`Palette`], writes the results and moves each source into the archive. Every outcome is
//! appended to a plain-text activity log.
//!
//! ```no_run
//! use stampworks::{Shape, StampConfig, dispatch};
//!
//! let cfg = StampConfig::default();
//! let report = dispatch(Shape::Circle, &cfg)?;
//! println!("{} processed", report.processed());
//! # Ok::<(), stampworks::StampError>(())
//! ```
#![forbid(unsafe_code)]

pub mod archive;
pub mod config;
pub mod directive;
pub mod dispatch;
mod foundation;
pub mod palette;
pub mod shape;

pub use crate::archive::{
    log::{ActivityLog, LogEvent, LogHandle},
    store::ArchiveStore,
};
pub use crate::config::settings::{CUSTOM_BUCKET, StampConfig};
pub use crate::directive::parse::{Directive, ParsedName};
pub use crate::dispatch::{
    discover::{Job, discover},
    run::{FileReport, JobOutcome, RunReport, dispatch},
};
pub use crate::foundation::core::{Rgba8, SquareSide};
pub use crate::foundation::error::{StampError, StampResult};
pub use crate::palette::{
    substitute::substitute,
    table::{Palette, PaletteEntry},
};
pub use crate::shape::{OutputArtifact, Shape, ShapeContext};
