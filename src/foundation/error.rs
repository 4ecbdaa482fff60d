/// Crate-wide result alias.
pub type StampResult<T> = Result<T, StampError>;

/// Errors raised by the batch pipeline.
///
/// Only [`StampError::MalformedFilename`] and [`StampError::Config`] abort a run; every other
/// variant is isolated to the job that produced it and surfaced through the activity log.
#[derive(thiserror::Error, Debug)]
pub enum StampError {
    /// The raw filename has no extension separator.
    #[error("malformed filename '{0}': no extension separator")]
    MalformedFilename(String),

    /// The stem carries more than one directive marker.
    #[error("ambiguous directive in '{0}': more than one '&' marker")]
    AmbiguousDirective(String),

    /// The normalized name is already taken in the watch directory.
    #[error("name collision: '{0}' already exists")]
    NameCollision(String),

    /// Composition, recolor or resize failed.
    #[error("transform error: {0}")]
    Transform(String),

    /// Writing an output artifact failed.
    #[error("save error: {0}")]
    Save(String),

    /// Moving a source file into the archive failed.
    #[error("archive error: {0}")]
    Archive(String),

    /// Invalid configuration value.
    #[error("config error: {0}")]
    Config(String),

    /// Any other failure with its source chain preserved.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl StampError {
    /// Build a [`StampError::Transform`].
    pub fn transform(msg: impl Into<String>) -> Self {
        Self::Transform(msg.into())
    }

    /// Build a [`StampError::Save`].
    pub fn save(msg: impl Into<String>) -> Self {
        Self::Save(msg.into())
    }

    /// Build a [`StampError::Archive`].
    pub fn archive(msg: impl Into<String>) -> Self {
        Self::Archive(msg.into())
    }

    /// Build a [`StampError::Config`].
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// `true` for errors that must stop a run before any job is submitted.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::MalformedFilename(_) | Self::Config(_))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
