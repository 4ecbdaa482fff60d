use std::{
    fs::{File, OpenOptions},
    io::Write as _,
    path::{Path, PathBuf},
    sync::mpsc,
};

use anyhow::Context as _;
use chrono::{DateTime, Local};

use crate::foundation::error::StampResult;

/// One audit record.
#[derive(Clone, Debug, PartialEq)]
pub enum LogEvent {
    /// A source finished; `seconds` is wall time for the whole job.
    Processed { file: String, seconds: f64 },
    /// The normalized name was already taken.
    Collision { file: String },
    /// A job was abandoned.
    Failure { file: String, reason: String },
    /// Free-form note.
    Comment(String),
}

impl LogEvent {
    /// Text appended to the log for this event, newline-terminated.
    pub fn render(&self, at: DateTime<Local>) -> String {
        match self {
            Self::Processed { file, seconds } => format!(
                "{}: {file} processed in {}s\n",
                at.format("%d/%m/%Y %H:%M"),
                seconds_text(*seconds)
            ),
            Self::Collision { file } => format!(
                "{}: \"{file}\" ERROR! FILE ALREADY EXISTS\n",
                at.format("%d/%m/%Y, %H:%M:%S")
            ),
            Self::Failure { file, reason } => format!(
                "{}: UNEXPECTED ERROR PROCESSING {file}\n    Reason: {reason}\n",
                at.format("%d/%m/%Y %H:%M")
            ),
            Self::Comment(text) if text.ends_with('\n') => text.clone(),
            Self::Comment(text) => format!("{text}\n"),
        }
    }
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// Two-decimal duration that always keeps at least one decimal place (`3.0`, `0.5`, `0.12`).
fn seconds_text(v: f64) -> String {
    let r = round2(v);
    if r.fract() == 0.0 {
        format!("{r:.1}")
    } else {
        format!("{r}")
    }
}

/// Exclusive owner of the append-only log file.
#[derive(Debug)]
pub struct ActivityLog {
    path: PathBuf,
    file: File,
}

impl ActivityLog {
    /// Open `path` for appending, creating it if needed.
    pub fn open(path: &Path) -> StampResult<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("open activity log '{}'", path.display()))?;
        Ok(Self {
            path: path.to_path_buf(),
            file,
        })
    }

    /// Append one event as a single write.
    pub fn write(&mut self, event: &LogEvent) -> std::io::Result<()> {
        let line = event.render(Local::now());
        self.file.write_all(line.as_bytes())?;
        self.file.flush()
    }

    /// Drain `rx` until every sender is dropped. Returns the number of events written.
    ///
    /// A failed write is reported through `tracing` and does not stop the drain.
    pub fn run(mut self, rx: mpsc::Receiver<LogEvent>) -> usize {
        let mut written = 0usize;
        for event in rx {
            match self.write(&event) {
                Ok(()) => written += 1,
                Err(e) => tracing::error!(
                    log = %self.path.display(),
                    error = %e,
                    "failed to append to activity log"
                ),
            }
        }
        written
    }
}

/// Cloneable producer side of the activity log, handed to every job.
#[derive(Clone, Debug)]
pub struct LogHandle {
    tx: mpsc::Sender<LogEvent>,
}

impl LogHandle {
    /// Create a handle and the receiver to pass to [`ActivityLog::run`].
    pub fn channel() -> (Self, mpsc::Receiver<LogEvent>) {
        let (tx, rx) = mpsc::channel();
        (Self { tx }, rx)
    }

    pub fn append_result(&self, file: &str, seconds: f64) {
        self.send(LogEvent::Processed {
            file: file.to_string(),
            seconds,
        });
    }

    pub fn append_comment(&self, text: impl Into<String>) {
        self.send(LogEvent::Comment(text.into()));
    }

    pub fn collision(&self, file: &str) {
        self.send(LogEvent::Collision {
            file: file.to_string(),
        });
    }

    pub fn failure(&self, file: &str, reason: impl ToString) {
        self.send(LogEvent::Failure {
            file: file.to_string(),
            reason: reason.to_string(),
        });
    }

    fn send(&self, event: LogEvent) {
        if let Err(mpsc::SendError(event)) = self.tx.send(event) {
            tracing::warn!(?event, "activity log writer is gone, dropping event");
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/archive/log.rs"]
mod tests;
