use std::{
    panic::{AssertUnwindSafe, catch_unwind},
    time::Instant,
};

use rayon::prelude::*;

use crate::{
    archive::{
        log::{ActivityLog, LogHandle},
        store::ArchiveStore,
    },
    config::settings::StampConfig,
    dispatch::discover::{Job, discover, normalize},
    foundation::{
        core::SquareSide,
        error::{StampError, StampResult},
    },
    shape::{Shape, ShapeContext, source_dimensions},
};

/// What happened to one eligible file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum JobOutcome {
    /// Composed and at least one artifact written.
    Processed {
        written: usize,
        failed_saves: usize,
        archived: bool,
    },
    /// Normalized name was taken; the file was left as is.
    Collided,
    /// Rejected before renaming (ambiguous directive).
    Rejected { reason: String },
    /// Abandoned during rename, composition or saving.
    Failed { reason: String },
}

/// Per-file entry of a [`RunReport`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileReport {
    /// Name the file was known by when the outcome was decided.
    pub file: String,
    pub outcome: JobOutcome,
}

/// Summary of one batch run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunReport {
    pub files: Vec<FileReport>,
    /// Side every circle output was standardized to.
    pub standard_size: Option<SquareSide>,
    /// Records appended to the activity log.
    pub log_records: usize,
}

impl RunReport {
    fn count(&self, pred: impl Fn(&JobOutcome) -> bool) -> usize {
        self.files.iter().filter(|f| pred(&f.outcome)).count()
    }

    pub fn processed(&self) -> usize {
        self.count(|o| matches!(o, JobOutcome::Processed { .. }))
    }

    pub fn collided(&self) -> usize {
        self.count(|o| matches!(o, JobOutcome::Collided))
    }

    pub fn rejected(&self) -> usize {
        self.count(|o| matches!(o, JobOutcome::Rejected { .. }))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, JobOutcome::Failed { .. }))
    }

    pub fn outcome_of(&self, file: &str) -> Option<&JobOutcome> {
        self.files.iter().find(|f| f.file == file).map(|f| &f.outcome)
    }
}

/// Process every eligible file in the watch directory as `shape`.
///
/// Configuration errors and malformed filenames abort before anything is renamed. Every
/// other failure is recorded in the activity log and the report, and the run carries on.
#[tracing::instrument(skip(shape, cfg), fields(shape = shape.label(), watch_dir = %cfg.watch_dir.display()))]
pub fn dispatch(shape: Shape, cfg: &StampConfig) -> StampResult<RunReport> {
    cfg.validate()?;
    let discovery = discover(cfg)?;
    let log = ActivityLog::open(&cfg.log_path)?;
    let pool = build_thread_pool(cfg.workers)?;
    let store = ArchiveStore::new(&cfg.watch_dir, &cfg.archive_dir);

    tracing::info!(
        candidates = discovery.candidates.len(),
        rejected = discovery.rejected.len(),
        workers = cfg.workers,
        "starting batch"
    );

    let (handle, rx) = LogHandle::channel();
    std::thread::scope(|scope| -> StampResult<RunReport> {
        let writer = scope.spawn(move || log.run(rx));
        let mut report = RunReport::default();

        for (raw, err) in discovery.rejected {
            tracing::warn!(file = %raw, error = %err, "rejected");
            handle.failure(&raw, &err);
            report.files.push(FileReport {
                file: raw,
                outcome: JobOutcome::Rejected {
                    reason: err.to_string(),
                },
            });
        }

        // Renames run serially so that two sources normalizing to one name collide
        // deterministically.
        let mut jobs = Vec::with_capacity(discovery.candidates.len());
        for name in &discovery.candidates {
            match normalize(&cfg.watch_dir, name) {
                Ok(job) => jobs.push(job),
                Err(StampError::NameCollision(file)) => {
                    tracing::warn!(file = %file, "name collision, skipping");
                    handle.collision(&file);
                    report.files.push(FileReport {
                        file: name.raw.clone(),
                        outcome: JobOutcome::Collided,
                    });
                }
                Err(e) => {
                    handle.failure(&name.raw, &e);
                    report.files.push(FileReport {
                        file: name.raw.clone(),
                        outcome: JobOutcome::Failed {
                            reason: e.to_string(),
                        },
                    });
                }
            }
        }

        let standard_size = resolve_standard_size(shape, cfg, &jobs);
        let ctx = ShapeContext {
            config: cfg,
            standard_size,
        };

        let done: Vec<FileReport> = pool.install(|| {
            jobs.par_iter()
                .map_with(handle.clone(), |log, job| {
                    run_job(shape, job, &ctx, &store, log)
                })
                .collect()
        });
        report.files.extend(done);
        report.standard_size = standard_size;

        drop(handle);
        report.log_records = writer
            .join()
            .map_err(|_| anyhow::anyhow!("activity log writer panicked"))?;

        tracing::info!(
            processed = report.processed(),
            collided = report.collided(),
            rejected = report.rejected(),
            failed = report.failed(),
            "batch finished"
        );
        Ok(report)
    })
}

/// Standard size for the run: the configured side, else the fallback implied by the first
/// job whose dimensions can be read. Resolved once, before any worker starts.
pub fn resolve_standard_size(shape: Shape, cfg: &StampConfig, jobs: &[Job]) -> Option<SquareSide> {
    if !shape.uses_standard_size() {
        return None;
    }
    if let Some(side) = cfg.standard_size {
        return Some(SquareSide(side));
    }
    for job in jobs {
        match source_dimensions(&job.path) {
            Ok((w, h)) => {
                let side = shape.fallback_standard_size(w, h);
                tracing::debug!(file = %job.name.normalized, ?side, "derived standard size");
                return side;
            }
            Err(e) => {
                tracing::warn!(file = %job.name.normalized, error = %e, "cannot read dimensions")
            }
        }
    }
    None
}

#[tracing::instrument(skip_all, fields(file = %job.name.normalized))]
fn run_job(
    shape: Shape,
    job: &Job,
    ctx: &ShapeContext<'_>,
    store: &ArchiveStore,
    log: &LogHandle,
) -> FileReport {
    let start = Instant::now();
    let file = job.name.normalized.clone();
    let fail = |reason: String| FileReport {
        file: file.clone(),
        outcome: JobOutcome::Failed { reason },
    };

    if shape == Shape::Circle && !job.name.is_directed() {
        log.append_comment(format!(
            "{} colour not specified. Processing in B&W format",
            job.name.stem
        ));
    }

    // Panics inside the codec or resize path stay with this job.
    let composed = catch_unwind(AssertUnwindSafe(|| {
        shape.process(&job.path, &job.name, ctx)
    }))
    .unwrap_or_else(|_| Err(StampError::transform("panic during composition")));
    let artifacts = match composed {
        Ok(a) => a,
        Err(e) => {
            tracing::warn!(error = %e, "transform failed");
            log.failure(&file, &e);
            return fail(e.to_string());
        }
    };

    let mut written = 0usize;
    let mut failed_saves = 0usize;
    for artifact in &artifacts {
        match artifact.save(ctx.config.image_quality) {
            Ok(()) => written += 1,
            Err(e) => {
                failed_saves += 1;
                tracing::warn!(error = %e, "save failed");
                log.append_comment(format!("Exception on save_image for {file}: {e}"));
            }
        }
    }
    if written == 0 {
        let reason = "no output artifact could be saved".to_string();
        log.failure(&file, &reason);
        return fail(reason);
    }

    let archived = match store.archive(&file) {
        Ok(_) => true,
        Err(e) => {
            tracing::warn!(error = %e, "archive failed");
            log.append_comment(format!("{file}: {e}"));
            false
        }
    };

    let seconds = start.elapsed().as_secs_f64();
    log.append_result(&file, seconds);
    tracing::info!(written, failed_saves, archived, seconds, "processed");

    FileReport {
        file,
        outcome: JobOutcome::Processed {
            written,
            failed_saves,
            archived,
        },
    }
}

fn build_thread_pool(workers: usize) -> StampResult<rayon::ThreadPool> {
    if workers == 0 {
        return Err(StampError::config("workers must be >= 1"));
    }
    rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .thread_name(|i| format!("stampworks-{i}"))
        .build()
        .map_err(|e| StampError::config(format!("failed to build worker pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/dispatch/run.rs"]
mod tests;
