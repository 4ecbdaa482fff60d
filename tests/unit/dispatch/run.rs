use std::path::PathBuf;

use image::RgbaImage;

use super::*;
use crate::directive::parse::ParsedName;

fn scratch(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "stampworks_run_{name}_{}",
        std::process::id()
    ));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn job_for(dir: &std::path::Path, file: &str, w: u32, h: u32) -> Job {
    let path = dir.join(file);
    RgbaImage::new(w, h).save(&path).unwrap();
    Job {
        name: ParsedName::parse(file).unwrap(),
        path,
    }
}

#[test]
fn configured_size_wins() {
    let cfg = StampConfig {
        standard_size: Some(200),
        ..StampConfig::default()
    };
    assert_eq!(
        resolve_standard_size(Shape::Circle, &cfg, &[]),
        Some(SquareSide(200))
    );
}

#[test]
fn fallback_comes_from_first_readable_job() {
    let dir = scratch("fallback");
    let unreadable = Job {
        name: ParsedName::parse("ghost.png").unwrap(),
        path: dir.join("ghost.png"),
    };
    let jobs = [
        unreadable,
        job_for(&dir, "a.png", 200, 100),
        job_for(&dir, "b.png", 10, 10),
    ];
    let cfg = StampConfig::default();
    assert_eq!(
        resolve_standard_size(Shape::Circle, &cfg, &jobs),
        Some(SquareSide(260))
    );
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn non_circle_shapes_have_no_standard_size() {
    let cfg = StampConfig {
        standard_size: Some(200),
        ..StampConfig::default()
    };
    assert_eq!(resolve_standard_size(Shape::Rectangle, &cfg, &[]), None);
    assert_eq!(resolve_standard_size(Shape::CircleSticker, &cfg, &[]), None);
    assert_eq!(
        resolve_standard_size(Shape::Circle, &StampConfig::default(), &[]),
        None
    );
}

#[test]
fn pool_size_must_be_positive() {
    assert!(build_thread_pool(0).is_err());
    assert_eq!(build_thread_pool(3).unwrap().current_num_threads(), 3);
}

#[test]
fn report_counters() {
    let report = RunReport {
        files: vec![
            FileReport {
                file: "a.png".to_string(),
                outcome: JobOutcome::Processed {
                    written: 1,
                    failed_saves: 0,
                    archived: true,
                },
            },
            FileReport {
                file: "b.jpg".to_string(),
                outcome: JobOutcome::Collided,
            },
            FileReport {
                file: "c&R&G.jpg".to_string(),
                outcome: JobOutcome::Rejected {
                    reason: "x".to_string(),
                },
            },
            FileReport {
                file: "d.png".to_string(),
                outcome: JobOutcome::Failed {
                    reason: "y".to_string(),
                },
            },
        ],
        ..RunReport::default()
    };
    assert_eq!(report.processed(), 1);
    assert_eq!(report.collided(), 1);
    assert_eq!(report.rejected(), 1);
    assert_eq!(report.failed(), 1);
    assert_eq!(report.outcome_of("b.jpg"), Some(&JobOutcome::Collided));
    assert_eq!(report.outcome_of("zzz"), None);
}
