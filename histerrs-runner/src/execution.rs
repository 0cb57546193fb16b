use std::any::Any;
use std::fs;
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};

use colored::Colorize;
use rayon::prelude::*;

use crate::metadata::{parse_frontmatter, strip_frontmatter};
use crate::runner::{TestResult, run_fixture};

pub struct SuiteSummary {
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
    pub failures: Vec<(PathBuf, String)>,
}

pub fn init_thread_pool() {
    let threads = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(4);

    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}

pub fn run_suite(files: &[PathBuf], verbose: bool) -> SuiteSummary {
    let records: Vec<_> = files.par_iter().map(|path| run_case(path)).collect();
    let mut summary = SuiteSummary {
        passed: 0,
        failed: 0,
        skipped: 0,
        failures: Vec::new(),
    };

    for record in records {
        apply_record(&mut summary, &record.path, &record.result, verbose);
    }

    summary
}

struct CaseRecord {
    path: PathBuf,
    result: TestResult,
}

fn run_case(path: &Path) -> CaseRecord {
    let source = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) => {
            return CaseRecord {
                path: path.to_path_buf(),
                result: TestResult::Skipped(format!("failed to read fixture: {err}")),
            };
        }
    };

    let result = match parse_frontmatter(&source) {
        Some(meta) => {
            let msghist = strip_frontmatter(&source);
            panic::catch_unwind(AssertUnwindSafe(|| run_fixture(&meta, msghist)))
                .unwrap_or_else(|payload| TestResult::Failed(format_panic(payload)))
        }
        None => TestResult::Skipped("no front matter".to_string()),
    };

    CaseRecord {
        path: path.to_path_buf(),
        result,
    }
}

fn format_panic(payload: Box<dyn Any + Send>) -> String {
    let detail = payload
        .downcast_ref::<&str>()
        .map(|msg| msg.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned());
    match detail {
        Some(msg) => format!("extractor panicked: {msg}"),
        None => "extractor panicked".to_string(),
    }
}

fn apply_record(summary: &mut SuiteSummary, path: &Path, result: &TestResult, verbose: bool) {
    match result {
        TestResult::Passed => {
            summary.passed += 1;
            if verbose {
                println!("{} {}", "PASS".green(), path.display());
            }
        }
        TestResult::Failed(reason) => {
            summary.failed += 1;
            if verbose {
                println!("{} {} - {}", "FAIL".red(), path.display(), reason);
            }
            summary.failures.push((path.to_path_buf(), reason.clone()));
        }
        TestResult::Skipped(reason) => {
            summary.skipped += 1;
            if verbose {
                println!("{} {} - {}", "SKIP".yellow(), path.display(), reason);
            }
        }
    }
}
