//! File logger for the `log` facade.
//!
//! Controlled by the VIMSTACK_LOG environment variable:
//! - 0 or unset: no logging
//! - 1: errors and warnings
//! - 2: info
//! - 3: debug (degraded frames, cache misses)
//! - 4: trace (cache hits, discarded history blocks)
//!
//! Output goes to `vimstack.log` in the temp directory so stdout stays free
//! for channel responses in `serve` mode.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::OnceLock;
use std::time::{SystemTime, UNIX_EPOCH};

use log::{LevelFilter, Log, Metadata, Record};
use parking_lot::Mutex;

const LEVEL_VAR: &str = "VIMSTACK_LOG";

struct FileLogger {
    level: LevelFilter,
    file: Mutex<Option<File>>,
}

impl Log for FileLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let mut file = self.file.lock();
        if let Some(file) = file.as_mut() {
            let _ = writeln!(
                file,
                "[{}] [{:<5}] [{}] {}",
                timestamp(),
                record.level(),
                record.target(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        if let Some(file) = self.file.lock().as_mut() {
            let _ = file.flush();
        }
    }
}

static LOGGER: OnceLock<FileLogger> = OnceLock::new();

fn level_from_env() -> LevelFilter {
    match std::env::var(LEVEL_VAR).map(|v| v.trim().parse::<u8>()) {
        Ok(Ok(1)) => LevelFilter::Warn,
        Ok(Ok(2)) => LevelFilter::Info,
        Ok(Ok(3)) => LevelFilter::Debug,
        Ok(Ok(4)) => LevelFilter::Trace,
        _ => LevelFilter::Off,
    }
}

pub fn log_path() -> PathBuf {
    std::env::temp_dir().join("vimstack.log")
}

fn timestamp() -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    format!("{}.{:06}", now.as_secs(), now.subsec_micros())
}

/// Install the file logger. Calling it again is a no-op.
pub fn init() {
    let level = level_from_env();
    let logger = LOGGER.get_or_init(|| {
        let file = if level == LevelFilter::Off {
            None
        } else {
            OpenOptions::new()
                .create(true)
                .append(true)
                .open(log_path())
                .ok()
        };
        FileLogger {
            level,
            file: Mutex::new(file),
        }
    });
    if log::set_logger(logger).is_ok() {
        log::set_max_level(logger.level);
    }
}
