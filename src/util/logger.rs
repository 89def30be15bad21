//! Stdout logger behind the `log` facade.
//!
//! Lines look like `2026-01-01T12:00:00.000Z INFO silva_lib::turso: message`.

use log::{LevelFilter, Log, Metadata, Record};
use std::io::Write;

/// Debug in debug builds, Info in release
pub fn default_level() -> LevelFilter {
    if cfg!(debug_assertions) {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

struct StdoutLogger {
    level: LevelFilter,
}

impl Log for StdoutLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format_record(record);
        let mut stdout = std::io::stdout().lock();
        let _ = writeln!(stdout, "{}", line);
    }

    fn flush(&self) {
        let _ = std::io::stdout().flush();
    }
}

fn format_record(record: &Record) -> String {
    format!(
        "{} {} {}: {}",
        chrono::Utc::now().format("%Y-%m-%dT%H:%M:%S%.3fZ"),
        record.level(),
        record.target(),
        record.args()
    )
}

/// Install the stdout logger. Safe to call more than once; later calls only
/// adjust the level.
pub fn init(level: LevelFilter) {
    if log::set_boxed_logger(Box::new(StdoutLogger { level })).is_err() {
        crate::debug!("Logger already installed");
    }
    log::set_max_level(level);
}
