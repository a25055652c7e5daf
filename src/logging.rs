use std::env;
use std::io::Write;

use log::{LevelFilter, Metadata, Record};

/// Environment variable holding the log level (`error` .. `trace`, or `off`).
pub const LOG_ENV: &str = "SEABATTLE_LOG";

struct StderrLogger;

impl log::Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            // stdout belongs to the game screen and JSON reports
            let _ = writeln!(
                std::io::stderr(),
                "{:<5} {} - {}",
                record.level(),
                record.target(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

static LOGGER: StderrLogger = StderrLogger;

fn level_from(value: Option<String>) -> LevelFilter {
    value
        .and_then(|lvl| lvl.trim().parse().ok())
        .unwrap_or(LevelFilter::Info)
}

/// Install the stderr logger with its level taken from `SEABATTLE_LOG`.
/// Defaults to `info`; a second call keeps the first logger.
pub fn init_logging() {
    let level = level_from(env::var(LOG_ENV).ok());
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }
}
