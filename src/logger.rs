use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::{Mutex, OnceLock};

use anyhow::{Context, Result};
use chrono::Local;

static LOGGER: OnceLock<Logger> = OnceLock::new();

/// Appends timestamped lines to a file. The terminal belongs to the game
/// while it runs, so nothing is printed to stdout.
pub struct Logger {
    prefix: Option<String>,
    sink: Mutex<File>,
}

impl Logger {
    fn new(prefix: Option<String>, sink: File) -> Self {
        Self { prefix, sink: Mutex::new(sink) }
    }

    pub fn log(&self, message: &str) {
        let line = format_line(self.prefix.as_deref(), message);
        if let Ok(mut sink) = self.sink.lock() {
            let _ = writeln!(sink, "{}", line);
        }
    }
}

fn format_line(prefix: Option<&str>, message: &str) -> String {
    let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
    match prefix {
        Some(prefix) => format!("[{}][{}] {}", timestamp, prefix, message),
        None => format!("[{}] {}", timestamp, message),
    }
}

pub fn init_logger(path: &Path, prefix: Option<String>) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed opening log file {}", path.display()))?;

    LOGGER.get_or_init(|| Logger::new(prefix, file));
    Ok(())
}

/// Silently dropped until `init_logger` has run, which keeps tests quiet.
pub fn log(message: &str) {
    if let Some(logger) = LOGGER.get() {
        logger.log(message);
    }
}

#[macro_export]
macro_rules! log {
    ($($arg:tt)*) => {
        $crate::logger::log(&format!($($arg)*))
    };
}
