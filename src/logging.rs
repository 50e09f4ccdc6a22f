use log::{Level, Metadata, Record};
use once_cell::sync::OnceCell;
use std::fs::{OpenOptions, create_dir_all};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::Result;

pub const LOG_FILE_NAME: &str = "log.txt";

// The terminal belongs to the dialog, so log records go to a file instead.
#[derive(Debug)]
struct FileLogger {
    log_file: PathBuf,
    level: Level,
}

static LOGGER: OnceCell<FileLogger> = OnceCell::new();

impl log::Log for FileLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let log_entry = format!(
                "{} {} [{}] - {}\n",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                record.level(),
                record.target(),
                record.args()
            );

            if let Ok(mut file) = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&self.log_file)
            {
                let _ = file.write_all(log_entry.as_bytes());
            }
        }
    }

    fn flush(&self) {}
}

/// Installs the file logger, writing to `<log_dir>/log.txt`.
pub fn init(log_dir: &Path, level: Level) -> Result<PathBuf> {
    create_dir_all(log_dir)?;
    let log_file = log_dir.join(LOG_FILE_NAME);

    let logger = LOGGER.get_or_init(|| FileLogger {
        log_file: log_file.clone(),
        level,
    });

    log::set_logger(logger)
        .map(|()| log::set_max_level(level.to_level_filter()))?;
    Ok(logger.log_file.clone())
}
