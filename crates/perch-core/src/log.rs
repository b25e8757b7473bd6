//! `tracing` subscriber setup with an optional size-rotated log file.
//!
//! With file logging enabled, output goes to
//! `~/.config/perch/logs/perch.log`. When the file reaches the
//! configured size it is renamed to `perch.log.1` (one backup kept)
//! and a fresh file is started. Otherwise output goes to stderr.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

const LOG_FILE_NAME: &str = "perch.log";
const BACKUP_FILE_NAME: &str = "perch.log.1";

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Whether file logging is enabled. Defaults to `false`.
    pub enabled: bool,
    /// Minimum level: "trace", "debug", "info", "warn" or "error".
    pub level: String,
    /// Maximum log file size in megabytes before rotation.
    pub max_file_mb: u64,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            level: "info".into(),
            max_file_mb: 10,
        }
    }
}

/// Installs the global subscriber. Call once at startup.
///
/// `RUST_LOG` takes precedence over `config.level`. If the log file
/// cannot be opened, logging falls back to stderr.
pub fn init(config: &LogConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.level.to_ascii_lowercase()));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    let file = if config.enabled {
        open_log_file(config.max_file_mb)
    } else {
        None
    };

    // A second init (e.g. from tests) keeps the first subscriber.
    let _ = match file {
        Some(file) => builder
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .try_init(),
        None => builder.with_writer(io::stderr).try_init(),
    };
}

fn open_log_file(max_file_mb: u64) -> Option<RotatingFile> {
    let dir = crate::config::config_dir()?.join("logs");
    if let Err(e) = fs::create_dir_all(&dir) {
        eprintln!("Warning: cannot create {}: {e}", dir.display());
        return None;
    }
    match RotatingFile::open(dir.join(LOG_FILE_NAME), max_file_mb * 1024 * 1024) {
        Ok(file) => Some(file),
        Err(e) => {
            eprintln!("Warning: cannot open log file: {e}");
            None
        }
    }
}

/// Append-only file that rotates once `max_bytes` have been written.
///
/// A `max_bytes` of 0 disables rotation.
pub(crate) struct RotatingFile {
    file: File,
    path: PathBuf,
    max_bytes: u64,
    written: u64,
}

impl RotatingFile {
    pub(crate) fn open(path: PathBuf, max_bytes: u64) -> io::Result<Self> {
        let file = append(&path)?;
        let written = file.metadata().map(|m| m.len()).unwrap_or(0);
        Ok(Self {
            file,
            path,
            max_bytes,
            written,
        })
    }

    fn rotate(&mut self) -> io::Result<()> {
        let backup = self.path.with_file_name(BACKUP_FILE_NAME);
        fs::rename(&self.path, &backup)?;
        self.file = append(&self.path)?;
        self.written = 0;
        Ok(())
    }
}

impl Write for RotatingFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = self.file.write(buf)?;
        self.written += n as u64;
        if self.max_bytes > 0 && self.written >= self.max_bytes {
            // Keep logging into the current file if the rename fails.
            let _ = self.rotate();
        }
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.flush()
    }
}

fn append(path: &Path) -> io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}
