//! Rolling Logger
//!
//! Installs a `tracing` subscriber that writes to `<dir>/<app>.log` and to
//! stderr. When the file passes the size limit it is shifted to
//! `<app>.1.log`, `<app>.2.log`, ... keeping at most `max_files` old files.
//! Records emitted through the `log` facade are bridged in as well.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::fmt::writer::MakeWriterExt;

/// Default size limit of the active log file
pub const DEFAULT_MAX_BYTES: u64 = 1024 * 1024;
/// Default number of rotated files kept next to the active one
pub const DEFAULT_MAX_FILES: usize = 3;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    #[error("failed to prepare log file in {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("a global logger is already installed: {0}")]
    AlreadyInstalled(String),
}

/// Size-rotated log file
pub struct RollingFile {
    dir: PathBuf,
    stem: String,
    max_bytes: u64,
    max_files: usize,
    file: File,
    written: u64,
}

impl RollingFile {
    pub fn open(dir: &Path, stem: &str, max_bytes: u64, max_files: usize) -> io::Result<Self> {
        fs::create_dir_all(dir)?;
        let path = dir.join(format!("{}.log", stem));
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        let written = file.metadata()?.len();
        Ok(Self {
            dir: dir.to_path_buf(),
            stem: stem.to_string(),
            max_bytes,
            max_files,
            file,
            written,
        })
    }

    pub fn active_path(&self) -> PathBuf {
        self.dir.join(format!("{}.log", self.stem))
    }

    fn rotated_path(&self, index: usize) -> PathBuf {
        self.dir.join(format!("{}.{}.log", self.stem, index))
    }

    fn rotate(&mut self) -> io::Result<()> {
        self.file.flush()?;

        if self.max_files == 0 {
            self.file = File::create(self.active_path())?;
            self.written = 0;
            return Ok(());
        }

        let oldest = self.rotated_path(self.max_files);
        if oldest.exists() {
            fs::remove_file(&oldest)?;
        }
        for index in (1..self.max_files).rev() {
            let from = self.rotated_path(index);
            if from.exists() {
                fs::rename(&from, self.rotated_path(index + 1))?;
            }
        }
        fs::rename(self.active_path(), self.rotated_path(1))?;

        self.file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.active_path())?;
        self.written = 0;
        Ok(())
    }
}

impl Write for RollingFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.written > 0 && self.written + buf.len() as u64 > self.max_bytes {
            self.rotate()?;
        }
        let n = self.file.write(buf)?;
        self.written += n as u64;
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.flush()
    }
}

/// Local wall-clock timestamps
struct LocalTime;

impl FormatTime for LocalTime {
    fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
        write!(w, "{}", chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"))
    }
}

/// Install the global subscriber writing to `<log_dir>/<app_name>.log`
pub fn init_logger(log_dir: PathBuf, app_name: &str) -> Result<(), LoggerError> {
    init_logger_with(log_dir, app_name, DEFAULT_MAX_BYTES, DEFAULT_MAX_FILES)
}

pub fn init_logger_with(
    log_dir: PathBuf,
    app_name: &str,
    max_bytes: u64,
    max_files: usize,
) -> Result<(), LoggerError> {
    let file = RollingFile::open(&log_dir, app_name, max_bytes, max_files).map_err(|source| {
        LoggerError::Io {
            path: log_dir.clone(),
            source,
        }
    })?;
    let active = file.active_path();

    tracing_subscriber::fmt()
        .with_ansi(false)
        .with_timer(LocalTime)
        .with_max_level(tracing::Level::INFO)
        .with_writer(Mutex::new(file).and(io::stderr))
        .try_init()
        .map_err(|e| LoggerError::AlreadyInstalled(e.to_string()))?;

    tracing::info!("Logging to {}", active.display());
    Ok(())
}

/// Log a one-off line at info level
pub fn info(message: &str) {
    tracing::info!("{}", message);
}

/// Log a one-off line at error level
pub fn error(message: &str) {
    tracing::error!("{}", message);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotates_when_limit_is_reached() {
        let dir = tempfile::tempdir().unwrap();
        let mut file = RollingFile::open(dir.path(), "app", 16, 2).unwrap();

        file.write_all(b"0123456789\n").unwrap();
        file.write_all(b"abcdefghij\n").unwrap();
        file.flush().unwrap();

        let active = fs::read_to_string(dir.path().join("app.log")).unwrap();
        let rotated = fs::read_to_string(dir.path().join("app.1.log")).unwrap();
        assert_eq!(active, "abcdefghij\n");
        assert_eq!(rotated, "0123456789\n");
    }

    #[test]
    fn test_keeps_at_most_max_files() {
        let dir = tempfile::tempdir().unwrap();
        let mut file = RollingFile::open(dir.path(), "app", 4, 2).unwrap();

        for line in ["aaaa", "bbbb", "cccc", "dddd"] {
            file.write_all(line.as_bytes()).unwrap();
        }
        file.flush().unwrap();

        assert_eq!(fs::read_to_string(dir.path().join("app.log")).unwrap(), "dddd");
        assert_eq!(fs::read_to_string(dir.path().join("app.1.log")).unwrap(), "cccc");
        assert_eq!(fs::read_to_string(dir.path().join("app.2.log")).unwrap(), "bbbb");
        assert!(!dir.path().join("app.3.log").exists());
    }

    #[test]
    fn test_reopen_appends_to_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        {
            let mut file = RollingFile::open(dir.path(), "app", 1024, 1).unwrap();
            file.write_all(b"first\n").unwrap();
        }
        let mut file = RollingFile::open(dir.path(), "app", 1024, 1).unwrap();
        file.write_all(b"second\n").unwrap();
        file.flush().unwrap();

        let content = fs::read_to_string(dir.path().join("app.log")).unwrap();
        assert_eq!(content, "first\nsecond\n");
    }
}
