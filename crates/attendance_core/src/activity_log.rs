//! Append-only activity log sink.
//!
//! # Responsibility
//! - Append one `<timestamp> - <message>` line per call to a shared file.
//! - Never block callers on disk I/O and never surface write failures.
//!
//! # Invariants
//! - One `write` call produces exactly one line.
//! - Existing file content is preserved (append mode, no rotation).
//! - Buffered lines are flushed when the sink is dropped.

use crate::logging::sanitize_message;
use chrono::{SecondsFormat, Utc};
use flexi_logger::writers::{FileLogWriter, LogWriter};
use flexi_logger::{DeferredNow, FileSpec, FlexiLoggerError, WriteMode};
use log::{warn, Level, Record};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io::Write;
use std::path::{Path, PathBuf};

const MAX_ACTIVITY_MESSAGE_CHARS: usize = 2_000;

/// Error raised while opening the activity log file.
#[derive(Debug)]
pub enum ActivityLogError {
    /// Path is empty or names a directory.
    InvalidPath(PathBuf),
    /// Writer backend could not be started.
    Backend(FlexiLoggerError),
}

impl Display for ActivityLogError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidPath(path) => {
                write!(f, "invalid activity log path `{}`", path.display())
            }
            Self::Backend(err) => write!(f, "failed to open activity log: {err}"),
        }
    }
}

impl Error for ActivityLogError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidPath(_) => None,
            Self::Backend(err) => Some(err),
        }
    }
}

impl From<FlexiLoggerError> for ActivityLogError {
    fn from(value: FlexiLoggerError) -> Self {
        Self::Backend(value)
    }
}

/// Shared append-only log file.
///
/// Open once at startup and pass by reference to whoever records activity.
pub struct ActivityLog {
    path: PathBuf,
    writer: FileLogWriter,
}

impl ActivityLog {
    /// Opens `path` for appending, creating parent directories as needed.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, ActivityLogError> {
        let path = path.as_ref().to_path_buf();
        if path.as_os_str().is_empty() || path.is_dir() {
            return Err(ActivityLogError::InvalidPath(path));
        }

        let writer = FileLogWriter::builder(FileSpec::try_from(writer_path(&path))?)
            .append()
            .format(activity_line_format)
            .write_mode(WriteMode::BufferAndFlush)
            .try_build()?;

        Ok(Self { path, writer })
    }

    /// Queues one timestamped line. Failures are reported, then dropped.
    pub fn write(&self, message: &str) {
        let message = sanitize_message(message, MAX_ACTIVITY_MESSAGE_CHARS);
        let result = self.writer.write(
            &mut DeferredNow::new(),
            &Record::builder()
                .args(format_args!("{message}"))
                .level(Level::Info)
                .target("activity")
                .build(),
        );
        if let Err(err) = result {
            warn!(
                "event=activity_write module=activity_log status=error path={} error={}",
                self.path.display(),
                err
            );
        }
    }

    /// Forces buffered lines to disk.
    pub fn flush(&self) {
        if let Err(err) = self.writer.flush() {
            warn!(
                "event=activity_flush module=activity_log status=error path={} error={}",
                self.path.display(),
                err
            );
        }
    }

    /// File this sink appends to.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for ActivityLog {
    fn drop(&mut self) {
        self.writer.shutdown();
    }
}

/// Anchors a bare file name to the working directory so the writer always
/// gets a non-empty output directory.
fn writer_path(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => path.to_path_buf(),
        _ => Path::new(".").join(path),
    }
}

fn activity_line_format(
    w: &mut dyn Write,
    _now: &mut DeferredNow,
    record: &Record,
) -> std::io::Result<()> {
    write!(
        w,
        "{} - {}",
        Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        record.args()
    )
}
