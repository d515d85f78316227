//! Attendance batch-marking service.
//!
//! # Responsibility
//! - Mark one status for a list of interns, one repository call at a time.
//! - Accumulate progress and per-intern failures into a `BatchReport`.
//! - Record activity lines when an `ActivityLog` is attached.
//!
//! # Invariants
//! - Marks are issued strictly in input order; no call overlaps another.
//! - A failed mark never aborts the batch and is never retried.
//! - `marked_count <= total_count` at every progress notification.

use crate::activity_log::ActivityLog;
use crate::model::attendance::{AttendanceMarkRequest, AttendanceStatus};
use crate::model::intern::InternId;
use crate::repo::attendance_repo::{AttendanceRepository, RepoError, RepoResult};
use chrono::NaiveDate;
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;
use uuid::Uuid;

/// Live progress of one batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MarkingProgress {
    pub marked_count: usize,
    pub total_count: usize,
    /// `round(marked_count / total_count * 100)`, 0 when idle.
    pub percent_complete: u8,
}

impl MarkingProgress {
    /// Zeroed progress shown outside of a batch.
    pub fn idle() -> Self {
        Self::default()
    }

    fn started(total_count: usize) -> Self {
        Self {
            marked_count: 0,
            total_count,
            percent_complete: 0,
        }
    }

    fn record_success(&mut self) {
        self.marked_count = (self.marked_count + 1).min(self.total_count);
        self.percent_complete = percent_of(self.marked_count, self.total_count);
    }
}

/// Rounds half up, matching the progress bar shown to users.
fn percent_of(marked: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let scaled = (marked * 200 + total) / (total * 2);
    scaled.min(100) as u8
}

/// One intern whose mark was rejected during a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchItemFailure {
    pub intern_id: InternId,
    pub message: String,
}

/// Outcome of one batch run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchReport {
    /// Correlates diagnostics events of one batch.
    pub batch_id: Uuid,
    pub marked_count: usize,
    pub total_count: usize,
    /// In the order the failing interns were attempted.
    pub failures: Vec<BatchItemFailure>,
}

impl BatchReport {
    pub fn failed_count(&self) -> usize {
        self.failures.len()
    }

    pub fn is_complete_success(&self) -> bool {
        self.failures.is_empty() && self.marked_count == self.total_count
    }
}

/// Errors that prevent a batch from starting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchError {
    /// No interns were selected.
    EmptySelection,
}

impl Display for BatchError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptySelection => write!(f, "select at least one intern to mark attendance"),
        }
    }
}

impl Error for BatchError {}

/// Use-case service wrapping an attendance repository.
pub struct AttendanceService<'log, R: AttendanceRepository> {
    repo: R,
    activity_log: Option<&'log ActivityLog>,
}

impl<R: AttendanceRepository> AttendanceService<'static, R> {
    /// Creates a service without activity recording.
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            activity_log: None,
        }
    }
}

impl<'log, R: AttendanceRepository> AttendanceService<'log, R> {
    /// Creates a service that appends one activity line per successful mark.
    pub fn with_activity_log(repo: R, activity_log: &'log ActivityLog) -> Self {
        Self {
            repo,
            activity_log: Some(activity_log),
        }
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// Marks a single intern.
    pub fn mark_one(&self, request: &AttendanceMarkRequest) -> RepoResult<()> {
        self.repo.mark_attendance(request)?;
        if let Some(activity_log) = self.activity_log {
            activity_log.write(&format!(
                "attendance marked intern_id={} status={} date={}",
                request.intern_id, request.status, request.date
            ));
        }
        Ok(())
    }

    /// Marks `intern_ids` with one status and date.
    ///
    /// # Errors
    /// - `BatchError::EmptySelection` when `intern_ids` is empty; no
    ///   repository call is made.
    pub fn mark_batch(
        &self,
        intern_ids: &[InternId],
        status: AttendanceStatus,
        date: NaiveDate,
    ) -> Result<BatchReport, BatchError> {
        self.mark_batch_with_progress(intern_ids, status, date, |_| {})
    }

    /// Same as [`Self::mark_batch`], calling `on_progress` after every
    /// attempted intern.
    pub fn mark_batch_with_progress<F>(
        &self,
        intern_ids: &[InternId],
        status: AttendanceStatus,
        date: NaiveDate,
        mut on_progress: F,
    ) -> Result<BatchReport, BatchError>
    where
        F: FnMut(&MarkingProgress),
    {
        if intern_ids.is_empty() {
            return Err(BatchError::EmptySelection);
        }

        let batch_id = Uuid::new_v4();
        let started_at = Instant::now();
        info!(
            "event=attendance_batch module=service status=start batch_id={} total={} attendance_status={} date={}",
            batch_id,
            intern_ids.len(),
            status,
            date
        );

        let mut progress = MarkingProgress::started(intern_ids.len());
        let mut failures = Vec::new();
        for &intern_id in intern_ids {
            let request = AttendanceMarkRequest::new(intern_id, status, date);
            match self.mark_one(&request) {
                Ok(()) => progress.record_success(),
                Err(err) => {
                    warn!(
                        "event=attendance_mark module=service status=error batch_id={} intern_id={} error_code={} error={}",
                        batch_id,
                        intern_id,
                        error_code(&err),
                        err
                    );
                    failures.push(BatchItemFailure {
                        intern_id,
                        message: err.to_string(),
                    });
                }
            }
            on_progress(&progress);
        }

        info!(
            "event=attendance_batch module=service status=ok batch_id={} marked={} failed={} duration_ms={}",
            batch_id,
            progress.marked_count,
            failures.len(),
            started_at.elapsed().as_millis()
        );

        Ok(BatchReport {
            batch_id,
            marked_count: progress.marked_count,
            total_count: progress.total_count,
            failures,
        })
    }
}

fn error_code(err: &RepoError) -> &'static str {
    match err {
        RepoError::UnknownIntern(_) => "unknown_intern",
        RepoError::Rejected { .. } => "mark_rejected",
        RepoError::Unavailable(_) => "store_unavailable",
    }
}
