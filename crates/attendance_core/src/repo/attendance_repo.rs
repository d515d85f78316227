//! Attendance repository contract and in-memory implementation.
//!
//! # Responsibility
//! - Define the single write used by batch marking (`mark_attendance`).
//! - Provide an in-process store for the CLI and tests.
//!
//! # Invariants
//! - One call writes exactly one `(intern, date)` mark.
//! - Re-marking the same intern on the same date replaces the status.

use crate::model::attendance::{AttendanceMarkRequest, AttendanceStatus};
use crate::model::intern::{Intern, InternId};
use chrono::NaiveDate;
use std::collections::{BTreeMap, BTreeSet};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::{Mutex, MutexGuard};

pub type RepoResult<T> = Result<T, RepoError>;

type MarkTable = BTreeMap<(InternId, NaiveDate), AttendanceStatus>;

/// Error returned by one attendance write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoError {
    /// Intern is not part of the roster known to the repository.
    UnknownIntern(InternId),
    /// The backing store refused the write.
    Rejected { intern_id: InternId, reason: String },
    /// The backing store cannot be reached or is in a broken state.
    Unavailable(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownIntern(id) => write!(f, "intern not found: {id}"),
            Self::Rejected { intern_id, reason } => {
                write!(f, "attendance for intern {intern_id} rejected: {reason}")
            }
            Self::Unavailable(message) => write!(f, "attendance store unavailable: {message}"),
        }
    }
}

impl Error for RepoError {}

/// Repository interface for attendance writes.
pub trait AttendanceRepository {
    fn mark_attendance(&self, request: &AttendanceMarkRequest) -> RepoResult<()>;
}

impl<R: AttendanceRepository + ?Sized> AttendanceRepository for &R {
    fn mark_attendance(&self, request: &AttendanceMarkRequest) -> RepoResult<()> {
        (**self).mark_attendance(request)
    }
}

/// Attendance store kept in process memory.
///
/// When built from a roster, writes for ids outside that roster are
/// rejected with `RepoError::UnknownIntern`.
#[derive(Debug, Default)]
pub struct InMemoryAttendanceRepository {
    roster: Option<BTreeSet<InternId>>,
    marks: Mutex<MarkTable>,
}

impl InMemoryAttendanceRepository {
    /// Creates a store that accepts any intern id.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that only accepts ids present in `interns`.
    pub fn with_roster(interns: &[Intern]) -> Self {
        Self {
            roster: Some(interns.iter().map(|intern| intern.id).collect()),
            marks: Mutex::default(),
        }
    }

    /// Returns the stored status for one intern and day.
    pub fn status_of(
        &self,
        intern_id: InternId,
        date: NaiveDate,
    ) -> RepoResult<Option<AttendanceStatus>> {
        Ok(self.lock()?.get(&(intern_id, date)).copied())
    }

    /// Returns all marks for one day, ordered by intern id.
    pub fn marks_on(&self, date: NaiveDate) -> RepoResult<Vec<AttendanceMarkRequest>> {
        let marks = self.lock()?;
        Ok(marks
            .iter()
            .filter(|((_, day), _)| *day == date)
            .map(|((intern_id, day), status)| {
                AttendanceMarkRequest::new(*intern_id, *status, *day)
            })
            .collect())
    }

    /// Number of stored `(intern, day)` marks.
    pub fn len(&self) -> RepoResult<usize> {
        Ok(self.lock()?.len())
    }

    pub fn is_empty(&self) -> RepoResult<bool> {
        Ok(self.lock()?.is_empty())
    }

    fn lock(&self) -> RepoResult<MutexGuard<'_, MarkTable>> {
        self.marks
            .lock()
            .map_err(|_| RepoError::Unavailable("attendance store lock poisoned".to_string()))
    }
}

impl AttendanceRepository for InMemoryAttendanceRepository {
    fn mark_attendance(&self, request: &AttendanceMarkRequest) -> RepoResult<()> {
        if let Some(roster) = &self.roster {
            if !roster.contains(&request.intern_id) {
                return Err(RepoError::UnknownIntern(request.intern_id));
            }
        }
        self.lock()?
            .insert((request.intern_id, request.date), request.status);
        Ok(())
    }
}
