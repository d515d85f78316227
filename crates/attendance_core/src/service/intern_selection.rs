//! Intern selection and attendance workflow.
//!
//! # Responsibility
//! - Hold the state behind the "select interns" dialog: open flag, search
//!   term, ordered selection and batch progress.
//! - Expose the pure selection operations used by that state.
//! - Hand confirmed selections and batch marks to callers.
//!
//! # Invariants
//! - The selection only contains ids of known interns, without duplicates.
//! - Selection order is insertion order and drives marking order.
//! - After a batch mark the selection is empty and progress is idle,
//!   whatever the per-intern outcome.

use crate::model::attendance::AttendanceStatus;
use crate::model::intern::{Intern, InternId};
use crate::repo::attendance_repo::AttendanceRepository;
use crate::service::attendance_service::{
    AttendanceService, BatchError, BatchReport, MarkingProgress,
};
use chrono::NaiveDate;
use log::{debug, warn};
use regex::RegexBuilder;
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors from selection state transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    /// Id does not belong to the roster this selection was built from.
    UnknownIntern(InternId),
}

impl Display for SelectionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownIntern(id) => write!(f, "intern not in roster: {id}"),
        }
    }
}

impl Error for SelectionError {}

/// Returns the interns to display for `search_term`.
///
/// An empty term lists only the selected interns; otherwise every intern
/// whose trainee id or name contains the term, ignoring case, is listed.
/// Roster order is preserved in both cases.
pub fn filter_interns<'a>(
    interns: &'a [Intern],
    search_term: &str,
    selection: &[InternId],
) -> Vec<&'a Intern> {
    if search_term.is_empty() {
        return interns
            .iter()
            .filter(|intern| selection.contains(&intern.id))
            .collect();
    }

    let pattern = match RegexBuilder::new(&regex::escape(search_term))
        .case_insensitive(true)
        .build()
    {
        Ok(pattern) => pattern,
        Err(err) => {
            warn!(
                "event=intern_filter module=selection status=error term_chars={} error={}",
                search_term.chars().count(),
                err
            );
            return Vec::new();
        }
    };
    interns
        .iter()
        .filter(|intern| intern.matches(&pattern))
        .collect()
}

/// Removes `intern_id` when present, appends it otherwise.
pub fn toggle_selection(selection: &[InternId], intern_id: InternId) -> Vec<InternId> {
    if selection.contains(&intern_id) {
        selection
            .iter()
            .copied()
            .filter(|id| *id != intern_id)
            .collect()
    } else {
        let mut next = selection.to_vec();
        next.push(intern_id);
        next
    }
}

/// Clears the selection when it already equals the filtered ids, else
/// selects exactly the filtered interns.
pub fn select_all(selection: &[InternId], filtered: &[&Intern]) -> Vec<InternId> {
    let current: HashSet<InternId> = selection.iter().copied().collect();
    let visible: HashSet<InternId> = filtered.iter().map(|intern| intern.id).collect();
    if current == visible {
        return Vec::new();
    }

    let mut next = Vec::with_capacity(filtered.len());
    for intern in filtered {
        if !next.contains(&intern.id) {
            next.push(intern.id);
        }
    }
    next
}

/// Workflow state for picking interns and batch-marking their attendance.
#[derive(Debug, Clone)]
pub struct InternSelection {
    interns: Vec<Intern>,
    selected: Vec<InternId>,
    search_term: String,
    is_open: bool,
    progress: MarkingProgress,
}

impl InternSelection {
    /// Creates a closed workflow over one roster snapshot.
    pub fn new(interns: Vec<Intern>) -> Self {
        Self {
            interns,
            selected: Vec::new(),
            search_term: String::new(),
            is_open: false,
            progress: MarkingProgress::idle(),
        }
    }

    /// Opens the dialog seeded with `initial`.
    ///
    /// Unknown and repeated ids are dropped.
    pub fn open(&mut self, initial: &[InternId]) {
        self.selected.clear();
        for &id in initial {
            if self.is_known(id) && !self.selected.contains(&id) {
                self.selected.push(id);
            } else {
                debug!(
                    "event=selection_open module=selection status=skip intern_id={}",
                    id
                );
            }
        }
        self.search_term.clear();
        self.progress = MarkingProgress::idle();
        self.is_open = true;
    }

    /// Closes the dialog and discards the selection.
    pub fn close(&mut self) {
        self.selected.clear();
        self.search_term.clear();
        self.progress = MarkingProgress::idle();
        self.is_open = false;
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn interns(&self) -> &[Intern] {
        &self.interns
    }

    pub fn selected(&self) -> &[InternId] {
        &self.selected
    }

    pub fn is_selected(&self, intern_id: InternId) -> bool {
        self.selected.contains(&intern_id)
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
    }

    /// Progress of the batch in flight; idle otherwise.
    pub fn progress(&self) -> MarkingProgress {
        self.progress
    }

    /// Interns currently listed, see [`filter_interns`].
    pub fn filtered(&self) -> Vec<&Intern> {
        filter_interns(&self.interns, &self.search_term, &self.selected)
    }

    /// Toggles one intern and clears the search term.
    ///
    /// Returns whether the intern is selected afterwards.
    pub fn toggle(&mut self, intern_id: InternId) -> Result<bool, SelectionError> {
        if !self.is_known(intern_id) {
            return Err(SelectionError::UnknownIntern(intern_id));
        }
        self.selected = toggle_selection(&self.selected, intern_id);
        self.search_term.clear();
        Ok(self.is_selected(intern_id))
    }

    /// Applies [`select_all`] to the current listing and clears the search term.
    pub fn select_all(&mut self) {
        let next = select_all(&self.selected, &self.filtered());
        self.selected = next;
        self.search_term.clear();
    }

    /// Returns the selection verbatim and closes the dialog.
    pub fn confirm_selection(&mut self) -> Vec<InternId> {
        let confirmed = std::mem::take(&mut self.selected);
        self.close();
        confirmed
    }

    /// Marks every selected intern, in selection order.
    pub fn mark_attendance<R: AttendanceRepository>(
        &mut self,
        service: &AttendanceService<'_, R>,
        status: AttendanceStatus,
        date: NaiveDate,
    ) -> Result<BatchReport, BatchError> {
        self.mark_attendance_with_progress(service, status, date, |_| {})
    }

    /// Same as [`Self::mark_attendance`], forwarding each progress update.
    ///
    /// # Errors
    /// - `BatchError::EmptySelection` when nothing is selected; state is
    ///   left untouched and the repository is not called.
    pub fn mark_attendance_with_progress<R, F>(
        &mut self,
        service: &AttendanceService<'_, R>,
        status: AttendanceStatus,
        date: NaiveDate,
        mut on_progress: F,
    ) -> Result<BatchReport, BatchError>
    where
        R: AttendanceRepository,
        F: FnMut(&MarkingProgress),
    {
        if self.selected.is_empty() {
            return Err(BatchError::EmptySelection);
        }

        self.progress = MarkingProgress::idle();
        let selected = &self.selected;
        let progress = &mut self.progress;
        let result = service.mark_batch_with_progress(selected, status, date, |update| {
            *progress = *update;
            on_progress(update);
        });

        self.selected.clear();
        self.progress = MarkingProgress::idle();
        result
    }

    fn is_known(&self, intern_id: InternId) -> bool {
        self.interns.iter().any(|intern| intern.id == intern_id)
    }
}
