//! Core domain logic for intern attendance.
//! This crate is the single source of truth for selection and marking rules.

pub mod activity_log;
pub mod config;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod state;

pub use activity_log::{ActivityLog, ActivityLogError};
pub use config::{ConfigError, CoreConfig};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::attendance::{AttendanceMarkRequest, AttendanceStatus, ParseStatusError};
pub use model::intern::{Intern, InternId};
pub use repo::attendance_repo::{
    AttendanceRepository, InMemoryAttendanceRepository, RepoError, RepoResult,
};
pub use service::attendance_service::{
    AttendanceService, BatchError, BatchItemFailure, BatchReport, MarkingProgress,
};
pub use service::intern_selection::{
    filter_interns, select_all, toggle_selection, InternSelection, SelectionError,
};
pub use state::form::{
    validate_rules, FieldErrors, FieldRule, FieldValues, FormState, SubmitOutcome,
};
pub use state::pagination::{Pagination, PaginationError, DEFAULT_ITEMS_PER_PAGE};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
