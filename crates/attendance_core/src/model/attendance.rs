//! Attendance status and mark request.
//!
//! # Invariants
//! - A request always names exactly one intern, one status and one day.
//! - Dates are calendar days without time zone (`YYYY-MM-DD` on the wire).

use crate::model::intern::InternId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Attendance outcome applied to an intern for one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttendanceStatus {
    Present,
    Absent,
}

impl AttendanceStatus {
    /// Stable string used on the wire and in log events.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Present => "Present",
            Self::Absent => "Absent",
        }
    }
}

impl Display for AttendanceStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when text does not name a known attendance status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseStatusError(pub String);

impl Display for ParseStatusError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unsupported attendance status `{}`; expected Present|Absent",
            self.0
        )
    }
}

impl Error for ParseStatusError {}

impl FromStr for AttendanceStatus {
    type Err = ParseStatusError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "present" => Ok(Self::Present),
            "absent" => Ok(Self::Absent),
            _ => Err(ParseStatusError(value.trim().to_string())),
        }
    }
}

/// One attendance write sent to the repository.
///
/// Built per selected intern at mark time and not retained afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceMarkRequest {
    pub intern_id: InternId,
    pub status: AttendanceStatus,
    pub date: NaiveDate,
}

impl AttendanceMarkRequest {
    pub fn new(intern_id: InternId, status: AttendanceStatus, date: NaiveDate) -> Self {
        Self {
            intern_id,
            status,
            date,
        }
    }
}
