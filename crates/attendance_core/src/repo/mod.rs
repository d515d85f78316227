//! Repository layer abstractions.
//!
//! # Responsibility
//! - Define the attendance write contract consumed by batch marking.
//! - Keep storage details out of service/workflow orchestration.
//!
//! # Invariants
//! - Repository errors are semantic (`UnknownIntern`, `Rejected`) so the
//!   batch runner can report them per intern.

pub mod attendance_repo;
