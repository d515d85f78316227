//! Domain model for interns and attendance marks.
//!
//! # Responsibility
//! - Define the typed records exchanged with roster and attendance sources.
//! - Keep wire naming (`camelCase`) in one place via serde attributes.
//!
//! # Invariants
//! - Every intern is identified by a stable `InternId`.
//! - Optional roster fields are explicit `Option`s, never sentinel strings.

pub mod attendance;
pub mod intern;
