//! UI-facing state holders shared by intern screens.
//!
//! # Responsibility
//! - Keep form and pagination transitions testable without a renderer.

pub mod form;
pub mod pagination;
