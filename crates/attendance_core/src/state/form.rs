//! Controlled-form state.
//!
//! # Responsibility
//! - Hold field values, committed validation errors and the submitting flag.
//! - Gate submission on validation computed at submit time.
//! - Offer declarative field rules for common intern forms.
//!
//! # Invariants
//! - `is_submitting` is only true while the submit action runs.
//! - The submit action never runs when the fresh validation result has errors.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex")
});

/// Field name to value mapping.
pub type FieldValues<V> = BTreeMap<String, V>;
/// Field name to validation message mapping.
pub type FieldErrors = BTreeMap<String, String>;

/// Result of a submit attempt that did not fail inside the action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Validation passed and the action completed.
    Submitted,
    /// Validation produced errors; the action was skipped.
    Rejected,
}

/// Generic form state.
#[derive(Debug, Clone, PartialEq)]
pub struct FormState<V> {
    initial: FieldValues<V>,
    values: FieldValues<V>,
    errors: FieldErrors,
    is_submitting: bool,
}

impl<V: Clone> FormState<V> {
    /// Creates a form with the given initial values.
    pub fn new<K, I>(initial: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        let initial: FieldValues<V> = initial
            .into_iter()
            .map(|(name, value)| (name.into(), value))
            .collect();
        Self {
            values: initial.clone(),
            initial,
            errors: FieldErrors::new(),
            is_submitting: false,
        }
    }

    pub fn values(&self) -> &FieldValues<V> {
        &self.values
    }

    pub fn value(&self, name: &str) -> Option<&V> {
        self.values.get(name)
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn error(&self, name: &str) -> Option<&str> {
        self.errors.get(name).map(String::as_str)
    }

    pub fn is_submitting(&self) -> bool {
        self.is_submitting
    }

    /// Replaces one field value.
    pub fn set_field(&mut self, name: impl Into<String>, value: V) {
        self.values.insert(name.into(), value);
    }

    /// Drops the committed error of one field.
    pub fn clear_error(&mut self, name: &str) {
        self.errors.remove(name);
    }

    /// Restores initial values and clears errors.
    pub fn reset(&mut self) {
        self.values = self.initial.clone();
        self.errors.clear();
        self.is_submitting = false;
    }

    /// Validates current values and runs `action` when they are valid.
    ///
    /// The computed errors are committed before the decision, and the
    /// decision uses them directly. `action` sees the form with
    /// `is_submitting() == true`; the flag is cleared afterwards whether the
    /// action succeeds or fails.
    ///
    /// # Errors
    /// - Propagates the error returned by `action`.
    pub fn submit<F, A, E>(&mut self, validate: F, action: A) -> Result<SubmitOutcome, E>
    where
        F: FnOnce(&FieldValues<V>) -> FieldErrors,
        A: FnOnce(&Self) -> Result<(), E>,
    {
        self.errors = validate(&self.values);
        if !self.errors.is_empty() {
            return Ok(SubmitOutcome::Rejected);
        }

        self.is_submitting = true;
        let result = action(&*self);
        self.is_submitting = false;
        result.map(|()| SubmitOutcome::Submitted)
    }
}

/// One declarative check applied to a text field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldRule {
    /// Value must be present and not blank.
    Required,
    /// Value must not exceed this many characters.
    MaxChars(usize),
    /// Value, when present and not blank, must look like an email address.
    Email,
}

impl FieldRule {
    fn check(&self, label: &str, value: Option<&str>) -> Option<String> {
        let value = value.unwrap_or("").trim();
        match self {
            Self::Required if value.is_empty() => Some(format!("{label} is required")),
            Self::MaxChars(max) if value.chars().count() > *max => {
                Some(format!("{label} must be at most {max} characters"))
            }
            Self::Email if !value.is_empty() && !EMAIL_RE.is_match(value) => {
                Some(format!("{label} must be a valid email address"))
            }
            _ => None,
        }
    }
}

/// Runs `rules` against text values.
///
/// Each field reports only its first failing rule. The field name doubles as
/// the label in messages.
pub fn validate_rules(values: &FieldValues<String>, rules: &[(&str, FieldRule)]) -> FieldErrors {
    let mut errors = FieldErrors::new();
    for (field, rule) in rules {
        if errors.contains_key(*field) {
            continue;
        }
        if let Some(message) = rule.check(field, values.get(*field).map(String::as_str)) {
            errors.insert((*field).to_string(), message);
        }
    }
    errors
}
