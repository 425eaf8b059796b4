//! Form field validation. Checks append messages to a shared per-field
//! accumulator and never abort early, so one pass over a submission reports
//! every violation at once.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

/// Pre-compiled once; the address shape accepted at signup.
pub static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\w+@[a-zA-Z_]+?\.[a-zA-Z]{2,3}$").expect("email regex must compile")
});

/// Raw form submission: field name to one or more posted values. A repeated
/// field keeps every value, but checks only ever consult the first one.
#[derive(Debug, Clone, Default)]
pub struct FormData {
    values: HashMap<String, Vec<String>>,
}

impl FormData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.values
            .entry(field.into())
            .or_default()
            .push(value.into());
    }

    /// First posted value for a field, or "" when the field is absent.
    pub fn first(&self, field: &str) -> &str {
        self.values
            .get(field)
            .and_then(|values| values.first())
            .map(String::as_str)
            .unwrap_or("")
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormData {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut data = FormData::new();
        for (field, value) in iter {
            data.add(field, value);
        }
        data
    }
}

/// Messages accumulated per field. Insertion order within a field is kept;
/// the first message is the one surfaced to users.
#[derive(Debug, Clone, Default)]
pub struct FieldErrors {
    messages: HashMap<String, Vec<String>>,
}

impl FieldErrors {
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.messages
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn first(&self, field: &str) -> Option<&str> {
        self.messages
            .get(field)
            .and_then(|messages| messages.first())
            .map(String::as_str)
    }

    pub fn all(&self, field: &str) -> &[String] {
        self.messages.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.messages
            .iter()
            .map(|(field, messages)| (field.as_str(), messages.as_slice()))
    }
}

/// One validation pass over a single submission. The accumulator is owned by
/// the form and mutated only through `&mut self` check calls; checks are
/// independent and composable in any order, and no check stops the others
/// from running.
#[derive(Debug)]
pub struct Form {
    data: FormData,
    errors: FieldErrors,
}

impl Form {
    pub fn new(data: FormData) -> Self {
        Self {
            data,
            errors: FieldErrors::default(),
        }
    }

    pub fn value(&self, field: &str) -> &str {
        self.data.first(field)
    }

    /// Whitespace-only values count as blank here. The length and pattern
    /// checks below skip only truly empty values.
    pub fn required(&mut self, fields: &[&str]) {
        for field in fields {
            if self.data.first(field).trim().is_empty() {
                self.errors.add(field, "This field cannot be blank");
            }
        }
    }

    /// Counts Unicode code points, not bytes, so multi-byte text is not
    /// penalized unfairly.
    pub fn max_length(&mut self, field: &str, limit: usize) {
        let value = self.data.first(field);
        if value.is_empty() {
            return;
        }
        if value.chars().count() > limit {
            self.errors.add(
                field,
                format!("This field is too long (maximum is {limit} characters)"),
            );
        }
    }

    pub fn min_length(&mut self, field: &str, limit: usize) {
        let value = self.data.first(field);
        if value.is_empty() {
            return;
        }
        if value.chars().count() < limit {
            self.errors.add(
                field,
                format!("This field is too short (minimum is {limit} characters)"),
            );
        }
    }

    pub fn matches_pattern(&mut self, field: &str, pattern: &Regex) {
        let value = self.data.first(field);
        if value.is_empty() {
            return;
        }
        if !pattern.is_match(value) {
            self.errors.add(field, "This field is invalid");
        }
    }

    pub fn permitted_values(&mut self, field: &str, allowed: &[&str]) {
        let value = self.data.first(field);
        if value.is_empty() {
            return;
        }
        if !allowed.contains(&value) {
            self.errors.add(field, "This field is invalid");
        }
    }

    /// Pure query: reflects exactly the checks run so far.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn into_errors(self) -> FieldErrors {
        self.errors
    }
}
