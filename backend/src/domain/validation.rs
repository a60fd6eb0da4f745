//! Per-field validation error aggregation.
//!
//! Registration and course payloads report every failing field in one
//! response rather than stopping at the first violation. [`FieldErrors`]
//! collects messages keyed by field name and converts the batch into a
//! single domain [`Error`] whose details carry the field map.

use std::collections::BTreeMap;

use serde_json::json;

use crate::domain::Error;

/// Message used when a required field is absent or blank.
pub const REQUIRED_MESSAGE: &str = "This field is required.";

/// Ordered collection of validation messages keyed by field name.
///
/// Uses a `BTreeMap` so serialized output is deterministic for tests and
/// clients.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FieldErrors {
    fields: BTreeMap<String, Vec<String>>,
}

impl FieldErrors {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a validation message for a field.
    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.fields
            .entry(field.into())
            .or_default()
            .push(message.into());
    }

    /// Record the standard required-field message.
    pub fn push_required(&mut self, field: impl Into<String>) {
        self.push(field, REQUIRED_MESSAGE);
    }

    /// True when no messages have been recorded.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Convert the collected messages into a domain error.
    ///
    /// Returns `Ok(())` when nothing was recorded so callers can use `?`
    /// directly after the validation pass.
    pub fn into_result(self) -> Result<(), Error> {
        if self.is_empty() {
            return Ok(());
        }
        Err(self.into_error())
    }

    /// Convert the collected messages into a domain error unconditionally.
    pub fn into_error(self) -> Error {
        Error::invalid_request("validation failed").with_details(json!({ "fields": self.fields }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;

    #[test]
    fn empty_collection_converts_to_ok() {
        assert!(FieldErrors::new().into_result().is_ok());
    }

    #[test]
    fn messages_accumulate_per_field() {
        let mut errors = FieldErrors::new();
        errors.push("handle", "Ensure this field has no more than 150 characters.");
        errors.push("handle", "Enter a valid handle.");
        errors.push_required("email");

        let error = errors.into_error();
        assert_eq!(error.code(), ErrorCode::InvalidRequest);
        let fields = error
            .details()
            .and_then(|d| d.get("fields"))
            .expect("fields detail");
        assert_eq!(
            fields
                .get("handle")
                .and_then(|v| v.as_array())
                .map(Vec::len),
            Some(2)
        );
        assert_eq!(
            fields.get("email").and_then(|v| v.as_array()).map(Vec::len),
            Some(1)
        );
    }

    #[test]
    fn field_order_is_deterministic() {
        let mut errors = FieldErrors::new();
        errors.push_required("start_date");
        errors.push_required("end_date");
        errors.push_required("name");

        let error = errors.into_error();
        let rendered = serde_json::to_string(error.details().expect("details")).expect("json");
        let end = rendered.find("end_date").expect("end_date present");
        let name = rendered.find("\"name\"").expect("name present");
        let start = rendered.find("start_date").expect("start_date present");
        assert!(end < name && name < start);
    }
}
