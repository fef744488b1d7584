//! Shared validation helpers for inbound HTTP adapters.

use serde_json::json;

use crate::domain::Error;

const MISSING_FIELD: &str = "missing_field";

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(self) -> &'static str {
        self.0
    }
}

/// `invalid_request` error naming the absent field in its details.
pub(crate) fn missing_field_error(field: FieldName, message: &str) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field.as_str(),
        "code": MISSING_FIELD,
    }))
}

/// Return the trimmed value, or the missing-field error when it is absent
/// or blank.
pub(crate) fn require_text(
    value: Option<&str>,
    field: FieldName,
    message: &str,
) -> Result<String, Error> {
    value
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_owned)
        .ok_or_else(|| missing_field_error(field, message))
}

/// Trim optional free text, dropping blank values.
pub(crate) fn optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_owned)
}
