//! Input normalization shared by the entity services.

use serde::{Deserialize, Deserializer};

use crate::error::{ServiceError, ServiceResult};

/// Distinguishes an absent JSON field (`None`) from an explicit `null`
/// (`Some(None)`). Use with `#[serde(default, deserialize_with = "double_option")]`.
///
/// ## Errors
/// Propagates deserializer failures for the inner value.
pub fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Trims a text field; blank values become `None`.
#[must_use]
pub fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Maps a patch of a nullable text column onto a changeset value. An absent
/// field leaves the column alone; `null` or blank clears it.
#[must_use]
pub fn patch_text(value: Option<Option<String>>) -> Option<Option<String>> {
    value.map(optional_text)
}

/// ## Summary
/// Returns the trimmed value of a required text field.
///
/// ## Errors
/// Returns `ValidationError` naming `field` when the value is missing or blank.
pub fn required_text(field: &str, value: Option<String>) -> ServiceResult<String> {
    optional_text(value).ok_or_else(|| ServiceError::ValidationError(format!("{field} is required")))
}

/// ## Summary
/// Validates a replacement for a required text column in a partial update.
///
/// ## Errors
/// Returns `ValidationError` when the field is present but blank.
pub fn patch_required_text(field: &str, value: Option<String>) -> ServiceResult<Option<String>> {
    value.map(|v| required_text(field, Some(v))).transpose()
}

/// Case-insensitive substring match. An empty needle matches everything.
#[must_use]
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Normalizes a list filter from a query string.
#[must_use]
pub fn search_term(q: Option<&str>) -> Option<&str> {
    q.map(str::trim).filter(|q| !q.is_empty())
}
