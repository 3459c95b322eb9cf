//! Managed page content: one value per `(page, section, content_key)`.

use serde_json::Value;
use time::OffsetDateTime;

use super::error::DomainError;

/// A single stored content value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentItem {
    pub page: String,
    pub section: String,
    pub content_key: String,
    pub content_value: String,
    pub updated_at: OffsetDateTime,
}

impl ContentItem {
    pub fn updated_at_millis(&self) -> i64 {
        unix_millis(self.updated_at)
    }
}

/// Validated address of a content row.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContentKey {
    pub page: String,
    pub section: String,
    pub content_key: String,
}

impl ContentKey {
    /// Trim all three parts and reject blanks.
    pub fn new(page: &str, section: &str, content_key: &str) -> Result<Self, DomainError> {
        Ok(Self {
            page: required(page, "page")?,
            section: required(section, "section")?,
            content_key: required(content_key, "key")?,
        })
    }
}

/// Most recent `updated_at` across `items` as unix milliseconds, `0` when empty.
pub fn last_updated(items: &[ContentItem]) -> i64 {
    items
        .iter()
        .map(ContentItem::updated_at_millis)
        .max()
        .unwrap_or(0)
}

/// Stored form of an admin-submitted value.
///
/// Strings are kept verbatim; structured values are stored as compact JSON.
pub fn normalize_value(value: Value) -> String {
    match value {
        Value::String(text) => text,
        other => other.to_string(),
    }
}

pub fn unix_millis(at: OffsetDateTime) -> i64 {
    (at.unix_timestamp_nanos() / 1_000_000) as i64
}

fn required(value: &str, field: &'static str) -> Result<String, DomainError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DomainError::missing_field(field));
    }
    Ok(trimmed.to_string())
}
