use serde::{Deserialize, Serialize};
use serde_json::Value;
use time::format_description::well_known::Rfc3339;
use time::{OffsetDateTime, UtcOffset};
use tracing::warn;

use crate::application::sync::SyncReport;
use crate::domain::content::{ContentItem, last_updated};
use crate::domain::types::ContentType;
use crate::revalidation::RevalidationResult;

/// UTC RFC 3339 rendering; years outside 0000-9999 cannot be expressed and render empty.
fn rfc3339(at: OffsetDateTime) -> String {
    match at.to_offset(UtcOffset::UTC).format(&Rfc3339) {
        Ok(formatted) => formatted,
        Err(err) => {
            warn!(
                target = "millwright::http::api",
                error = %err,
                unix = at.unix_timestamp(),
                "Timestamp cannot be rendered as RFC 3339"
            );
            String::new()
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncRequestBody {
    pub page: Option<String>,
    pub content_type: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncResponse {
    pub success: bool,
    pub page: String,
    pub content_type: ContentType,
    pub last_updated: i64,
    pub content_count: usize,
    pub timestamp: String,
    pub revalidation: RevalidationResult,
}

impl From<SyncReport> for SyncResponse {
    fn from(report: SyncReport) -> Self {
        Self {
            success: true,
            page: report.page,
            content_type: report.content_type,
            last_updated: report.last_updated,
            content_count: report.content_count,
            timestamp: rfc3339(report.timestamp),
            revalidation: report.revalidation,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ContentQuery {
    pub page: Option<String>,
    pub section: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentItemResponse {
    pub page: String,
    pub section: String,
    pub content_key: String,
    pub content_value: String,
    pub updated_at: String,
}

impl From<ContentItem> for ContentItemResponse {
    fn from(item: ContentItem) -> Self {
        Self {
            updated_at: rfc3339(item.updated_at),
            page: item.page,
            section: item.section,
            content_key: item.content_key,
            content_value: item.content_value,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentListResponse {
    pub page: String,
    pub last_updated: i64,
    pub items: Vec<ContentItemResponse>,
}

impl ContentListResponse {
    pub fn new(page: String, items: Vec<ContentItem>) -> Self {
        Self {
            page,
            last_updated: last_updated(&items),
            items: items.into_iter().map(ContentItemResponse::from).collect(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ContentWriteRequest {
    pub page: String,
    pub section: String,
    pub key: String,
    pub value: Option<Value>,
}

#[derive(Debug, Serialize)]
pub struct ContentWriteResponse {
    pub success: bool,
    pub item: ContentItemResponse,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevalidateRequestBody {
    pub content_type: Option<String>,
    pub page: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RevalidateResponse {
    pub success: bool,
    pub content_type: ContentType,
    pub page: Option<String>,
    pub timestamp: String,
    pub revalidation: RevalidationResult,
}

impl RevalidateResponse {
    pub fn new(
        content_type: ContentType,
        page: Option<String>,
        revalidation: RevalidationResult,
    ) -> Self {
        Self {
            success: true,
            content_type,
            page,
            timestamp: rfc3339(OffsetDateTime::now_utc()),
            revalidation,
        }
    }
}
