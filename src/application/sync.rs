//! Admin save notification: re-read a page, report its freshness and
//! revalidate everything rendered from it.

use std::sync::Arc;
use std::time::Instant;

use metrics::{counter, histogram};
use thiserror::Error;
use time::OffsetDateTime;
use tracing::{info, warn};

use crate::application::repos::{ContentRepo, RepoError};
use crate::domain::content::last_updated;
use crate::domain::error::DomainError;
use crate::domain::types::ContentType;
use crate::revalidation::{RevalidationResult, RevalidationTrigger};

/// Page holding site-wide header and branding content.
pub const HEADER_PAGE: &str = "header";

const METRIC_SYNC_TOTAL: &str = "millwright_sync_total";
const METRIC_SYNC_MS: &str = "millwright_sync_ms";

#[derive(Debug, Error)]
pub enum SyncError {
    #[error(transparent)]
    Validation(#[from] DomainError),
    #[error(transparent)]
    Store(#[from] RepoError),
}

#[derive(Debug, Clone, Default)]
pub struct SyncRequest {
    pub page: Option<String>,
    pub content_type: Option<String>,
}

#[derive(Debug, Clone)]
pub struct SyncReport {
    pub page: String,
    pub content_type: ContentType,
    pub last_updated: i64,
    pub content_count: usize,
    pub timestamp: OffsetDateTime,
    pub revalidation: RevalidationResult,
}

#[derive(Clone)]
pub struct SyncService {
    content: Arc<dyn ContentRepo>,
    trigger: Arc<RevalidationTrigger>,
}

impl SyncService {
    pub fn new(content: Arc<dyn ContentRepo>, trigger: Arc<RevalidationTrigger>) -> Self {
        Self { content, trigger }
    }

    pub async fn sync(&self, request: SyncRequest) -> Result<SyncReport, SyncError> {
        let started = Instant::now();
        let outcome = self.run(request).await;

        let label = match &outcome {
            Ok(report) if report.revalidation.has_errors() => "partial",
            Ok(_) => "ok",
            Err(SyncError::Validation(_)) => "invalid",
            Err(SyncError::Store(_)) => "error",
        };
        counter!(METRIC_SYNC_TOTAL, "outcome" => label).increment(1);
        histogram!(METRIC_SYNC_MS).record(started.elapsed().as_secs_f64() * 1000.0);

        outcome
    }

    async fn run(&self, request: SyncRequest) -> Result<SyncReport, SyncError> {
        let page = request
            .page
            .as_deref()
            .map(str::trim)
            .filter(|page| !page.is_empty())
            .ok_or(DomainError::missing_field("page"))?
            .to_string();
        let content_type = resolve_content_type(&page, request.content_type.as_deref())?;

        let items = self.content.list_content(&page, None).await.map_err(|err| {
            warn!(
                target = "millwright::sync",
                page = %page,
                error = %err,
                "content re-read failed"
            );
            SyncError::Store(err)
        })?;
        let last_updated = last_updated(&items);

        info!(
            target = "millwright::sync",
            page = %page,
            content_type = %content_type,
            content_count = items.len(),
            last_updated,
            "content synced"
        );

        let trigger_page = (page != HEADER_PAGE).then_some(page.as_str());
        let revalidation = self.trigger.revalidate(content_type, trigger_page).await;

        Ok(SyncReport {
            page,
            content_type,
            last_updated,
            content_count: items.len(),
            timestamp: OffsetDateTime::now_utc(),
            revalidation,
        })
    }
}

/// Content type a save on `page` affects.
///
/// The header page is always general content. Otherwise an explicit type
/// wins, then a page whose slug is itself a type tag, then general content.
pub fn resolve_content_type(
    page: &str,
    explicit: Option<&str>,
) -> Result<ContentType, DomainError> {
    if page == HEADER_PAGE {
        return Ok(ContentType::Content);
    }

    match explicit.map(str::trim).filter(|value| !value.is_empty()) {
        Some(tag) => tag.parse(),
        None => Ok(page.parse().unwrap_or(ContentType::Content)),
    }
}
