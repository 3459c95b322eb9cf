#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, Response};
use http_body_util::BodyExt;
use serde_json::Value;
use time::OffsetDateTime;

use millwright::application::repos::{ContentRepo, RepoError, UpsertContentParams};
use millwright::domain::content::ContentItem;
use millwright::revalidation::{InvalidationError, Invalidator, PathScope};

/// In-memory content store that counts reads.
#[derive(Default)]
pub struct MemoryContentRepo {
    items: Mutex<Vec<ContentItem>>,
    reads: AtomicUsize,
    broken: AtomicBool,
}

impl MemoryContentRepo {
    pub fn with_items(items: Vec<ContentItem>) -> Self {
        Self {
            items: Mutex::new(items),
            ..Default::default()
        }
    }

    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    pub fn break_store(&self) {
        self.broken.store(true, Ordering::SeqCst);
    }

    fn check(&self) -> Result<(), RepoError> {
        if self.broken.load(Ordering::SeqCst) {
            return Err(RepoError::from_persistence("connection refused"));
        }
        Ok(())
    }
}

#[async_trait]
impl ContentRepo for MemoryContentRepo {
    async fn list_content(
        &self,
        page: &str,
        section: Option<&str>,
    ) -> Result<Vec<ContentItem>, RepoError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.check()?;

        let mut items: Vec<ContentItem> = self
            .items
            .lock()
            .unwrap()
            .iter()
            .filter(|item| item.page == page)
            .filter(|item| section.is_none_or(|section| item.section == section))
            .cloned()
            .collect();
        items.sort_by(|a, b| {
            (a.section.as_str(), a.content_key.as_str())
                .cmp(&(b.section.as_str(), b.content_key.as_str()))
        });
        Ok(items)
    }

    async fn upsert_content(&self, params: UpsertContentParams) -> Result<ContentItem, RepoError> {
        self.check()?;

        let item = ContentItem {
            page: params.key.page,
            section: params.key.section,
            content_key: params.key.content_key,
            content_value: params.value,
            updated_at: OffsetDateTime::now_utc(),
        };

        let mut items = self.items.lock().unwrap();
        items.retain(|existing| {
            (&existing.page, &existing.section, &existing.content_key)
                != (&item.page, &item.section, &item.content_key)
        });
        items.push(item.clone());
        Ok(item)
    }

    async fn ping(&self) -> Result<(), RepoError> {
        self.check()
    }
}

/// Invalidator recording every call as `page:/path`, `layout:/` or `tag:name`.
#[derive(Default)]
pub struct RecordingInvalidator {
    calls: Mutex<Vec<String>>,
    failing: HashSet<String>,
}

impl RecordingInvalidator {
    pub fn failing(calls: &[&str]) -> Self {
        Self {
            failing: calls.iter().map(|call| call.to_string()).collect(),
            ..Default::default()
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) -> Result<(), InvalidationError> {
        let fails = self.failing.contains(&call);
        self.calls.lock().unwrap().push(call);
        if fails {
            Err(InvalidationError::new("hook responded with status 502"))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl Invalidator for RecordingInvalidator {
    async fn revalidate_path(&self, path: &str, scope: PathScope) -> Result<(), InvalidationError> {
        self.record(format!("{}:{path}", scope.as_str()))
    }

    async fn revalidate_tag(&self, tag: &str) -> Result<(), InvalidationError> {
        self.record(format!("tag:{tag}"))
    }
}

pub fn item(page: &str, section: &str, key: &str, updated_at: OffsetDateTime) -> ContentItem {
    ContentItem {
        page: page.to_string(),
        section: section.to_string(),
        content_key: key.to_string(),
        content_value: format!("{section}.{key}"),
        updated_at,
    }
}

pub fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("request should build")
}

pub async fn json_body(response: Response<Body>) -> Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should collect")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be JSON")
}

pub fn assert_no_store<B>(response: &Response<B>) {
    let headers = response.headers();
    assert_eq!(
        headers.get("cache-control").and_then(|v| v.to_str().ok()),
        Some("no-store, no-cache, must-revalidate, max-age=0")
    );
    assert_eq!(
        headers.get("pragma").and_then(|v| v.to_str().ok()),
        Some("no-cache")
    );
    assert_eq!(
        headers.get("expires").and_then(|v| v.to_str().ok()),
        Some("0")
    );
}
