//! Invalidation primitives offered by the rendering layer.

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

/// What a path invalidation discards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PathScope {
    /// Output of the page at this path.
    Page,
    /// The layout at this path and every page nested under it.
    Layout,
}

impl PathScope {
    pub fn as_str(self) -> &'static str {
        match self {
            PathScope::Page => "page",
            PathScope::Layout => "layout",
        }
    }
}

#[derive(Debug, Error)]
#[error("{message}")]
pub struct InvalidationError {
    message: String,
}

impl InvalidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Path and tag invalidation. Either call may fail independently.
#[async_trait]
pub trait Invalidator: Send + Sync {
    async fn revalidate_path(&self, path: &str, scope: PathScope)
    -> Result<(), InvalidationError>;

    async fn revalidate_tag(&self, tag: &str) -> Result<(), InvalidationError>;
}
