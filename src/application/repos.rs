//! Repository traits describing persistence adapters.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::content::{ContentItem, ContentKey};

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("persistence error: {0}")]
    Persistence(String),
    #[error("duplicate record violates unique constraint `{constraint}`")]
    Duplicate { constraint: String },
    #[error("resource not found")]
    NotFound,
    #[error("invalid input: {message}")]
    InvalidInput { message: String },
    #[error("database timeout")]
    Timeout,
}

impl RepoError {
    pub fn from_persistence(err: impl std::fmt::Display) -> Self {
        Self::Persistence(err.to_string())
    }
}

#[derive(Debug, Clone)]
pub struct UpsertContentParams {
    pub key: ContentKey,
    pub value: String,
}

/// Page/section/key content store.
#[async_trait]
pub trait ContentRepo: Send + Sync {
    /// Items for `page`, optionally narrowed to one section, ordered by section then key.
    async fn list_content(
        &self,
        page: &str,
        section: Option<&str>,
    ) -> Result<Vec<ContentItem>, RepoError>;

    /// Insert or overwrite one item and return the stored row.
    async fn upsert_content(&self, params: UpsertContentParams) -> Result<ContentItem, RepoError>;

    /// Liveness probe for the backing store.
    async fn ping(&self) -> Result<(), RepoError> {
        Ok(())
    }
}
