use std::sync::Arc;

use serde_json::Value;
use thiserror::Error;
use tracing::info;

use crate::application::repos::{ContentRepo, RepoError, UpsertContentParams};
use crate::domain::content::{ContentItem, ContentKey, normalize_value};
use crate::domain::error::DomainError;

#[derive(Debug, Error)]
pub enum ContentError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error(transparent)]
    Repo(#[from] RepoError),
}

#[derive(Debug, Clone)]
pub struct SetContentCommand {
    pub page: String,
    pub section: String,
    pub key: String,
    pub value: Value,
}

#[derive(Clone)]
pub struct ContentService {
    repo: Arc<dyn ContentRepo>,
}

impl ContentService {
    pub fn new(repo: Arc<dyn ContentRepo>) -> Self {
        Self { repo }
    }

    pub async fn get(
        &self,
        page: &str,
        section: Option<&str>,
    ) -> Result<Vec<ContentItem>, ContentError> {
        let page = page.trim();
        if page.is_empty() {
            return Err(DomainError::missing_field("page").into());
        }
        let section = section.map(str::trim).filter(|value| !value.is_empty());

        self.repo
            .list_content(page, section)
            .await
            .map_err(ContentError::from)
    }

    pub async fn set(&self, command: SetContentCommand) -> Result<ContentItem, ContentError> {
        let key = ContentKey::new(&command.page, &command.section, &command.key)?;
        let value = normalize_value(command.value);

        let item = self
            .repo
            .upsert_content(UpsertContentParams { key, value })
            .await?;

        info!(
            target = "millwright::content",
            page = %item.page,
            section = %item.section,
            key = %item.content_key,
            "content saved"
        );

        Ok(item)
    }
}
