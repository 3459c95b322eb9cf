use async_trait::async_trait;
use time::OffsetDateTime;

use crate::{
    application::repos::{ContentRepo, RepoError, UpsertContentParams},
    domain::content::ContentItem,
};

use super::{PostgresRepositories, map_sqlx_error};

#[derive(sqlx::FromRow)]
struct ContentRow {
    page: String,
    section: String,
    content_key: String,
    content_value: String,
    updated_at: OffsetDateTime,
}

impl From<ContentRow> for ContentItem {
    fn from(row: ContentRow) -> Self {
        Self {
            page: row.page,
            section: row.section,
            content_key: row.content_key,
            content_value: row.content_value,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl ContentRepo for PostgresRepositories {
    async fn list_content(
        &self,
        page: &str,
        section: Option<&str>,
    ) -> Result<Vec<ContentItem>, RepoError> {
        let rows = sqlx::query_as::<_, ContentRow>(
            r#"
            SELECT page, section, content_key, content_value, updated_at
            FROM site_content
            WHERE page = $1
              AND ($2::TEXT IS NULL OR section = $2)
            ORDER BY section, content_key
            "#,
        )
        .bind(page)
        .bind(section)
        .fetch_all(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(ContentItem::from).collect())
    }

    async fn upsert_content(&self, params: UpsertContentParams) -> Result<ContentItem, RepoError> {
        let row = sqlx::query_as::<_, ContentRow>(
            r#"
            INSERT INTO site_content (page, section, content_key, content_value, updated_at)
            VALUES ($1, $2, $3, $4, now())
            ON CONFLICT (page, section, content_key) DO UPDATE SET
                content_value = EXCLUDED.content_value,
                updated_at = EXCLUDED.updated_at
            RETURNING page, section, content_key, content_value, updated_at
            "#,
        )
        .bind(&params.key.page)
        .bind(&params.key.section)
        .bind(&params.key.content_key)
        .bind(&params.value)
        .fetch_one(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(ContentItem::from(row))
    }

    async fn ping(&self) -> Result<(), RepoError> {
        self.health_check().await.map_err(map_sqlx_error)
    }
}
