use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};

use crate::application::content::SetContentCommand;
use crate::domain::error::DomainError;

use super::{content_to_api, domain_to_api, json_rejection_to_api};
use crate::infra::http::api::error::ApiError;
use crate::infra::http::api::models::{
    ContentItemResponse, ContentListResponse, ContentQuery, ContentWriteRequest,
    ContentWriteResponse,
};
use crate::infra::http::api::state::ApiState;

const SOURCE: &str = "infra::http::api::content";

pub async fn get_content(
    State(state): State<ApiState>,
    Query(query): Query<ContentQuery>,
) -> Result<Json<ContentListResponse>, ApiError> {
    let page = query.page.unwrap_or_default();
    let items = state
        .content
        .get(&page, query.section.as_deref())
        .await
        .map_err(|err| content_to_api("Failed to fetch content", err))?;

    Ok(Json(ContentListResponse::new(
        page.trim().to_string(),
        items,
    )))
}

pub async fn put_content(
    State(state): State<ApiState>,
    payload: Result<Json<ContentWriteRequest>, JsonRejection>,
) -> Result<Json<ContentWriteResponse>, ApiError> {
    let Json(body) = payload.map_err(|rejection| json_rejection_to_api(SOURCE, rejection))?;
    let value = body
        .value
        .ok_or_else(|| domain_to_api(SOURCE, DomainError::missing_field("value")))?;

    let item = state
        .content
        .set(SetContentCommand {
            page: body.page,
            section: body.section,
            key: body.key,
            value,
        })
        .await
        .map_err(|err| content_to_api("Failed to save content", err))?;

    Ok(Json(ContentWriteResponse {
        success: true,
        item: ContentItemResponse::from(item),
    }))
}
