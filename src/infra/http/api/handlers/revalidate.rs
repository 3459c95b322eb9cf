use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;

use crate::domain::error::DomainError;
use crate::domain::types::ContentType;

use super::{domain_to_api, json_rejection_to_api};
use crate::infra::http::api::error::ApiError;
use crate::infra::http::api::models::{RevalidateRequestBody, RevalidateResponse};
use crate::infra::http::api::state::ApiState;

const SOURCE: &str = "infra::http::api::revalidate";

/// Manual revalidation of one content type, optionally scoped to a page.
pub async fn revalidate(
    State(state): State<ApiState>,
    payload: Result<Json<RevalidateRequestBody>, JsonRejection>,
) -> Result<Json<RevalidateResponse>, ApiError> {
    let Json(body) = payload.map_err(|rejection| json_rejection_to_api(SOURCE, rejection))?;

    let content_type = body
        .content_type
        .as_deref()
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .ok_or(DomainError::missing_field("content type"))
        .and_then(str::parse::<ContentType>)
        .map_err(|err| domain_to_api(SOURCE, err))?;
    let page = body
        .page
        .map(|page| page.trim().to_string())
        .filter(|page| !page.is_empty());

    let revalidation = state.trigger.revalidate(content_type, page.as_deref()).await;

    Ok(Json(RevalidateResponse::new(
        content_type,
        page,
        revalidation,
    )))
}
