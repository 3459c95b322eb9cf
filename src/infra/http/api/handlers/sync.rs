use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;

use crate::application::sync::SyncRequest;

use super::{json_rejection_to_api, sync_to_api};
use crate::infra::http::api::error::ApiError;
use crate::infra::http::api::models::{SyncRequestBody, SyncResponse};
use crate::infra::http::api::state::ApiState;

/// Admin save notification: re-read the page and revalidate what renders it.
pub async fn sync_content(
    State(state): State<ApiState>,
    payload: Result<Json<SyncRequestBody>, JsonRejection>,
) -> Result<Json<SyncResponse>, ApiError> {
    let Json(body) =
        payload.map_err(|rejection| json_rejection_to_api("infra::http::api::sync", rejection))?;

    let report = state
        .sync
        .sync(SyncRequest {
            page: body.page,
            content_type: body.content_type,
        })
        .await
        .map_err(sync_to_api)?;

    Ok(Json(SyncResponse::from(report)))
}
