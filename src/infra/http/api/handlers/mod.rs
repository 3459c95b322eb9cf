//! Admin API handlers and the error mapping they share.

mod content;
mod revalidate;
mod sync;

pub use content::{get_content, put_content};
pub use revalidate::revalidate;
pub use sync::sync_content;

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;

use crate::application::content::ContentError;
use crate::application::repos::RepoError;
use crate::application::sync::SyncError;
use crate::domain::error::DomainError;

use super::error::ApiError;

fn json_rejection_to_api(source: &'static str, rejection: JsonRejection) -> ApiError {
    ApiError::new(
        StatusCode::BAD_REQUEST,
        source,
        "Invalid request body",
        Some(rejection.body_text()),
    )
}

fn domain_to_api(source: &'static str, err: DomainError) -> ApiError {
    ApiError::bad_request(source, err.to_string())
}

fn repo_to_api(source: &'static str, summary: &'static str, err: RepoError) -> ApiError {
    let status = match err {
        RepoError::Timeout => StatusCode::SERVICE_UNAVAILABLE,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    ApiError::internal(source, summary, err.to_string()).with_status(status)
}

fn sync_to_api(err: SyncError) -> ApiError {
    const SOURCE: &str = "infra::http::api::sync";
    match err {
        SyncError::Validation(err) => domain_to_api(SOURCE, err),
        SyncError::Store(err) => repo_to_api(SOURCE, "Failed to sync content", err),
    }
}

fn content_to_api(summary: &'static str, err: ContentError) -> ApiError {
    const SOURCE: &str = "infra::http::api::content";
    match err {
        ContentError::Domain(err) => domain_to_api(SOURCE, err),
        ContentError::Repo(err) => repo_to_api(SOURCE, summary, err),
    }
}
