pub mod api;
mod middleware;

pub use api::{ApiState, build_api_router};
pub use middleware::{NO_STORE_CACHE_CONTROL, RequestContext};

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    middleware as axum_middleware,
    response::{IntoResponse, Response},
    routing::get,
};

use crate::application::{error::ErrorReport, repos::RepoError};

use middleware::{log_responses, set_request_context};

/// Full HTTP surface: health probe plus the content API.
pub fn build_router(state: ApiState) -> Router {
    Router::new()
        .route("/health", get(health))
        .with_state(state.clone())
        .merge(build_api_router(state))
        .layer(axum_middleware::from_fn(log_responses))
        .layer(axum_middleware::from_fn(set_request_context))
}

async fn health(State(state): State<ApiState>) -> Response {
    db_health_response(state.store.ping().await)
}

fn db_health_response(result: Result<(), RepoError>) -> Response {
    match result {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => {
            let mut response = StatusCode::SERVICE_UNAVAILABLE.into_response();
            ErrorReport::from_error(
                "infra::http::db_health",
                StatusCode::SERVICE_UNAVAILABLE,
                &err,
            )
            .attach(&mut response);
            response
        }
    }
}
