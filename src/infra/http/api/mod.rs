pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod state;

pub use state::ApiState;

use axum::{
    Router, middleware as axum_middleware,
    routing::{get, post},
};

use crate::infra::http::middleware::no_store;

pub fn build_api_router(state: ApiState) -> Router {
    let auth = axum_middleware::from_fn_with_state(state.clone(), middleware::admin_auth);

    let content = Router::new()
        .route(
            "/api/content",
            get(handlers::get_content).put(handlers::put_content),
        )
        .route_layer(auth.clone());

    // no_store wraps the guard: 401s carry the headers too.
    let uncached = Router::new()
        .route("/api/content/sync", post(handlers::sync_content))
        .route("/api/revalidate", post(handlers::revalidate))
        .route_layer(auth)
        .layer(axum_middleware::from_fn(no_store));

    content.merge(uncached).with_state(state)
}
