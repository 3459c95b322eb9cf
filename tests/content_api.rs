mod support;

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::json;
use tower::ServiceExt;

use millwright::infra::http::{ApiState, build_router};
use millwright::revalidation::RevalidationTrigger;

use support::{MemoryContentRepo, RecordingInvalidator, assert_no_store, json_body, json_request};

const TOKEN: &str = "plant-floor-7";

fn app_with_token(repo: Arc<MemoryContentRepo>, token: Option<&str>) -> Router {
    let trigger = Arc::new(RevalidationTrigger::new(Arc::new(
        RecordingInvalidator::default(),
    )));
    build_router(ApiState::new(repo, trigger, token.map(str::to_string)))
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .expect("request should build")
}

#[tokio::test]
async fn written_content_is_listed_back() {
    let repo = Arc::new(MemoryContentRepo::default());
    let app = app_with_token(repo, None);

    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            "/api/content",
            json!({
                "page": "about",
                "section": "stats",
                "key": "figures",
                "value": [{"label": "Years", "value": 40}]
            }),
        ))
        .await
        .expect("router should respond");
    assert_eq!(response.status(), StatusCode::OK);
    let written = json_body(response).await;
    assert_eq!(written["success"], true);
    assert_eq!(
        written["item"]["contentValue"],
        r#"[{"label":"Years","value":40}]"#
    );

    app.clone()
        .oneshot(json_request(
            "PUT",
            "/api/content",
            json!({"page": "about", "section": "intro", "key": "heading", "value": "Since 1984"}),
        ))
        .await
        .expect("router should respond");

    let response = app
        .clone()
        .oneshot(get("/api/content?page=about"))
        .await
        .expect("router should respond");
    assert_eq!(response.status(), StatusCode::OK);
    let listed = json_body(response).await;

    assert_eq!(listed["page"], "about");
    let items = listed["items"].as_array().expect("items array");
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["section"], "intro");
    assert_eq!(items[1]["section"], "stats");
    assert!(listed["lastUpdated"].as_i64().is_some_and(|ms| ms > 0));

    let response = app
        .oneshot(get("/api/content?page=about&section=intro"))
        .await
        .expect("router should respond");
    let filtered = json_body(response).await;
    assert_eq!(filtered["items"].as_array().map(Vec::len), Some(1));
    assert_eq!(filtered["items"][0]["contentValue"], "Since 1984");
}

#[tokio::test]
async fn overwriting_a_key_keeps_one_row() {
    let repo = Arc::new(MemoryContentRepo::default());
    let app = app_with_token(repo, None);

    for value in ["First draft", "Final copy"] {
        let response = app
            .clone()
            .oneshot(json_request(
                "PUT",
                "/api/content",
                json!({"page": "home", "section": "hero", "key": "title", "value": value}),
            ))
            .await
            .expect("router should respond");
        assert_eq!(response.status(), StatusCode::OK);
    }

    let listed = json_body(
        app.oneshot(get("/api/content?page=home"))
            .await
            .expect("router should respond"),
    )
    .await;
    assert_eq!(listed["items"].as_array().map(Vec::len), Some(1));
    assert_eq!(listed["items"][0]["contentValue"], "Final copy");
}

#[tokio::test]
async fn listing_without_page_is_rejected() {
    let repo = Arc::new(MemoryContentRepo::default());
    let app = app_with_token(repo.clone(), None);

    let response = app
        .oneshot(get("/api/content"))
        .await
        .expect("router should respond");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        json_body(response).await,
        json!({"error": "Page is required"})
    );
    assert_eq!(repo.reads(), 0);
}

#[tokio::test]
async fn blank_key_and_missing_value_are_rejected() {
    let repo = Arc::new(MemoryContentRepo::default());
    let app = app_with_token(repo, None);

    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            "/api/content",
            json!({"page": "home", "section": "hero", "key": "  ", "value": "x"}),
        ))
        .await
        .expect("router should respond");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        json_body(response).await,
        json!({"error": "Key is required"})
    );

    let response = app
        .oneshot(json_request(
            "PUT",
            "/api/content",
            json!({"page": "home", "section": "hero", "key": "title"}),
        ))
        .await
        .expect("router should respond");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        json_body(response).await,
        json!({"error": "Value is required"})
    );
}

#[tokio::test]
async fn store_failure_on_write_reports_details() {
    let repo = Arc::new(MemoryContentRepo::default());
    repo.break_store();
    let app = app_with_token(repo, None);

    let response = app
        .oneshot(json_request(
            "PUT",
            "/api/content",
            json!({"page": "home", "section": "hero", "key": "title", "value": "x"}),
        ))
        .await
        .expect("router should respond");

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = json_body(response).await;
    assert_eq!(body["error"], "Failed to save content");
    assert_eq!(body["details"], "persistence error: connection refused");
}

#[tokio::test]
async fn admin_token_guards_every_api_route() {
    let repo = Arc::new(MemoryContentRepo::default());
    let app = app_with_token(repo.clone(), Some(TOKEN));

    let unauthenticated = [
        (get("/api/content?page=home"), false),
        (
            json_request("POST", "/api/content/sync", json!({"page": "home"})),
            true,
        ),
        (
            json_request("POST", "/api/revalidate", json!({"contentType": "seo"})),
            true,
        ),
    ];
    for (request, uncached) in unauthenticated {
        let response = app
            .clone()
            .oneshot(request)
            .await
            .expect("router should respond");
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        if uncached {
            assert_no_store(&response);
        }
        assert_eq!(json_body(response).await, json!({"error": "Unauthorized"}));
    }

    let wrong = Request::builder()
        .method("GET")
        .uri("/api/content?page=home")
        .header("authorization", "Bearer plant-floor-8")
        .body(Body::empty())
        .expect("request should build");
    let response = app
        .clone()
        .oneshot(wrong)
        .await
        .expect("router should respond");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(repo.reads(), 0);

    let mut authorized = json_request("POST", "/api/content/sync", json!({"page": "home"}));
    authorized.headers_mut().insert(
        "authorization",
        format!("Bearer {TOKEN}").parse().expect("valid header"),
    );
    let response = app.oneshot(authorized).await.expect("router should respond");
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(repo.reads(), 1);
}

#[tokio::test]
async fn health_is_public_and_reflects_the_store() {
    let repo = Arc::new(MemoryContentRepo::default());
    let app = app_with_token(repo.clone(), Some(TOKEN));

    let response = app
        .clone()
        .oneshot(get("/health"))
        .await
        .expect("router should respond");
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    repo.break_store();
    let response = app
        .oneshot(get("/health"))
        .await
        .expect("router should respond");
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn manual_revalidation_reports_result() {
    let repo = Arc::new(MemoryContentRepo::default());
    let app = app_with_token(repo.clone(), None);

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/revalidate",
            json!({"contentType": "SEO", "page": "about"}),
        ))
        .await
        .expect("router should respond");

    assert_eq!(response.status(), StatusCode::OK);
    assert_no_store(&response);
    let body = json_body(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["contentType"], "seo");
    assert_eq!(body["page"], "about");
    assert_eq!(body["revalidation"]["layoutRevalidated"], true);
    assert_eq!(
        body["revalidation"]["pathsRevalidated"],
        json!(["/", "/about"])
    );
    assert_eq!(
        body["revalidation"]["tagsRevalidated"],
        json!(["seo", "page:about"])
    );
    assert_eq!(repo.reads(), 0);

    let response = app
        .oneshot(json_request("POST", "/api/revalidate", json!({"page": "about"})))
        .await
        .expect("router should respond");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_no_store(&response);
    assert_eq!(
        json_body(response).await,
        json!({"error": "Content type is required"})
    );
}
