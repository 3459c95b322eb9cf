use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::application::error::ErrorReport;

#[derive(Debug, Serialize)]
pub struct ApiErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    source: &'static str,
    message: String,
    details: Option<String>,
}

impl ApiError {
    pub fn new(
        status: StatusCode,
        source: &'static str,
        message: impl Into<String>,
        details: Option<String>,
    ) -> Self {
        Self {
            status,
            source,
            message: message.into(),
            details,
        }
    }

    /// Client mistake; the message is shown as-is with its first letter capitalized.
    pub fn bad_request(source: &'static str, message: impl AsRef<str>) -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            source,
            sentence_case(message.as_ref()),
            None,
        )
    }

    pub fn unauthorized() -> Self {
        Self::new(
            StatusCode::UNAUTHORIZED,
            "infra::http::api::auth",
            "Unauthorized",
            None,
        )
    }

    /// Operational failure with a fixed summary and the underlying message as details.
    pub fn internal(source: &'static str, message: &'static str, details: String) -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            source,
            message,
            Some(details),
        )
    }

    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let diagnostic = match &self.details {
            Some(details) => format!("{}: {details}", self.message),
            None => self.message.clone(),
        };
        let body = ApiErrorBody {
            error: self.message,
            details: self.details,
        };
        let mut response = (self.status, Json(body)).into_response();
        ErrorReport::from_message(self.source, self.status, diagnostic).attach(&mut response);
        response
    }
}

fn sentence_case(message: &str) -> String {
    let mut chars = message.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
