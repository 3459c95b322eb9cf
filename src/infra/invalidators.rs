//! Invalidator backends: the rendering layer's revalidation hook, or a log.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Serialize;
use tracing::{debug, info};

use crate::revalidation::{InvalidationError, Invalidator, PathScope, RevalidationConfig};

use super::error::InfraError;

pub const SECRET_HEADER: &str = "x-revalidate-secret";

#[derive(Debug, Serialize)]
struct PathHookBody<'a> {
    path: &'a str,
    #[serde(rename = "type")]
    scope: PathScope,
}

#[derive(Debug, Serialize)]
struct TagHookBody<'a> {
    tag: &'a str,
}

/// Posts every invalidation to the rendering layer's revalidation hook.
#[derive(Debug, Clone)]
pub struct HttpInvalidator {
    client: Client,
    hook: Url,
    secret: Option<String>,
}

impl HttpInvalidator {
    pub fn new(config: &RevalidationConfig, hook: Url) -> Result<Self, InfraError> {
        let client = Client::builder()
            .user_agent(concat!("millwright/", env!("CARGO_PKG_VERSION")))
            .timeout(config.timeout())
            .build()
            .map_err(|err| InfraError::http_client(err.to_string()))?;

        Ok(Self {
            client,
            hook,
            secret: config.secret.clone(),
        })
    }

    async fn post<B: Serialize + Sync>(&self, body: &B) -> Result<(), InvalidationError> {
        let mut request = self.client.post(self.hook.clone()).json(body);
        if let Some(secret) = self.secret.as_deref() {
            request = request.header(SECRET_HEADER, secret);
        }

        let response = request
            .send()
            .await
            .map_err(|err| InvalidationError::new(format!("hook request failed: {err}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(InvalidationError::new(format!(
                "hook responded with status {}",
                status.as_u16()
            )));
        }

        Ok(())
    }
}

#[async_trait]
impl Invalidator for HttpInvalidator {
    async fn revalidate_path(
        &self,
        path: &str,
        scope: PathScope,
    ) -> Result<(), InvalidationError> {
        self.post(&PathHookBody { path, scope }).await
    }

    async fn revalidate_tag(&self, tag: &str) -> Result<(), InvalidationError> {
        self.post(&TagHookBody { tag }).await
    }
}

/// Records invalidations in the log and always succeeds.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingInvalidator;

#[async_trait]
impl Invalidator for LoggingInvalidator {
    async fn revalidate_path(
        &self,
        path: &str,
        scope: PathScope,
    ) -> Result<(), InvalidationError> {
        debug!(
            target = "millwright::revalidation::log",
            path,
            scope = scope.as_str(),
            "path revalidation (no hook configured)"
        );
        Ok(())
    }

    async fn revalidate_tag(&self, tag: &str) -> Result<(), InvalidationError> {
        debug!(
            target = "millwright::revalidation::log",
            tag, "tag revalidation (no hook configured)"
        );
        Ok(())
    }
}

/// Pick the backend described by `config`.
pub fn build_invalidator(config: &RevalidationConfig) -> Result<Arc<dyn Invalidator>, InfraError> {
    match config.hook_url.clone() {
        Some(hook) => {
            info!(hook = %hook, "Forwarding revalidations to rendering hook");
            Ok(Arc::new(HttpInvalidator::new(config, hook)?))
        }
        None => {
            info!("No revalidation hook configured; invalidations are only logged");
            Ok(Arc::new(LoggingInvalidator))
        }
    }
}
