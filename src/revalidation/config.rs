//! Revalidation backend configuration.

use std::time::Duration;

use url::Url;

const DEFAULT_TIMEOUT_MS: u64 = 5000;

#[derive(Debug, Clone)]
pub struct RevalidationConfig {
    /// Rendering layer hook receiving invalidation calls. `None` logs only.
    pub hook_url: Option<Url>,
    /// Shared secret sent with every hook call.
    pub secret: Option<String>,
    /// Per-call timeout for hook requests.
    pub timeout_ms: u64,
}

impl Default for RevalidationConfig {
    fn default() -> Self {
        Self {
            hook_url: None,
            secret: None,
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

impl From<&crate::config::RevalidationSettings> for RevalidationConfig {
    fn from(settings: &crate::config::RevalidationSettings) -> Self {
        Self {
            hook_url: settings.hook_url.clone(),
            secret: settings.secret.clone(),
            timeout_ms: settings.timeout.as_millis() as u64,
        }
    }
}

impl RevalidationConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms.max(1))
    }
}
