use std::sync::Arc;

use crate::application::content::ContentService;
use crate::application::repos::ContentRepo;
use crate::application::sync::SyncService;
use crate::revalidation::RevalidationTrigger;

#[derive(Clone)]
pub struct ApiState {
    pub store: Arc<dyn ContentRepo>,
    pub content: Arc<ContentService>,
    pub sync: Arc<SyncService>,
    pub trigger: Arc<RevalidationTrigger>,
    pub admin_token: Option<Arc<str>>,
}

impl ApiState {
    /// Wire the services around one content store and one trigger.
    ///
    /// A blank `admin_token` leaves the API unauthenticated.
    pub fn new(
        store: Arc<dyn ContentRepo>,
        trigger: Arc<RevalidationTrigger>,
        admin_token: Option<String>,
    ) -> Self {
        let admin_token = admin_token
            .map(|token| token.trim().to_string())
            .filter(|token| !token.is_empty())
            .map(Arc::from);

        Self {
            content: Arc::new(ContentService::new(store.clone())),
            sync: Arc::new(SyncService::new(store.clone(), trigger.clone())),
            store,
            trigger,
            admin_token,
        }
    }
}
