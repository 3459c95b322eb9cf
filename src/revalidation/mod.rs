//! Millwright revalidation
//!
//! Tells the rendering layer which cached output to discard after a content
//! change:
//!
//! - **Table**: immutable mapping from [`ContentType`](crate::domain::types::ContentType)
//!   to the rendered path patterns embedding that content
//! - **Trigger**: runs every path, layout and tag invalidation for one change
//!   and folds the outcomes into a [`RevalidationResult`]
//!
//! ## Configuration
//!
//! The invalidation backend is chosen from `millwright.toml`:
//!
//! ```toml
//! [revalidation]
//! hook_url = "https://www.example.com/api/revalidate"
//! secret = "shared-secret"
//! timeout_ms = 5000
//! ```
//!
//! Without a `hook_url` every call is only logged.

mod config;
mod invalidator;
mod table;
mod trigger;

pub use config::RevalidationConfig;
pub use invalidator::{InvalidationError, Invalidator, PathScope};
pub use table::{
    HOME_PAGE, ROOT_LAYOUT_PATH, RevalidationPlan, RevalidationTable, RouteSet, page_path,
    page_tag,
};
pub use trigger::{RevalidationResult, RevalidationTrigger};
