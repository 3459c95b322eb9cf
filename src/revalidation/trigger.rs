//! Revalidation trigger.
//!
//! Turns one content change into invalidation calls and reports exactly what
//! was invalidated and what failed.

use std::fmt;
use std::sync::Arc;

use metrics::counter;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::domain::types::ContentType;

use super::invalidator::{InvalidationError, Invalidator, PathScope};
use super::table::{ROOT_LAYOUT_PATH, RevalidationTable};

const METRIC_REVALIDATION_ATTEMPT_TOTAL: &str = "millwright_revalidation_attempt_total";

/// What one revalidation run achieved.
///
/// There is no overall success flag: a run with a non-empty `errors` list may
/// still have revalidated most of its targets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RevalidationResult {
    pub paths_revalidated: Vec<String>,
    pub tags_revalidated: Vec<String>,
    pub layout_revalidated: bool,
    pub errors: Vec<String>,
}

impl RevalidationResult {
    fn absorb(mut self, outcome: Outcome) -> Self {
        match outcome.result {
            Ok(()) => match outcome.target {
                Target::Path(path) => self.paths_revalidated.push(path),
                Target::Layout => self.layout_revalidated = true,
                Target::Tag(tag) => self.tags_revalidated.push(tag),
            },
            Err(err) => self.errors.push(format!("{}: {err}", outcome.target)),
        }
        self
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

#[derive(Debug, Clone)]
enum Target {
    Path(String),
    Layout,
    Tag(String),
}

impl Target {
    fn kind(&self) -> &'static str {
        match self {
            Target::Path(_) => "path",
            Target::Layout => "layout",
            Target::Tag(_) => "tag",
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Path(path) => write!(f, "path {path}"),
            Target::Layout => f.write_str("layout"),
            Target::Tag(tag) => write!(f, "tag {tag}"),
        }
    }
}

struct Outcome {
    target: Target,
    result: Result<(), InvalidationError>,
}

/// Runs the invalidations a content change requires.
///
/// # Usage
///
/// ```ignore
/// // After products were saved:
/// let result = trigger.revalidate(ContentType::Products, None).await;
/// ```
pub struct RevalidationTrigger {
    table: Arc<RevalidationTable>,
    invalidator: Arc<dyn Invalidator>,
}

impl RevalidationTrigger {
    /// Trigger over the standard route table.
    pub fn new(invalidator: Arc<dyn Invalidator>) -> Self {
        Self::with_table(Arc::new(RevalidationTable::standard()), invalidator)
    }

    pub fn with_table(table: Arc<RevalidationTable>, invalidator: Arc<dyn Invalidator>) -> Self {
        Self { table, invalidator }
    }

    /// Invalidate every path, the layout if required, then every tag.
    ///
    /// Calls run one after another. A failed call is recorded in the result
    /// and the remaining calls still run.
    pub async fn revalidate(
        &self,
        content_type: ContentType,
        page: Option<&str>,
    ) -> RevalidationResult {
        let plan = self.table.plan(content_type, page);

        info!(
            target = "millwright::revalidation",
            content_type = %content_type,
            page = page.unwrap_or(""),
            plan = %plan,
            "Revalidation starting"
        );

        let mut outcomes = Vec::with_capacity(plan.attempt_count());
        for path in plan.paths {
            outcomes.push(self.attempt(Target::Path(path)).await);
        }
        if plan.layout {
            outcomes.push(self.attempt(Target::Layout).await);
        }
        for tag in plan.tags {
            outcomes.push(self.attempt(Target::Tag(tag)).await);
        }

        let result = outcomes
            .into_iter()
            .fold(RevalidationResult::default(), RevalidationResult::absorb);

        info!(
            target = "millwright::revalidation",
            content_type = %content_type,
            paths = result.paths_revalidated.len(),
            tags = result.tags_revalidated.len(),
            layout = result.layout_revalidated,
            errors = result.errors.len(),
            "Revalidation complete"
        );

        result
    }

    async fn attempt(&self, target: Target) -> Outcome {
        let result = match &target {
            Target::Path(path) => {
                self.invalidator
                    .revalidate_path(path, PathScope::Page)
                    .await
            }
            Target::Layout => {
                self.invalidator
                    .revalidate_path(ROOT_LAYOUT_PATH, PathScope::Layout)
                    .await
            }
            Target::Tag(tag) => self.invalidator.revalidate_tag(tag).await,
        };

        match &result {
            Ok(()) => {
                debug!(target_kind = target.kind(), invalidated = %target, "invalidated");
            }
            Err(err) => {
                warn!(
                    target_kind = target.kind(),
                    invalidated = %target,
                    error = %err,
                    "invalidation failed"
                );
            }
        }

        counter!(
            METRIC_REVALIDATION_ATTEMPT_TOTAL,
            "kind" => target.kind(),
            "outcome" => if result.is_ok() { "ok" } else { "error" }
        )
        .increment(1);

        Outcome { target, result }
    }
}
