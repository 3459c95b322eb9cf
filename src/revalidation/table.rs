//! Content type to rendered path mapping.
//!
//! Every content type owns a fixed, ordered list of path patterns. Patterns
//! use the rendering layer's dynamic segment syntax (`/products/[slug]`) so a
//! single invalidation covers every concrete page generated from it.

use std::collections::HashMap;
use std::fmt;

use crate::domain::types::ContentType;

/// Path whose layout wraps every rendered page.
pub const ROOT_LAYOUT_PATH: &str = "/";
/// Page slug served at the site root.
pub const HOME_PAGE: &str = "home";

/// Paths embedding one content type, and whether the root layout does too.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteSet {
    paths: Vec<String>,
    layout: bool,
}

impl RouteSet {
    pub fn new<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            paths: paths.into_iter().map(Into::into).collect(),
            layout: false,
        }
    }

    pub fn with_layout(mut self) -> Self {
        self.layout = true;
        self
    }

    pub fn paths(&self) -> &[String] {
        &self.paths
    }

    pub fn layout(&self) -> bool {
        self.layout
    }
}

/// Immutable lookup from content type to [`RouteSet`].
#[derive(Debug, Clone)]
pub struct RevalidationTable {
    routes: HashMap<ContentType, RouteSet>,
}

impl RevalidationTable {
    /// Build a table from explicit entries. Types without an entry map to nothing.
    pub fn new(routes: impl IntoIterator<Item = (ContentType, RouteSet)>) -> Self {
        Self {
            routes: routes.into_iter().collect(),
        }
    }

    /// Routes of the public site.
    pub fn standard() -> Self {
        Self::new([
            (
                ContentType::Content,
                RouteSet::new(["/", "/about", "/contact"]).with_layout(),
            ),
            (
                ContentType::Products,
                RouteSet::new(["/products", "/products/[slug]"]),
            ),
            (
                ContentType::Projects,
                RouteSet::new(["/projects", "/projects/[slug]"]),
            ),
            (
                ContentType::Categories,
                RouteSet::new(["/products", "/products/category/[slug]"]),
            ),
            (
                ContentType::Testimonials,
                RouteSet::new(["/", "/testimonials"]),
            ),
            (
                ContentType::Media,
                RouteSet::new(["/", "/products/[slug]", "/projects/[slug]"]),
            ),
            (ContentType::Seo, RouteSet::new(["/"]).with_layout()),
        ])
    }

    pub fn routes(&self, content_type: ContentType) -> Option<&RouteSet> {
        self.routes.get(&content_type)
    }

    /// Everything one change to `content_type` (optionally on `page`) invalidates.
    ///
    /// Paths keep table order with the page path last; repeats are dropped.
    pub fn plan(&self, content_type: ContentType, page: Option<&str>) -> RevalidationPlan {
        let mut plan = RevalidationPlan::default();
        let page = page.map(normalize_slug).filter(|slug| !slug.is_empty());

        if let Some(routes) = self.routes(content_type) {
            for path in routes.paths() {
                plan.push_path(path.clone());
            }
            plan.layout = routes.layout();
        }

        if let Some(slug) = page {
            plan.push_path(page_path(slug));
        }

        plan.tags.push(content_type.as_str().to_string());
        if let Some(slug) = page {
            plan.tags.push(page_tag(slug));
        }

        plan
    }
}

impl Default for RevalidationTable {
    fn default() -> Self {
        Self::standard()
    }
}

/// Rendered path of a content page.
pub fn page_path(slug: &str) -> String {
    match normalize_slug(slug) {
        "" | HOME_PAGE => ROOT_LAYOUT_PATH.to_string(),
        slug => format!("/{slug}"),
    }
}

/// Cache tag attached to everything rendered from one content page.
pub fn page_tag(slug: &str) -> String {
    format!("page:{}", normalize_slug(slug))
}

fn normalize_slug(slug: &str) -> &str {
    slug.trim().trim_matches('/')
}

/// Ordered invalidation work for one change.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RevalidationPlan {
    /// Page paths, attempted in order.
    pub paths: Vec<String>,
    /// Whether the root layout is invalidated.
    pub layout: bool,
    /// Cache tags, attempted after paths and layout.
    pub tags: Vec<String>,
}

impl RevalidationPlan {
    fn push_path(&mut self, path: String) {
        if !self.paths.contains(&path) {
            self.paths.push(path);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty() && !self.layout && self.tags.is_empty()
    }

    /// Number of invalidation calls the plan issues.
    pub fn attempt_count(&self) -> usize {
        self.paths.len() + usize::from(self.layout) + self.tags.len()
    }
}

impl fmt::Display for RevalidationPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "RevalidationPlan {{ paths: [{}], layout: {}, tags: [{}] }}",
            self.paths.join(", "),
            self.layout,
            self.tags.join(", "),
        )
    }
}
