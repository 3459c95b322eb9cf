//! Closed enumerations shared across the content and revalidation layers.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use super::error::DomainError;

/// Label deciding which rendered paths a content change affects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    Content,
    Products,
    Projects,
    Categories,
    Testimonials,
    Media,
    Seo,
}

impl ContentType {
    pub const ALL: [ContentType; 7] = [
        ContentType::Content,
        ContentType::Products,
        ContentType::Projects,
        ContentType::Categories,
        ContentType::Testimonials,
        ContentType::Media,
        ContentType::Seo,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ContentType::Content => "content",
            ContentType::Products => "products",
            ContentType::Projects => "projects",
            ContentType::Categories => "categories",
            ContentType::Testimonials => "testimonials",
            ContentType::Media => "media",
            ContentType::Seo => "seo",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentType {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        ContentType::ALL
            .into_iter()
            .find(|candidate| candidate.as_str() == normalized)
            .ok_or_else(|| DomainError::unknown_content_type(value.trim()))
    }
}
