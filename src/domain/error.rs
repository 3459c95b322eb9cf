use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("{field} is required")]
    MissingField { field: &'static str },
    #[error("unknown content type: {tag}")]
    UnknownContentType { tag: String },
}

impl DomainError {
    pub fn missing_field(field: &'static str) -> Self {
        Self::MissingField { field }
    }

    pub fn unknown_content_type(tag: impl Into<String>) -> Self {
        Self::UnknownContentType { tag: tag.into() }
    }
}
