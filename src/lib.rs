//! Millwright: content store and page revalidation for a marketing site.

pub mod application;
pub mod config;
pub mod domain;
pub mod infra;
pub mod revalidation;
