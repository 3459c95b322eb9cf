//! Application services orchestrating the domain and its collaborators.

pub mod content;
pub mod error;
pub mod repos;
pub mod sync;
