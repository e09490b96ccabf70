//! Domain-specific errors.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("slide title must not be empty")]
    EmptyTitle,
    #[error("content slide '{title}' has no bullet items")]
    EmptyContent { title: String },
}
