//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Unknown interaction response type: {0}")]
    UnknownReplyKind(u8),

    #[error("Too many autocomplete choices: {count} (max {max})")]
    TooManyChoices { count: usize, max: usize },
}
