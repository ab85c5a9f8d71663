// src/domain/error.rs
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("Note not found: {0}")]
    NoteNotFound(i64),
    /// Shown verbatim in 400 response bodies
    #[error("{0}")]
    Validation(String),
    #[error("Storage error: {0}")]
    Storage(String),
}
