// src/application/client.rs
//
// Ports used by the client-side controllers. The HTTP and storage adapters
// live in `infrastructure`.
use thiserror::Error;

use crate::domain::{DomainError, Note, NoteDraft, RegistrationRequest, Student};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClientError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("Note not found: {0}")]
    NotFound(i64),
    #[error("Server responded with {status}: {message}")]
    Server { status: u16, message: String },
    #[error("Failed to decode response: {0}")]
    Decode(String),
    #[error("Local storage error: {0}")]
    Storage(String),
}

impl From<DomainError> for ClientError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::NoteNotFound(id) => ClientError::NotFound(id),
            DomainError::Validation(message) => ClientError::Server {
                status: 400,
                message,
            },
            DomainError::Storage(message) => ClientError::Server {
                status: 500,
                message,
            },
        }
    }
}

/// Remote note collection as seen by the note controller.
pub trait NotesApi {
    fn list(&mut self) -> Result<Vec<Note>, ClientError>;

    fn create(&mut self, draft: &NoteDraft) -> Result<(), ClientError>;

    fn update(&mut self, id: i64, draft: &NoteDraft) -> Result<(), ClientError>;

    fn delete(&mut self, id: i64) -> Result<(), ClientError>;
}

pub trait RegistrationApi {
    fn register(&mut self, request: &RegistrationRequest) -> Result<(), ClientError>;

    fn students(&mut self) -> Result<Vec<Student>, ClientError>;
}

/// Key-value store standing in for the browser's local storage.
pub trait KeyValueStorage {
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), ClientError>;

    fn get_item(&self, key: &str) -> Option<String>;
}

/// Asks the user to approve a destructive action.
pub trait Confirm {
    fn confirm(&mut self, prompt: &str) -> bool;
}

impl<F: FnMut(&str) -> bool> Confirm for F {
    fn confirm(&mut self, prompt: &str) -> bool {
        self(prompt)
    }
}
