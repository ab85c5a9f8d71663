// src/application/note_store.rs
use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::domain::{DomainError, Note, NoteDraft};

/// Storage port for notes.
pub trait NoteRepository {
    /// All notes, newest first. Order is stable while nothing is mutated.
    fn list_notes(&mut self) -> Result<Vec<Note>, DomainError>;

    fn insert_note(&mut self, draft: &NoteDraft, created: DateTime<Utc>)
        -> Result<Note, DomainError>;

    /// Replace title, text and icon. `id` and `created` are left untouched.
    fn update_note(&mut self, id: i64, draft: &NoteDraft) -> Result<Note, DomainError>;

    fn delete_note(&mut self, id: i64) -> Result<(), DomainError>;
}

/// Server-side note use cases. Last write wins; there is no version check.
pub struct NoteStore<R: NoteRepository> {
    repository: R,
}

impl<R: NoteRepository> NoteStore<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    pub fn list(&mut self) -> Result<Vec<Note>, DomainError> {
        self.repository.list_notes()
    }

    pub fn create(&mut self, draft: &NoteDraft) -> Result<Note, DomainError> {
        let note = self.repository.insert_note(draft, Utc::now())?;
        info!(note_id = note.id, "Created note");
        Ok(note)
    }

    pub fn update(&mut self, id: i64, draft: &NoteDraft) -> Result<Note, DomainError> {
        let note = self.repository.update_note(id, draft)?;
        debug!(note_id = id, "Updated note");
        Ok(note)
    }

    pub fn delete(&mut self, id: i64) -> Result<(), DomainError> {
        self.repository.delete_note(id)?;
        info!(note_id = id, "Deleted note");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::testing::{sample_note, MockNoteRepository};

    #[test]
    fn given_existing_notes_when_listing_then_returns_repository_order() {
        // Arrange
        let mock = MockNoteRepository::builder()
            .with_note(sample_note(1, "Math"))
            .with_note(sample_note(2, "Physics"))
            .build();
        let mut store = NoteStore::new(mock);

        // Act
        let notes = store.list().expect("List should succeed");

        // Assert
        let titles: Vec<_> = notes.iter().map(|n| n.title.as_str()).collect();
        assert_eq!(titles, vec!["Math", "Physics"]);
    }

    #[test]
    fn given_draft_when_creating_then_assigns_id_and_timestamp() {
        // Arrange
        let mut store = NoteStore::new(MockNoteRepository::builder().build());
        let before = Utc::now();

        // Act
        let note = store
            .create(&NoteDraft::new("Math", "Derivatives", "📐"))
            .expect("Create should succeed");

        // Assert
        assert!(note.id > 0);
        assert!(note.created >= before);
        assert_eq!(note.icon, "📐");
    }

    #[test]
    fn given_unknown_id_when_updating_then_returns_not_found() {
        // Arrange
        let mut store = NoteStore::new(MockNoteRepository::builder().build());

        // Act
        let result = store.update(42, &NoteDraft::default());

        // Assert
        match result.expect_err("Should return error") {
            DomainError::NoteNotFound(id) => assert_eq!(id, 42),
            _ => panic!("Expected NoteNotFound error"),
        }
    }

    #[test]
    fn given_failing_storage_when_deleting_then_propagates_storage_error() {
        // Arrange
        let mock = MockNoteRepository::builder()
            .with_note(sample_note(7, "Math"))
            .with_storage_failure("disk full")
            .build();
        let mut store = NoteStore::new(mock);

        // Act
        let result = store.delete(7);

        // Assert
        assert!(matches!(result, Err(DomainError::Storage(msg)) if msg == "disk full"));
    }
}
