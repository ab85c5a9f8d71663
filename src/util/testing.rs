// src/util/testing.rs

use anyhow::Result;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use tracing::{debug, info};
use tracing_subscriber::{
    filter::filter_fn,
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

use crate::application::{ClientError, NoteRepository, NoteStore, NotesApi, RegistrationApi};
use crate::domain::{DomainError, Note, NoteDraft, RegistrationRequest, Student};
use crate::infrastructure::SqliteRepository;

/// Note with fixed text and timestamp, for mock setups
pub fn sample_note(id: i64, title: &str) -> Note {
    Note {
        id,
        title: title.to_string(),
        text: format!("{} notes", title),
        icon: String::new(),
        created: DateTime::<Utc>::from_timestamp(1_756_713_600 + id, 0).unwrap_or_default(),
    }
}

/// Shared mock repository for testing use cases that depend on NoteRepository
///
/// Notes live in a map keyed by id; `list_notes` returns them in insertion
/// order of ids. A configured storage failure makes every call fail.
///
/// # Examples
///
/// ```
/// use studydesk::util::testing::{sample_note, MockNoteRepository};
///
/// let mock = MockNoteRepository::builder()
///     .with_note(sample_note(1, "Math"))
///     .build();
/// ```
pub struct MockNoteRepository {
    notes: BTreeMap<i64, Note>,
    next_id: i64,
    storage_failure: Option<String>,
}

impl MockNoteRepository {
    pub fn builder() -> MockNoteRepositoryBuilder {
        MockNoteRepositoryBuilder::new()
    }

    fn check_storage(&self) -> Result<(), DomainError> {
        match &self.storage_failure {
            Some(message) => Err(DomainError::Storage(message.clone())),
            None => Ok(()),
        }
    }
}

impl NoteRepository for MockNoteRepository {
    fn list_notes(&mut self) -> Result<Vec<Note>, DomainError> {
        self.check_storage()?;
        Ok(self.notes.values().cloned().collect())
    }

    fn insert_note(
        &mut self,
        draft: &NoteDraft,
        created: DateTime<Utc>,
    ) -> Result<Note, DomainError> {
        self.check_storage()?;
        let note = Note {
            id: self.next_id,
            title: draft.title.clone(),
            text: draft.text.clone(),
            icon: draft.icon.clone(),
            created,
        };
        self.next_id += 1;
        self.notes.insert(note.id, note.clone());
        Ok(note)
    }

    fn update_note(&mut self, id: i64, draft: &NoteDraft) -> Result<Note, DomainError> {
        self.check_storage()?;
        let note = self.notes.get_mut(&id).ok_or(DomainError::NoteNotFound(id))?;
        note.title = draft.title.clone();
        note.text = draft.text.clone();
        note.icon = draft.icon.clone();
        Ok(note.clone())
    }

    fn delete_note(&mut self, id: i64) -> Result<(), DomainError> {
        self.check_storage()?;
        self.notes
            .remove(&id)
            .map(|_| ())
            .ok_or(DomainError::NoteNotFound(id))
    }
}

/// Builder for MockNoteRepository
///
/// Provides a fluent interface for configuring mock behavior.
pub struct MockNoteRepositoryBuilder {
    notes: BTreeMap<i64, Note>,
    storage_failure: Option<String>,
}

impl MockNoteRepositoryBuilder {
    pub fn new() -> Self {
        Self {
            notes: BTreeMap::new(),
            storage_failure: None,
        }
    }

    /// Add a note that list/update/delete can see
    pub fn with_note(mut self, note: Note) -> Self {
        self.notes.insert(note.id, note);
        self
    }

    /// Make every repository call fail with a storage error
    pub fn with_storage_failure(mut self, message: &str) -> Self {
        self.storage_failure = Some(message.to_string());
        self
    }

    pub fn build(self) -> MockNoteRepository {
        let next_id = self.notes.keys().max().map_or(1, |max| max + 1);
        MockNoteRepository {
            notes: self.notes,
            next_id,
            storage_failure: self.storage_failure,
        }
    }
}

impl Default for MockNoteRepositoryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// NotesApi backed by a real NoteStore over in-memory SQLite.
///
/// Records every call and can inject a single failure, so controller tests
/// can compare the client mirror with what the store actually holds.
pub struct InProcessNotesApi {
    store: NoteStore<SqliteRepository>,
    calls: Vec<String>,
    fail_next: Option<ClientError>,
}

impl InProcessNotesApi {
    pub fn new() -> Self {
        let repository = SqliteRepository::in_memory()
            .unwrap_or_else(|e| panic!("In-memory database unavailable: {e:#}"));
        Self {
            store: NoteStore::new(repository),
            calls: Vec::new(),
            fail_next: None,
        }
    }

    /// Create a note directly in the store, bypassing the call log
    pub fn seed(&mut self, draft: NoteDraft) -> Note {
        self.store
            .create(&draft)
            .unwrap_or_else(|e| panic!("Seeding failed: {e}"))
    }

    /// Delete a note directly in the store, as another client would
    pub fn remove(&mut self, id: i64) {
        self.store
            .delete(id)
            .unwrap_or_else(|e| panic!("Removing failed: {e}"));
    }

    pub fn fail_next(&mut self, err: ClientError) {
        self.fail_next = Some(err);
    }

    pub fn calls(&self) -> &[String] {
        &self.calls
    }

    /// Authoritative collection, read straight from the store
    pub fn server_notes(&mut self) -> Vec<Note> {
        self.store
            .list()
            .unwrap_or_else(|e| panic!("Listing failed: {e}"))
    }

    fn enter(&mut self, call: String) -> Result<(), ClientError> {
        self.calls.push(call);
        match self.fail_next.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl Default for InProcessNotesApi {
    fn default() -> Self {
        Self::new()
    }
}

impl NotesApi for InProcessNotesApi {
    fn list(&mut self) -> Result<Vec<Note>, ClientError> {
        self.enter("list".to_string())?;
        Ok(self.store.list()?)
    }

    fn create(&mut self, draft: &NoteDraft) -> Result<(), ClientError> {
        self.enter("create".to_string())?;
        self.store.create(draft)?;
        Ok(())
    }

    fn update(&mut self, id: i64, draft: &NoteDraft) -> Result<(), ClientError> {
        self.enter(format!("update {}", id))?;
        self.store.update(id, draft)?;
        Ok(())
    }

    fn delete(&mut self, id: i64) -> Result<(), ClientError> {
        self.enter(format!("delete {}", id))?;
        self.store.delete(id)?;
        Ok(())
    }
}

/// RegistrationApi that remembers what was submitted
pub struct RecordingRegistrationApi {
    submitted: Vec<RegistrationRequest>,
    failure: Option<ClientError>,
}

impl RecordingRegistrationApi {
    pub fn new() -> Self {
        Self {
            submitted: Vec::new(),
            failure: None,
        }
    }

    /// Every register call is recorded and then fails with `err`
    pub fn failing(err: ClientError) -> Self {
        Self {
            submitted: Vec::new(),
            failure: Some(err),
        }
    }

    pub fn submitted(&self) -> &[RegistrationRequest] {
        &self.submitted
    }
}

impl Default for RecordingRegistrationApi {
    fn default() -> Self {
        Self::new()
    }
}

impl RegistrationApi for RecordingRegistrationApi {
    fn register(&mut self, request: &RegistrationRequest) -> Result<(), ClientError> {
        self.submitted.push(request.clone());
        match &self.failure {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    fn students(&mut self) -> Result<Vec<Student>, ClientError> {
        Ok(self
            .submitted
            .iter()
            .enumerate()
            .map(|(index, request)| Student {
                id: index as i64 + 1,
                first_name: request.first_name.clone(),
                last_name: request.last_name.clone(),
                course: request.course.clone(),
                group_name: request.group.clone(),
            })
            .collect())
    }
}

pub fn init_test_setup() -> Result<()> {
    // Set up logging first
    setup_test_logging();

    info!("Test Setup complete");
    Ok(())
}

fn setup_test_logging() {
    debug!("INIT: Attempting logger init from testing.rs");

    // Create a filter for noisy modules
    let noisy_modules = ["hyper", "hyper_util", "reqwest", "mio", "h2"];
    let module_filter = filter_fn(move |metadata| {
        !noisy_modules
            .iter()
            .any(|name| metadata.target().starts_with(name))
    });

    // Set up the subscriber with environment filter
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

    // Build and set the subscriber
    let subscriber = tracing_subscriber::registry().with(
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_thread_names(false)
            .with_span_events(FmtSpan::CLOSE)
            .with_filter(module_filter)
            .with_filter(env_filter),
    );

    // Only set if we haven't already set a global subscriber
    if tracing::dispatcher::has_been_set() {
        debug!("Tracing subscriber already set");
    } else {
        subscriber.try_init().unwrap_or_else(|e| {
            eprintln!("Error: Failed to set up logging: {}", e);
        });
    }
}
