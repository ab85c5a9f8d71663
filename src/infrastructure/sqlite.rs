// src/infrastructure/sqlite.rs
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::fs;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, instrument};

use crate::application::{NoteRepository, StudentRepository};
use crate::constants::SQLITE_BUSY_TIMEOUT_MS;
use crate::domain::{DomainError, Note, NoteDraft, RegistrationRequest, Student};

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS notes (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL DEFAULT '',
    text TEXT NOT NULL DEFAULT '',
    icon TEXT NOT NULL DEFAULT '',
    created TEXT NOT NULL
);
CREATE TABLE IF NOT EXISTS students (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    firstName TEXT,
    lastName TEXT,
    course TEXT,
    groupName TEXT
);
";

pub struct SqliteRepository {
    connection: Connection,
}

impl SqliteRepository {
    /// Open (or create) the database file and make sure the schema exists
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        debug!(?path, "Opening SQLite database");

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create database directory {}", parent.display())
            })?;
        }

        let connection = Connection::open(path)
            .with_context(|| format!("Failed to open database {}", path.display()))?;
        connection
            .busy_timeout(Duration::from_millis(SQLITE_BUSY_TIMEOUT_MS))
            .context("Failed to set busy timeout")?;

        let repository = Self::with_connection(connection)?;
        info!(?path, "Database ready");
        Ok(repository)
    }

    pub fn in_memory() -> Result<Self> {
        let connection =
            Connection::open_in_memory().context("Failed to open in-memory database")?;
        Self::with_connection(connection)
    }

    fn with_connection(connection: Connection) -> Result<Self> {
        connection
            .execute_batch(SCHEMA)
            .context("Failed to create schema")?;
        Ok(Self { connection })
    }

    fn find_note(&self, id: i64) -> Result<Option<Note>, DomainError> {
        self.connection
            .query_row(
                "SELECT id, title, text, icon, created FROM notes WHERE id = ?1",
                params![id],
                note_from_row,
            )
            .optional()
            .map_err(storage_error)
    }
}

fn note_from_row(row: &Row<'_>) -> rusqlite::Result<Note> {
    Ok(Note {
        id: row.get(0)?,
        title: row.get(1)?,
        text: row.get(2)?,
        icon: row.get(3)?,
        created: row.get::<_, DateTime<Utc>>(4)?,
    })
}

fn student_from_row(row: &Row<'_>) -> rusqlite::Result<Student> {
    Ok(Student {
        id: row.get(0)?,
        first_name: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
        last_name: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
        course: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
        group_name: row.get::<_, Option<String>>(4)?.unwrap_or_default(),
    })
}

fn storage_error(err: rusqlite::Error) -> DomainError {
    DomainError::Storage(err.to_string())
}

impl NoteRepository for SqliteRepository {
    #[instrument(level = "debug", skip(self))]
    fn list_notes(&mut self) -> Result<Vec<Note>, DomainError> {
        let mut statement = self
            .connection
            .prepare(
                "SELECT id, title, text, icon, created FROM notes
                 ORDER BY created DESC, id DESC",
            )
            .map_err(storage_error)?;
        let notes = statement
            .query_map([], note_from_row)
            .map_err(storage_error)?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(storage_error)?;
        debug!(count = notes.len(), "Listed notes");
        Ok(notes)
    }

    #[instrument(level = "debug", skip(self))]
    fn insert_note(
        &mut self,
        draft: &NoteDraft,
        created: DateTime<Utc>,
    ) -> Result<Note, DomainError> {
        self.connection
            .execute(
                "INSERT INTO notes (title, text, icon, created) VALUES (?1, ?2, ?3, ?4)",
                params![draft.title, draft.text, draft.icon, created],
            )
            .map_err(storage_error)?;
        let id = self.connection.last_insert_rowid();

        // Read back so callers see exactly what a later list returns
        self.find_note(id)?
            .ok_or_else(|| DomainError::Storage(format!("Inserted note {} vanished", id)))
    }

    #[instrument(level = "debug", skip(self))]
    fn update_note(&mut self, id: i64, draft: &NoteDraft) -> Result<Note, DomainError> {
        let changed = self
            .connection
            .execute(
                "UPDATE notes SET title = ?1, text = ?2, icon = ?3 WHERE id = ?4",
                params![draft.title, draft.text, draft.icon, id],
            )
            .map_err(storage_error)?;
        if changed == 0 {
            debug!(note_id = id, "Note not found for update");
            return Err(DomainError::NoteNotFound(id));
        }
        self.find_note(id)?.ok_or(DomainError::NoteNotFound(id))
    }

    #[instrument(level = "debug", skip(self))]
    fn delete_note(&mut self, id: i64) -> Result<(), DomainError> {
        let removed = self
            .connection
            .execute("DELETE FROM notes WHERE id = ?1", params![id])
            .map_err(storage_error)?;
        if removed == 0 {
            debug!(note_id = id, "Note not found for deletion");
            return Err(DomainError::NoteNotFound(id));
        }
        Ok(())
    }
}

impl StudentRepository for SqliteRepository {
    #[instrument(level = "debug", skip(self))]
    fn insert_student(&mut self, request: &RegistrationRequest) -> Result<Student, DomainError> {
        self.connection
            .execute(
                "INSERT INTO students (firstName, lastName, course, groupName)
                 VALUES (?1, ?2, ?3, ?4)",
                params![
                    request.first_name,
                    request.last_name,
                    request.course,
                    request.group
                ],
            )
            .map_err(storage_error)?;

        Ok(Student {
            id: self.connection.last_insert_rowid(),
            first_name: request.first_name.clone(),
            last_name: request.last_name.clone(),
            course: request.course.clone(),
            group_name: request.group.clone(),
        })
    }

    #[instrument(level = "debug", skip(self))]
    fn list_students(&mut self) -> Result<Vec<Student>, DomainError> {
        let mut statement = self
            .connection
            .prepare("SELECT id, firstName, lastName, course, groupName FROM students ORDER BY id")
            .map_err(storage_error)?;
        let students = statement
            .query_map([], student_from_row)
            .map_err(storage_error)?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(storage_error)?;
        Ok(students)
    }
}
