// src/ports/http/notes.rs
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    Json,
};
use serde_json::{json, Value};
use std::sync::Arc;

use super::error::{lock, run_blocking, ApiError};
use super::AppState;
use crate::domain::{Note, NoteDraft};

pub async fn list_notes(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Note>>, ApiError> {
    let notes = run_blocking(move || {
        let notes = lock(&state.notes)?.list()?;
        Ok(notes)
    })
    .await?;
    Ok(Json(notes))
}

pub async fn create_note(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<NoteDraft>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(draft) = payload?;
    let note = run_blocking(move || {
        let note = lock(&state.notes)?.create(&draft)?;
        Ok(note)
    })
    .await?;
    Ok(Json(json!({ "status": "created", "id": note.id })))
}

pub async fn update_note(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<NoteDraft>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Path(id) = path?;
    let Json(draft) = payload?;
    run_blocking(move || {
        lock(&state.notes)?.update(id, &draft)?;
        Ok(())
    })
    .await?;
    Ok(Json(json!({ "status": "updated" })))
}

pub async fn delete_note(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<Value>, ApiError> {
    let Path(id) = path?;
    run_blocking(move || {
        lock(&state.notes)?.delete(id)?;
        Ok(())
    })
    .await?;
    Ok(Json(json!({ "status": "deleted" })))
}
