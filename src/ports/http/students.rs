// src/ports/http/students.rs
use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde_json::{json, Value};
use std::sync::Arc;

use super::error::{lock, run_blocking, ApiError};
use super::AppState;
use crate::domain::{RegistrationRequest, Student};

pub async fn register(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<RegistrationRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(request) = payload?;
    run_blocking(move || {
        lock(&state.registrar)?.register(&request)?;
        Ok(())
    })
    .await?;
    Ok(Json(json!({ "status": "ok" })))
}

pub async fn list_students(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Student>>, ApiError> {
    let students = run_blocking(move || {
        let students = lock(&state.registrar)?.students()?;
        Ok(students)
    })
    .await?;
    Ok(Json(students))
}
