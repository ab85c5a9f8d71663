// src/ports/http/grades.rs
//
// The grade tracker lives in memory only and resets with the process.
use axum::{
    extract::{rejection::PathRejection, Path, State},
    Json,
};
use std::sync::Arc;
use tracing::debug;

use super::error::{lock, ApiError};
use super::AppState;
use crate::domain::GradeSummary;

pub async fn show(State(state): State<Arc<AppState>>) -> Result<Json<GradeSummary>, ApiError> {
    Ok(Json(lock(&state.grades)?.summary()))
}

pub async fn add(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<GradeSummary>, ApiError> {
    let Path(value) = path?;
    let mut grades = lock(&state.grades)?;
    if !grades.add(value) {
        debug!(value, "Ignoring grade outside 1-10");
    }
    Ok(Json(grades.summary()))
}

pub async fn remove(State(state): State<Arc<AppState>>) -> Result<Json<GradeSummary>, ApiError> {
    let mut grades = lock(&state.grades)?;
    grades.remove_last();
    Ok(Json(grades.summary()))
}
