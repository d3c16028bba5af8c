// ABOUTME: Student CRUD handlers: validate input, run one store statement, map the outcome.
// ABOUTME: Validation stops at the first failing field; storage faults surface as 500s.

use std::sync::Arc;

use alunos_core::{Student, StudentInput};
use alunos_store::{StoreError, StudentStore};
use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde::Serialize;
use serde_json::Value;

use crate::app_state::SharedState;
use crate::error::ApiError;

/// Response body after creating a student.
#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub id: i64,
    pub message: &'static str,
}

/// Response body for successful update and delete.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

/// Read the five fields out of a JSON body. Extractor rejections become 400s;
/// a body that parses but is not an object has no fields.
fn body(payload: Result<Json<Value>, JsonRejection>) -> Result<StudentInput, ApiError> {
    payload
        .map(|Json(value)| StudentInput::from_json(&value))
        .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))
}

/// Run one store call on the blocking pool while holding the store lock.
async fn with_store<T, F>(state: &SharedState, f: F) -> Result<T, ApiError>
where
    F: FnOnce(&StudentStore) -> Result<T, StoreError> + Send + 'static,
    T: Send + 'static,
{
    let state = Arc::clone(state);
    let result = tokio::task::spawn_blocking(move || {
        let store = state.store.blocking_lock();
        f(&store)
    })
    .await
    .map_err(|e| ApiError::Internal(e.to_string()))?;
    Ok(result?)
}

/// POST /alunos - Validate and insert a new student.
pub async fn create_student(
    State(state): State<SharedState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<CreatedResponse>), ApiError> {
    let student = body(payload)?.validate()?;
    let matricula = student.enrollment_code.clone();

    let id = with_store(&state, move |store| store.insert(&student)).await?;
    tracing::info!(id, %matricula, "student created");

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse {
            id,
            message: "Student created successfully",
        }),
    ))
}

/// GET /alunos - List every student.
pub async fn list_students(
    State(state): State<SharedState>,
) -> Result<Json<Vec<Student>>, ApiError> {
    let students = with_store(&state, |store| store.list()).await?;
    Ok(Json(students))
}

/// GET /alunos/{id} - Fetch a single student. The path segment is bound as
/// text, so keys that SQLite cannot read as an integer match nothing.
pub async fn get_student(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<Student>, ApiError> {
    let student = with_store(&state, move |store| store.get(id.as_str())).await?;
    student.map(Json).ok_or(ApiError::NotFound)
}

/// PUT /alunos/{id} - Validate and overwrite all five fields of a student.
pub async fn update_student(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let student = body(payload)?.validate()?;

    let key = id.clone();
    if !with_store(&state, move |store| store.update(key.as_str(), &student)).await? {
        return Err(ApiError::NotFound);
    }
    tracing::info!(%id, "student updated");

    Ok(Json(MessageResponse {
        message: "Student updated successfully",
    }))
}

/// DELETE /alunos/{id} - Remove a student.
pub async fn delete_student(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let key = id.clone();
    if !with_store(&state, move |store| store.delete(key.as_str())).await? {
        return Err(ApiError::NotFound);
    }
    tracing::info!(%id, "student deleted");

    Ok(Json(MessageResponse {
        message: "Student deleted successfully",
    }))
}
