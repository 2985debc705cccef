//! Notes nested under a todo: `/todos/:id/notes[/:note_id]`.

use crate::envelope::ApiResponse;
use crate::error::{ApiError, ApiResult};
use crate::extract::{ApiJson, ApiPath};
use crate::routes::created;
use crate::state::AppState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Response;
use axum::routing::{get, put};
use axum::{Json, Router};
use todoapp_core::dto::{TodoNoteDto, TodoNoteRequest};

pub(super) fn router() -> Router<AppState> {
    Router::new()
        .route("/:id/notes", get(list_notes).post(create_note))
        .route("/:id/notes/:note_id", put(update_note).delete(delete_note))
}

async fn list_notes(
    State(state): State<AppState>,
    ApiPath(todo_id): ApiPath<i64>,
) -> ApiResult<Json<ApiResponse<Vec<TodoNoteDto>>>> {
    let notes = state
        .run(move |services| services.notes.list_by_todo(todo_id))
        .await?;
    Ok(Json(ApiResponse::ok(notes)))
}

async fn create_note(
    State(state): State<AppState>,
    ApiPath(todo_id): ApiPath<i64>,
    ApiJson(request): ApiJson<TodoNoteRequest>,
) -> ApiResult<Response> {
    let note = state
        .run(move |services| services.notes.create(todo_id, &request))
        .await?;
    Ok(created(
        format!("/api/v2/todos/{todo_id}/notes/{}", note.id),
        ApiResponse::with_message(note, "Note created"),
    ))
}

async fn update_note(
    State(state): State<AppState>,
    ApiPath((todo_id, note_id)): ApiPath<(i64, i64)>,
    ApiJson(request): ApiJson<TodoNoteRequest>,
) -> ApiResult<Json<ApiResponse<TodoNoteDto>>> {
    state
        .run(move |services| services.notes.update(todo_id, note_id, &request))
        .await?
        .map(|note| Json(ApiResponse::with_message(note, "Note updated")))
        .ok_or_else(|| note_not_found(todo_id, note_id))
}

async fn delete_note(
    State(state): State<AppState>,
    ApiPath((todo_id, note_id)): ApiPath<(i64, i64)>,
) -> ApiResult<StatusCode> {
    if state
        .run(move |services| services.notes.delete(todo_id, note_id))
        .await?
    {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(note_not_found(todo_id, note_id))
    }
}

fn note_not_found(todo_id: i64, note_id: i64) -> ApiError {
    ApiError::NotFound(format!(
        "Note with id {note_id} was not found for todo {todo_id}"
    ))
}
