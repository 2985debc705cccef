//! V2 todo routes: filtered and paged listings, status and priority views,
//! completion toggles.

use super::IncludeQuery;
use crate::envelope::ApiResponse;
use crate::error::{ApiError, ApiResult};
use crate::extract::{ApiJson, ApiPath, ApiQuery};
use crate::routes::created;
use crate::state::AppState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Response;
use axum::routing::{get, patch};
use axum::{Json, Router};
use serde::Deserialize;
use todoapp_core::dto::{
    CreateTodoRequest, PageRequest, PagedResult, TodoDto, TodoFilter, UpdateTodoRequest,
};

type TodoList = Json<ApiResponse<Vec<TodoDto>>>;
type TodoItem = Json<ApiResponse<TodoDto>>;

pub(super) fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_filtered).post(create_todo))
        .route("/paged", get(list_paged))
        .route("/completed", get(list_completed))
        .route("/pending", get(list_pending))
        .route("/overdue", get(list_overdue))
        .route("/by-category/:category_id", get(list_by_category))
        .route("/priority/:priority", get(list_by_priority))
        .route(
            "/:id",
            get(get_todo).put(update_todo).delete(delete_todo),
        )
        .route("/:id/complete", patch(mark_completed))
        .route("/:id/pending", patch(mark_pending))
}

/// `?pageNumber=&pageSize=&include=`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PagedTodosQuery {
    #[serde(default)]
    page_number: Option<i64>,
    #[serde(default)]
    page_size: Option<i64>,
    #[serde(default)]
    include: bool,
}

impl PagedTodosQuery {
    fn page_request(&self) -> PageRequest {
        let defaults = PageRequest::default();
        PageRequest::new(
            self.page_number.unwrap_or(defaults.page_number),
            self.page_size.unwrap_or(defaults.page_size),
        )
    }
}

async fn list_filtered(
    State(state): State<AppState>,
    ApiQuery(filter): ApiQuery<TodoFilter>,
) -> ApiResult<TodoList> {
    let todos = state
        .run(move |services| services.todos.get_filtered(&filter))
        .await?;
    Ok(Json(ApiResponse::ok(todos)))
}

async fn list_paged(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<PagedTodosQuery>,
) -> ApiResult<Json<ApiResponse<PagedResult<TodoDto>>>> {
    let page = state
        .run(move |services| {
            services
                .todos
                .get_paged(&query.page_request(), query.include)
        })
        .await?;
    Ok(Json(ApiResponse::ok(page)))
}

async fn list_completed(State(state): State<AppState>) -> ApiResult<TodoList> {
    let todos = state
        .run(|services| services.todos.get_completed())
        .await?;
    Ok(Json(ApiResponse::ok(todos)))
}

async fn list_pending(State(state): State<AppState>) -> ApiResult<TodoList> {
    let todos = state.run(|services| services.todos.get_pending()).await?;
    Ok(Json(ApiResponse::ok(todos)))
}

async fn list_overdue(State(state): State<AppState>) -> ApiResult<TodoList> {
    let todos = state.run(|services| services.todos.get_overdue()).await?;
    Ok(Json(ApiResponse::ok(todos)))
}

async fn list_by_category(
    State(state): State<AppState>,
    ApiPath(category_id): ApiPath<i64>,
) -> ApiResult<TodoList> {
    let todos = state
        .run(move |services| services.todos.get_by_category(category_id))
        .await?;
    Ok(Json(ApiResponse::ok(todos)))
}

async fn list_by_priority(
    State(state): State<AppState>,
    ApiPath(priority): ApiPath<i64>,
) -> ApiResult<TodoList> {
    let todos = state
        .run(move |services| services.todos.get_by_priority(priority))
        .await?;
    Ok(Json(ApiResponse::ok(todos)))
}

async fn get_todo(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiQuery(query): ApiQuery<IncludeQuery>,
) -> ApiResult<TodoItem> {
    state
        .run(move |services| services.todos.get_by_id(id, query.include))
        .await?
        .map(|todo| Json(ApiResponse::ok(todo)))
        .ok_or_else(|| ApiError::not_found("Todo", id))
}

async fn create_todo(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreateTodoRequest>,
) -> ApiResult<Response> {
    let todo = state
        .run(move |services| services.todos.create(&request))
        .await?;
    Ok(created(
        format!("/api/v2/todos/{}", todo.id),
        ApiResponse::with_message(todo, "Todo created"),
    ))
}

async fn update_todo(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(request): ApiJson<UpdateTodoRequest>,
) -> ApiResult<TodoItem> {
    state
        .run(move |services| services.todos.update(id, &request))
        .await?
        .map(|todo| Json(ApiResponse::with_message(todo, "Todo updated")))
        .ok_or_else(|| ApiError::not_found("Todo", id))
}

async fn delete_todo(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<StatusCode> {
    if state.run(move |services| services.todos.delete(id)).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::not_found("Todo", id))
    }
}

async fn mark_completed(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<TodoItem> {
    state
        .run(move |services| services.todos.mark_completed(id))
        .await?
        .map(|todo| Json(ApiResponse::with_message(todo, "Todo marked as completed")))
        .ok_or_else(|| ApiError::not_found("Todo", id))
}

async fn mark_pending(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<TodoItem> {
    state
        .run(move |services| services.todos.mark_pending(id))
        .await?
        .map(|todo| Json(ApiResponse::with_message(todo, "Todo marked as pending")))
        .ok_or_else(|| ApiError::not_found("Todo", id))
}
