//! V1 routes: plain CRUD over todos and categories with bare JSON bodies.

use super::created;
use crate::error::{ApiError, ApiResult};
use crate::extract::{ApiJson, ApiPath};
use crate::state::AppState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Response;
use axum::routing::get;
use axum::{Json, Router};
use todoapp_core::dto::{
    CategoryDto, CreateCategoryRequest, CreateTodoRequest, TodoDto, UpdateCategoryRequest,
    UpdateTodoRequest,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/todos", get(list_todos).post(create_todo))
        .route(
            "/todos/:id",
            get(get_todo).put(update_todo).delete(delete_todo),
        )
        .route("/categories", get(list_categories).post(create_category))
        .route(
            "/categories/:id",
            get(get_category)
                .put(update_category)
                .delete(delete_category),
        )
}

async fn list_todos(State(state): State<AppState>) -> ApiResult<Json<Vec<TodoDto>>> {
    let todos = state.run(|services| services.todos.list(false)).await?;
    Ok(Json(todos))
}

async fn get_todo(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<Json<TodoDto>> {
    state
        .run(move |services| services.todos.get_by_id(id, false))
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Todo", id))
}

async fn create_todo(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreateTodoRequest>,
) -> ApiResult<Response> {
    let todo = state
        .run(move |services| services.todos.create(&request))
        .await?;
    Ok(created(format!("/api/v1/todos/{}", todo.id), todo))
}

async fn update_todo(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(request): ApiJson<UpdateTodoRequest>,
) -> ApiResult<Json<TodoDto>> {
    state
        .run(move |services| services.todos.update(id, &request))
        .await?
        .map(Json)
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

async fn list_categories(State(state): State<AppState>) -> ApiResult<Json<Vec<CategoryDto>>> {
    let categories = state.run(|services| services.categories.list()).await?;
    Ok(Json(categories))
}

async fn get_category(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<Json<CategoryDto>> {
    state
        .run(move |services| services.categories.get_by_id(id))
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Category", id))
}

async fn create_category(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreateCategoryRequest>,
) -> ApiResult<Response> {
    let category = state
        .run(move |services| services.categories.create(&request))
        .await?;
    Ok(created(
        format!("/api/v1/categories/{}", category.id),
        category,
    ))
}

async fn update_category(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(request): ApiJson<UpdateCategoryRequest>,
) -> ApiResult<Json<CategoryDto>> {
    state
        .run(move |services| services.categories.update(id, &request))
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Category", id))
}

async fn delete_category(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<StatusCode> {
    if state
        .run(move |services| services.categories.delete(id))
        .await?
    {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::not_found("Category", id))
    }
}
