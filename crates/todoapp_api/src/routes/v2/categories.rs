//! V2 category routes: paging, active listing, name lookup, stats and
//! status toggles.

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
use todoapp_core::dto::{
    CategoryDto, CategoryStats, CreateCategoryRequest, PageRequest, PagedResult,
    UpdateCategoryRequest,
};

type CategoryItem = Json<ApiResponse<CategoryDto>>;

pub(super) fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_paged).post(create_category))
        .route("/active", get(list_active))
        .route("/stats", get(stats))
        .route("/by-name/:name", get(get_by_name))
        .route(
            "/:id",
            get(get_category)
                .put(update_category)
                .delete(delete_category),
        )
        .route("/:id/toggle-status", patch(toggle_status))
}

async fn list_paged(
    State(state): State<AppState>,
    ApiQuery(page): ApiQuery<PageRequest>,
) -> ApiResult<Json<ApiResponse<PagedResult<CategoryDto>>>> {
    let result = state
        .run(move |services| services.categories.get_paged(&page))
        .await?;
    Ok(Json(ApiResponse::ok(result)))
}

async fn list_active(
    State(state): State<AppState>,
) -> ApiResult<Json<ApiResponse<Vec<CategoryDto>>>> {
    let categories = state
        .run(|services| services.categories.list_active())
        .await?;
    Ok(Json(ApiResponse::ok(categories)))
}

async fn stats(State(state): State<AppState>) -> ApiResult<Json<ApiResponse<CategoryStats>>> {
    let stats = state.run(|services| services.categories.stats()).await?;
    Ok(Json(ApiResponse::ok(stats)))
}

/// Case-insensitive lookup by exact name.
async fn get_by_name(
    State(state): State<AppState>,
    ApiPath(name): ApiPath<String>,
) -> ApiResult<CategoryItem> {
    let lookup = name.clone();
    state
        .run(move |services| services.categories.get_by_name(&lookup))
        .await?
        .map(|category| Json(ApiResponse::ok(category)))
        .ok_or_else(|| ApiError::NotFound(format!("Category named '{name}' was not found")))
}

async fn get_category(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<CategoryItem> {
    state
        .run(move |services| services.categories.get_by_id(id))
        .await?
        .map(|category| Json(ApiResponse::ok(category)))
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
        format!("/api/v2/categories/{}", category.id),
        ApiResponse::with_message(category, "Category created"),
    ))
}

async fn update_category(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(request): ApiJson<UpdateCategoryRequest>,
) -> ApiResult<CategoryItem> {
    state
        .run(move |services| services.categories.update(id, &request))
        .await?
        .map(|category| Json(ApiResponse::with_message(category, "Category updated")))
        .ok_or_else(|| ApiError::not_found("Category", id))
}

async fn toggle_status(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<CategoryItem> {
    state
        .run(move |services| services.categories.toggle_status(id))
        .await?
        .map(|category| Json(ApiResponse::with_message(category, "Category status toggled")))
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
