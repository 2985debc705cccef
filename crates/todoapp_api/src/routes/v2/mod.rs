//! V2 routes: enveloped responses, pagination, filtering, status toggles
//! and note management.

mod categories;
mod notes;
mod todos;

use crate::state::AppState;
use axum::Router;
use serde::Deserialize;

pub fn router() -> Router<AppState> {
    Router::new()
        .nest("/todos", todos::router().merge(notes::router()))
        .nest("/categories", categories::router())
}

/// `?include=true` asks for related data (the category name on todos).
#[derive(Debug, Default, Deserialize)]
pub(crate) struct IncludeQuery {
    #[serde(default)]
    pub include: bool,
}
