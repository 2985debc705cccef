//! Shared handler state and the per-request unit of work.

use crate::error::ApiError;
use std::path::PathBuf;
use std::sync::Arc;
use todoapp_core::db::open_db;
use todoapp_core::{ServiceResult, Services};

/// Cheap to clone; only the database location is shared between requests.
#[derive(Debug, Clone)]
pub struct AppState {
    db_path: Arc<PathBuf>,
}

impl AppState {
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: Arc::new(db_path.into()),
        }
    }

    /// Runs `work` on the blocking pool against a connection opened for this
    /// call and dropped when it returns.
    pub async fn run<T, F>(&self, work: F) -> Result<T, ApiError>
    where
        T: Send + 'static,
        F: FnOnce(&Services<'_>) -> ServiceResult<T> + Send + 'static,
    {
        let db_path = Arc::clone(&self.db_path);
        tokio::task::spawn_blocking(move || -> Result<T, ApiError> {
            let conn = open_db(db_path.as_path())?;
            let services = Services::new(&conn);
            Ok(work(&services)?)
        })
        .await?
    }
}
