//! Read-only passthrough queries against the server catalogs.

use super::AppState;
use crate::error::RegistryResult;
use crate::models::{DatabaseName, DatabaseUser};
use axum::Json;
use axum::extract::State;
use serde_json::{Map, Value as JsonValue};
use std::sync::Arc;

/// GET /get-sql-users
pub async fn get_sql_users(
    State(state): State<Arc<AppState>>,
) -> RegistryResult<Json<Vec<DatabaseUser>>> {
    Ok(Json(state.registry.list_users().await?))
}

/// GET /get-databases
pub async fn get_databases(
    State(state): State<Arc<AppState>>,
) -> RegistryResult<Json<Vec<DatabaseName>>> {
    Ok(Json(state.registry.list_databases().await?))
}

/// GET /current-db
pub async fn current_db(
    State(state): State<Arc<AppState>>,
) -> RegistryResult<Json<Vec<Map<String, JsonValue>>>> {
    Ok(Json(state.registry.current_database().await?))
}
