//! Endpoints over the registry table.

use super::{
    AppState, CONNECTION_NOT_FOUND, NO_CONNECTIONS_FOUND, expect_any, expect_found, expect_rows,
};
use crate::error::RegistryResult;
use crate::models::{ConnectionRecord, Message, NewConnection, RenameConnection};
use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use std::sync::Arc;
use tracing::info;

/// PUT /activate-connection/{name}
pub async fn activate_connection(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> RegistryResult<Json<Message>> {
    let affected = state.registry.set_active(&name, true).await?;
    expect_rows(affected, CONNECTION_NOT_FOUND)?;
    info!(name = %name, "Connection activated");
    Ok(Json(Message::new("Connection activated successfully")))
}

/// PUT /deactivate-connection/{name}
pub async fn deactivate_connection(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> RegistryResult<Json<Message>> {
    let affected = state.registry.set_active(&name, false).await?;
    expect_rows(affected, CONNECTION_NOT_FOUND)?;
    info!(name = %name, "Connection deactivated");
    Ok(Json(Message::new("Connection deactivated successfully")))
}

/// PUT /deactivate-all-connections
pub async fn deactivate_all_connections(
    State(state): State<Arc<AppState>>,
) -> RegistryResult<Json<Message>> {
    let affected = state.registry.deactivate_all().await?;
    info!(affected, "All connections deactivated");
    Ok(Json(Message::new("All connections deactivated successfully")))
}

/// GET /get-connections
pub async fn get_connections(
    State(state): State<Arc<AppState>>,
) -> RegistryResult<Json<Vec<ConnectionRecord>>> {
    let records = state.registry.list_connections().await?;
    if state.empty_list_ok {
        return Ok(Json(records));
    }
    Ok(Json(expect_any(records, NO_CONNECTIONS_FOUND)?))
}

/// GET /check-connection-existence/{name}
pub async fn check_connection_existence(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> RegistryResult<Json<Message>> {
    let exists = state.registry.exists(&name).await?;
    expect_found(exists, CONNECTION_NOT_FOUND)?;
    Ok(Json(Message::new("Connection found")))
}

/// DELETE /delete-connection/{name}
pub async fn delete_connection(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> RegistryResult<Json<Message>> {
    let affected = state.registry.delete(&name).await?;
    expect_rows(affected, CONNECTION_NOT_FOUND)?;
    info!(name = %name, "Connection deleted");
    Ok(Json(Message::new("Connection deleted successfully")))
}

/// POST /create-connection
pub async fn create_connection(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<NewConnection>, JsonRejection>,
) -> RegistryResult<Json<Message>> {
    let Json(new) = payload?;
    state.registry.create(&new).await?;
    info!(name = %new.name, "Connection added");
    Ok(Json(Message::new("Connection added successfully")))
}

/// PUT /update-connection-name
pub async fn update_connection_name(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<RenameConnection>, JsonRejection>,
) -> RegistryResult<Json<Message>> {
    let Json(rename) = payload?;
    let affected = state
        .registry
        .rename(&rename.old_name, &rename.new_name)
        .await?;
    expect_rows(affected, CONNECTION_NOT_FOUND)?;
    info!(old_name = %rename.old_name, new_name = %rename.new_name, "Connection renamed");
    Ok(Json(Message::new("Connection name updated successfully")))
}
