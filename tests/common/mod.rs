//! Shared setup for integration tests.

#![allow(dead_code)]

use connection_registry::config::DatabaseConfig;
use connection_registry::db::{ConnectionRegistry, DbPool, TableName};
use connection_registry::handlers::{self, AppState};
use connection_registry::models::{ConnectionRecord, NewConnection};
use std::sync::Arc;
use tempfile::NamedTempFile;

pub const TABLE: &str = "conexiones";

const CREATE_TABLE: &str = r#"CREATE TABLE conexiones (
    nombre TEXT PRIMARY KEY,
    usuario TEXT,
    password TEXT,
    "database" TEXT,
    activa BOOLEAN DEFAULT FALSE
)"#;

/// Create a registry on a fresh SQLite file with the registry table in place.
pub async fn setup_registry() -> ConnectionRegistry {
    let temp_file = NamedTempFile::new().unwrap();
    // Keep the temp file alive - prevent deletion when function returns
    let db_path = temp_file
        .into_temp_path()
        .keep()
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();

    let config = DatabaseConfig::parse(&format!("sqlite:{}", db_path), None).unwrap();
    let registry = ConnectionRegistry::connect(&config, &TableName::parse(TABLE).unwrap())
        .await
        .unwrap();

    if let DbPool::SQLite(pool) = registry.pool() {
        sqlx::query(CREATE_TABLE).execute(pool).await.unwrap();
    } else {
        panic!("Expected SQLite pool");
    }

    registry
}

/// Router over a fresh registry.
pub async fn setup_app(empty_list_ok: bool) -> (axum::Router, ConnectionRegistry) {
    let registry = setup_registry().await;
    let state = Arc::new(AppState::new(registry.clone(), empty_list_ok));
    (handlers::router(state), registry)
}

pub fn new_connection(name: &str) -> NewConnection {
    NewConnection {
        name: name.to_string(),
        user: "alice".to_string(),
        password: "x".to_string(),
        database: "app".to_string(),
    }
}

/// Look a record up through the listing.
pub async fn find_record(registry: &ConnectionRegistry, name: &str) -> Option<ConnectionRecord> {
    registry
        .list_connections()
        .await
        .unwrap()
        .into_iter()
        .find(|r| r.name == name)
}

/// Insert a row directly, bypassing the create operation.
pub async fn insert_raw(registry: &ConnectionRegistry, sql: &str) {
    match registry.pool() {
        DbPool::SQLite(pool) => {
            sqlx::query(sql).execute(pool).await.unwrap();
        }
        DbPool::Postgres(_) => panic!("Expected SQLite pool"),
    }
}
