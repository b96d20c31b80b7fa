//! HTTP endpoints.
//!
//! Every handler runs one registry operation and hands the outcome to
//! [`expect_rows`], [`expect_found`] or [`expect_any`], which turn "zero rows"
//! into a 404. Any
//! error from the database becomes a 500 through `RegistryError`'s
//! `IntoResponse` implementation.

pub mod catalog;
pub mod connections;

use crate::db::ConnectionRegistry;
use crate::error::{RegistryError, RegistryResult};
use axum::Router;
use axum::routing::{delete, get, post, put};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub const CONNECTION_NOT_FOUND: &str = "Connection not found";
pub const NO_CONNECTIONS_FOUND: &str = "No connections found";

/// Shared application state.
#[derive(Debug, Clone)]
pub struct AppState {
    pub registry: ConnectionRegistry,
    /// Answer an empty listing with `200 []` instead of 404
    pub empty_list_ok: bool,
}

impl AppState {
    pub fn new(registry: ConnectionRegistry, empty_list_ok: bool) -> Self {
        Self {
            registry,
            empty_list_ok,
        }
    }
}

/// A row-affecting statement must touch at least one row.
pub fn expect_rows(affected: u64, not_found: &str) -> RegistryResult<()> {
    if affected == 0 {
        Err(RegistryError::not_found(not_found))
    } else {
        Ok(())
    }
}

/// An existence lookup must find its row.
pub fn expect_found(found: bool, not_found: &str) -> RegistryResult<()> {
    if found {
        Ok(())
    } else {
        Err(RegistryError::not_found(not_found))
    }
}

/// A row-selecting statement must return at least one row.
pub fn expect_any<T>(rows: Vec<T>, not_found: &str) -> RegistryResult<Vec<T>> {
    if rows.is_empty() {
        Err(RegistryError::not_found(not_found))
    } else {
        Ok(rows)
    }
}

/// Build the service router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(
            "/activate-connection/{name}",
            put(connections::activate_connection),
        )
        .route(
            "/deactivate-connection/{name}",
            put(connections::deactivate_connection),
        )
        .route(
            "/deactivate-all-connections",
            put(connections::deactivate_all_connections),
        )
        .route("/get-sql-users", get(catalog::get_sql_users))
        .route("/get-databases", get(catalog::get_databases))
        .route("/get-connections", get(connections::get_connections))
        .route(
            "/check-connection-existence/{name}",
            get(connections::check_connection_existence),
        )
        .route(
            "/delete-connection/{name}",
            delete(connections::delete_connection),
        )
        .route("/create-connection", post(connections::create_connection))
        .route("/current-db", get(catalog::current_db))
        .route(
            "/update-connection-name",
            put(connections::update_connection_name),
        )
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expect_rows() {
        assert!(expect_rows(1, CONNECTION_NOT_FOUND).is_ok());
        assert!(expect_rows(3, CONNECTION_NOT_FOUND).is_ok());
        let err = expect_rows(0, CONNECTION_NOT_FOUND).unwrap_err();
        assert!(matches!(err, RegistryError::NotFound { .. }));
        assert_eq!(err.public_message(), "Connection not found");
    }

    #[test]
    fn test_expect_found() {
        assert!(expect_found(true, CONNECTION_NOT_FOUND).is_ok());
        let err = expect_found(false, CONNECTION_NOT_FOUND).unwrap_err();
        assert_eq!(err.status_code(), axum::http::StatusCode::NOT_FOUND);
        assert_eq!(err.public_message(), "Connection not found");
    }

    #[test]
    fn test_expect_any() {
        assert_eq!(expect_any(vec![1, 2], NO_CONNECTIONS_FOUND).unwrap(), vec![1, 2]);
        let err = expect_any(Vec::<u8>::new(), NO_CONNECTIONS_FOUND).unwrap_err();
        assert_eq!(err.public_message(), "No connections found");
    }
}
