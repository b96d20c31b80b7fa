//! Connection-record data models.
//!
//! This module defines the registry row type, the request bodies that create or
//! rename records, and the backend type detected from the database URL.

use serde::{Deserialize, Serialize};

/// Supported backend database types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseType {
    /// Includes CockroachDB
    PostgreSQL,
    SQLite,
}

impl DatabaseType {
    /// Parse database type from a connection string.
    pub fn from_connection_string(connection_string: &str) -> Option<Self> {
        let lower = connection_string.to_lowercase();
        if lower.starts_with("postgres://") || lower.starts_with("postgresql://") {
            Some(Self::PostgreSQL)
        } else if lower.starts_with("sqlite://") || lower.starts_with("sqlite:") {
            Some(Self::SQLite)
        } else {
            None
        }
    }

    /// Get the display name for this database type.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::PostgreSQL => "PostgreSQL",
            Self::SQLite => "SQLite",
        }
    }
}

impl std::fmt::Display for DatabaseType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// A persisted connection record.
///
/// Field names on the wire and in the table are the registry's column names
/// (`nombre`, `usuario`, `password`, `database`, `activa`). Only `nombre` is
/// guaranteed present; any other column may be NULL and is returned as `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct ConnectionRecord {
    #[serde(rename = "nombre")]
    #[sqlx(rename = "nombre")]
    pub name: String,
    #[serde(rename = "usuario")]
    #[sqlx(rename = "usuario")]
    pub user: Option<String>,
    /// Stored in plaintext.
    pub password: Option<String>,
    pub database: Option<String>,
    #[serde(rename = "activa")]
    #[sqlx(rename = "activa")]
    pub active: Option<bool>,
}

/// Body of `POST /create-connection`.
#[derive(Debug, Clone, Deserialize)]
pub struct NewConnection {
    #[serde(rename = "connectionName", alias = "name")]
    pub name: String,
    pub user: String,
    pub password: String,
    pub database: String,
}

/// Body of `PUT /update-connection-name`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenameConnection {
    pub old_name: String,
    pub new_name: String,
}

/// Row of the server user listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct DatabaseUser {
    pub username: String,
}

/// Row of the database listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct DatabaseName {
    pub datname: String,
}

/// Success body: `{"message": "..."}`.
#[derive(Debug, Clone, Serialize)]
pub struct Message {
    pub message: &'static str,
}

impl Message {
    pub fn new(message: &'static str) -> Self {
        Self { message }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_type_from_connection_string() {
        assert_eq!(
            DatabaseType::from_connection_string("postgres://localhost/db"),
            Some(DatabaseType::PostgreSQL)
        );
        assert_eq!(
            DatabaseType::from_connection_string("postgresql://localhost/db"),
            Some(DatabaseType::PostgreSQL)
        );
        assert_eq!(
            DatabaseType::from_connection_string("sqlite:test.db"),
            Some(DatabaseType::SQLite)
        );
        assert_eq!(
            DatabaseType::from_connection_string("sqlite://path/to/db"),
            Some(DatabaseType::SQLite)
        );
        assert_eq!(
            DatabaseType::from_connection_string("mysql://localhost/db"),
            None
        );
    }

    #[test]
    fn test_record_serializes_with_column_names() {
        let record = ConnectionRecord {
            name: "prod".to_string(),
            user: Some("alice".to_string()),
            password: Some("x".to_string()),
            database: Some("app".to_string()),
            active: Some(true),
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "nombre": "prod",
                "usuario": "alice",
                "password": "x",
                "database": "app",
                "activa": true
            })
        );
    }

    #[test]
    fn test_record_null_columns_serialize_as_null() {
        let record = ConnectionRecord {
            name: "prod".to_string(),
            user: Some("alice".to_string()),
            password: None,
            database: Some("app".to_string()),
            active: None,
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["password"], serde_json::Value::Null);
        assert_eq!(json["activa"], serde_json::Value::Null);
        assert_eq!(json["usuario"], serde_json::json!("alice"));
    }

    #[test]
    fn test_new_connection_accepts_connection_name() {
        let body: NewConnection = serde_json::from_str(
            r#"{"connectionName":"prod","user":"alice","password":"x","database":"app"}"#,
        )
        .unwrap();
        assert_eq!(body.name, "prod");
        assert_eq!(body.user, "alice");
    }

    #[test]
    fn test_new_connection_accepts_name_alias() {
        let body: NewConnection =
            serde_json::from_str(r#"{"name":"prod","user":"a","password":"b","database":"c"}"#)
                .unwrap();
        assert_eq!(body.name, "prod");
    }

    #[test]
    fn test_new_connection_missing_field_rejected() {
        let result =
            serde_json::from_str::<NewConnection>(r#"{"connectionName":"prod","user":"a"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_rename_uses_camel_case() {
        let body: RenameConnection =
            serde_json::from_str(r#"{"oldName":"a","newName":"b"}"#).unwrap();
        assert_eq!(body.old_name, "a");
        assert_eq!(body.new_name, "b");
    }
}
