//! Data access for the connection registry.
//!
//! Each method runs exactly one statement on the shared pool. Row-affecting
//! methods return the affected-row count; deciding whether zero rows means
//! "not found" is left to the caller.

use crate::config::DatabaseConfig;
use crate::db::pool::DbPool;
use crate::db::statements::{Statements, TableName};
use crate::db::types::RowToJson;
use crate::error::RegistryResult;
use crate::models::{ConnectionRecord, DatabaseName, DatabaseUser, NewConnection};
use serde_json::{Map, Value as JsonValue};
use tracing::{debug, info};

/// Registry handle shared by all request handlers.
#[derive(Debug, Clone)]
pub struct ConnectionRegistry {
    pool: DbPool,
    statements: Statements,
}

impl ConnectionRegistry {
    /// Wrap an existing pool.
    pub fn new(pool: DbPool, table: &TableName) -> Self {
        let statements = Statements::new(pool.db_type(), table);
        Self { pool, statements }
    }

    /// Open the pool described by `config` and wrap it.
    pub async fn connect(config: &DatabaseConfig, table: &TableName) -> RegistryResult<Self> {
        let pool = DbPool::connect(config).await?;
        info!(table = %table, "Connection registry ready");
        Ok(Self::new(pool, table))
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    /// Set `activa` for one record. Returns the affected-row count.
    pub async fn set_active(&self, name: &str, active: bool) -> RegistryResult<u64> {
        debug!(name = %name, active, "Setting connection state");
        let sql = self.statements.set_active.as_str();
        let result = impl_db_dispatch!(&self.pool, |p| sqlx::query(sql)
            .bind(active)
            .bind(name)
            .execute(p)
            .await?
            .rows_affected());
        Ok(result)
    }

    /// Set `activa` to false on every record. Returns the affected-row count.
    pub async fn deactivate_all(&self) -> RegistryResult<u64> {
        let sql = self.statements.set_all_active.as_str();
        let result = impl_db_dispatch!(&self.pool, |p| sqlx::query(sql)
            .bind(false)
            .execute(p)
            .await?
            .rows_affected());
        debug!(affected = result, "Deactivated all connections");
        Ok(result)
    }

    /// List the backend's login users. Empty for backends without a user catalog.
    pub async fn list_users(&self) -> RegistryResult<Vec<DatabaseUser>> {
        let Some(sql) = self.statements.list_users.as_deref() else {
            return Ok(Vec::new());
        };
        let users = impl_db_dispatch!(&self.pool, |p| sqlx::query_as::<_, DatabaseUser>(sql)
            .fetch_all(p)
            .await?);
        Ok(users)
    }

    pub async fn list_databases(&self) -> RegistryResult<Vec<DatabaseName>> {
        let sql = self.statements.list_databases.as_str();
        let databases = impl_db_dispatch!(&self.pool, |p| sqlx::query_as::<_, DatabaseName>(sql)
            .fetch_all(p)
            .await?);
        Ok(databases)
    }

    pub async fn list_connections(&self) -> RegistryResult<Vec<ConnectionRecord>> {
        let sql = self.statements.list_connections.as_str();
        let records = impl_db_dispatch!(&self.pool, |p| sqlx::query_as::<_, ConnectionRecord>(sql)
            .fetch_all(p)
            .await?);
        debug!(count = records.len(), "Listed connections");
        Ok(records)
    }

    /// Whether a record with this name exists. Reads no columns.
    pub async fn exists(&self, name: &str) -> RegistryResult<bool> {
        let sql = self.statements.connection_exists.as_str();
        let found = impl_db_dispatch!(&self.pool, |p| sqlx::query_scalar::<_, i32>(sql)
            .bind(name)
            .fetch_optional(p)
            .await?);
        Ok(found.is_some())
    }

    /// Delete a record by name. Returns the affected-row count.
    pub async fn delete(&self, name: &str) -> RegistryResult<u64> {
        debug!(name = %name, "Deleting connection");
        let sql = self.statements.delete_connection.as_str();
        let result = impl_db_dispatch!(&self.pool, |p| sqlx::query(sql)
            .bind(name)
            .execute(p)
            .await?
            .rows_affected());
        Ok(result)
    }

    /// Insert a new record. `activa` always starts false.
    pub async fn create(&self, new: &NewConnection) -> RegistryResult<u64> {
        debug!(name = %new.name, "Creating connection");
        let sql = self.statements.insert_connection.as_str();
        let result = impl_db_dispatch!(&self.pool, |p| sqlx::query(sql)
            .bind(new.name.as_str())
            .bind(new.user.as_str())
            .bind(new.password.as_str())
            .bind(new.database.as_str())
            .bind(false)
            .execute(p)
            .await?
            .rows_affected());
        Ok(result)
    }

    /// Rows describing the database the pool is connected to.
    pub async fn current_database(&self) -> RegistryResult<Vec<Map<String, JsonValue>>> {
        let sql = self.statements.current_database.as_str();
        let rows = impl_db_dispatch!(&self.pool, |p| sqlx::query(sql)
            .fetch_all(p)
            .await?
            .iter()
            .map(|row| row.to_json_map())
            .collect());
        Ok(rows)
    }

    /// Rename a record. Returns the affected-row count.
    pub async fn rename(&self, old_name: &str, new_name: &str) -> RegistryResult<u64> {
        debug!(old_name = %old_name, new_name = %new_name, "Renaming connection");
        let sql = self.statements.rename_connection.as_str();
        let result = impl_db_dispatch!(&self.pool, |p| sqlx::query(sql)
            .bind(new_name)
            .bind(old_name)
            .execute(p)
            .await?
            .rows_affected());
        Ok(result)
    }

    /// Close the underlying pool.
    pub async fn close(&self) {
        info!("Closing database pool");
        self.pool.close().await;
    }
}
