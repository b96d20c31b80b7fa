//! SQL text for every registry operation.
//!
//! Statements are rendered once at start-up for the configured table and
//! backend. The table name is the only piece of SQL that comes from
//! configuration; it is validated as an identifier and quoted. Request values
//! are always bound as parameters.

use crate::models::DatabaseType;

/// Validated `table` or `schema.table` identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableName {
    schema: Option<String>,
    table: String,
}

impl TableName {
    /// Parse `table` or `schema.table`. Each part must match `[A-Za-z_][A-Za-z0-9_]*`.
    pub fn parse(s: &str) -> Result<Self, String> {
        let parts: Vec<&str> = s.split('.').collect();
        let (schema, table) = match parts.as_slice() {
            [table] => (None, *table),
            [schema, table] => (Some(*schema), *table),
            _ => {
                return Err(format!(
                    "Invalid table name '{}': expected 'table' or 'schema.table'",
                    s
                ));
            }
        };

        for part in schema.iter().chain(std::iter::once(&table)) {
            if !is_identifier(part) {
                return Err(format!(
                    "Invalid table name '{}': '{}' is not a plain identifier",
                    s, part
                ));
            }
        }

        Ok(Self {
            schema: schema.map(String::from),
            table: table.to_string(),
        })
    }

    /// Double-quoted form usable in PostgreSQL and SQLite.
    pub fn quoted(&self) -> String {
        match &self.schema {
            Some(schema) => format!("\"{}\".\"{}\"", schema, self.table),
            None => format!("\"{}\"", self.table),
        }
    }
}

impl std::fmt::Display for TableName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.schema {
            Some(schema) => write!(f, "{}.{}", schema, self.table),
            None => f.write_str(&self.table),
        }
    }
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Positional bind placeholder for the backend (1-based).
fn placeholder(db_type: DatabaseType, n: usize) -> String {
    match db_type {
        DatabaseType::PostgreSQL => format!("${}", n),
        DatabaseType::SQLite => format!("?{}", n),
    }
}

const RECORD_COLUMNS: &str = r#"nombre, usuario, password, "database", activa"#;

/// Rendered SQL for one backend and table.
#[derive(Debug, Clone)]
pub struct Statements {
    /// binds: active, name
    pub set_active: String,
    /// binds: active
    pub set_all_active: String,
    pub list_connections: String,
    /// binds: name. Yields a single `1` when the record exists.
    pub connection_exists: String,
    /// binds: name
    pub delete_connection: String,
    /// binds: name, user, password, database, active
    pub insert_connection: String,
    /// binds: new name, old name
    pub rename_connection: String,
    /// None when the backend has no user catalog.
    pub list_users: Option<String>,
    pub list_databases: String,
    pub current_database: String,
}

impl Statements {
    pub fn new(db_type: DatabaseType, table: &TableName) -> Self {
        let t = table.quoted();
        let p = |n| placeholder(db_type, n);

        let (list_users, list_databases, current_database) = match db_type {
            DatabaseType::PostgreSQL => (
                Some("SELECT usename::text AS username FROM pg_catalog.pg_user".to_string()),
                "SELECT datname::text AS datname FROM pg_catalog.pg_database".to_string(),
                r#"SELECT current_database()::text AS "database""#.to_string(),
            ),
            DatabaseType::SQLite => (
                None,
                "SELECT name AS datname FROM pragma_database_list".to_string(),
                r#"SELECT name AS "database" FROM pragma_database_list WHERE seq = 0"#
                    .to_string(),
            ),
        };

        Self {
            set_active: format!("UPDATE {t} SET activa = {} WHERE nombre = {}", p(1), p(2)),
            set_all_active: format!("UPDATE {t} SET activa = {}", p(1)),
            list_connections: format!("SELECT {RECORD_COLUMNS} FROM {t}"),
            connection_exists: format!("SELECT 1 FROM {t} WHERE nombre = {}", p(1)),
            delete_connection: format!("DELETE FROM {t} WHERE nombre = {}", p(1)),
            insert_connection: format!(
                "INSERT INTO {t} ({RECORD_COLUMNS}) VALUES ({}, {}, {}, {}, {})",
                p(1),
                p(2),
                p(3),
                p(4),
                p(5)
            ),
            rename_connection: format!("UPDATE {t} SET nombre = {} WHERE nombre = {}", p(1), p(2)),
            list_users,
            list_databases,
            current_database,
        }
    }
}
