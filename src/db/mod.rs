//! Database abstraction layer.
//!
//! This module provides database access functionality:
//! - Connection pool management
//! - Database dispatch macros for reducing code duplication
//! - Statement rendering for the configured table
//! - Row-to-JSON conversion for passthrough queries
//! - The registry operations themselves

#[macro_use]
pub mod macros;
pub mod pool;
pub mod registry;
pub mod statements;
pub mod types;

pub use pool::DbPool;
pub use registry::ConnectionRegistry;
pub use statements::{Statements, TableName};
pub use types::RowToJson;
