//! Connection Registry Library
//!
//! An HTTP service that manages named database-connection records stored in a
//! relational table, plus passthrough introspection of the backing server.

pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
pub mod transport;

pub use config::Config;
pub use db::ConnectionRegistry;
pub use error::RegistryError;
pub use handlers::{AppState, router};
