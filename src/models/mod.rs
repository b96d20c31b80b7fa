//! Data models for the connection registry.

pub mod connection;

pub use connection::{
    ConnectionRecord, DatabaseName, DatabaseType, DatabaseUser, Message, NewConnection,
    RenameConnection,
};
