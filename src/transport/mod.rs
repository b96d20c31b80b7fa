//! Transport layer for the connection registry.

pub mod http;

pub use http::HttpTransport;
