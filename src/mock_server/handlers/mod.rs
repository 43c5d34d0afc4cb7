//! HTTP request handlers for the mock server.

pub mod datasources;

pub use datasources::*;
