//! Mock Grafana API server for E2E testing.
//!
//! This module provides an in-memory mock server that simulates the Grafana
//! datasource API for integration and end-to-end testing. Unlike wiremock
//! which mocks at the HTTP level per-test, this server maintains state across
//! requests, enabling realistic workflow testing.
//!
//! # Example
//!
//! ```ignore
//! use grafapi::mock_server::MockServer;
//! use grafapi::{Auth, Datasource, Get, GrafanaClient, OrgId};
//!
//! #[tokio::test]
//! async fn test_workflow() {
//!     let server = MockServer::start().await;
//!     let client = GrafanaClient::new(Auth::Token("test-token".into()), server.url()).unwrap();
//!
//!     // Server comes with default fixtures
//!     let ds = Datasource::get(&client, 1, OrgId::CURRENT).await.unwrap();
//!     assert_eq!(ds.name, "Prometheus");
//!
//!     server.shutdown().await;
//! }
//! ```

mod fixtures;
mod handlers;
mod server;
mod state;

pub use fixtures::Fixtures;
pub use server::MockServer;
pub use state::{MockState, StateError, DEFAULT_ORG};
