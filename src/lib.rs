//! Grafana datasource API client library.
//!
//! A Rust library for managing datasources through the Grafana HTTP API
//! using a trait-based architecture where each operation (Get, List,
//! Create, Update, Delete) is defined as a trait that entity types
//! implement. Every call issues exactly one request and is scoped to an
//! organization.
//!
//! # Quick Start
//!
//! ```no_run
//! use grafapi::{Create, Datasource, Get, GrafanaClient, List, OrgId};
//!
//! #[tokio::main]
//! async fn main() -> grafapi::Result<()> {
//!     // Create client from environment variables
//!     let client = GrafanaClient::from_env()?;
//!
//!     // List all datasources of the current organization
//!     let all = Datasource::list(&client, OrgId::CURRENT).await?;
//!     println!("Found {} datasources", all.len());
//!
//!     // Create one
//!     let ds = Datasource::new("metrics", "prometheus", "http://prometheus:9090");
//!     let status = Datasource::create(&client, &ds, OrgId::CURRENT).await?;
//!     println!("{:?}", status.message);
//!
//!     // Read it back by name
//!     let ds = Datasource::get_by_name(&client, "metrics", OrgId::CURRENT).await?;
//!     println!("Datasource #{}", ds.id);
//!
//!     Ok(())
//! }
//! ```
//!
//! # Error model
//!
//! Reads (`list`, `get`, `get_by_name`, `DatasourceType::list_all`) require
//! `200 OK` and otherwise fail with [`GrafanaError::Status`], carrying the
//! code and raw body. Mutations (`create`, `update`, `delete`,
//! `delete_by_name`) decode whatever the server answers as a
//! [`StatusMessage`].
//!
//! # Configuration
//!
//! The client reads configuration from environment variables:
//!
//! - `GRAFANA_API_KEY` - API key or service account token, or
//! - `GRAFANA_BASIC_AUTH` - `user:password` for basic auth
//! - `GRAFANA_URL` (optional) - Base URL (defaults to `http://localhost:3000`)

pub mod cli;
mod client;
mod error;
pub mod mcp;
mod models;
mod output;
mod traits;

#[cfg(feature = "test-server")]
pub mod mock_server;

// Re-export core types
pub use client::{Auth, GrafanaClient, OrgId, RawResponse, ORG_ID_HEADER};
pub use error::{GrafanaError, Result};
pub use output::PrettyPrint;

// Re-export traits
pub use traits::{Create, Delete, Get, List, Update};

// Re-export models
pub use models::{Datasource, DatasourcePartials, DatasourceType, StatusMessage};
