//! MCP (Model Context Protocol) server and tool types.
//!
//! This module provides an MCP server implementation over the datasource
//! API, allowing AI assistants to inspect and remove datasources.
//!
//! # Example
//!
//! ```no_run
//! use grafapi::mcp::GrafanaServer;
//!
//! # fn main() -> grafapi::Result<()> {
//! let server = GrafanaServer::from_env()?;
//! // Server can now be used with rmcp transport
//! # Ok(())
//! # }
//! ```

mod params;
mod server;

pub use params::*;
pub use server::GrafanaServer;
