//! Grafana API model types.

mod datasource;

pub use datasource::*;
