//! Test data fixtures for the mock server.
//!
//! Provides factory functions for creating realistic test data.

use crate::{Datasource, DatasourcePartials, DatasourceType};

use super::state::{MockState, DEFAULT_ORG};

/// Collection of fixture factories for test data.
pub struct Fixtures;

impl Fixtures {
    /// Create a proxy datasource with the given identity.
    pub fn datasource(id: u64, name: &str, ds_type: &str, url: &str) -> Datasource {
        Datasource {
            id,
            uid: Some(format!("{ds_type}-{id}")),
            org_id: DEFAULT_ORG,
            version: Some(1),
            ..Datasource::new(name, ds_type, url)
        }
    }

    /// The default Prometheus datasource.
    pub fn prometheus() -> Datasource {
        let mut ds = Self::datasource(1, "Prometheus", "prometheus", "http://prometheus:9090");
        ds.is_default = true;
        ds.json_data = Some(serde_json::json!({ "httpMethod": "POST" }));
        ds
    }

    /// A Loki datasource behind basic auth.
    pub fn loki() -> Datasource {
        let mut ds = Self::datasource(2, "Loki", "loki", "http://loki:3100");
        ds.basic_auth = Some(true);
        ds.basic_auth_user = Some("grafana".to_string());
        ds
    }

    /// A PostgreSQL datasource.
    pub fn postgres() -> Datasource {
        let mut ds = Self::datasource(3, "Postgres", "grafana-postgresql-datasource", "db:5432");
        ds.database = Some("metrics".to_string());
        ds.user = Some("reader".to_string());
        ds
    }

    /// Create a plugin type descriptor.
    pub fn plugin(ds_type: &str, name: &str, metrics: bool) -> DatasourceType {
        DatasourceType {
            id: Some(ds_type.to_string()),
            ds_type: ds_type.to_string(),
            name: name.to_string(),
            plugin_type: Some("datasource".to_string()),
            module: Some(format!("core:plugin/{ds_type}")),
            metrics,
            service_name: None,
            partials: Some(DatasourcePartials {
                query: "partials/query.editor.html".to_string(),
            }),
        }
    }

    /// State with three datasources in the default organization and the
    /// matching plugins installed.
    pub fn default_state() -> MockState {
        MockState::new()
            .with_datasource(Self::prometheus())
            .with_datasource(Self::loki())
            .with_datasource(Self::postgres())
            .with_plugin("prometheus", Self::plugin("prometheus", "Prometheus", true))
            .with_plugin("loki", Self::plugin("loki", "Loki", false))
            .with_plugin(
                "grafana-postgresql-datasource",
                Self::plugin("grafana-postgresql-datasource", "PostgreSQL", true),
            )
    }
}
