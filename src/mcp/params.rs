//! MCP tool parameter types with JSON Schema support.

use schemars::JsonSchema;
use serde::Deserialize;

use crate::client::OrgId;
use crate::error::{GrafanaError, Result};

/// Parameters for the `get` and `delete` MCP tools.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct TargetParams {
    /// Numeric datasource ID. Give either this or `name`.
    #[serde(default)]
    pub id: Option<u64>,
    /// Datasource name. Give either this or `id`.
    #[serde(default)]
    pub name: Option<String>,
    /// Organization ID (omit or 0 for the current organization).
    #[serde(default)]
    pub org: Option<u64>,
}

/// Parameters for the `list` and `types` MCP tools.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct OrgParams {
    /// Organization ID (omit or 0 for the current organization).
    #[serde(default)]
    pub org: Option<u64>,
}

/// A datasource selected by exactly one of ID or name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    Id(u64),
    Name(String),
}

impl TargetParams {
    /// Resolve to a selector, rejecting zero or two identifiers.
    ///
    /// # Errors
    ///
    /// Returns [`GrafanaError::InvalidArgument`] unless exactly one of `id`
    /// and `name` is set.
    pub fn selector(&self) -> Result<Selector> {
        match (self.id, &self.name) {
            (Some(id), None) => Ok(Selector::Id(id)),
            (None, Some(name)) => Ok(Selector::Name(name.clone())),
            (Some(_), Some(_)) => Err(GrafanaError::InvalidArgument(
                "give either id or name, not both".to_string(),
            )),
            (None, None) => Err(GrafanaError::InvalidArgument(
                "one of id or name is required".to_string(),
            )),
        }
    }

    pub fn org(&self) -> OrgId {
        OrgId(self.org.unwrap_or_default())
    }
}

impl OrgParams {
    pub fn org(&self) -> OrgId {
        OrgId(self.org.unwrap_or_default())
    }
}
