//! Datasource model and trait implementations.

use std::collections::HashMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::client::{GrafanaClient, OrgId};
use crate::error::{GrafanaError, Result};
use crate::traits::{Create, Delete, Get, List, Update};

const DATASOURCES_PATH: &str = "api/datasources";
const PLUGINS_PATH: &str = "api/datasources/plugins";

/// A configured datasource.
///
/// Identified by a numeric `id` and a `name`, both unique within the owning
/// organization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Datasource {
    /// Numeric ID (assigned by the server on create).
    #[serde(default)]
    pub id: u64,

    /// Stable string identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,

    /// Owning organization.
    #[serde(default)]
    pub org_id: u64,

    /// Display name.
    #[serde(default)]
    pub name: String,

    /// Plugin type (e.g., "prometheus", "loki").
    #[serde(rename = "type", default)]
    pub ds_type: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_logo_url: Option<String>,

    /// Access mode: "proxy" (server side) or "direct" (browser).
    #[serde(default)]
    pub access: String,

    /// Upstream URL.
    #[serde(default)]
    pub url: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub basic_auth: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub basic_auth_user: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub basic_auth_password: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub with_credentials: Option<bool>,

    /// Whether this is the organization's default datasource.
    #[serde(default)]
    pub is_default: bool,

    /// Plugin-specific settings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub json_data: Option<serde_json::Value>,

    /// Plugin-specific secrets. Write-only on the server side.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secure_json_data: Option<serde_json::Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read_only: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<u64>,
}

/// Descriptor of an installed datasource plugin.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasourceType {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Plugin type key, as used in [`Datasource::ds_type`].
    #[serde(rename = "type", default)]
    pub ds_type: String,

    /// Human readable plugin name.
    #[serde(default)]
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plugin_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module: Option<String>,

    /// Whether the plugin serves metrics queries.
    #[serde(default)]
    pub metrics: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_name: Option<String>,

    /// Frontend partials.
    #[serde(rename = "datasource", default, skip_serializing_if = "Option::is_none")]
    pub partials: Option<DatasourcePartials>,
}

/// Frontend partials for a datasource plugin.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DatasourcePartials {
    #[serde(default)]
    pub query: String,
}

/// Result envelope returned by mutating calls.
///
/// Every field is optional; the server fills in what applies to the call
/// (and only `message` on most failures).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusMessage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub org_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl Datasource {
    /// Build a proxy-mode datasource ready to be created.
    pub fn new(name: impl Into<String>, ds_type: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ds_type: ds_type.into(),
            url: url.into(),
            access: "proxy".to_string(),
            ..Default::default()
        }
    }

    /// Get a datasource by name.
    ///
    /// # Errors
    ///
    /// Returns [`GrafanaError::InvalidArgument`] for `""`, `"."` and `".."`,
    /// which cannot be sent as a path segment, and
    /// [`GrafanaError::Status`] unless the server answers 200 OK.
    #[tracing::instrument(skip(client))]
    pub async fn get_by_name(client: &GrafanaClient, name: &str, org: OrgId) -> Result<Self> {
        let raw = client.get(&name_path(name)?, org).await?.require_ok()?;
        raw.json()
    }

    /// Delete a datasource by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the name cannot be sent as a path segment (see
    /// [`Datasource::get_by_name`]), the request fails, or the reply is not
    /// JSON.
    #[tracing::instrument(skip(client))]
    pub async fn delete_by_name(
        client: &GrafanaClient,
        name: &str,
        org: OrgId,
    ) -> Result<StatusMessage> {
        client.delete(&name_path(name)?, org).await?.json()
    }
}

impl DatasourceType {
    /// Get every installed datasource plugin, keyed by plugin name.
    ///
    /// # Errors
    ///
    /// Returns [`GrafanaError::Status`](crate::GrafanaError::Status) unless
    /// the server answers 200 OK.
    #[tracing::instrument(skip(client))]
    pub async fn list_all(
        client: &GrafanaClient,
        org: OrgId,
    ) -> Result<HashMap<String, DatasourceType>> {
        let raw = client.get(PLUGINS_PATH, org).await?.require_ok()?;
        let types: Option<HashMap<String, DatasourceType>> = raw.json()?;
        Ok(types.unwrap_or_default())
    }
}

fn id_path(id: u64) -> String {
    format!("{DATASOURCES_PATH}/{id}")
}

/// Path for a name lookup, with the name kept as one path segment.
///
/// URL resolution treats `.` and `..` (encoded or not) as dot segments, so
/// those names, and the empty name, cannot be addressed.
fn name_path(name: &str) -> Result<String> {
    if matches!(name, "" | "." | "..") {
        return Err(GrafanaError::InvalidArgument(format!(
            "datasource name {name:?} cannot be used in a request path"
        )));
    }
    Ok(format!("{DATASOURCES_PATH}/name/{}", urlencoding::encode(name)))
}

#[async_trait]
impl List for Datasource {
    #[tracing::instrument(skip(client))]
    async fn list(client: &GrafanaClient, org: OrgId) -> Result<Vec<Self>> {
        let raw = client.get(DATASOURCES_PATH, org).await?.require_ok()?;
        let items: Option<Vec<Datasource>> = raw.json()?;
        Ok(items.unwrap_or_default())
    }
}

#[async_trait]
impl Get for Datasource {
    type Id = u64;

    #[tracing::instrument(skip(client))]
    async fn get(client: &GrafanaClient, id: u64, org: OrgId) -> Result<Self> {
        let raw = client.get(&id_path(id), org).await?.require_ok()?;
        raw.json()
    }
}

#[async_trait]
impl Create for Datasource {
    type Output = StatusMessage;

    #[tracing::instrument(skip(client, item), fields(name = %item.name))]
    async fn create(client: &GrafanaClient, item: &Self, org: OrgId) -> Result<StatusMessage> {
        client.post(DATASOURCES_PATH, item, org).await?.json()
    }
}

#[async_trait]
impl Update for Datasource {
    type Output = StatusMessage;

    #[tracing::instrument(skip(client, item), fields(id = item.id))]
    async fn update(client: &GrafanaClient, item: &Self, org: OrgId) -> Result<StatusMessage> {
        client.put(&id_path(item.id), item, org).await?.json()
    }
}

#[async_trait]
impl Delete for Datasource {
    type Id = u64;
    type Output = StatusMessage;

    #[tracing::instrument(skip(client))]
    async fn delete(client: &GrafanaClient, id: u64, org: OrgId) -> Result<StatusMessage> {
        client.delete(&id_path(id), org).await?.json()
    }
}
