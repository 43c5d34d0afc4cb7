//! Mock server state management.
//!
//! Provides the in-memory data store for the mock Grafana API server.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::{Datasource, DatasourceType};

/// Organization used when a request carries no (or a zero) org header.
pub const DEFAULT_ORG: u64 = 1;

/// Why a state mutation was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateError {
    NotFound,
    NameTaken,
}

/// Shared state for the mock server.
///
/// This struct holds all the mock data that the server will serve.
/// It's wrapped in `Arc<RwLock<_>>` for concurrent access.
#[derive(Debug)]
pub struct MockState {
    /// Datasources indexed by ID. IDs are unique across organizations.
    pub datasources: BTreeMap<u64, Datasource>,

    /// Installed plugin types, keyed by plugin name.
    pub plugins: HashMap<String, DatasourceType>,

    /// Optional authentication token. If set, requests must carry it as a
    /// bearer token.
    pub required_token: Option<String>,

    next_id: u64,
}

impl Default for MockState {
    fn default() -> Self {
        Self {
            datasources: BTreeMap::new(),
            plugins: HashMap::new(),
            required_token: None,
            next_id: 1,
        }
    }
}

impl MockState {
    /// Create a new empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create state wrapped in Arc<RwLock> for sharing.
    pub fn shared(self) -> Arc<RwLock<Self>> {
        Arc::new(RwLock::new(self))
    }

    /// Add a datasource as-is. A zero ID is replaced by the next free one.
    pub fn with_datasource(mut self, mut ds: Datasource) -> Self {
        if ds.id == 0 {
            ds.id = self.next_id;
        }
        if ds.org_id == 0 {
            ds.org_id = DEFAULT_ORG;
        }
        self.next_id = self.next_id.max(ds.id + 1);
        self.datasources.insert(ds.id, ds);
        self
    }

    /// Add a plugin type.
    pub fn with_plugin(mut self, key: &str, plugin: DatasourceType) -> Self {
        self.plugins.insert(key.to_string(), plugin);
        self
    }

    /// Set the required authentication token.
    pub fn with_required_token(mut self, token: &str) -> Self {
        self.required_token = Some(token.to_string());
        self
    }

    /// List datasources of one organization, ordered by ID.
    pub fn list(&self, org: u64) -> Vec<&Datasource> {
        self.datasources.values().filter(|d| d.org_id == org).collect()
    }

    /// Get a datasource by ID within an organization.
    pub fn get(&self, org: u64, id: u64) -> Option<&Datasource> {
        self.datasources.get(&id).filter(|d| d.org_id == org)
    }

    /// Get a datasource by name within an organization.
    pub fn get_by_name(&self, org: u64, name: &str) -> Option<&Datasource> {
        self.datasources
            .values()
            .find(|d| d.org_id == org && d.name == name)
    }

    /// Insert a new datasource, assigning ID, UID and organization.
    pub fn create(&mut self, org: u64, mut ds: Datasource) -> Result<&Datasource, StateError> {
        if self.get_by_name(org, &ds.name).is_some() {
            return Err(StateError::NameTaken);
        }
        let id = self.next_id;
        self.next_id += 1;

        ds.id = id;
        ds.org_id = org;
        if ds.uid.is_none() {
            ds.uid = Some(format!("mock-{id}"));
        }
        // Secrets are accepted but never echoed back.
        ds.secure_json_data = None;
        ds.version = Some(1);

        Ok(&*self.datasources.entry(id).or_insert(ds))
    }

    /// Replace a datasource, keeping its identity and bumping its version.
    pub fn update(
        &mut self,
        org: u64,
        id: u64,
        mut ds: Datasource,
    ) -> Result<&Datasource, StateError> {
        let current = self.get(org, id).ok_or(StateError::NotFound)?;
        let version = current.version.unwrap_or(0) + 1;
        let uid = current.uid.clone();

        if let Some(other) = self.get_by_name(org, &ds.name) {
            if other.id != id {
                return Err(StateError::NameTaken);
            }
        }

        ds.id = id;
        ds.org_id = org;
        ds.uid = ds.uid.or(uid);
        ds.secure_json_data = None;
        ds.version = Some(version);

        self.datasources.insert(id, ds);
        self.datasources.get(&id).ok_or(StateError::NotFound)
    }

    /// Remove a datasource by ID.
    pub fn delete(&mut self, org: u64, id: u64) -> Option<Datasource> {
        self.get(org, id)?;
        self.datasources.remove(&id)
    }

    /// Remove a datasource by name.
    pub fn delete_by_name(&mut self, org: u64, name: &str) -> Option<Datasource> {
        let id = self.get_by_name(org, name)?.id;
        self.datasources.remove(&id)
    }
}
