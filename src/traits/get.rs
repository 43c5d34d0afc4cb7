//! Get trait for fetching single entities.

use async_trait::async_trait;

use crate::client::{GrafanaClient, OrgId};
use crate::error::Result;

/// Fetch a single entity by ID.
///
/// # Example
///
/// ```ignore
/// use grafapi::{Datasource, Get, GrafanaClient, OrgId};
///
/// let client = GrafanaClient::from_env()?;
/// let ds = Datasource::get(&client, 1, OrgId::CURRENT).await?;
/// ```
#[async_trait]
pub trait Get: Sized {
    /// The ID type for this entity.
    type Id: Send;

    /// Fetch the entity by ID.
    ///
    /// # Arguments
    ///
    /// * `client` - The Grafana API client
    /// * `id` - The entity identifier
    /// * `org` - Organization scope
    ///
    /// # Errors
    ///
    /// Returns an error if the server does not answer 200 OK or the
    /// request fails.
    async fn get(client: &GrafanaClient, id: Self::Id, org: OrgId) -> Result<Self>;
}
