//! Update trait for modifying entities.

use async_trait::async_trait;

use crate::client::{GrafanaClient, OrgId};
use crate::error::Result;

/// Replace an existing entity with the given value.
///
/// The entity carries its own identifier.
///
/// # Example
///
/// ```ignore
/// use grafapi::{Datasource, Get, GrafanaClient, OrgId, Update};
///
/// let client = GrafanaClient::from_env()?;
/// let mut ds = Datasource::get(&client, 1, OrgId::CURRENT).await?;
/// ds.url = "http://prometheus:9091".to_string();
/// let status = Datasource::update(&client, &ds, OrgId::CURRENT).await?;
/// ```
#[async_trait]
pub trait Update: Sized + Sync {
    /// Envelope the server answers with.
    type Output;

    /// Send the updated entity.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding, the request, or decoding fails.
    async fn update(client: &GrafanaClient, item: &Self, org: OrgId) -> Result<Self::Output>;
}
