//! Create trait for adding new entities.

use async_trait::async_trait;

use crate::client::{GrafanaClient, OrgId};
use crate::error::Result;

/// Create a new entity on the server.
///
/// # Example
///
/// ```ignore
/// use grafapi::{Create, Datasource, GrafanaClient, OrgId};
///
/// let client = GrafanaClient::from_env()?;
/// let ds = Datasource::new("metrics", "prometheus", "http://prometheus:9090");
/// let status = Datasource::create(&client, &ds, OrgId::CURRENT).await?;
/// println!("{:?}", status.message);
/// ```
#[async_trait]
pub trait Create: Sized + Sync {
    /// Envelope the server answers with.
    type Output;

    /// Send the entity to the server.
    ///
    /// The status code is not inspected: whatever body comes back is decoded
    /// as [`Self::Output`].
    ///
    /// # Errors
    ///
    /// Returns an error if encoding, the request, or decoding fails.
    async fn create(client: &GrafanaClient, item: &Self, org: OrgId) -> Result<Self::Output>;
}
