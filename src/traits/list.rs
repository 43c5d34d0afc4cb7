//! List trait for fetching collections of entities.

use async_trait::async_trait;

use crate::client::{GrafanaClient, OrgId};
use crate::error::Result;

/// List every entity of a kind visible in an organization.
///
/// The API returns the whole collection in one response; there is no
/// pagination.
#[async_trait]
pub trait List: Sized + Send {
    /// List all entities.
    ///
    /// # Errors
    ///
    /// Returns an error if the server does not answer 200 OK or the
    /// request fails.
    async fn list(client: &GrafanaClient, org: OrgId) -> Result<Vec<Self>>;
}
