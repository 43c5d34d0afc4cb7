//! Delete trait for removing entities.

use async_trait::async_trait;

use crate::client::{GrafanaClient, OrgId};
use crate::error::Result;

/// Remove an entity by ID.
#[async_trait]
pub trait Delete {
    /// The ID type for this entity.
    type Id: Send;

    /// Envelope the server answers with.
    type Output;

    /// Delete the entity.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the reply cannot be decoded.
    async fn delete(client: &GrafanaClient, id: Self::Id, org: OrgId) -> Result<Self::Output>;
}
