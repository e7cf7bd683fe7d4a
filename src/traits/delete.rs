//! Delete trait for removing entities.

use async_trait::async_trait;

use crate::client::PsaClient;
use crate::error::Result;
use crate::traits::Entity;

/// Delete an existing entity.
#[async_trait]
pub trait Delete: Entity {
    /// DELETE `{endpoint}/{id}`. Returns nothing on success.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity does not exist or the request fails
    /// after exhausting retries.
    async fn delete(client: &PsaClient, id: i64) -> Result<()> {
        let path = format!("{}/{}", Self::ENDPOINT, id);
        client.delete(&path).await?;
        Ok(())
    }
}
