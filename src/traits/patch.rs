//! Patch trait for partial updates.

use async_trait::async_trait;

use crate::client::PsaClient;
use crate::envelope::Envelope;
use crate::error::Result;
use crate::record::Record;
use crate::traits::Entity;

/// Partially update an existing entity.
///
/// Only the fields present in the supplied record are changed.
#[async_trait]
pub trait Patch: Entity {
    /// PATCH the partial record to `{endpoint}/{id}` and return the stored
    /// version.
    ///
    /// Patches are never retried automatically.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity does not exist or the request fails.
    async fn patch(client: &PsaClient, id: i64, record: &Record) -> Result<Record> {
        let path = format!("{}/{}", Self::ENDPOINT, id);
        let response = client.patch(&path, record).await?;
        Envelope::from_response(response).await?.into_item()
    }
}
