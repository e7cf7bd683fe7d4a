//! Update trait for replacing entities.

use async_trait::async_trait;

use crate::client::PsaClient;
use crate::envelope::Envelope;
use crate::error::Result;
use crate::record::Record;
use crate::traits::Entity;

/// Replace an existing entity (full update).
///
/// For partial updates see [`Patch`](crate::Patch).
#[async_trait]
pub trait Update: Entity {
    /// PUT the record to `{endpoint}/{id}` and return the stored version.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity does not exist or the request fails
    /// after exhausting retries.
    async fn update(client: &PsaClient, id: i64, record: &Record) -> Result<Record> {
        let path = format!("{}/{}", Self::ENDPOINT, id);
        let response = client.put(&path, record).await?;
        Envelope::from_response(response).await?.into_item()
    }
}
