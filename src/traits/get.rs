//! Get trait for fetching single entities.

use async_trait::async_trait;

use crate::client::PsaClient;
use crate::envelope::Envelope;
use crate::error::Result;
use crate::record::Record;
use crate::traits::Entity;

/// Fetch a single entity by ID.
///
/// # Example
///
/// ```ignore
/// use psaclient::{PsaClient, Get, entities::Tickets};
///
/// let client = PsaClient::from_env()?;
/// let ticket = Tickets::get(&client, 1).await?;
/// ```
#[async_trait]
pub trait Get: Entity {
    /// Fetch the entity with the given ID.
    ///
    /// Issues GET `{endpoint}/{id}` and unwraps the `item` envelope.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity does not exist or the request fails
    /// after exhausting retries.
    async fn get(client: &PsaClient, id: i64) -> Result<Record> {
        let path = format!("{}/{}", Self::ENDPOINT, id);
        let response = client.get(&path).await?;
        Envelope::from_response(response).await?.into_item()
    }
}
