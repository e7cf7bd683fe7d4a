//! Create trait for adding new entities.

use async_trait::async_trait;

use crate::client::PsaClient;
use crate::envelope::Envelope;
use crate::error::Result;
use crate::record::Record;
use crate::traits::Entity;

/// Create a new entity.
///
/// # Example
///
/// ```ignore
/// use psaclient::{PsaClient, Record, Create, entities::Tickets};
///
/// let client = PsaClient::from_env()?;
/// let created = Tickets::create(
///     &client,
///     &Record::new().field("title", "Printer on fire"),
/// ).await?;
/// assert!(created.id.is_some());
/// ```
#[async_trait]
pub trait Create: Entity {
    /// POST the record to the collection endpoint and return the created
    /// record (with its server-assigned id).
    ///
    /// Creates are never retried automatically: a timed-out attempt may
    /// have succeeded on the server.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or is rejected.
    async fn create(client: &PsaClient, record: &Record) -> Result<Record> {
        let response = client.post(Self::ENDPOINT, record).await?;
        Envelope::from_response(response).await?.into_item()
    }
}
