//! List trait for querying collections of entities.

use async_trait::async_trait;

use crate::client::PsaClient;
use crate::envelope::Envelope;
use crate::error::Result;
use crate::query::Query;
use crate::record::Record;
use crate::traits::Entity;

/// List entities matching a query.
///
/// Every entity lists through POST `{endpoint}/query` with a JSON body of
/// `{filter, sort, page, pageSize}`. The filter is normalized by
/// [`Query::predicates`]; when the caller supplies none, the permissive
/// `id >= 0` predicate is sent because the remote API rejects unfiltered
/// queries.
///
/// # Example
///
/// ```ignore
/// use psaclient::{PsaClient, Query, List, entities::TimeEntries};
///
/// let client = PsaClient::from_env()?;
/// let entries = TimeEntries::list(
///     &client,
///     &Query::new().filter_eq("resourceID", 29683456).page_size(50),
/// ).await?;
/// ```
#[async_trait]
pub trait List: Entity {
    /// Fetch the entities matching `query` (single page).
    ///
    /// The query POST is a pure read, so it is retried like a GET.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails after exhausting retries or
    /// the response lacks the `items` envelope.
    async fn list(client: &PsaClient, query: &Query) -> Result<Vec<Record>> {
        let path = format!("{}/query", Self::ENDPOINT);
        let body = query.to_body();
        let response = client.post_query(&path, &body).await?;
        Envelope::from_response(response).await?.into_items()
    }
}
