//! PSA API client library.
//!
//! A Rust library for interacting with PSA/ticketing REST APIs of the
//! item/items-envelope style, using a trait-based architecture where each
//! operation (Create, Get, Update, Patch, Delete, List) is defined as a
//! trait that entity types implement.
//!
//! # Quick Start
//!
//! ```no_run
//! use psaclient::entities::{Tickets, TimeEntries};
//! use psaclient::{Create, Get, List, PsaClient, Query, Record};
//!
//! #[tokio::main]
//! async fn main() -> psaclient::Result<()> {
//!     // Create client from environment variables
//!     let client = PsaClient::from_env()?;
//!
//!     // Create a ticket
//!     let ticket = Tickets::create(
//!         &client,
//!         &Record::new().field("title", "Printer on fire").field("priority", 1),
//!     )
//!     .await?;
//!
//!     // Fetch it back
//!     let fetched = Tickets::get(&client, ticket.id.expect("assigned by server")).await?;
//!     println!("Ticket: {:?}", fetched.get_str("title"));
//!
//!     // List time entries for a resource
//!     let entries = TimeEntries::list(
//!         &client,
//!         &Query::new().filter_eq("resourceID", 29683456).page_size(50),
//!     )
//!     .await?;
//!     println!("Found {} time entries", entries.len());
//!
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! The library is organized around capability traits:
//!
//! - [`Create`] - POST a new record to a collection endpoint
//! - [`Get`] - Fetch a single record by numeric ID
//! - [`Update`] - Replace a record (PUT)
//! - [`Patch`] - Partially update a record
//! - [`Delete`] - Remove a record
//! - [`List`] - Query a collection with filter/sort/paging
//!
//! Entity types (like [`entities::Tickets`]) are marker structs that opt
//! into the capabilities their API surface declares; the trait default
//! bodies do all the request shaping. Records are open key/value maps
//! ([`Record`]); no per-resource schema is enforced.
//!
//! All requests funnel through [`PsaClient`], which centralizes
//! authentication, structured logging, response checking, and retry with
//! exponential backoff ([`RetryConfig`]). Only idempotent operations are
//! retried automatically; transient failures (transport errors, 5xx, 429)
//! are the only ones retried.
//!
//! # Configuration
//!
//! The client reads configuration from environment variables:
//!
//! - `PSA_API_KEY` (required) - Your PSA API key
//! - `PSA_API_URL` (optional) - Base URL of the API

mod client;
mod envelope;
mod error;
mod query;
mod record;
mod retry;
mod traits;

pub mod entities;

#[cfg(feature = "test-server")]
pub mod mock_server;

// Re-export core types
pub use client::{LoggingConfig, PsaClient};
pub use envelope::Envelope;
pub use error::{PsaError, Result};
pub use query::{Filter, FilterOp, Predicate, Query, QueryBody};
pub use record::Record;
pub use retry::RetryConfig;

// Re-export traits
pub use traits::{Create, Delete, Entity, Get, List, Patch, Update};
