//! Mock PSA API server for E2E testing.
//!
//! This module provides an in-memory mock server that simulates the PSA API
//! for integration and end-to-end testing. Unlike wiremock which mocks at the
//! HTTP level per-test, this server maintains state across requests, enabling
//! realistic workflow testing (create, then get, then update).
//!
//! # Example
//!
//! ```ignore
//! use psaclient::mock_server::MockServer;
//! use psaclient::entities::Tickets;
//! use psaclient::{PsaClient, Record, Create, Get};
//!
//! #[tokio::test]
//! async fn test_workflow() {
//!     let server = MockServer::start_empty().await;
//!     let client = PsaClient::new("test-token", server.url()).unwrap();
//!
//!     let created = Tickets::create(&client, &Record::new().field("title", "X"))
//!         .await
//!         .unwrap();
//!     let fetched = Tickets::get(&client, created.id.unwrap()).await.unwrap();
//!     assert_eq!(fetched, created);
//!
//!     server.shutdown().await;
//! }
//! ```

mod fixtures;
mod handlers;
mod server;
mod state;

pub use fixtures::Fixtures;
pub use server::MockServer;
pub use state::MockState;
