//! The read-only listing store contract.

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::identifier::{IntId, ListingKey};
use crate::listing::model::RoutingAttributes;

/// Errors raised by a store backend. All of them are infrastructure
/// failures; an absent listing is an empty row set, never an error.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The request never produced a response (connect, TLS, reset).
    #[error("store transport error: {0}")]
    Transport(String),

    /// The backend answered with a non-success status.
    #[error("store returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body was not the expected row set.
    #[error("store response could not be decoded: {0}")]
    Decode(String),

    /// The backend is not usable with the given settings.
    #[error("store misconfigured: {0}")]
    Config(String),
}

/// Query capability over listing routing attributes.
///
/// Implementations return every row matching the key (at most a handful);
/// uniqueness is the store's invariant and violations are surfaced as
/// extra rows, not errors.
#[async_trait]
pub trait ListingStore: Send + Sync + 'static {
    /// Rows whose primary key equals `id`.
    async fn select_by_id(&self, id: Uuid) -> Result<Vec<RoutingAttributes>, StoreError>;

    /// Rows whose integer id equals `int_id`.
    async fn select_by_int_id(&self, int_id: IntId) -> Result<Vec<RoutingAttributes>, StoreError>;

    /// Cheap connectivity probe for health checks.
    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }

    /// Backend name for logs and health output.
    fn backend(&self) -> &'static str;

    /// Dispatch on the key kind.
    async fn select(&self, key: &ListingKey) -> Result<Vec<RoutingAttributes>, StoreError> {
        match key {
            ListingKey::Uuid(id) => self.select_by_id(*id).await,
            ListingKey::IntId(int_id) => self.select_by_int_id(*int_id).await,
        }
    }
}
