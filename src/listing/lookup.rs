//! Timeout-bounded listing lookup.

use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use thiserror::Error;
use tokio::time::timeout;

use crate::identifier::ListingKey;
use crate::listing::model::RoutingAttributes;
use crate::listing::store::{ListingStore, StoreError};
use crate::observability::metrics;

/// A lookup that reached the store and got an answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    /// The first matching row, plus how many rows matched in total.
    Found {
        attributes: RoutingAttributes,
        row_count: usize,
    },
    NotFound,
}

impl LookupOutcome {
    /// More than one row matched a key that should be unique.
    pub fn is_ambiguous(&self) -> bool {
        matches!(self, LookupOutcome::Found { row_count, .. } if *row_count > 1)
    }
}

/// The store could not answer. Distinct from `LookupOutcome::NotFound`.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("listing lookup timed out after {0:?}")]
    Timeout(Duration),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl LookupError {
    /// Label used for metrics and log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            LookupError::Timeout(_) => "timeout",
            LookupError::Store(_) => "store",
        }
    }
}

/// Queries the store for the routing attributes behind a key.
#[derive(Clone)]
pub struct ListingLookup {
    store: Arc<dyn ListingStore>,
    timeout: Duration,
}

impl ListingLookup {
    pub fn new(store: Arc<dyn ListingStore>, timeout: Duration) -> Self {
        Self { store, timeout }
    }

    pub fn store(&self) -> &Arc<dyn ListingStore> {
        &self.store
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Run one store query, bounded by the configured timeout. Never retries.
    pub async fn find(&self, key: &ListingKey) -> Result<LookupOutcome, LookupError> {
        let start = Instant::now();
        let result = timeout(self.timeout, self.store.select(key)).await;
        metrics::record_lookup(key.kind(), start);

        let rows = match result {
            Ok(Ok(rows)) => rows,
            Ok(Err(e)) => {
                let err = LookupError::Store(e);
                metrics::record_lookup_failure(err.kind());
                return Err(err);
            }
            Err(_) => {
                metrics::record_lookup_failure("timeout");
                return Err(LookupError::Timeout(self.timeout));
            }
        };

        let row_count = rows.len();
        Ok(match rows.into_iter().next() {
            Some(attributes) => LookupOutcome::Found { attributes, row_count },
            None => LookupOutcome::NotFound,
        })
    }
}

impl fmt::Debug for ListingLookup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListingLookup")
            .field("backend", &self.store.backend())
            .field("timeout", &self.timeout)
            .finish()
    }
}
