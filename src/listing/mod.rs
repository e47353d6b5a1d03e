//! Listing store access subsystem.
//!
//! # Data Flow
//! ```text
//! ListingKey (uuid | int id)
//!     → lookup.rs (timeout-bounded query, first-row selection)
//!     → store.rs (ListingStore trait)
//!         → postgrest.rs (hosted backend over HTTP)
//!         → memory.rs (local runs and tests)
//!     → LookupOutcome::Found | NotFound, or LookupError
//! ```
//!
//! # Design Decisions
//! - Read-only: the resolver never writes listings
//! - No caching: every lookup reaches the store, so edits are visible immediately
//! - Extra rows for a unique key are reported to the caller, not raised
//! - Store failures and timeouts stay distinct from "not found"

pub mod lookup;
pub mod memory;
pub mod model;
pub mod postgrest;
pub mod store;

pub use lookup::{ListingLookup, LookupError, LookupOutcome};
pub use memory::MemoryStore;
pub use model::RoutingAttributes;
pub use postgrest::PostgrestStore;
pub use store::{ListingStore, StoreError};

use std::sync::Arc;

use crate::config::{StoreBackend, StoreConfig};

/// Open the store selected by configuration.
pub fn open_store(config: &StoreConfig) -> Result<Arc<dyn ListingStore>, StoreError> {
    match config.backend {
        StoreBackend::Postgrest => {
            let store = PostgrestStore::new(config)?;
            tracing::debug!(endpoint = %store.endpoint(), "Using PostgREST listing store");
            Ok(Arc::new(store))
        }
        StoreBackend::Memory => {
            let store = match &config.seed_path {
                Some(path) => MemoryStore::load_from_file(path).map_err(|e| {
                    StoreError::Config(format!("cannot seed from {}: {}", path.display(), e))
                })?,
                None => MemoryStore::new(),
            };
            Ok(Arc::new(store))
        }
    }
}
