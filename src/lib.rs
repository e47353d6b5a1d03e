//! Canonical URL resolution for land-plot listings.
//!
//! Translates integer ids, UUIDs and legacy detail URLs into the single
//! SEO path of a listing, and redirects to it.

pub mod canonical;
pub mod config;
pub mod http;
pub mod identifier;
pub mod lifecycle;
pub mod listing;
pub mod observability;
pub mod resolve;

pub use canonical::{build_canonical_path, CanonicalPath};
pub use config::ResolverConfig;
pub use http::HttpServer;
pub use identifier::{classify, Classification};
pub use lifecycle::Shutdown;
pub use listing::{ListingStore, RoutingAttributes};
pub use resolve::Resolver;
