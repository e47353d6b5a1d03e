//! Identifier resolution subsystem.
//!
//! # Data Flow
//! ```text
//! Raw segment + Scheme
//!     → Scheme::classify (plain id or legacy slug, restricted to accepted kinds)
//!     → ListingLookup::find (bounded store query)
//!     → build_canonical_path
//!     → Resolution::Resolved(path) | Resolution::Fallback(reason)
//! ```
//!
//! # Design Decisions
//! - One pipeline for every entry point; endpoints differ only in Scheme
//!   and in how they map a Resolution to a response
//! - Every failure is a value (FallbackReason), never an error
//! - Failure kinds are logged at different levels so link rot and
//!   infrastructure trouble stay distinguishable

pub mod pipeline;

pub use pipeline::{FallbackReason, PathCheck, Resolution, Resolver, Scheme};
