//! Identifier classification subsystem.
//!
//! # Data Flow
//! ```text
//! Raw path segment ("123", "0b9e...-...", "prodazha-uchastka-123")
//!     → slug.rs (strip SEO / legacy slug decoration, if any)
//!     → classify.rs (UUID, positive integer id, or invalid)
//!     → Classification handed to the resolve pipeline
//! ```
//!
//! # Design Decisions
//! - Classification is total: malformed input is a value, not an error
//! - Only the canonical 8-4-4-4-12 UUID text form is accepted
//! - Integer ids are plain ASCII digits; signs, decimals and exponents are rejected

pub mod classify;
pub mod slug;

pub use classify::{classify, Classification, IntId, ListingKey};
pub use slug::{parse_legacy_slug, parse_seo_slug, SEO_SLUG_PREFIX};
