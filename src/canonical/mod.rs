//! Canonical path construction subsystem.
//!
//! # Data Flow
//! ```text
//! RoutingAttributes { district, location, int_id, id }
//!     → transliterate.rs (Cyrillic → Latin, slugging)
//!     → path.rs (segment normalization, placeholders, display id)
//!     → CanonicalPath "/<district>/<settlement>/prodazha-uchastka-<id>"
//! ```
//!
//! # Design Decisions
//! - Pure functions only: no I/O, no clock, no configuration
//! - Paths are derived on every request, never stored
//! - Empty or unsluggable fields collapse to fixed placeholder segments

pub mod path;
pub mod transliterate;

pub use path::{
    build_canonical_path, display_id, district_segment, settlement_segment, CanonicalPath,
    DISTRICT_PLACEHOLDER, SETTLEMENT_PLACEHOLDER,
};
pub use transliterate::{slugify, transliterate};
