//! Raw identifier classification.

use std::fmt;
use std::num::NonZeroU64;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Short, human-shareable listing number.
///
/// Always within `1..=i64::MAX`, the range of the store's signed column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IntId(NonZeroU64);

impl IntId {
    /// Largest id the store can hold.
    pub const MAX: u64 = i64::MAX as u64;

    /// Returns `None` for zero and for values the store column cannot hold.
    pub fn new(value: u64) -> Option<Self> {
        if value > Self::MAX {
            return None;
        }
        NonZeroU64::new(value).map(Self)
    }

    /// Accepts the signed column type used by the store; non-positive values map to `None`.
    pub fn from_signed(value: i64) -> Option<Self> {
        u64::try_from(value).ok().and_then(Self::new)
    }

    pub fn get(self) -> u64 {
        self.0.get()
    }
}

impl fmt::Display for IntId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A well-formed key the listing store can be queried with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListingKey {
    Uuid(Uuid),
    IntId(IntId),
}

impl ListingKey {
    /// Label used for metrics and log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            ListingKey::Uuid(_) => "uuid",
            ListingKey::IntId(_) => "int_id",
        }
    }
}

impl fmt::Display for ListingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListingKey::Uuid(id) => write!(f, "{}", id),
            ListingKey::IntId(id) => write!(f, "{}", id),
        }
    }
}

/// Result of inspecting a raw path segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Uuid(Uuid),
    IntId(IntId),
    Invalid,
}

impl Classification {
    /// The store key, or `None` when the input was malformed.
    pub fn key(self) -> Option<ListingKey> {
        match self {
            Classification::Uuid(id) => Some(ListingKey::Uuid(id)),
            Classification::IntId(id) => Some(ListingKey::IntId(id)),
            Classification::Invalid => None,
        }
    }

    pub fn is_invalid(&self) -> bool {
        matches!(self, Classification::Invalid)
    }
}

/// Classify a raw identifier. Never fails.
pub fn classify(raw: &str) -> Classification {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Classification::Invalid;
    }

    if is_hyphenated_uuid(trimmed) {
        return match Uuid::parse_str(trimmed) {
            Ok(id) => Classification::Uuid(id),
            Err(_) => Classification::Invalid,
        };
    }

    if trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return trimmed
            .parse::<u64>()
            .ok()
            .and_then(IntId::new)
            .map(Classification::IntId)
            .unwrap_or(Classification::Invalid);
    }

    Classification::Invalid
}

/// 36 characters, hyphens at 8/13/18/23, hex digits elsewhere.
fn is_hyphenated_uuid(s: &str) -> bool {
    let bytes = s.as_bytes();
    if bytes.len() != 36 {
        return false;
    }
    bytes.iter().enumerate().all(|(i, b)| match i {
        8 | 13 | 18 | 23 => *b == b'-',
        _ => b.is_ascii_hexdigit(),
    })
}
