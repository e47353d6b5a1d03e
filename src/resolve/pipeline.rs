//! The Classify → Lookup → Build pipeline.

use crate::canonical::{build_canonical_path, CanonicalPath};
use crate::identifier::{classify, parse_legacy_slug, parse_seo_slug, Classification, ListingKey};
use crate::listing::{ListingLookup, LookupOutcome, RoutingAttributes};
use crate::observability::metrics;

/// Which identifiers an entry point accepts, and how it reads them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheme {
    /// Positive integer ids only.
    IntId,
    /// Hyphenated UUIDs only.
    Uuid,
    /// Either kind.
    Any,
    /// Either kind, taken from the tail of an old `words-<id>` slug.
    LegacySlug,
}

impl Scheme {
    /// Classify `raw`, rejecting kinds this scheme does not accept.
    pub fn classify(self, raw: &str) -> Classification {
        let classification = match self {
            Scheme::LegacySlug => parse_legacy_slug(raw),
            _ => classify(raw),
        };

        match (self, classification) {
            (Scheme::IntId, Classification::Uuid(_)) | (Scheme::Uuid, Classification::IntId(_)) => {
                Classification::Invalid
            }
            (_, other) => other,
        }
    }
}

/// Why a request could not be resolved to a canonical path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackReason {
    /// The identifier failed classification; lookup was never attempted.
    Malformed,
    /// Well-formed identifier, no listing.
    NotFound,
    /// The store timed out or failed.
    LookupFailed,
}

impl FallbackReason {
    pub fn as_str(self) -> &'static str {
        match self {
            FallbackReason::Malformed => "malformed",
            FallbackReason::NotFound => "not_found",
            FallbackReason::LookupFailed => "lookup_failed",
        }
    }
}

/// Terminal state of one resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Resolved {
        path: CanonicalPath,
        attributes: RoutingAttributes,
    },
    Fallback(FallbackReason),
}

/// Whether a requested SEO path is already the canonical one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathCheck {
    Canonical(CanonicalPath),
    /// The listing now lives elsewhere.
    Moved(CanonicalPath),
    Unresolved(FallbackReason),
}

/// Stateless resolver shared by all entry points.
#[derive(Debug, Clone)]
pub struct Resolver {
    lookup: ListingLookup,
}

impl Resolver {
    pub fn new(lookup: ListingLookup) -> Self {
        Self { lookup }
    }

    pub fn lookup(&self) -> &ListingLookup {
        &self.lookup
    }

    /// Resolve a raw identifier under `scheme`.
    pub async fn resolve(&self, raw: &str, scheme: Scheme) -> Resolution {
        match scheme.classify(raw).key() {
            Some(key) => self.resolve_key(&key).await,
            None => {
                tracing::debug!(raw = %raw, ?scheme, "Malformed identifier");
                Resolution::Fallback(FallbackReason::Malformed)
            }
        }
    }

    /// Look up an already classified key and build its canonical path.
    pub async fn resolve_key(&self, key: &ListingKey) -> Resolution {
        match self.lookup.find(key).await {
            Ok(LookupOutcome::Found { attributes, row_count }) => {
                if row_count > 1 {
                    metrics::record_integrity_anomaly();
                    tracing::warn!(
                        key = %key,
                        key_kind = key.kind(),
                        rows = row_count,
                        chosen = %attributes.id,
                        "Multiple listings share a unique identifier; using the first"
                    );
                }
                let path = build_canonical_path(&attributes);
                tracing::debug!(key = %key, path = %path, "Resolved canonical path");
                Resolution::Resolved { path, attributes }
            }
            Ok(LookupOutcome::NotFound) => {
                tracing::info!(key = %key, key_kind = key.kind(), "No listing for identifier");
                Resolution::Fallback(FallbackReason::NotFound)
            }
            Err(e) => {
                tracing::error!(
                    key = %key,
                    failure = e.kind(),
                    error = %e,
                    "Listing lookup failed"
                );
                Resolution::Fallback(FallbackReason::LookupFailed)
            }
        }
    }

    /// Compare a requested `/<district>/<settlement>/prodazha-uchastka-<id>`
    /// path against the listing's current canonical path.
    pub async fn check_path(&self, requested: &str) -> PathCheck {
        let requested = normalize_path(requested);
        let slug = requested.rsplit('/').next().unwrap_or_default();

        let key = match parse_seo_slug(slug).key() {
            Some(key) => key,
            None => {
                tracing::debug!(path = %requested, "Path does not end in a listing slug");
                return PathCheck::Unresolved(FallbackReason::Malformed);
            }
        };

        match self.resolve_key(&key).await {
            Resolution::Resolved { path, .. } if path.as_str() == requested => PathCheck::Canonical(path),
            Resolution::Resolved { path, .. } => PathCheck::Moved(path),
            Resolution::Fallback(reason) => PathCheck::Unresolved(reason),
        }
    }
}

/// Leading slash, no trailing slash, no query or fragment.
fn normalize_path(raw: &str) -> String {
    let raw = raw.trim();
    let raw = raw.split(['?', '#']).next().unwrap_or_default();
    let trimmed = raw.trim_matches('/');
    format!("/{}", trimmed)
}
