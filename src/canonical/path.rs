//! Canonical listing path builder.

use std::fmt;

use serde::Serialize;
use url::Url;

use crate::canonical::transliterate::slugify;
use crate::identifier::SEO_SLUG_PREFIX;
use crate::listing::RoutingAttributes;

/// Segment used when a listing has no usable district.
pub const DISTRICT_PLACEHOLDER: &str = "kaliningradskaya-oblast";

/// Segment used when a listing has no usable settlement.
pub const SETTLEMENT_PLACEHOLDER: &str = "bez-naselennogo-punkta";

// Longest phrases first so "городской округ" is not reduced to "городской".
const DISTRICT_SUFFIXES: &[&str] = &[
    "городской округ",
    "муниципальный округ",
    "район",
    "р-н",
    "округ",
];

const SETTLEMENT_PREFIXES: &[&str] = &[
    "посёлок ",
    "поселок ",
    "деревня ",
    "город ",
    "село ",
    "пгт.",
    "пгт ",
    "пос.",
    "п.",
    "г.",
    "с.",
    "д.",
];

/// The single SEO-preferred relative URL of a listing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct CanonicalPath(String);

impl CanonicalPath {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// Absolute URL under `base`, or the bare path when no base is configured.
    pub fn to_location(&self, base: Option<&Url>) -> String {
        match base.and_then(|b| b.join(&self.0).ok()) {
            Some(url) => url.to_string(),
            None => self.0.clone(),
        }
    }
}

impl fmt::Display for CanonicalPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CanonicalPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Build `/<district>/<settlement>/prodazha-uchastka-<display id>`.
pub fn build_canonical_path(attrs: &RoutingAttributes) -> CanonicalPath {
    CanonicalPath(format!(
        "/{}/{}/{}{}",
        district_segment(attrs.district.as_deref()),
        settlement_segment(attrs.location.as_deref()),
        SEO_SLUG_PREFIX,
        display_id(attrs),
    ))
}

/// The integer id when assigned, else the hyphenated lowercase UUID.
pub fn display_id(attrs: &RoutingAttributes) -> String {
    match attrs.int_id {
        Some(int_id) => int_id.to_string(),
        None => attrs.id.hyphenated().to_string(),
    }
}

pub fn district_segment(district: Option<&str>) -> String {
    let name = district.map(str::trim).unwrap_or_default().to_lowercase();
    let name = strip_district_suffix(&name);
    non_empty_or(slugify(name), DISTRICT_PLACEHOLDER)
}

pub fn settlement_segment(location: Option<&str>) -> String {
    let name = location.map(str::trim).unwrap_or_default().to_lowercase();
    let name = strip_settlement_prefix(&name);
    non_empty_or(slugify(name), SETTLEMENT_PLACEHOLDER)
}

fn strip_district_suffix(name: &str) -> &str {
    for suffix in DISTRICT_SUFFIXES {
        // Only a whole trailing word, and never the entire name
        if let Some(rest) = name.strip_suffix(suffix) {
            if rest.ends_with(char::is_whitespace) {
                let rest = rest.trim_end();
                if !rest.is_empty() {
                    return rest;
                }
            }
        }
    }
    name
}

fn strip_settlement_prefix(name: &str) -> &str {
    for prefix in SETTLEMENT_PREFIXES {
        if let Some(rest) = name.strip_prefix(prefix) {
            let rest = rest.trim_start();
            if !rest.is_empty() {
                return rest;
            }
        }
    }
    name
}

fn non_empty_or(slug: String, placeholder: &str) -> String {
    if slug.is_empty() {
        placeholder.to_string()
    } else {
        slug
    }
}
