//! Redirect endpoints.
//!
//! # Responsibilities
//! - Feed raw path segments into the shared resolve pipeline
//! - Map each Resolution to the status code policy of the endpoint
//! - Never dead-end a shared link: failures become a temporary redirect
//!
//! # Status Policy
//! ```text
//!                     Resolved   Malformed   NotFound   LookupFailed
//! /r/i/{int_id}         308        302         302         302
//! /r/u/{uuid}           308        302         302         302
//! /plots/{id}[/slug]    301        404         404         302
//! /uchastok/{slug}      301        404         404         302
//! ```
//! 302s point at the catalog page and are marked `no-store` so crawlers
//! never adopt them as canonical.

use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use tracing::Instrument;
use url::Url;

use crate::canonical::CanonicalPath;
use crate::config::SiteConfig;
use crate::http::request::RequestId;
use crate::http::server::AppState;
use crate::observability::metrics;
use crate::resolve::{FallbackReason, Resolution, Scheme};

/// Redirect entry points. They share one pipeline and differ only here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// `/r/i/{int_id}`: short links by integer id.
    IntId,
    /// `/r/u/{uuid}`: links by primary key.
    Uuid,
    /// `/plots/{id}` and `/plots/{id}/{slug}`: the old detail page.
    DetailAlias,
    /// `/uchastok/{slug}`: the old slug page with a trailing id.
    LegacySlug,
}

impl Endpoint {
    pub fn name(self) -> &'static str {
        match self {
            Endpoint::IntId => "int_id",
            Endpoint::Uuid => "uuid",
            Endpoint::DetailAlias => "detail_alias",
            Endpoint::LegacySlug => "legacy_slug",
        }
    }

    pub fn scheme(self) -> Scheme {
        match self {
            Endpoint::IntId => Scheme::IntId,
            Endpoint::Uuid => Scheme::Uuid,
            Endpoint::DetailAlias => Scheme::Any,
            Endpoint::LegacySlug => Scheme::LegacySlug,
        }
    }

    /// Status for a successful resolution.
    pub fn resolved_status(self) -> StatusCode {
        match self {
            Endpoint::IntId | Endpoint::Uuid => StatusCode::PERMANENT_REDIRECT,
            Endpoint::DetailAlias | Endpoint::LegacySlug => StatusCode::MOVED_PERMANENTLY,
        }
    }

    /// Page aliases answer "not found" when no listing exists; short links never do.
    fn renders_not_found(self, reason: FallbackReason) -> bool {
        matches!(self, Endpoint::DetailAlias | Endpoint::LegacySlug)
            && matches!(reason, FallbackReason::Malformed | FallbackReason::NotFound)
    }

    /// Turn a pipeline result into the HTTP response for this endpoint.
    pub fn respond(self, resolution: &Resolution, targets: &RedirectTargets) -> Response {
        match resolution {
            Resolution::Resolved { path, .. } => {
                redirect(self.resolved_status(), &targets.location(path), true)
            }
            Resolution::Fallback(reason) if self.renders_not_found(*reason) => {
                (StatusCode::NOT_FOUND, "Listing not found").into_response()
            }
            Resolution::Fallback(_) => redirect(StatusCode::FOUND, targets.fallback(), false),
        }
    }
}

/// Where redirects point: the site origin and the catalog fallback.
#[derive(Debug, Clone)]
pub struct RedirectTargets {
    base: Option<Url>,
    fallback: String,
}

impl RedirectTargets {
    pub fn new(base: Option<Url>, catalog_path: &str) -> Self {
        let fallback = match base.as_ref().and_then(|b| b.join(catalog_path).ok()) {
            Some(url) => url.to_string(),
            None => catalog_path.to_string(),
        };
        Self { base, fallback }
    }

    pub fn from_site(site: &SiteConfig) -> Self {
        Self::new(site.base(), &site.catalog_path)
    }

    /// Absolute URL when a base is configured, else the bare path.
    pub fn location(&self, path: &CanonicalPath) -> String {
        path.to_location(self.base.as_ref())
    }

    pub fn fallback(&self) -> &str {
        &self.fallback
    }
}

fn redirect(status: StatusCode, location: &str, cacheable: bool) -> Response {
    let location = match HeaderValue::from_str(location) {
        Ok(value) => value,
        Err(_) => HeaderValue::from_static("/"),
    };

    let mut response = status.into_response();
    let headers = response.headers_mut();
    headers.insert(header::LOCATION, location);
    if !cacheable {
        headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
    }
    response
}

fn outcome_label(resolution: &Resolution) -> &'static str {
    match resolution {
        Resolution::Resolved { .. } => "resolved",
        Resolution::Fallback(reason) => reason.as_str(),
    }
}

/// Run the pipeline for one endpoint and build its response.
pub async fn handle(state: &AppState, endpoint: Endpoint, raw: &str, request_id: &RequestId) -> Response {
    let span = tracing::info_span!(
        "resolve",
        request_id = %request_id.as_str(),
        endpoint = endpoint.name(),
    );

    async {
        let resolution = state.resolver.resolve(raw, endpoint.scheme()).await;
        metrics::record_redirect(endpoint.name(), outcome_label(&resolution));
        let response = endpoint.respond(&resolution, &state.targets);
        tracing::debug!(raw = %raw, status = response.status().as_u16(), "Redirect decided");
        response
    }
    .instrument(span)
    .await
}

/// Undecodable segments are treated as malformed identifiers, not rejected.
fn raw_segment(path: Result<Path<String>, PathRejection>) -> String {
    path.map(|Path(raw)| raw).unwrap_or_default()
}

pub async fn by_int_id(
    State(state): State<AppState>,
    request_id: RequestId,
    path: Result<Path<String>, PathRejection>,
) -> Response {
    handle(&state, Endpoint::IntId, &raw_segment(path), &request_id).await
}

pub async fn by_uuid(
    State(state): State<AppState>,
    request_id: RequestId,
    path: Result<Path<String>, PathRejection>,
) -> Response {
    handle(&state, Endpoint::Uuid, &raw_segment(path), &request_id).await
}

pub async fn detail_alias(
    State(state): State<AppState>,
    request_id: RequestId,
    path: Result<Path<String>, PathRejection>,
) -> Response {
    handle(&state, Endpoint::DetailAlias, &raw_segment(path), &request_id).await
}

/// `/plots/{id}/{slug}`: the slug is decoration and is ignored.
pub async fn detail_alias_with_slug(
    State(state): State<AppState>,
    request_id: RequestId,
    path: Result<Path<(String, String)>, PathRejection>,
) -> Response {
    let raw = path.map(|Path((id, _slug))| id).unwrap_or_default();
    handle(&state, Endpoint::DetailAlias, &raw, &request_id).await
}

pub async fn legacy_slug(
    State(state): State<AppState>,
    request_id: RequestId,
    path: Result<Path<String>, PathRejection>,
) -> Response {
    handle(&state, Endpoint::LegacySlug, &raw_segment(path), &request_id).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canonical::build_canonical_path;
    use crate::identifier::IntId;
    use crate::listing::RoutingAttributes;
    use uuid::Uuid;

    fn resolved() -> Resolution {
        let attributes = RoutingAttributes {
            id: Uuid::from_u128(1),
            int_id: IntId::new(123),
            district: Some("Гурьевский".into()),
            location: Some("Кумачёво".into()),
        };
        Resolution::Resolved {
            path: build_canonical_path(&attributes),
            attributes,
        }
    }

    fn location(response: &Response) -> &str {
        response.headers()[header::LOCATION].to_str().unwrap()
    }

    #[test]
    fn test_short_links_policy() {
        let targets = RedirectTargets::new(None, "/catalog");
        for endpoint in [Endpoint::IntId, Endpoint::Uuid] {
            let ok = endpoint.respond(&resolved(), &targets);
            assert_eq!(ok.status(), StatusCode::PERMANENT_REDIRECT);
            assert_eq!(location(&ok), "/gurevskiy/kumachevo/prodazha-uchastka-123");
            assert!(ok.headers().get(header::CACHE_CONTROL).is_none());

            for reason in [FallbackReason::Malformed, FallbackReason::NotFound, FallbackReason::LookupFailed] {
                let fallback = endpoint.respond(&Resolution::Fallback(reason), &targets);
                assert_eq!(fallback.status(), StatusCode::FOUND);
                assert_eq!(location(&fallback), "/catalog");
                assert_eq!(fallback.headers()[header::CACHE_CONTROL], "no-store");
            }
        }
    }

    #[test]
    fn test_alias_policy() {
        let targets = RedirectTargets::new(None, "/catalog");
        for endpoint in [Endpoint::DetailAlias, Endpoint::LegacySlug] {
            assert_eq!(
                endpoint.respond(&resolved(), &targets).status(),
                StatusCode::MOVED_PERMANENTLY
            );
            assert_eq!(
                endpoint.respond(&Resolution::Fallback(FallbackReason::NotFound), &targets).status(),
                StatusCode::NOT_FOUND
            );
            assert_eq!(
                endpoint.respond(&Resolution::Fallback(FallbackReason::Malformed), &targets).status(),
                StatusCode::NOT_FOUND
            );
            let failed = endpoint.respond(&Resolution::Fallback(FallbackReason::LookupFailed), &targets);
            assert_eq!(failed.status(), StatusCode::FOUND);
            assert_eq!(location(&failed), "/catalog");
        }
    }

    #[test]
    fn test_absolute_targets_with_base() {
        let base = Url::parse("https://baltland.ru").unwrap();
        let targets = RedirectTargets::new(Some(base), "/catalog");
        assert_eq!(targets.fallback(), "https://baltland.ru/catalog");

        let ok = Endpoint::IntId.respond(&resolved(), &targets);
        assert_eq!(location(&ok), "https://baltland.ru/gurevskiy/kumachevo/prodazha-uchastka-123");
    }
}
