//! Canonical URL JSON API.
//!
//! Used by the page layer (to decide between rendering and redirecting a
//! requested SEO path) and by sitemap / feed generators. Unlike the
//! redirect endpoints this is a machine interface, so lookup failures
//! surface as 503.

use axum::extract::rejection::PathRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::canonical::CanonicalPath;
use crate::http::server::AppState;
use crate::identifier::IntId;
use crate::resolve::{FallbackReason, PathCheck, Resolution, Scheme};

#[derive(Debug, Serialize)]
pub struct CanonicalResponse {
    pub id: Uuid,
    pub int_id: Option<IntId>,
    pub path: CanonicalPath,
    pub url: String,
}

#[derive(Debug, Serialize)]
pub struct CheckResponse {
    pub canonical: bool,
    pub path: CanonicalPath,
    pub url: String,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: &'static str,
}

#[derive(Debug, Deserialize)]
pub struct CheckQuery {
    pub path: String,
}

fn error_response(reason: FallbackReason) -> Response {
    let status = match reason {
        FallbackReason::Malformed | FallbackReason::NotFound => StatusCode::NOT_FOUND,
        FallbackReason::LookupFailed => StatusCode::SERVICE_UNAVAILABLE,
    };
    (status, Json(ApiError { error: reason.as_str() })).into_response()
}

/// `GET /api/canonical/{id}` with a UUID or integer id.
pub async fn canonical_for_id(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Response {
    let raw = path.map(|Path(raw)| raw).unwrap_or_default();

    match state.resolver.resolve(&raw, Scheme::Any).await {
        Resolution::Resolved { path, attributes } => {
            let url = state.targets.location(&path);
            Json(CanonicalResponse {
                id: attributes.id,
                int_id: attributes.int_id,
                path,
                url,
            })
            .into_response()
        }
        Resolution::Fallback(reason) => error_response(reason),
    }
}

/// `GET /api/canonical-check?path=/<district>/<settlement>/prodazha-uchastka-<id>`
pub async fn check_path(State(state): State<AppState>, Query(query): Query<CheckQuery>) -> Response {
    let (canonical, path) = match state.resolver.check_path(&query.path).await {
        PathCheck::Canonical(path) => (true, path),
        PathCheck::Moved(path) => (false, path),
        PathCheck::Unresolved(reason) => return error_response(reason),
    };

    let url = state.targets.location(&path);
    Json(CheckResponse { canonical, path, url }).into_response()
}
