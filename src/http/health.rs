use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use crate::http::server::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub backend: &'static str,
    pub store: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Health check endpoint
///
/// Probes the listing store within the lookup timeout. Returns 200 OK when
/// the store answers, 503 Service Unavailable otherwise.
pub async fn health_handler(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let lookup = state.resolver.lookup();
    let store = lookup.store();

    let error = match tokio::time::timeout(lookup.timeout(), store.ping()).await {
        Ok(Ok(())) => None,
        Ok(Err(e)) => Some(e.to_string()),
        Err(_) => Some(format!("store probe timed out after {:?}", lookup.timeout())),
    };

    let status = if error.is_none() {
        StatusCode::OK
    } else {
        tracing::warn!(backend = store.backend(), error = ?error, "Health check failed");
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status,
        Json(HealthResponse {
            status: if error.is_none() { "ok" } else { "degraded" },
            backend: store.backend(),
            store: if error.is_none() { "ok" } else { "error" },
            error,
        }),
    )
}
