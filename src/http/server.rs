//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (request ID, tracing, timeout)
//! - Bind server to listener and drain on shutdown

use std::sync::Arc;
use std::time::Duration;

use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::ResolverConfig;
use crate::http::redirect::RedirectTargets;
use crate::http::request::{propagate_request_id_layer, set_request_id_layer};
use crate::http::{api, health, redirect};
use crate::listing::{open_store, ListingLookup, ListingStore, StoreError};
use crate::resolve::Resolver;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub resolver: Resolver,
    pub targets: Arc<RedirectTargets>,
}

/// HTTP server for the resolver.
pub struct HttpServer {
    router: Router,
    config: ResolverConfig,
}

impl HttpServer {
    /// Create a server over an already opened store.
    pub fn new(config: ResolverConfig, store: Arc<dyn ListingStore>) -> Self {
        let lookup = ListingLookup::new(store, config.store.timeout());
        let state = AppState {
            resolver: Resolver::new(lookup),
            targets: Arc::new(RedirectTargets::from_site(&config.site)),
        };

        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Open the configured store and create the server.
    pub fn from_config(config: ResolverConfig) -> Result<Self, StoreError> {
        let store = open_store(&config.store)?;
        tracing::info!(backend = store.backend(), "Listing store ready");
        Ok(Self::new(config, store))
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &ResolverConfig, state: AppState) -> Router {
        Router::new()
            .route("/r/i/{int_id}", get(redirect::by_int_id))
            .route("/r/u/{uuid}", get(redirect::by_uuid))
            .route("/plots/{id}", get(redirect::detail_alias))
            .route("/plots/{id}/{slug}", get(redirect::detail_alias_with_slug))
            .route("/uchastok/{slug}", get(redirect::legacy_slug))
            .route("/api/canonical/{id}", get(api::canonical_for_id))
            .route("/api/canonical-check", get(api::check_path))
            .route("/health", get(health::health_handler))
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(set_request_id_layer())
                    .layer(TraceLayer::new_for_http())
                    .layer(propagate_request_id_layer())
                    .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs))),
            )
    }

    /// The fully layered router, for in-process use.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Serve until the shutdown signal fires, then drain in-flight requests.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identifier::IntId;
    use crate::listing::{MemoryStore, RoutingAttributes};
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use tower::ServiceExt;
    use uuid::Uuid;

    const ID: &str = "0b9e6f3a-1c2d-4e5f-8a9b-0c1d2e3f4a5b";
    const CANONICAL: &str = "/gurevskiy/kumachevo/prodazha-uchastka-123";

    fn server() -> (HttpServer, MemoryStore) {
        let store = MemoryStore::from_rows([RoutingAttributes {
            id: Uuid::parse_str(ID).unwrap(),
            int_id: IntId::new(123),
            district: Some("Гурьевский".into()),
            location: Some("Кумачёво".into()),
        }]);
        let mut config = ResolverConfig::default();
        config.store.backend = crate::config::StoreBackend::Memory;
        (HttpServer::new(config, Arc::new(store.clone())), store)
    }

    async fn get(router: Router, uri: &str) -> axum::response::Response {
        router
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    fn location(response: &axum::response::Response) -> &str {
        response.headers()[header::LOCATION].to_str().unwrap()
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_int_id_redirect() {
        let (server, _) = server();
        let response = get(server.router(), "/r/i/123").await;
        assert_eq!(response.status(), StatusCode::PERMANENT_REDIRECT);
        assert_eq!(location(&response), CANONICAL);
        assert!(response.headers().contains_key("x-request-id"));
    }

    #[tokio::test]
    async fn test_negative_int_id_falls_back() {
        let (server, _) = server();
        let response = get(server.router(), "/r/i/-5").await;
        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(location(&response), "/catalog");
    }

    #[tokio::test]
    async fn test_uuid_endpoint_rejects_int_ids() {
        let (server, _) = server();
        let response = get(server.router(), "/r/u/123").await;
        assert_eq!(response.status(), StatusCode::FOUND);

        let response = get(server.router(), &format!("/r/u/{}", ID.to_uppercase())).await;
        assert_eq!(response.status(), StatusCode::PERMANENT_REDIRECT);
        assert_eq!(location(&response), CANONICAL);
    }

    #[tokio::test]
    async fn test_percent_encoded_garbage_falls_back() {
        let (server, _) = server();
        let response = get(server.router(), "/r/i/%FF%FE").await;
        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(location(&response), "/catalog");
    }

    #[tokio::test]
    async fn test_detail_alias_and_legacy_routes() {
        let (server, _) = server();

        for uri in [
            format!("/plots/{ID}"),
            "/plots/123".to_string(),
            "/plots/123/uchastok-kumachevo".to_string(),
            "/uchastok/uchastok-kumachevo-15-sotok-123".to_string(),
        ] {
            let response = get(server.router(), &uri).await;
            assert_eq!(response.status(), StatusCode::MOVED_PERMANENTLY, "{uri}");
            assert_eq!(location(&response), CANONICAL, "{uri}");
        }

        let response = get(server.router(), "/plots/456").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let response = get(server.router(), "/uchastok/uchastok-kumachevo").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_canonical_api() {
        let (server, _) = server();

        let response = get(server.router(), "/api/canonical/123").await;
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["id"], ID);
        assert_eq!(json["int_id"], 123);
        assert_eq!(json["path"], CANONICAL);
        assert_eq!(json["url"], CANONICAL);

        let response = get(server.router(), "/api/canonical/999").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await["error"], "not_found");
    }

    #[tokio::test]
    async fn test_canonical_check_api() {
        let (server, store) = server();

        let response = get(server.router(), &format!("/api/canonical-check?path={CANONICAL}")).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["canonical"], true);

        let mut moved = store.select_by_id(Uuid::parse_str(ID).unwrap()).await.unwrap().remove(0);
        moved.location = Some("Луговое".into());
        store.upsert(moved);

        let response = get(server.router(), &format!("/api/canonical-check?path={CANONICAL}")).await;
        let json = body_json(response).await;
        assert_eq!(json["canonical"], false);
        assert_eq!(json["path"], "/gurevskiy/lugovoe/prodazha-uchastka-123");
    }

    #[tokio::test]
    async fn test_ids_beyond_store_range_are_malformed() {
        let (server, _) = server();

        let response = get(server.router(), "/r/i/9223372036854775808").await;
        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(location(&response), "/catalog");

        let response = get(server.router(), "/api/canonical/9223372036854775808").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await["error"], "malformed");
    }

    #[tokio::test]
    async fn test_duplicate_int_id_redirects_to_first_row() {
        let (server, store) = server();
        store.upsert(RoutingAttributes {
            id: Uuid::parse_str("f0e1d2c3-b4a5-4697-8879-6a5b4c3d2e1f").unwrap(),
            int_id: IntId::new(123),
            district: Some("Зеленоградский".into()),
            location: Some("Луговое".into()),
        });

        let response = get(server.router(), "/r/i/123").await;
        assert_eq!(response.status(), StatusCode::PERMANENT_REDIRECT);
        assert_eq!(location(&response), CANONICAL);
    }

    #[tokio::test]
    async fn test_health() {
        let (server, _) = server();
        let response = get(server.router(), "/health").await;
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["status"], "ok");
        assert_eq!(json["backend"], "memory");
    }
}
