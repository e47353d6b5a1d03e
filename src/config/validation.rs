//! Configuration validation.
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ResolverConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;
use url::Url;

use crate::config::schema::{ResolverConfig, StoreBackend};

/// A single semantic problem in an otherwise well-formed config.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field}: '{value}' is not a socket address")]
    InvalidAddress { field: &'static str, value: String },

    #[error("site.base_url: '{0}' is not an absolute http(s) URL")]
    InvalidBaseUrl(String),

    #[error("site.catalog_path: '{0}' must be an ASCII path starting with '/'")]
    InvalidCatalogPath(String),

    #[error("store.url: '{0}' is not an http(s) URL")]
    InvalidStoreUrl(String),

    #[error("store.url is required for the postgrest backend")]
    MissingStoreUrl,

    #[error("store.table must not be empty")]
    EmptyTable,

    #[error("{0} must be greater than zero")]
    ZeroTimeout(&'static str),

    #[error("store.timeout_ms ({lookup_ms}) must be shorter than timeouts.request_secs ({request_secs}s)")]
    LookupOutlastsRequest { lookup_ms: u64, request_secs: u64 },
}

pub fn validate_config(config: &ResolverConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    check_address(&mut errors, "listener.bind_address", &config.listener.bind_address);
    if config.observability.metrics_enabled {
        check_address(
            &mut errors,
            "observability.metrics_address",
            &config.observability.metrics_address,
        );
    }

    if let Some(base) = &config.site.base_url {
        if !is_http_url(base) {
            errors.push(ValidationError::InvalidBaseUrl(base.clone()));
        }
    }
    let catalog = &config.site.catalog_path;
    if !catalog.starts_with('/') || !catalog.chars().all(|c| c.is_ascii_graphic()) {
        errors.push(ValidationError::InvalidCatalogPath(config.site.catalog_path.clone()));
    }

    if config.store.backend == StoreBackend::Postgrest {
        if config.store.url.trim().is_empty() {
            errors.push(ValidationError::MissingStoreUrl);
        } else if !is_http_url(&config.store.url) {
            errors.push(ValidationError::InvalidStoreUrl(config.store.url.clone()));
        }
        if config.store.table.trim().is_empty() {
            errors.push(ValidationError::EmptyTable);
        }
    }

    if config.store.timeout_ms == 0 {
        errors.push(ValidationError::ZeroTimeout("store.timeout_ms"));
    }
    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("timeouts.request_secs"));
    }
    // The lookup times out before the request does
    let request_ms = config.timeouts.request_secs.saturating_mul(1000);
    if config.store.timeout_ms > 0 && request_ms > 0 && config.store.timeout_ms >= request_ms {
        errors.push(ValidationError::LookupOutlastsRequest {
            lookup_ms: config.store.timeout_ms,
            request_secs: config.timeouts.request_secs,
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_address(errors: &mut Vec<ValidationError>, field: &'static str, value: &str) {
    if value.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field,
            value: value.to_string(),
        });
    }
}

fn is_http_url(raw: &str) -> bool {
    Url::parse(raw)
        .map(|url| matches!(url.scheme(), "http" | "https") && url.has_host())
        .unwrap_or(false)
}
