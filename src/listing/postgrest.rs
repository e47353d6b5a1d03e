//! Listing store backed by a PostgREST endpoint (the hosted database's REST API).
//!
//! # Responsibilities
//! - Issue `eq.` filtered row selections for one key
//! - Authenticate with the service API key
//! - Map transport, status and decode failures to `StoreError`

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use url::Url;
use uuid::Uuid;

use crate::config::StoreConfig;
use crate::identifier::IntId;
use crate::listing::model::RoutingAttributes;
use crate::listing::store::{ListingStore, StoreError};

const SELECT_COLUMNS: &str = "id,int_id,district,location";

/// Two rows are enough to notice a uniqueness violation.
const ROW_LIMIT: &str = "2";

/// Longest error body kept in a `StoreError::Status`.
const MAX_ERROR_BODY: usize = 256;

#[derive(Clone)]
pub struct PostgrestStore {
    client: reqwest::Client,
    endpoint: Url,
}

impl PostgrestStore {
    /// Build a client for `<url>/<rest_path>/<table>`.
    pub fn new(config: &StoreConfig) -> Result<Self, StoreError> {
        let endpoint = table_endpoint(&config.url, &config.rest_path, &config.table)?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        if let Some(key) = config.api_key.as_deref().filter(|k| !k.is_empty()) {
            let apikey = HeaderValue::from_str(key)
                .map_err(|e| StoreError::Config(format!("invalid api key: {}", e)))?;
            let bearer = HeaderValue::from_str(&format!("Bearer {}", key))
                .map_err(|e| StoreError::Config(format!("invalid api key: {}", e)))?;
            headers.insert("apikey", apikey);
            headers.insert(AUTHORIZATION, bearer);
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .connect_timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| StoreError::Config(e.to_string()))?;

        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    async fn query(&self, filters: &[(&str, String)]) -> Result<Vec<RoutingAttributes>, StoreError> {
        let response = self
            .client
            .get(self.endpoint.clone())
            .query(&[("select", SELECT_COLUMNS), ("limit", ROW_LIMIT)])
            .query(filters)
            .send()
            .await
            .map_err(|e| StoreError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| StoreError::Transport(e.to_string()))?;

        if !status.is_success() {
            let mut text = String::from_utf8_lossy(&body).into_owned();
            if text.len() > MAX_ERROR_BODY {
                let mut cut = MAX_ERROR_BODY;
                while !text.is_char_boundary(cut) {
                    cut -= 1;
                }
                text.truncate(cut);
            }
            return Err(StoreError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        serde_json::from_slice(&body).map_err(|e| StoreError::Decode(e.to_string()))
    }
}

#[async_trait]
impl ListingStore for PostgrestStore {
    async fn select_by_id(&self, id: Uuid) -> Result<Vec<RoutingAttributes>, StoreError> {
        self.query(&[("id", format!("eq.{}", id))]).await
    }

    async fn select_by_int_id(&self, int_id: IntId) -> Result<Vec<RoutingAttributes>, StoreError> {
        self.query(&[("int_id", format!("eq.{}", int_id))]).await
    }

    async fn ping(&self) -> Result<(), StoreError> {
        let response = self
            .client
            .get(self.endpoint.clone())
            .query(&[("select", "id"), ("limit", "1")])
            .send()
            .await
            .map_err(|e| StoreError::Transport(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(StoreError::Status {
                status: status.as_u16(),
                body: String::new(),
            })
        }
    }

    fn backend(&self) -> &'static str {
        "postgrest"
    }
}

impl std::fmt::Debug for PostgrestStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // The API key lives in the client's default headers and is never printed
        f.debug_struct("PostgrestStore")
            .field("endpoint", &self.endpoint.as_str())
            .finish()
    }
}

fn table_endpoint(base: &str, rest_path: &str, table: &str) -> Result<Url, StoreError> {
    let base = Url::parse(&format!("{}/", base.trim_end_matches('/')))
        .map_err(|e| StoreError::Config(format!("invalid store url '{}': {}", base, e)))?;

    let rest_path = rest_path.trim_matches('/');
    let relative = if rest_path.is_empty() {
        table.to_string()
    } else {
        format!("{}/{}", rest_path, table)
    };

    base.join(&relative)
        .map_err(|e| StoreError::Config(format!("invalid table path '{}': {}", relative, e)))
}
