//! Snapshot Endpoint Client
//!
//! A thin client for the one-shot snapshot endpoint.

use super::SnapshotFetcher;
use super::error::FetchError;
use crate::consts::dashboard_consts::network::{SNAPSHOT_PATH, http_timeout};
use crate::snapshot::SnapshotResponse;
use reqwest::{Client, ClientBuilder};

// User-Agent string with the dashboard version
const USER_AGENT: &str = concat!("market-dashboard/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct HttpSnapshotClient {
    client: Client,
    base_url: String,
}

impl HttpSnapshotClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, FetchError> {
        let client = ClientBuilder::new()
            .connect_timeout(http_timeout())
            .timeout(http_timeout())
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn build_url(&self, endpoint: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        )
    }

    /// Decode an endpoint answer. Failure statuses still carry an envelope
    /// (`success: false`), so the body is tried before the status is blamed.
    fn decode_response(status: u16, body: &[u8]) -> Result<SnapshotResponse, FetchError> {
        match serde_json::from_slice::<SnapshotResponse>(body) {
            Ok(envelope) => Ok(envelope),
            Err(_) if !(200..=299).contains(&status) => Err(FetchError::from_status(status, body)),
            Err(e) => Err(FetchError::Decode(e)),
        }
    }
}

#[async_trait::async_trait]
impl SnapshotFetcher for HttpSnapshotClient {
    async fn fetch_snapshot(&self) -> Result<SnapshotResponse, FetchError> {
        let url = self.build_url(SNAPSHOT_PATH);
        log::debug!("Fetching snapshot from {}", url);

        let response = self.client.get(&url).send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?;
        Self::decode_response(status, &body)
    }
}
