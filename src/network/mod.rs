use crate::snapshot::SnapshotResponse;

pub mod client;
pub mod error;
pub mod error_handler;

pub use client::HttpSnapshotClient;
pub use error::FetchError;
pub use error_handler::ErrorHandler;

#[cfg(test)]
use mockall::automock;

/// One-shot access to the snapshot endpoint.
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait SnapshotFetcher: Send + Sync {
    /// Request the current snapshot envelope. No parameters, no retry.
    async fn fetch_snapshot(&self) -> Result<SnapshotResponse, FetchError>;
}
