//! Push channel
//!
//! The update source delivers connection changes and snapshots as they
//! happen. The dashboard only sees the [`UpdateSource`] trait.

use crate::snapshot::MarketSnapshot;
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

pub mod protocol;
pub mod websocket;

pub use websocket::WebSocketSource;

/// Signals emitted by an update source.
#[derive(Debug, Clone, PartialEq)]
pub enum SourceEvent {
    Connected,
    Disconnected,
    DataUpdate {
        data: MarketSnapshot,
        timestamp: Option<String>,
    },
    Error {
        message: String,
    },
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SourceError {
    #[error("WebSocket connection failed: {0}")]
    Connection(String),

    #[error("WebSocket error: {0}")]
    WebSocket(String),

    #[error("Connection timeout")]
    Timeout,

    #[error("Stream ended unexpectedly")]
    StreamEnded,

    #[error("Push channel is not connected")]
    NotConnected,
}

/// A push-channel client.
pub trait UpdateSource: Send {
    /// Start delivering events into `events` until `cancel` fires.
    fn start(
        &mut self,
        events: mpsc::Sender<SourceEvent>,
        cancel: CancellationToken,
    ) -> JoinHandle<()>;

    /// Ask the server for an out-of-band update.
    fn request_update(&self) -> Result<(), SourceError>;
}
