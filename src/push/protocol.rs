//! Push channel wire frames
//!
//! Every text frame is `{"event": "<name>", "payload": {...}}`.

use super::SourceEvent;
use crate::snapshot::MarketSnapshot;
use serde::{Deserialize, Serialize};

/// Frames sent by the server.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "event", content = "payload", rename_all = "snake_case")]
pub enum ServerFrame {
    DataUpdate {
        data: MarketSnapshot,
        #[serde(default)]
        timestamp: Option<String>,
    },
    Error {
        message: String,
    },
}

impl From<ServerFrame> for SourceEvent {
    fn from(frame: ServerFrame) -> Self {
        match frame {
            ServerFrame::DataUpdate { data, timestamp } => SourceEvent::DataUpdate { data, timestamp },
            ServerFrame::Error { message } => SourceEvent::Error { message },
        }
    }
}

/// Frames sent by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ClientFrame {
    RequestUpdate,
}

impl ClientFrame {
    pub fn encode(&self) -> String {
        // Unit variants of an internally tagged enum always serialize.
        serde_json::to_string(self).unwrap_or_else(|_| r#"{"event":"request_update"}"#.to_string())
    }
}

/// Decode a server text frame.
pub fn decode_frame(text: &str) -> Result<ServerFrame, serde_json::Error> {
    serde_json::from_str(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_data_update() {
        let frame = decode_frame(
            r#"{"event": "data_update", "payload": {"data": {"cambio": {}}, "timestamp": "2025-03-14T10:00:00"}}"#,
        )
        .unwrap();

        match frame {
            ServerFrame::DataUpdate { data, timestamp } => {
                assert!(data.cambio.unwrap().iter().next().is_none());
                assert_eq!(timestamp.as_deref(), Some("2025-03-14T10:00:00"));
            }
            other => panic!("unexpected frame: {:?}", other),
        }
    }

    #[test]
    fn test_decode_error_frame_into_source_event() {
        let frame = decode_frame(r#"{"event": "error", "payload": {"message": "collector down"}}"#)
            .unwrap();

        assert_eq!(
            SourceEvent::from(frame),
            SourceEvent::Error {
                message: "collector down".to_string()
            }
        );
    }

    #[test]
    fn test_unknown_event_is_rejected() {
        assert!(decode_frame(r#"{"event": "ping", "payload": {}}"#).is_err());
    }

    #[test]
    fn test_encode_request_update() {
        assert_eq!(
            ClientFrame::RequestUpdate.encode(),
            r#"{"event":"request_update"}"#
        );
    }
}
