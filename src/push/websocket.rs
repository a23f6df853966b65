//! WebSocket push channel client
//!
//! Connects to the dashboard server's push endpoint, forwards decoded frames
//! as [`SourceEvent`]s and reconnects with exponential backoff until cancelled.

use super::protocol::{ClientFrame, decode_frame};
use super::{SourceError, SourceEvent, UpdateSource};
use crate::consts::dashboard_consts::network::{
    PUSH_PATH, push_connect_timeout, reconnect_initial, reconnect_max,
};
use futures::{SinkExt, StreamExt};
use log::{debug, info, warn};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_tungstenite::{connect_async, tungstenite::protocol::Message};
use tokio_util::sync::CancellationToken;

pub struct WebSocketSource {
    url: String,
    connected: Arc<AtomicBool>,
    commands: mpsc::UnboundedSender<ClientFrame>,
    command_receiver: Option<mpsc::UnboundedReceiver<ClientFrame>>,
}

impl WebSocketSource {
    pub fn new(url: impl Into<String>) -> Self {
        let (commands, command_receiver) = mpsc::unbounded_channel();
        Self {
            url: url.into(),
            connected: Arc::new(AtomicBool::new(false)),
            commands,
            command_receiver: Some(command_receiver),
        }
    }

    /// Derive the push endpoint from the server root: `http` becomes `ws`,
    /// `https` becomes `wss`.
    pub fn url_for_server(server_url: &str) -> String {
        let root = server_url.trim_end_matches('/');
        let root = if let Some(rest) = root.strip_prefix("https://") {
            format!("wss://{}", rest)
        } else if let Some(rest) = root.strip_prefix("http://") {
            format!("ws://{}", rest)
        } else {
            root.to_string()
        };
        format!("{}{}", root, PUSH_PATH)
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }

    /// Run sessions with reconnection until cancelled or the receiver goes away.
    async fn run(
        url: String,
        events: mpsc::Sender<SourceEvent>,
        mut commands: mpsc::UnboundedReceiver<ClientFrame>,
        connected: Arc<AtomicBool>,
        cancel: CancellationToken,
    ) {
        let mut reconnect_delay = reconnect_initial();

        loop {
            if cancel.is_cancelled() {
                return;
            }

            let result = Self::run_session(
                &url,
                &events,
                &mut commands,
                &connected,
                &cancel,
                &mut reconnect_delay,
            )
            .await;

            if connected.swap(false, Ordering::SeqCst) {
                let _ = events.send(SourceEvent::Disconnected).await;
            }

            match result {
                Ok(()) => {
                    info!("Push channel closed");
                    return;
                }
                Err(e) => {
                    warn!(
                        "Push channel error: {}, reconnecting in {:?}",
                        e, reconnect_delay
                    );

                    tokio::select! {
                        _ = tokio::time::sleep(reconnect_delay) => {}
                        _ = cancel.cancelled() => return,
                    }

                    reconnect_delay = next_delay(reconnect_delay);
                }
            }
        }
    }

    /// Run a single WebSocket session. `Ok` means a deliberate stop.
    async fn run_session(
        url: &str,
        events: &mpsc::Sender<SourceEvent>,
        commands: &mut mpsc::UnboundedReceiver<ClientFrame>,
        connected: &AtomicBool,
        cancel: &CancellationToken,
        reconnect_delay: &mut Duration,
    ) -> Result<(), SourceError> {
        debug!("Connecting to push channel at {}", url);

        let connect_result = tokio::select! {
            result = tokio::time::timeout(push_connect_timeout(), connect_async(url)) => result,
            _ = cancel.cancelled() => return Ok(()),
        };

        let (ws_stream, _) = match connect_result {
            Ok(Ok((stream, response))) => (stream, response),
            Ok(Err(e)) => return Err(SourceError::Connection(e.to_string())),
            Err(_) => return Err(SourceError::Timeout),
        };

        info!("Connected to push channel at {}", url);
        connected.store(true, Ordering::SeqCst);
        *reconnect_delay = reconnect_initial();
        if events.send(SourceEvent::Connected).await.is_err() {
            return Ok(());
        }

        let (mut write, mut read) = ws_stream.split();

        loop {
            tokio::select! {
                msg = read.next() => {
                    match msg {
                        Some(Ok(Message::Text(text))) => match decode_frame(text.as_str()) {
                            Ok(frame) => {
                                if events.send(frame.into()).await.is_err() {
                                    return Ok(());
                                }
                            }
                            Err(e) => warn!("Ignoring malformed push frame: {}", e),
                        },
                        Some(Ok(Message::Ping(data))) => {
                            write.send(Message::Pong(data)).await
                                .map_err(|e| SourceError::WebSocket(e.to_string()))?;
                        }
                        Some(Ok(Message::Close(frame))) => {
                            debug!("Push channel close frame: {:?}", frame);
                            return Err(SourceError::StreamEnded);
                        }
                        Some(Err(e)) => return Err(SourceError::WebSocket(e.to_string())),
                        None => return Err(SourceError::StreamEnded),
                        _ => {}
                    }
                }
                Some(frame) = commands.recv() => {
                    write.send(Message::Text(frame.encode().into())).await
                        .map_err(|e| SourceError::WebSocket(e.to_string()))?;
                }
                _ = cancel.cancelled() => {
                    let _ = write.send(Message::Close(None)).await;
                    return Ok(());
                }
            }
        }
    }
}

impl std::fmt::Debug for WebSocketSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebSocketSource")
            .field("url", &self.url)
            .field("connected", &self.is_connected())
            .finish_non_exhaustive()
    }
}

fn next_delay(delay: Duration) -> Duration {
    (delay * 2).min(reconnect_max())
}

impl UpdateSource for WebSocketSource {
    fn start(
        &mut self,
        events: mpsc::Sender<SourceEvent>,
        cancel: CancellationToken,
    ) -> JoinHandle<()> {
        match self.command_receiver.take() {
            Some(commands) => tokio::spawn(Self::run(
                self.url.clone(),
                events,
                commands,
                self.connected.clone(),
                cancel,
            )),
            None => {
                warn!("Push channel already started");
                tokio::spawn(async {})
            }
        }
    }

    fn request_update(&self) -> Result<(), SourceError> {
        if !self.is_connected() {
            return Err(SourceError::NotConnected);
        }
        self.commands
            .send(ClientFrame::RequestUpdate)
            .map_err(|_| SourceError::NotConnected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_for_server() {
        assert_eq!(
            WebSocketSource::url_for_server("http://localhost:5000/"),
            "ws://localhost:5000/ws"
        );
        assert_eq!(
            WebSocketSource::url_for_server("https://markets.example.com"),
            "wss://markets.example.com/ws"
        );
    }

    #[test]
    fn test_backoff_doubles_up_to_cap() {
        assert_eq!(next_delay(Duration::from_secs(1)), Duration::from_secs(2));
        assert_eq!(next_delay(Duration::from_secs(40)), Duration::from_secs(60));
    }

    #[test]
    fn test_request_update_requires_connection() {
        let source = WebSocketSource::new("ws://localhost:1/ws");
        assert_eq!(source.request_update(), Err(SourceError::NotConnected));
    }

    #[tokio::test]
    // Cancelling before the first connect should end the task without events.
    async fn test_cancel_stops_source() {
        let mut source = WebSocketSource::new("ws://127.0.0.1:9/ws");
        let (events, mut receiver) = mpsc::channel(8);
        let cancel = CancellationToken::new();
        cancel.cancel();

        let handle = source.start(events, cancel);
        tokio::time::timeout(Duration::from_secs(2), handle)
            .await
            .expect("source should stop")
            .unwrap();

        assert!(receiver.try_recv().is_err());
    }
}
