//! Session setup and initialization

use crate::config::Settings;
use crate::dashboard::{DashboardDeps, DashboardError, DashboardEvent, DashboardRenderer};
use crate::network::HttpSnapshotClient;
use crate::push::WebSocketSource;
use crate::ui::TerminalHost;
use std::error::Error;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Clients shared by the TUI and headless modes.
#[derive(Debug)]
pub struct SessionData {
    /// Resolved settings the session runs with.
    pub settings: Settings,
    /// One-shot snapshot endpoint client.
    pub fetcher: Arc<HttpSnapshotClient>,
    /// Push channel client. Not connected until started.
    pub source: WebSocketSource,
}

/// A renderer wired to a terminal host, ready to initialize.
#[derive(Debug)]
pub struct DashboardSession {
    pub renderer: DashboardRenderer,
    pub event_receiver: mpsc::Receiver<DashboardEvent>,
    pub host: TerminalHost,
}

/// Build the network clients for a session.
///
/// # Returns
/// * `Ok(SessionData)` - Clients built, nothing connected yet
/// * `Err` - The HTTP client could not be constructed
pub fn setup_session(settings: Settings) -> Result<SessionData, Box<dyn Error>> {
    let fetcher = Arc::new(HttpSnapshotClient::new(settings.server_url.clone())?);
    let source = WebSocketSource::new(settings.ws_url.clone());
    log::info!(
        "Session configured: snapshot endpoint {}, push channel {}",
        fetcher.base_url(),
        source.url()
    );

    Ok(SessionData {
        settings,
        fetcher,
        source,
    })
}

impl SessionData {
    /// Hand the clients to a dashboard renderer drawing into a terminal host.
    pub fn into_dashboard(self) -> Result<DashboardSession, DashboardError> {
        let host = TerminalHost::new();
        let deps = DashboardDeps {
            source: Box::new(self.source),
            fetcher: self.fetcher,
            charts: Box::new(host.chart_factory()),
        };
        let (renderer, event_receiver) =
            DashboardRenderer::new(&host, deps, self.settings.dashboard_options())?;

        Ok(DashboardSession {
            renderer,
            event_receiver,
            host,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, Overrides};

    fn settings() -> Settings {
        Settings::resolve(
            &Overrides {
                server_url: Some("http://127.0.0.1:9".to_string()),
                ws_url: Some("ws://127.0.0.1:9/ws".to_string()),
                locale: None,
            },
            &Config::default(),
        )
    }

    #[test]
    fn test_setup_uses_resolved_urls() {
        let session = setup_session(settings()).unwrap();

        assert_eq!(session.fetcher.base_url(), "http://127.0.0.1:9");
        assert_eq!(session.source.url(), "ws://127.0.0.1:9/ws");
    }

    #[tokio::test]
    async fn test_terminal_host_binds_every_element() {
        let session = setup_session(settings()).unwrap();
        let dashboard = session.into_dashboard().unwrap();

        assert!(!dashboard.renderer.is_running());
    }
}
