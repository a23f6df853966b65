//! Headless mode execution
//!
//! Prints push-channel activity and a text report for every snapshot to the
//! console instead of drawing the dashboard.

use super::{
    SessionData,
    messages::{print_session_exit_success, print_session_shutdown, print_session_starting},
};
use crate::alerts::AlertThresholds;
use crate::config::Settings;
use crate::consts::dashboard_consts::EVENT_QUEUE_SIZE;
use crate::consts::dashboard_consts::timing::shutdown_grace;
use crate::events::{Event, EventType};
use crate::format::NumberLocale;
use crate::logging::LogLevel;
use crate::network::{ErrorHandler, FetchError, SnapshotFetcher};
use crate::push::{SourceEvent, UpdateSource};
use crate::snapshot::{MarketSnapshot, SnapshotResponse};
use crate::summary::render_report;
use std::error::Error;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// Turns session activity into console lines.
struct ConsoleReporter {
    primary_exchange: String,
    thresholds: AlertThresholds,
    locale: NumberLocale,
    error_handler: ErrorHandler,
}

impl ConsoleReporter {
    fn new(settings: &Settings) -> Self {
        Self {
            primary_exchange: settings.primary_exchange.clone(),
            thresholds: AlertThresholds::default(),
            locale: settings.locale,
            error_handler: ErrorHandler::new(),
        }
    }

    fn report(&self, snapshot: &MarketSnapshot) -> String {
        render_report(snapshot, &self.primary_exchange, self.thresholds, self.locale)
    }

    fn source_lines(&self, event: SourceEvent) -> Vec<String> {
        match event {
            SourceEvent::Connected => vec![
                Event::push(
                    "Connected to server".to_string(),
                    EventType::StateChange,
                    LogLevel::Info,
                )
                .to_string(),
            ],
            SourceEvent::Disconnected => vec![
                Event::push(
                    "Disconnected from server".to_string(),
                    EventType::StateChange,
                    LogLevel::Warn,
                )
                .to_string(),
            ],
            SourceEvent::DataUpdate { data, .. } => vec![
                Event::push(
                    "Market data update".to_string(),
                    EventType::Refresh,
                    LogLevel::Info,
                )
                .to_string(),
                self.report(&data),
            ],
            SourceEvent::Error { message } => vec![
                Event::push(
                    format!("Connection error: {}", message),
                    EventType::Error,
                    LogLevel::Error,
                )
                .to_string(),
            ],
        }
    }

    fn fetch_lines(&self, result: Result<SnapshotResponse, FetchError>) -> Vec<String> {
        match result {
            Ok(SnapshotResponse {
                success: true,
                data: Some(data),
                ..
            }) => vec![
                Event::fetch(
                    "Snapshot loaded".to_string(),
                    EventType::Success,
                    LogLevel::Info,
                )
                .to_string(),
                self.report(&data),
            ],
            Ok(response) => {
                let reason = response.error.as_deref().unwrap_or("unknown error");
                vec![
                    Event::fetch(
                        format!("Failed to load data: {}", reason),
                        EventType::Error,
                        LogLevel::Error,
                    )
                    .to_string(),
                ]
            }
            Err(e) => {
                let level = self.error_handler.classify_fetch_error(&e);
                vec![
                    Event::fetch(
                        format!("Snapshot fetch failed: {}", e),
                        EventType::Error,
                        level,
                    )
                    .to_string(),
                ]
            }
        }
    }
}

fn print_lines(lines: Vec<String>) {
    for line in lines {
        println!("{}", line);
    }
}

/// Runs the session without a terminal UI until Ctrl+C.
pub async fn run_headless_mode(mut session: SessionData) -> Result<(), Box<dyn Error>> {
    print_session_starting("headless", &session.settings.server_url);
    let reporter = ConsoleReporter::new(&session.settings);

    // Trigger shutdown on Ctrl+C
    let shutdown = CancellationToken::new();
    let ctrl_c = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            ctrl_c.cancel();
        }
    });

    let (source_sender, mut source_receiver) = mpsc::channel(EVENT_QUEUE_SIZE);
    let source_handle = session
        .source
        .start(source_sender, shutdown.child_token());

    tokio::select! {
        result = session.fetcher.fetch_snapshot() => print_lines(reporter.fetch_lines(result)),
        _ = shutdown.cancelled() => {}
    }

    loop {
        tokio::select! {
            event = source_receiver.recv() => match event {
                Some(event) => print_lines(reporter.source_lines(event)),
                None => break,
            },
            _ = shutdown.cancelled() => break,
        }
    }

    print_session_shutdown();
    shutdown.cancel();
    if tokio::time::timeout(shutdown_grace(), source_handle)
        .await
        .is_err()
    {
        log::debug!("Push channel did not stop within {:?}", shutdown_grace());
    }
    print_session_exit_success();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, Overrides};
    use crate::dashboard::testing::sample_snapshot;

    fn reporter() -> ConsoleReporter {
        let settings = Settings::resolve(
            &Overrides {
                locale: Some("en-US".to_string()),
                ..Overrides::default()
            },
            &Config::default(),
        );
        ConsoleReporter::new(&settings)
    }

    #[test]
    fn test_data_update_prints_report() {
        let lines = reporter().source_lines(SourceEvent::DataUpdate {
            data: sample_snapshot(),
            timestamp: None,
        });

        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("push: Market data update"));
        assert!(lines[1].contains("MARKET DATA"));
    }

    #[test]
    fn test_source_error_is_reported() {
        let lines = reporter().source_lines(SourceEvent::Error {
            message: "boom".to_string(),
        });

        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("Connection error: boom"));
    }

    #[test]
    fn test_unsuccessful_fetch_uses_source_reason() {
        let lines = reporter().fetch_lines(Ok(SnapshotResponse {
            success: false,
            error: Some("collector down".to_string()),
            ..SnapshotResponse::default()
        }));

        assert!(lines[0].contains("Failed to load data: collector down"));
    }

    #[test]
    fn test_successful_fetch_prints_report() {
        let lines = reporter().fetch_lines(Ok(SnapshotResponse {
            success: true,
            data: Some(sample_snapshot()),
            ..SnapshotResponse::default()
        }));

        assert_eq!(lines.len(), 2);
        assert!(lines[1].contains("MARKET DATA"));
    }
}
