//! Dashboard event handling
//!
//! Every queued event runs to completion here, one at a time.

use super::renderer::{DashboardEvent, DashboardRenderer, FetchPurpose};
use super::sections;
use super::state::ConnectionState;

use crate::events::{Event, EventType};
use crate::logging::LogLevel;
use crate::network::FetchError;
use crate::push::SourceEvent;
use crate::snapshot::SnapshotResponse;

use chrono::Local;
use std::time::Instant;

impl DashboardRenderer {
    pub fn handle(&mut self, event: DashboardEvent) {
        self.handle_at(event, Instant::now());
    }

    pub(crate) fn handle_at(&mut self, event: DashboardEvent, now: Instant) {
        if self.is_torn_down() {
            log::debug!("Ignoring {:?} after teardown", event);
            return;
        }

        match event {
            DashboardEvent::Source(event) => self.handle_source_event(event, now),
            DashboardEvent::Fetched { purpose, result } => self.handle_fetched(purpose, result, now),
            DashboardEvent::Tick => self.handle_tick(now),
            DashboardEvent::RefreshRequested => self.manual_refresh_at(now),
            DashboardEvent::Resize => self.charts.resize_all(),
            DashboardEvent::DismissNotification => {
                if self.state.notifications.dismiss_newest().is_some() {
                    self.paint_notifications();
                }
            }
        }
    }

    fn handle_source_event(&mut self, event: SourceEvent, now: Instant) {
        match event {
            SourceEvent::Connected => {
                self.set_connection(ConnectionState::Online);
                self.record(Event::push(
                    "Connected to push channel".to_string(),
                    EventType::StateChange,
                    LogLevel::Info,
                ));
            }
            SourceEvent::Disconnected => {
                self.set_connection(ConnectionState::Offline);
                if self.state.clear_ack() {
                    log::debug!("Dropped pending update request on disconnect");
                }
                self.record(Event::push(
                    "Disconnected from push channel".to_string(),
                    EventType::StateChange,
                    LogLevel::Warn,
                ));
            }
            SourceEvent::DataUpdate { data, timestamp } => {
                if self.state.clear_ack() {
                    log::debug!("Update request answered");
                }
                self.apply_snapshot(data, timestamp.as_deref());
                self.record(Event::push(
                    "Market data updated".to_string(),
                    EventType::Success,
                    LogLevel::Info,
                ));
            }
            SourceEvent::Error { message } => {
                self.report_error_at(format!("Connection error: {}", message), now);
            }
        }
    }

    fn handle_fetched(
        &mut self,
        purpose: FetchPurpose,
        result: Result<SnapshotResponse, FetchError>,
        now: Instant,
    ) {
        if !self.state.fetch_finished() {
            self.bindings
                .loading_modal
                .replace(sections::loading_overlay(false));
        }

        match result {
            Ok(response) if response.success => match response.data {
                Some(data) => {
                    self.apply_snapshot(data, response.last_update.as_deref());
                    self.record(Event::fetch(
                        format!("Snapshot loaded ({})", purpose),
                        EventType::Success,
                        LogLevel::Info,
                    ));
                }
                None => self.record(Event::fetch(
                    "Snapshot response carried no data".to_string(),
                    EventType::Error,
                    LogLevel::Warn,
                )),
            },
            Ok(response) => {
                let reason = response.error.as_deref().unwrap_or("unknown error");
                self.report_error_at(format!("Failed to load data: {}", reason), now);
            }
            Err(e) => {
                let level = self.error_handler.classify_fetch_error(&e);
                self.record(Event::fetch(
                    format!("Snapshot fetch failed: {}", e),
                    EventType::Error,
                    level,
                ));
                self.report_error_at("Server connection error", now);
            }
        }
    }

    fn handle_tick(&mut self, now: Instant) {
        self.bindings
            .server_time
            .replace(sections::clock(&Local::now()));

        if self.state.stop_spinner_if_due(now) {
            self.bindings
                .refresh_button
                .replace(sections::refresh_button(false));
        }

        if self.state.take_expired_ack(now) {
            self.record(Event::dashboard(
                "No answer to update request, fetching snapshot".to_string(),
                EventType::Refresh,
                LogLevel::Warn,
            ));
            self.fetch(FetchPurpose::Fallback);
        }

        if self.state.notifications.sweep(now) {
            self.paint_notifications();
        }
    }

    fn set_connection(&mut self, connection: ConnectionState) {
        self.state.set_connection(connection);
        self.bindings
            .status_indicator
            .replace(sections::connection_badge(connection.is_online()));
    }
}
