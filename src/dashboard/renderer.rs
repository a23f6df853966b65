//! Dashboard renderer
//!
//! Owns the dashboard state, the persistent charts and the background tasks
//! feeding it, and projects every snapshot onto the bound view.

use super::bindings::{Fragment, ViewBindings, ViewHost};
use super::charts::{ChartFactory, ChartKey, ChartSet};
use super::error::DashboardError;
use super::sections;
use super::state::DashboardState;
use crate::alerts::{AlertThresholds, derive_alerts};
use crate::consts::dashboard_consts::EVENT_QUEUE_SIZE;
use crate::consts::dashboard_consts::market::DEFAULT_PRIMARY_EXCHANGE;
use crate::consts::dashboard_consts::timing::{
    clock_tick, notification_ttl, refresh_ack_timeout, spinner_min,
};
use crate::events::{Event, EventType};
use crate::format::NumberLocale;
use crate::logging::LogLevel;
use crate::network::{ErrorHandler, FetchError, SnapshotFetcher};
use crate::push::{SourceEvent, UpdateSource};
use crate::snapshot::{CurrencyQuote, IndexQuote, MarketSnapshot, SnapshotResponse};

use log::debug;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

/// Collaborators handed to the renderer at construction.
pub struct DashboardDeps {
    pub source: Box<dyn UpdateSource>,
    pub fetcher: Arc<dyn SnapshotFetcher>,
    pub charts: Box<dyn ChartFactory>,
}

#[derive(Debug, Clone)]
pub struct DashboardOptions {
    pub locale: NumberLocale,
    /// Exchange shown in the status banner.
    pub primary_exchange: String,
    pub thresholds: AlertThresholds,
    /// How long a manual refresh waits for a pushed update before fetching.
    pub refresh_ack_timeout: Duration,
    pub spinner_min: Duration,
    pub notification_ttl: Duration,
}

impl Default for DashboardOptions {
    fn default() -> Self {
        Self {
            locale: NumberLocale::default(),
            primary_exchange: DEFAULT_PRIMARY_EXCHANGE.to_string(),
            thresholds: AlertThresholds::default(),
            refresh_ack_timeout: refresh_ack_timeout(),
            spinner_min: spinner_min(),
            notification_ttl: notification_ttl(),
        }
    }
}

/// Why a one-shot fetch was started.
#[derive(Debug, Copy, Clone, Eq, PartialEq, strum::Display)]
pub enum FetchPurpose {
    #[strum(to_string = "initial load")]
    Initial,
    #[strum(to_string = "manual refresh")]
    Manual,
    #[strum(to_string = "refresh fallback")]
    Fallback,
}

/// Everything the renderer reacts to, delivered through one queue.
#[derive(Debug)]
pub enum DashboardEvent {
    Source(SourceEvent),
    Fetched {
        purpose: FetchPurpose,
        result: Result<SnapshotResponse, FetchError>,
    },
    Tick,
    RefreshRequested,
    Resize,
    DismissNotification,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum Lifecycle {
    Created,
    Running,
    TornDown,
}

/// A background task owned by the renderer.
struct OwnedTask {
    name: &'static str,
    cancel: CancellationToken,
    handle: JoinHandle<()>,
}

pub struct DashboardRenderer {
    pub(super) bindings: ViewBindings,
    pub(super) charts: ChartSet,
    chart_factory: Box<dyn ChartFactory>,
    pub(super) source: Box<dyn UpdateSource>,
    fetcher: Arc<dyn SnapshotFetcher>,
    pub(super) options: DashboardOptions,
    pub(super) state: DashboardState,
    pub(super) error_handler: ErrorHandler,
    events: mpsc::Sender<DashboardEvent>,
    tasks: Vec<OwnedTask>,
    fetch_cancel: CancellationToken,
    lifecycle: Lifecycle,
}

impl DashboardRenderer {
    /// Resolve the view bindings and build an idle renderer. Nothing runs
    /// until [`initialize`](Self::initialize).
    pub fn new(
        host: &dyn ViewHost,
        deps: DashboardDeps,
        options: DashboardOptions,
    ) -> Result<(Self, mpsc::Receiver<DashboardEvent>), DashboardError> {
        let bindings = ViewBindings::resolve(host)?;
        let (events, receiver) = mpsc::channel(EVENT_QUEUE_SIZE);

        let renderer = Self {
            bindings,
            charts: ChartSet::default(),
            chart_factory: deps.charts,
            source: deps.source,
            fetcher: deps.fetcher,
            state: DashboardState::new(options.notification_ttl),
            options,
            error_handler: ErrorHandler::new(),
            events,
            tasks: Vec::new(),
            fetch_cancel: CancellationToken::new(),
            lifecycle: Lifecycle::Created,
        };
        Ok((renderer, receiver))
    }

    /// A sender into the renderer's event queue, for input handlers.
    pub fn event_sender(&self) -> mpsc::Sender<DashboardEvent> {
        self.events.clone()
    }

    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    pub fn is_running(&self) -> bool {
        self.lifecycle == Lifecycle::Running
    }

    pub fn is_torn_down(&self) -> bool {
        self.lifecycle == Lifecycle::TornDown
    }

    /// Create the charts, subscribe to the update source, start the clock and
    /// load the first snapshot.
    pub fn initialize(&mut self) -> Result<(), DashboardError> {
        match self.lifecycle {
            Lifecycle::Created => {}
            Lifecycle::Running => return Err(DashboardError::AlreadyInitialized),
            Lifecycle::TornDown => return Err(DashboardError::TornDown),
        }

        self.charts.create_all(self.chart_factory.as_mut());
        self.paint_chrome();

        self.start_source_subscription();
        self.start_clock();
        self.lifecycle = Lifecycle::Running;

        self.fetch(FetchPurpose::Initial);
        Ok(())
    }

    /// Replace the last snapshot and re-render every section from it.
    pub fn apply_snapshot(&mut self, snapshot: MarketSnapshot, received_at: Option<&str>) {
        let locale = self.options.locale;

        self.bindings.market_status.replace(sections::market_status(
            snapshot.market_status.as_ref(),
            &self.options.primary_exchange,
        ));
        self.bindings
            .cambio_grid
            .replace(sections::currency_grid(snapshot.cambio.as_ref(), locale));
        self.bindings
            .bolsa_grid
            .replace(sections::index_grid(snapshot.bolsa.as_ref(), locale));

        if let Some(cambio) = &snapshot.cambio {
            self.charts.update(
                ChartKey::Cambio,
                sections::chart_points(cambio, |quote: &CurrencyQuote| quote.change_percent),
            );
        }
        if let Some(bolsa) = &snapshot.bolsa {
            self.charts.update(
                ChartKey::Bolsa,
                sections::chart_points(bolsa, |quote: &IndexQuote| quote.change_percent),
            );
        }

        let alerts = derive_alerts(&snapshot, self.options.thresholds);
        let (list, visibility) = sections::alerts(&alerts);
        self.bindings.alert_list.replace(list);
        self.bindings.alert_section.replace(visibility);

        if let Some(label) = sections::last_update(received_at) {
            self.bindings.last_update.replace(label);
        }

        self.state.last_snapshot = Some(snapshot);
    }

    pub fn manual_refresh(&mut self) {
        self.manual_refresh_at(Instant::now());
    }

    pub(crate) fn manual_refresh_at(&mut self, now: Instant) {
        self.state.start_spinner(now + self.options.spinner_min);
        self.bindings
            .refresh_button
            .replace(sections::refresh_button(true));

        if !self.state.connection().is_online() {
            self.record(Event::dashboard(
                "Push channel offline, fetching snapshot".to_string(),
                EventType::Refresh,
                LogLevel::Info,
            ));
            self.fetch(FetchPurpose::Manual);
            return;
        }

        // The first request's deadline stands; repeated presses do not extend it.
        if self.state.ack_pending() {
            self.record(Event::dashboard(
                "Update already requested, waiting for server".to_string(),
                EventType::Refresh,
                LogLevel::Debug,
            ));
            return;
        }

        match self.source.request_update() {
            Ok(()) => {
                self.state.arm_ack(now + self.options.refresh_ack_timeout);
                self.record(Event::push(
                    "Requested update from server".to_string(),
                    EventType::Refresh,
                    LogLevel::Info,
                ));
            }
            Err(e) => {
                let level = self.error_handler.classify_source_error(&e);
                self.record(Event::push(
                    format!("Update request failed: {}", e),
                    EventType::Error,
                    level,
                ));
                self.fetch(FetchPurpose::Fallback);
            }
        }
    }

    /// Show a dismissible notification that expires on its own.
    pub fn report_error(&mut self, message: impl Into<String>) {
        self.report_error_at(message, Instant::now());
    }

    pub(crate) fn report_error_at(&mut self, message: impl Into<String>, now: Instant) {
        let message = message.into();
        self.record(Event::dashboard(
            message.clone(),
            EventType::Error,
            LogLevel::Error,
        ));
        self.state.notifications.push(message, now);
        self.paint_notifications();
    }

    /// Stop every background task. Safe to call more than once.
    pub fn teardown(&mut self) {
        drop(self.cancel_tasks());
    }

    /// Tear down and wait for the background tasks to wind down.
    pub async fn shutdown(&mut self, grace: Duration) {
        for (name, handle) in self.cancel_tasks() {
            if tokio::time::timeout(grace, handle).await.is_err() {
                debug!("{} did not stop within {:?}", name, grace);
            }
        }
    }

    fn cancel_tasks(&mut self) -> Vec<(&'static str, JoinHandle<()>)> {
        if self.lifecycle == Lifecycle::TornDown {
            return Vec::new();
        }
        self.lifecycle = Lifecycle::TornDown;
        self.fetch_cancel.cancel();

        self.tasks
            .drain(..)
            .map(|task| {
                debug!("Stopping {}", task.name);
                task.cancel.cancel();
                (task.name, task.handle)
            })
            .collect()
    }

    fn start_source_subscription(&mut self) {
        let cancel = CancellationToken::new();
        let (source_sender, mut source_receiver) = mpsc::channel(EVENT_QUEUE_SIZE);
        let source_handle = self.source.start(source_sender, cancel.clone());

        let events = self.events.clone();
        let forward_cancel = cancel.clone();
        let forwarder = tokio::spawn(async move {
            loop {
                tokio::select! {
                    event = source_receiver.recv() => match event {
                        Some(event) => {
                            if events.send(DashboardEvent::Source(event)).await.is_err() {
                                break;
                            }
                        }
                        None => break,
                    },
                    _ = forward_cancel.cancelled() => break,
                }
            }
        });

        self.tasks.push(OwnedTask {
            name: "update source",
            cancel: cancel.clone(),
            handle: source_handle,
        });
        self.tasks.push(OwnedTask {
            name: "source forwarder",
            cancel,
            handle: forwarder,
        });
    }

    fn start_clock(&mut self) {
        let cancel = CancellationToken::new();
        let events = self.events.clone();
        let clock_cancel = cancel.clone();

        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(clock_tick());
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                tokio::select! {
                    _ = interval.tick() => {
                        if events.send(DashboardEvent::Tick).await.is_err() {
                            break;
                        }
                    }
                    _ = clock_cancel.cancelled() => break,
                }
            }
        });

        self.tasks.push(OwnedTask {
            name: "clock",
            cancel,
            handle,
        });
    }

    /// Start a one-shot fetch. Its result comes back as [`DashboardEvent::Fetched`].
    pub(super) fn fetch(&mut self, purpose: FetchPurpose) {
        if self.lifecycle == Lifecycle::TornDown {
            debug!("Skipping {} fetch, dashboard torn down", purpose);
            return;
        }

        self.state.fetch_started();
        self.bindings
            .loading_modal
            .replace(sections::loading_overlay(true));
        self.record(Event::fetch(
            format!("Fetching snapshot ({})", purpose),
            EventType::Refresh,
            LogLevel::Debug,
        ));

        let fetcher = self.fetcher.clone();
        let events = self.events.clone();
        let cancel = self.fetch_cancel.child_token();
        tokio::spawn(async move {
            tokio::select! {
                result = fetcher.fetch_snapshot() => {
                    let _ = events.send(DashboardEvent::Fetched { purpose, result }).await;
                }
                _ = cancel.cancelled() => {}
            }
        });
    }

    /// Paint the parts of the view that exist before any data arrives.
    fn paint_chrome(&mut self) {
        self.bindings
            .status_indicator
            .replace(sections::connection_badge(self.state.connection().is_online()));
        self.bindings
            .refresh_button
            .replace(sections::refresh_button(self.state.is_spinning()));
        self.bindings
            .alert_section
            .replace(Fragment::Visibility(false));
        self.bindings
            .loading_modal
            .replace(sections::loading_overlay(false));
        self.paint_notifications();
    }

    pub(super) fn paint_notifications(&mut self) {
        self.bindings
            .toast_container
            .replace(Fragment::Toasts(self.state.notifications.messages()));
    }

    /// Log an activity event and show it in the activity log.
    pub(super) fn record(&mut self, event: Event) {
        event.log();
        self.state.add_to_activity_log(event);
        self.bindings.activity_log.replace(Fragment::Activity(
            self.state.activity_logs.iter().cloned().collect(),
        ));
    }
}

impl Drop for DashboardRenderer {
    fn drop(&mut self) {
        self.teardown();
    }
}

impl std::fmt::Debug for DashboardRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DashboardRenderer")
            .field("charts", &self.charts)
            .field("options", &self.options)
            .field("state", &self.state)
            .field("lifecycle", &self.lifecycle)
            .finish_non_exhaustive()
    }
}
