//! Dashboard state
//!
//! Everything the renderer remembers between events. Rendered output is a
//! projection of this state and the latest snapshot.

use super::notifications::Notifications;
use crate::consts::dashboard_consts::MAX_ACTIVITY_LOGS;
use crate::events::Event;
use crate::snapshot::MarketSnapshot;

use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Connection indicator. A display projection only.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default, strum::Display)]
pub enum ConnectionState {
    #[default]
    Offline,
    Online,
}

impl ConnectionState {
    pub fn is_online(self) -> bool {
        self == ConnectionState::Online
    }
}

#[derive(Debug)]
pub struct DashboardState {
    /// Latest connect/disconnect signal from the update source.
    connection: ConnectionState,
    /// The snapshot most recently applied. Replaced wholesale, never merged.
    pub last_snapshot: Option<MarketSnapshot>,
    /// Earliest moment the refresh spinner may stop.
    spinner_until: Option<Instant>,
    /// Deadline for the server to answer an out-of-band update request.
    ack_deadline: Option<Instant>,
    /// Fetches started but not yet resolved.
    fetches_in_flight: usize,
    pub notifications: Notifications,
    /// Activity logs for display (bounded)
    pub activity_logs: VecDeque<Event>,
}

impl DashboardState {
    pub fn new(notification_ttl: Duration) -> Self {
        Self {
            connection: ConnectionState::Offline,
            last_snapshot: None,
            spinner_until: None,
            ack_deadline: None,
            fetches_in_flight: 0,
            notifications: Notifications::new(notification_ttl),
            activity_logs: VecDeque::new(),
        }
    }

    pub fn connection(&self) -> ConnectionState {
        self.connection
    }

    pub fn set_connection(&mut self, connection: ConnectionState) {
        self.connection = connection;
    }

    pub fn start_spinner(&mut self, until: Instant) {
        self.spinner_until = Some(until);
    }

    pub fn is_spinning(&self) -> bool {
        self.spinner_until.is_some()
    }

    /// Stop the spinner once its minimum time is over. Returns whether it stopped.
    pub fn stop_spinner_if_due(&mut self, now: Instant) -> bool {
        match self.spinner_until {
            Some(until) if now >= until => {
                self.spinner_until = None;
                true
            }
            _ => false,
        }
    }

    pub fn arm_ack(&mut self, deadline: Instant) {
        self.ack_deadline = Some(deadline);
    }

    pub fn ack_pending(&self) -> bool {
        self.ack_deadline.is_some()
    }

    /// Returns whether a request was waiting for its answer.
    pub fn clear_ack(&mut self) -> bool {
        self.ack_deadline.take().is_some()
    }

    /// Disarm and report an acknowledgement deadline that has passed.
    pub fn take_expired_ack(&mut self, now: Instant) -> bool {
        match self.ack_deadline {
            Some(deadline) if now >= deadline => {
                self.ack_deadline = None;
                true
            }
            _ => false,
        }
    }

    pub fn fetch_started(&mut self) {
        self.fetches_in_flight += 1;
    }

    /// Returns whether any fetch is still outstanding.
    pub fn fetch_finished(&mut self) -> bool {
        self.fetches_in_flight = self.fetches_in_flight.saturating_sub(1);
        self.fetches_in_flight > 0
    }

    pub fn is_loading(&self) -> bool {
        self.fetches_in_flight > 0
    }

    /// Add an event to activity logs with size limit
    pub fn add_to_activity_log(&mut self, event: Event) {
        if self.activity_logs.len() >= MAX_ACTIVITY_LOGS {
            self.activity_logs.pop_front();
        }
        self.activity_logs.push_back(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EventType;
    use crate::logging::LogLevel;

    #[test]
    fn test_activity_log_is_bounded() {
        let mut state = DashboardState::new(Duration::from_secs(5));
        for i in 0..MAX_ACTIVITY_LOGS + 10 {
            state.add_to_activity_log(Event::dashboard(
                format!("event {}", i),
                EventType::Refresh,
                LogLevel::Info,
            ));
        }

        assert_eq!(state.activity_logs.len(), MAX_ACTIVITY_LOGS);
        assert_eq!(
            state.activity_logs.front().map(|e| e.msg.as_str()),
            Some("event 10")
        );
    }

    #[test]
    fn test_spinner_stops_at_deadline() {
        let start = Instant::now();
        let mut state = DashboardState::new(Duration::from_secs(5));
        state.start_spinner(start + Duration::from_secs(1));

        assert!(!state.stop_spinner_if_due(start + Duration::from_millis(999)));
        assert!(state.stop_spinner_if_due(start + Duration::from_secs(1)));
        assert!(!state.is_spinning());
    }

    #[test]
    fn test_loading_tracks_overlapping_fetches() {
        let mut state = DashboardState::new(Duration::from_secs(5));
        state.fetch_started();
        state.fetch_started();

        assert!(state.fetch_finished());
        assert!(!state.fetch_finished());
        assert!(!state.is_loading());
    }
}
