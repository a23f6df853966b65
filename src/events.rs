//! Event System
//!
//! Activity events recorded by the dashboard for its activity log and for
//! headless console output

use crate::logging::{LogLevel, should_log_with_env};
use chrono::Local;
use std::fmt::Display;

/// Where an activity event originated.
#[derive(Debug, Copy, Clone, Eq, PartialEq, strum::Display)]
pub enum Origin {
    /// The push channel (connect, disconnect, updates, errors).
    #[strum(to_string = "push")]
    PushChannel,
    /// The one-shot snapshot endpoint.
    #[strum(to_string = "fetch")]
    Fetch,
    /// The dashboard itself (refresh requests, fallbacks).
    #[strum(to_string = "dashboard")]
    Dashboard,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, strum::Display)]
pub enum EventType {
    Success,
    Error,
    Refresh,
    StateChange,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub origin: Origin,
    pub msg: String,
    pub timestamp: String,
    pub event_type: EventType,
    pub log_level: LogLevel,
}

impl Event {
    pub fn new(origin: Origin, msg: String, event_type: EventType, log_level: LogLevel) -> Self {
        Self {
            origin,
            msg,
            timestamp: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            event_type,
            log_level,
        }
    }

    pub fn push(msg: String, event_type: EventType, log_level: LogLevel) -> Self {
        Self::new(Origin::PushChannel, msg, event_type, log_level)
    }

    pub fn fetch(msg: String, event_type: EventType, log_level: LogLevel) -> Self {
        Self::new(Origin::Fetch, msg, event_type, log_level)
    }

    pub fn dashboard(msg: String, event_type: EventType, log_level: LogLevel) -> Self {
        Self::new(Origin::Dashboard, msg, event_type, log_level)
    }

    /// Mirror the event into the diagnostic log.
    pub fn log(&self) {
        let level: log::Level = self.log_level.into();
        log::log!(level, "[{}] {}", self.origin, self.msg);
    }

    pub fn should_display(&self) -> bool {
        // Always show success events and info level events
        if self.event_type == EventType::Success || self.log_level >= LogLevel::Info {
            return true;
        }
        should_log_with_env(self.log_level)
    }
}

impl Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} [{}] {}: {}",
            self.event_type, self.timestamp, self.origin, self.msg
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_origin_and_type() {
        let event = Event::push("Connected".to_string(), EventType::StateChange, LogLevel::Info);
        let text = event.to_string();

        assert!(text.starts_with("StateChange ["));
        assert!(text.ends_with("push: Connected"));
    }

    #[test]
    fn test_info_and_success_always_display() {
        let info = Event::fetch("loaded".to_string(), EventType::Refresh, LogLevel::Info);
        let success = Event::fetch("ok".to_string(), EventType::Success, LogLevel::Trace);

        assert!(info.should_display());
        assert!(success.should_display());
    }
}
