pub mod dashboard_consts {
    //! Dashboard Configuration Constants
    //!
    //! This module contains the fixed timings, thresholds and palette of the
    //! dashboard, organized by functional area.

    // =============================================================================
    // QUEUE CONFIGURATION
    // =============================================================================

    /// The maximum number of events to keep in the activity log.
    pub const MAX_ACTIVITY_LOGS: usize = 100;

    /// Capacity of the dashboard's internal event queue.
    pub const EVENT_QUEUE_SIZE: usize = 100;

    // =============================================================================
    // TIMING CONFIGURATION
    // =============================================================================

    /// Display timing configuration
    pub mod timing {
        use std::time::Duration;

        /// Period of the wall-clock display tick (milliseconds)
        pub const CLOCK_TICK_MS: u64 = 1000;

        /// Minimum time the refresh spinner stays visible (milliseconds)
        pub const SPINNER_MIN_MS: u64 = 1000;

        /// Lifetime of an error notification (milliseconds)
        pub const NOTIFICATION_TTL_MS: u64 = 5000;

        /// Default wait for a push-channel answer to a manual refresh (seconds)
        pub const REFRESH_ACK_TIMEOUT_SECS: u64 = 5;

        /// Poll interval for terminal input in the UI loop (milliseconds)
        pub const INPUT_POLL_MS: u64 = 100;

        /// How long background tasks get to stop on exit (milliseconds)
        pub const SHUTDOWN_GRACE_MS: u64 = 2000;

        pub const fn clock_tick() -> Duration {
            Duration::from_millis(CLOCK_TICK_MS)
        }

        pub const fn spinner_min() -> Duration {
            Duration::from_millis(SPINNER_MIN_MS)
        }

        pub const fn notification_ttl() -> Duration {
            Duration::from_millis(NOTIFICATION_TTL_MS)
        }

        pub const fn refresh_ack_timeout() -> Duration {
            Duration::from_secs(REFRESH_ACK_TIMEOUT_SECS)
        }

        pub const fn input_poll() -> Duration {
            Duration::from_millis(INPUT_POLL_MS)
        }

        pub const fn shutdown_grace() -> Duration {
            Duration::from_millis(SHUTDOWN_GRACE_MS)
        }
    }

    // =============================================================================
    // NETWORK CONFIGURATION
    // =============================================================================

    /// Snapshot endpoint and push channel configuration
    pub mod network {
        use std::time::Duration;

        /// Server used when neither flag, environment nor config name one
        pub const DEFAULT_SERVER_URL: &str = "http://localhost:5000";

        /// Path of the snapshot endpoint
        pub const SNAPSHOT_PATH: &str = "/api/data";

        /// Path of the push channel, relative to the server root
        pub const PUSH_PATH: &str = "/ws";

        /// Connect and request timeout for the snapshot endpoint (seconds)
        pub const HTTP_TIMEOUT_SECS: u64 = 10;

        /// Connect timeout for the push channel (seconds)
        pub const PUSH_CONNECT_TIMEOUT_SECS: u64 = 10;

        /// First reconnect delay of the push channel (seconds)
        pub const RECONNECT_INITIAL_SECS: u64 = 1;

        /// Upper bound of the push channel reconnect delay (seconds)
        pub const RECONNECT_MAX_SECS: u64 = 60;

        pub const fn http_timeout() -> Duration {
            Duration::from_secs(HTTP_TIMEOUT_SECS)
        }

        pub const fn push_connect_timeout() -> Duration {
            Duration::from_secs(PUSH_CONNECT_TIMEOUT_SECS)
        }

        pub const fn reconnect_initial() -> Duration {
            Duration::from_secs(RECONNECT_INITIAL_SECS)
        }

        pub const fn reconnect_max() -> Duration {
            Duration::from_secs(RECONNECT_MAX_SECS)
        }
    }

    // =============================================================================
    // MARKET CONFIGURATION
    // =============================================================================

    /// Alert thresholds and display defaults
    pub mod market {
        /// A currency pair is flagged when |change %| is strictly above this.
        pub const CURRENCY_ALERT_THRESHOLD: f64 = 2.0;

        /// An index is flagged when |change %| is strictly above this.
        pub const INDEX_ALERT_THRESHOLD: f64 = 3.0;

        /// Exchange whose open/closed state drives the status banner.
        pub const DEFAULT_PRIMARY_EXCHANGE: &str = "B3";

        /// Number of entries per section in a market summary.
        pub const TOP_MOVERS: usize = 5;

        /// Locale used for number separators when none is configured.
        pub const DEFAULT_LOCALE: &str = "pt-BR";
    }

    /// Chart palette
    pub mod palette {
        /// Bar/point color for a non-negative change.
        pub const GAIN: &str = "#20c997";

        /// Bar/point color for a negative change.
        pub const LOSS: &str = "#fd7e14";

        /// Accent of the currency chart.
        pub const CAMBIO_ACCENT: &str = "#007bff";
    }
}
