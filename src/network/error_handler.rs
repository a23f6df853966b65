//! Centralized error classification

use super::error::FetchError;
use crate::logging::LogLevel;
use crate::push::SourceError;

/// Maps transport failures to the level they are logged and displayed at.
#[derive(Debug, Clone, Default)]
pub struct ErrorHandler;

impl ErrorHandler {
    pub fn new() -> Self {
        Self
    }

    /// Classify a snapshot fetch error
    pub fn classify_fetch_error(&self, error: &FetchError) -> LogLevel {
        match error {
            // Server errors - temporary issues
            FetchError::Http { status, .. } if (500..=599).contains(status) => LogLevel::Warn,

            // Wrong endpoint or access denied - needs the user's attention
            FetchError::Http { status, .. } if *status == 401 || *status == 403 => {
                LogLevel::Error
            }
            FetchError::Http { status, .. } if *status == 404 => LogLevel::Error,

            // A body we cannot read means the server speaks another protocol
            FetchError::Decode(_) => LogLevel::Error,

            // Network issues - usually temporary
            FetchError::Reqwest(_) => LogLevel::Warn,

            // Other errors
            _ => LogLevel::Warn,
        }
    }

    /// Classify a push channel error
    pub fn classify_source_error(&self, error: &SourceError) -> LogLevel {
        match error {
            // Reconnects are routine
            SourceError::StreamEnded | SourceError::Timeout => LogLevel::Info,
            SourceError::Connection(_) | SourceError::WebSocket(_) => LogLevel::Warn,
            SourceError::NotConnected => LogLevel::Debug,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_error_levels() {
        let handler = ErrorHandler::new();

        let server = FetchError::Http {
            status: 503,
            message: "busy".to_string(),
        };
        let missing = FetchError::Http {
            status: 404,
            message: "not found".to_string(),
        };
        let decode = FetchError::Decode(serde_json::from_str::<u8>("x").unwrap_err());

        assert_eq!(handler.classify_fetch_error(&server), LogLevel::Warn);
        assert_eq!(handler.classify_fetch_error(&missing), LogLevel::Error);
        assert_eq!(handler.classify_fetch_error(&decode), LogLevel::Error);
    }

    #[test]
    fn test_source_error_levels() {
        let handler = ErrorHandler::new();

        assert_eq!(
            handler.classify_source_error(&SourceError::StreamEnded),
            LogLevel::Info
        );
        assert_eq!(
            handler.classify_source_error(&SourceError::Connection("refused".to_string())),
            LogLevel::Warn
        );
    }
}
