//! Dashboard errors

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DashboardError {
    /// The host has no element for a required binding.
    #[error("UI host has no element bound to '{0}'")]
    MissingBinding(&'static str),

    #[error("Dashboard is already initialized")]
    AlreadyInitialized,

    #[error("Dashboard has been torn down")]
    TornDown,
}
