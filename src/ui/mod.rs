// Module declarations
mod app;
pub mod dashboard;
pub mod host;
// Re-exports for external use
pub use app::{App, run};
pub use host::TerminalHost;
