//! Market dashboard
//!
//! A host-agnostic renderer that turns market snapshots into view fragments
//! and persistent chart updates.

pub mod bindings;
pub mod charts;
pub mod error;
pub mod notifications;
pub mod renderer;
pub mod sections;
pub mod state;
mod updaters;

#[cfg(test)]
pub(crate) mod testing;

pub use bindings::{Card, ElementId, Fragment, Slot, Tone, Trend, ViewHost};
pub use charts::{Chart, ChartConfig, ChartData, ChartFactory, ChartKind, UpdateMode};
pub use error::DashboardError;
pub use renderer::{DashboardDeps, DashboardEvent, DashboardOptions, DashboardRenderer};
