//! Dashboard component modules
//!
//! Contains all individual rendering components

pub mod alerts;
pub mod charts;
pub mod footer;
pub mod grids;
pub mod header;
pub mod logs;
pub mod overlays;
