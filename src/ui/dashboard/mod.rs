//! Terminal dashboard painting
//!
//! Paints the screen model written by the dashboard renderer

pub mod components;
pub mod renderer;
pub mod utils;

pub use renderer::render_dashboard;
