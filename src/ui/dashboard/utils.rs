//! Dashboard utility functions
//!
//! Contains helper functions used across dashboard components

use crate::consts::dashboard_consts::palette;
use crate::dashboard::{Tone, Trend};
use crate::events::Origin;
use ratatui::prelude::Color;

/// Parse a `#rrggbb` color. Anything else paints with the terminal default.
pub fn hex_color(hex: &str) -> Color {
    let digits = hex.trim_start_matches('#');
    if digits.len() != 6 {
        return Color::Reset;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&digits[range], 16).ok();
    match (channel(0..2), channel(2..4), channel(4..6)) {
        (Some(r), Some(g), Some(b)) => Color::Rgb(r, g, b),
        _ => Color::Reset,
    }
}

pub fn trend_color(trend: Trend) -> Color {
    match trend {
        Trend::Up => hex_color(palette::GAIN),
        Trend::Down => hex_color(palette::LOSS),
    }
}

pub fn tone_color(tone: Tone) -> Color {
    match tone {
        Tone::Positive => hex_color(palette::GAIN),
        Tone::Negative => hex_color(palette::LOSS),
    }
}

/// Get a ratatui color for an activity event origin
pub fn get_origin_color(origin: &Origin) -> Color {
    match origin {
        Origin::PushChannel => Color::Cyan,
        Origin::Fetch => Color::Yellow,
        Origin::Dashboard => Color::Green,
    }
}

/// Format compact timestamp with date and time from full timestamp
pub fn format_compact_timestamp(timestamp: &str) -> String {
    // Extract from "YYYY-MM-DD HH:MM:SS" format
    if let Some((date_part, time_part)) = timestamp.split_once(' ') {
        if let (Some(month_day), Some(hour_min_sec)) = (date_part.get(5..10), time_part.get(0..8))
        {
            return format!("{} {}", month_day, hour_min_sec);
        }
    }
    timestamp.to_string()
}

/// Shorten transport error messages for the activity log
pub fn clean_http_error_message(msg: &str) -> String {
    if msg.contains("Reqwest error") && msg.contains("timed out") {
        return "Snapshot fetch failed: request timed out".to_string();
    }
    if msg.contains("Reqwest error") {
        return "Snapshot fetch failed: network error".to_string();
    }
    msg.to_string()
}
