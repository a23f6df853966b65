//! Dashboard logs panel component
//!
//! Renders activity logs with event formatting

use super::super::utils::{clean_http_error_message, format_compact_timestamp, get_origin_color};
use crate::dashboard::{ElementId, Fragment};
use crate::events::EventType;
use crate::logging::LogLevel;
use crate::ui::host::Screen;
use ratatui::Frame;
use ratatui::prelude::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Padding, Paragraph, Wrap};

/// Render logs panel, newest first.
pub fn render_logs_panel(f: &mut Frame, area: ratatui::layout::Rect, screen: &Screen) {
    // Account for borders and padding
    let max_logs = (area.height.saturating_sub(3)) as usize;
    let log_count = max_logs.max(1);

    let events = match screen.fragment(ElementId::ActivityLog) {
        Some(Fragment::Activity(events)) => events.as_slice(),
        _ => &[],
    };

    let log_lines: Vec<Line> = events
        .iter()
        .filter(|event| event.should_display())
        .rev()
        .take(log_count)
        .map(|event| {
            let status_icon = match (event.event_type, event.log_level) {
                (EventType::Success, _) => "✅",
                (EventType::Error, LogLevel::Warn) => "⚠️",
                (EventType::Error, _) => "❌",
                (EventType::Refresh, _) => "🔄",
                (EventType::StateChange, _) => "🔌",
            };

            let origin_color = get_origin_color(&event.origin);
            let compact_time = format_compact_timestamp(&event.timestamp);
            let cleaned_msg = clean_http_error_message(&event.msg);

            Line::from(vec![
                Span::raw(format!("{} ", status_icon)),
                Span::styled(
                    format!("{} ", compact_time),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(cleaned_msg, Style::default().fg(origin_color)),
            ])
        })
        .collect();

    let log_paragraph = if log_lines.is_empty() {
        Paragraph::new(vec![Line::from("Waiting for market data...")])
    } else {
        Paragraph::new(log_lines)
    };

    let logs_block = Block::default()
        .title(format!("ACTIVITY LOG ({})", events.len()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Cyan))
        .padding(Padding::uniform(1));

    let log_widget = log_paragraph.block(logs_block).wrap(Wrap { trim: true });

    f.render_widget(log_widget, area);
}
