//! Alerts component

use crate::consts::dashboard_consts::palette;
use crate::dashboard::{ElementId, Fragment};
use crate::ui::dashboard::utils::hex_color;
use crate::ui::host::Screen;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::prelude::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Padding, Paragraph, Wrap};

/// Render the alert list. Callers only lay it out when the section is visible.
pub fn render_alerts(f: &mut Frame, area: Rect, screen: &Screen) {
    let alert_color = hex_color(palette::LOSS);
    let lines: Vec<Line> = match screen.fragment(ElementId::AlertList) {
        Some(Fragment::AlertList(alerts)) => alerts
            .iter()
            .map(|alert| {
                Line::from(vec![
                    Span::raw("⚠ "),
                    Span::styled(
                        alert.clone(),
                        Style::default().fg(alert_color).add_modifier(Modifier::BOLD),
                    ),
                ])
            })
            .collect(),
        _ => Vec::new(),
    };

    let block = Block::default()
        .title("ALERTS")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(alert_color))
        .padding(Padding::horizontal(1));

    f.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: true }),
        area,
    );
}
