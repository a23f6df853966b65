//! Dashboard header component
//!
//! Renders the title, the market status banner, the connection badge and the clocks

use super::super::utils::tone_color;
use crate::dashboard::{ElementId, Fragment};
use crate::ui::host::Screen;

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

/// Render header with title and status line.
pub fn render_header(f: &mut Frame, area: Rect, screen: &Screen) {
    let header_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Length(2)])
        .split(area);

    let version = env!("CARGO_PKG_VERSION");
    let title = Paragraph::new(format!("MARKET DASHBOARD v{}", version))
        .alignment(Alignment::Center)
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_type(BorderType::Thick),
        );
    f.render_widget(title, header_chunks[0]);

    let status_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(40),
            Constraint::Percentage(20),
            Constraint::Percentage(40),
        ])
        .split(header_chunks[1]);

    f.render_widget(market_banner(screen), status_chunks[0]);
    f.render_widget(connection_badge(screen), status_chunks[1]);
    f.render_widget(clocks(screen), status_chunks[2]);
}

fn market_banner(screen: &Screen) -> Paragraph<'static> {
    let line = match screen.fragment(ElementId::MarketStatus) {
        Some(Fragment::Banner { text, tone }) => Line::from(Span::styled(
            format!(" {}", text),
            Style::default()
                .fg(tone_color(*tone))
                .add_modifier(Modifier::BOLD),
        )),
        Some(Fragment::Placeholder(text)) => Line::from(Span::styled(
            format!(" {}", text),
            Style::default().fg(Color::DarkGray),
        )),
        _ => Line::from(Span::styled(
            " Waiting for market status...",
            Style::default().fg(Color::DarkGray),
        )),
    };
    Paragraph::new(line)
}

fn connection_badge(screen: &Screen) -> Paragraph<'static> {
    let (label, color) = match screen.fragment(ElementId::StatusIndicator) {
        Some(Fragment::Badge { online: true, label }) => (label.clone(), Color::LightGreen),
        Some(Fragment::Badge { online: false, label }) => (label.clone(), Color::LightRed),
        _ => ("Offline".to_string(), Color::LightRed),
    };
    Paragraph::new(Line::from(vec![
        Span::styled("● ", Style::default().fg(color)),
        Span::styled(label, Style::default().fg(color).add_modifier(Modifier::BOLD)),
    ]))
    .alignment(Alignment::Center)
}

fn clocks(screen: &Screen) -> Paragraph<'static> {
    let text_of = |id: ElementId| match screen.fragment(id) {
        Some(Fragment::Text(text)) => text.clone(),
        _ => "--:--:--".to_string(),
    };
    Paragraph::new(Line::from(vec![
        Span::styled("Updated ", Style::default().fg(Color::DarkGray)),
        Span::raw(text_of(ElementId::LastUpdate)),
        Span::styled("  Now ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            format!("{} ", text_of(ElementId::ServerTime)),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ),
    ]))
    .alignment(Alignment::Right)
}
