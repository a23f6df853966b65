//! Quote grid components
//!
//! Renders the currency and index cards

use super::super::utils::trend_color;
use crate::dashboard::{Card, ElementId, Fragment, Trend};
use crate::ui::host::Screen;

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Padding, Paragraph};

pub fn render_grids(f: &mut Frame, area: Rect, screen: &Screen) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    render_grid(f, chunks[0], "CURRENCIES", screen.fragment(ElementId::CambioGrid));
    render_grid(f, chunks[1], "INDICES", screen.fragment(ElementId::BolsaGrid));
}

fn render_grid(f: &mut Frame, area: Rect, title: &str, fragment: Option<&Fragment>) {
    let block = Block::default()
        .title(title.to_string())
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Cyan))
        .padding(Padding::horizontal(1));

    let paragraph = match fragment {
        Some(Fragment::Cards(cards)) => Paragraph::new(
            cards
                .iter()
                .flat_map(card_lines)
                .collect::<Vec<Line>>(),
        ),
        Some(Fragment::Placeholder(text)) => Paragraph::new(text.clone())
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray)),
        _ => Paragraph::new("Loading...")
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray)),
    };

    f.render_widget(paragraph.block(block), area);
}

/// Two lines per card: quote and footer.
fn card_lines(card: &Card) -> [Line<'static>; 2] {
    let color = trend_color(card.trend);
    let arrow = match card.trend {
        Trend::Up => "▲",
        Trend::Down => "▼",
    };

    [
        Line::from(vec![
            Span::raw(format!("{} ", card.glyph)),
            Span::styled(
                format!("{:<10}", card.label),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!("{:>14}  ", card.value)),
            Span::styled(
                format!("{} {}", arrow, card.change),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(Span::styled(
            format!("   {}", card.footer),
            Style::default().fg(Color::DarkGray),
        )),
    ]
}
