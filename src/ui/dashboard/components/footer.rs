//! Dashboard footer component
//!
//! Renders the key bindings and the refresh button state

use crate::dashboard::{ElementId, Fragment};
use crate::ui::host::Screen;
use ratatui::Frame;
use ratatui::layout::Alignment;
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

/// Render footer.
pub fn render_footer(f: &mut Frame, area: ratatui::layout::Rect, screen: &Screen) {
    let (refresh_label, busy) = match screen.fragment(ElementId::RefreshButton) {
        Some(Fragment::Button { label, busy }) => (label.as_str(), *busy),
        _ => ("Refresh", false),
    };

    let footer_text = format!(
        "[R] {} | [X] Dismiss | [Q] Quit | Market Dashboard",
        refresh_label
    );
    let footer_color = if busy { Color::LightYellow } else { Color::Cyan };

    let footer = Paragraph::new(footer_text)
        .alignment(Alignment::Center)
        .style(
            Style::default()
                .fg(footer_color)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::TOP)
                .border_type(BorderType::Thick),
        );
    f.render_widget(footer, area);
}
