//! Overlay components
//!
//! Renders the loading modal and the notification toasts above the dashboard

use crate::dashboard::{ElementId, Fragment};
use crate::ui::host::Screen;

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap};

const TOAST_WIDTH: u16 = 44;
const MODAL_WIDTH: u16 = 36;

pub fn render_loading_modal(f: &mut Frame, area: Rect, screen: &Screen) {
    let Some(Fragment::Overlay {
        visible: true,
        message,
    }) = screen.fragment(ElementId::LoadingModal)
    else {
        return;
    };

    let width = MODAL_WIDTH.min(area.width);
    let modal = Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + area.height.saturating_sub(3) / 2,
        width,
        height: 3.min(area.height),
    };

    f.render_widget(Clear, modal);
    f.render_widget(
        Paragraph::new(message.clone())
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::White))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(Color::Cyan)),
            ),
        modal,
    );
}

/// Stack toasts in the top-right corner, newest on top.
pub fn render_toasts(f: &mut Frame, area: Rect, screen: &Screen) {
    let Some(Fragment::Toasts(messages)) = screen.fragment(ElementId::ToastContainer) else {
        return;
    };

    let width = TOAST_WIDTH.min(area.width);
    let mut y = area.y + 1;
    for message in messages {
        let height = 3;
        if y + height > area.y + area.height {
            break;
        }
        let toast = Rect {
            x: area.x + area.width - width,
            y,
            width,
            height,
        };

        f.render_widget(Clear, toast);
        f.render_widget(
            Paragraph::new(Line::from(message.clone()))
                .style(
                    Style::default()
                        .fg(Color::White)
                        .bg(Color::Red)
                        .add_modifier(Modifier::BOLD),
                )
                .wrap(Wrap { trim: true })
                .block(
                    Block::default()
                        .title("Error")
                        .borders(Borders::ALL)
                        .border_type(BorderType::Rounded),
                ),
            toast,
        );
        y += height;
    }
}
