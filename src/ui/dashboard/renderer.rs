//! Dashboard main renderer

use super::components::{alerts, charts, footer, grids, header, logs, overlays};
use crate::dashboard::ElementId;
use crate::ui::host::Screen;
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::{Color, Style};
use ratatui::widgets::Block;

pub fn render_dashboard(f: &mut Frame, screen: &Screen, with_background_color: bool) {
    if with_background_color {
        f.render_widget(
            Block::default().style(Style::default().bg(Color::Rgb(16, 20, 24))),
            f.area(),
        );
    }

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Fill(1),
            Constraint::Percentage(30),
            Constraint::Percentage(25),
            Constraint::Length(2),
        ])
        .margin(1)
        .split(f.area());

    header::render_header(f, main_chunks[0], screen);
    grids::render_grids(f, main_chunks[1], screen);
    charts::render_charts(f, main_chunks[2], screen);

    if screen.is_visible(ElementId::AlertSection) {
        let bottom_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
            .split(main_chunks[3]);
        alerts::render_alerts(f, bottom_chunks[0], screen);
        logs::render_logs_panel(f, bottom_chunks[1], screen);
    } else {
        logs::render_logs_panel(f, main_chunks[3], screen);
    }

    footer::render_footer(f, main_chunks[4], screen);

    overlays::render_loading_modal(f, f.area(), screen);
    overlays::render_toasts(f, f.area(), screen);
}
