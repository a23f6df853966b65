//! Chart components
//!
//! Renders the currency variation bars and the index performance line

use super::super::utils::hex_color;
use crate::dashboard::{ChartKind, ElementId};
use crate::format::format_percent;
use crate::ui::host::{ChartView, Screen};

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::prelude::{Color, Style};
use ratatui::symbols;
use ratatui::text::Line;
use ratatui::widgets::{
    Axis, Bar, BarChart, BarGroup, Block, BorderType, Borders, Chart, Dataset, GraphType,
    Paragraph,
};

pub fn render_charts(f: &mut Frame, area: Rect, screen: &Screen) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    render_chart(f, chunks[0], screen.chart(ElementId::CambioChart));
    render_chart(f, chunks[1], screen.chart(ElementId::BolsaChart));
}

fn chart_block(view: &ChartView) -> Block<'static> {
    Block::default()
        .title(view.config.series_label.clone())
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(hex_color(view.config.accent)))
}

fn render_chart(f: &mut Frame, area: Rect, view: Option<&ChartView>) {
    let Some(view) = view else {
        return;
    };

    if view.data.is_empty() {
        let empty = Paragraph::new("No data yet")
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray))
            .block(chart_block(view));
        f.render_widget(empty, area);
        return;
    }

    match view.config.kind {
        ChartKind::Bar => render_bars(f, area, view),
        ChartKind::Line => render_line(f, area, view),
    }
}

/// Bars are drawn by magnitude; the color and the value label carry the sign.
fn render_bars(f: &mut Frame, area: Rect, view: &ChartView) {
    let bars: Vec<Bar> = view
        .data
        .labels
        .iter()
        .zip(&view.data.values)
        .zip(&view.data.colors)
        .map(|((label, value), color)| {
            Bar::default()
                .label(Line::from(label.clone()))
                .value((value.abs() * 100.0).round() as u64)
                .text_value(format_percent(*value))
                .style(Style::default().fg(hex_color(color)))
        })
        .collect();

    let slots = u16::try_from(bars.len().max(1)).unwrap_or(u16::MAX);
    let bar_width = (area.width.saturating_sub(2) / slots)
        .saturating_sub(1)
        .clamp(3, 12);

    let chart = BarChart::default()
        .block(chart_block(view))
        .data(BarGroup::default().bars(&bars))
        .bar_width(bar_width)
        .bar_gap(1);
    f.render_widget(chart, area);
}

fn render_line(f: &mut Frame, area: Rect, view: &ChartView) {
    let points: Vec<(f64, f64)> = view
        .data
        .values
        .iter()
        .enumerate()
        .map(|(i, value)| (i as f64, *value))
        .collect();

    let (min, max) = view
        .data
        .values
        .iter()
        .fold((0.0_f64, 0.0_f64), |(lo, hi), v| (lo.min(*v), hi.max(*v)));
    let margin = ((max - min) * 0.1).max(0.5);
    let (lo, hi) = (min - margin, max + margin);

    let dataset = Dataset::default()
        .name(view.config.series_label.clone())
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(hex_color(view.config.accent)))
        .data(&points);

    let x_labels: Vec<Line> = view
        .data
        .labels
        .iter()
        .map(|label| Line::from(label.clone()))
        .collect();

    let chart = Chart::new(vec![dataset])
        .block(chart_block(view))
        .x_axis(
            Axis::default()
                .style(Style::default().fg(Color::DarkGray))
                .bounds([0.0, (points.len().saturating_sub(1)).max(1) as f64])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .style(Style::default().fg(Color::DarkGray))
                .bounds([lo, hi])
                .labels(vec![
                    Line::from(format_percent(lo)),
                    Line::from(format_percent(0.0)),
                    Line::from(format_percent(hi)),
                ]),
        );
    f.render_widget(chart, area);
}
