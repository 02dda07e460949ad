//! Home screen rendering
//!
//! Shows the project title, a short feature list and the prompt to start
//! searching.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Features listed under the title
const FEATURES: [&str; 3] = [
    "See trending gif",
    "Find gif for free",
    "Free for everyone",
];

/// Renders the home screen
pub fn render(frame: &mut Frame) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(20),
            Constraint::Length(4),
            Constraint::Length(7),
            Constraint::Length(2),
            Constraint::Min(0),
        ])
        .split(area);

    let title = Paragraph::new(vec![
        Line::from(Span::styled(
            "Memegle",
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "gif search engine for you",
            Style::default().fg(Color::Gray),
        )),
    ])
    .alignment(Alignment::Center);
    frame.render_widget(title, chunks[1]);

    let mut feature_lines = vec![Line::from("")];
    feature_lines.extend(FEATURES.iter().map(|feature| {
        Line::from(vec![
            Span::styled("\u{2726} ", Style::default().fg(Color::Yellow)), // ✦
            Span::raw(*feature),
        ])
    }));

    let features = Paragraph::new(feature_lines)
        .block(
            Block::default()
                .title(" Features ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .alignment(Alignment::Center);
    frame.render_widget(features, centered_columns(chunks[2], 40));

    let cta = Paragraph::new(Line::from(vec![
        Span::styled(
            "Enter",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" start search   "),
        Span::styled("?", Style::default().fg(Color::Yellow)),
        Span::raw(" help   "),
        Span::styled("q", Style::default().fg(Color::Yellow)),
        Span::raw(" quit"),
    ]))
    .alignment(Alignment::Center);
    frame.render_widget(cta, chunks[3]);
}

/// Horizontally centers a column of `width` cells inside `area`
fn centered_columns(area: ratatui::layout::Rect, width: u16) -> ratatui::layout::Rect {
    let side = area.width.saturating_sub(width) / 2;
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(side),
            Constraint::Length(width.min(area.width)),
            Constraint::Min(0),
        ])
        .split(area)[1]
}
