//! Search screen rendering
//!
//! Renders the keyword input, the GIF result list and a status line.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::app::{App, InputMode, Listing};
use crate::data::GifImage;

/// Renders the search screen
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(area);

    render_input(frame, app, chunks[0]);
    render_results(frame, app, chunks[1]);
    render_status(frame, app, chunks[2]);
}

/// Renders the keyword input box
fn render_input(frame: &mut Frame, app: &App, area: Rect) {
    let editing = app.input_mode == InputMode::Editing;
    let border_color = if editing { Color::Yellow } else { Color::DarkGray };

    let mut spans = vec![Span::raw(app.query.as_str())];
    if editing {
        spans.push(Span::styled("\u{2588}", Style::default().fg(Color::Yellow))); // █
    } else if app.query.is_empty() {
        spans.push(Span::styled(
            "press / to search",
            Style::default().fg(Color::DarkGray),
        ));
    }

    let input = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .title(" Search GIFs ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color)),
    );
    frame.render_widget(input, area);
}

/// Renders the result list with the current selection highlighted
fn render_results(frame: &mut Frame, app: &App, area: Rect) {
    let title = match &app.listing {
        Listing::Empty => " Results ".to_string(),
        Listing::Trending => " Trending ".to_string(),
        Listing::Keyword { keyword, .. } => format!(" Results for \"{}\" ", keyword),
    };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    if app.results.is_empty() {
        let message = if app.pending.is_some() {
            "Loading GIFs..."
        } else {
            "No GIFs found"
        };
        let empty = Paragraph::new(Span::styled(message, Style::default().fg(Color::DarkGray)))
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = app.results.iter().map(result_item).collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("\u{25B6} "); // ▶

    let mut state = ListState::default().with_selected(Some(app.selected_index));
    frame.render_stateful_widget(list, area, &mut state);
}

/// Builds a two-line list entry: title, then URL
fn result_item(gif: &GifImage) -> ListItem<'_> {
    let title = if gif.title.is_empty() {
        Span::styled("(untitled)", Style::default().fg(Color::DarkGray))
    } else {
        Span::styled(gif.title.as_str(), Style::default().fg(Color::White))
    };

    ListItem::new(vec![
        Line::from(title),
        Line::from(Span::styled(
            format!("  {}", gif.image_url),
            Style::default().fg(Color::Blue),
        )),
    ])
}

/// Renders the status line: errors first, then load state, then key hints
fn render_status(frame: &mut Frame, app: &App, area: Rect) {
    let line = if let Some(error) = &app.status {
        Line::from(Span::styled(error.as_str(), Style::default().fg(Color::Red)))
    } else if app.pending.is_some() {
        Line::from(Span::styled("Loading...", Style::default().fg(Color::Cyan)))
    } else {
        let mut spans = vec![Span::styled(
            format!("{} GIFs", app.results.len()),
            Style::default().fg(Color::Gray),
        )];
        if let Listing::Keyword {
            exhausted: true, ..
        } = app.listing
        {
            spans.push(Span::styled(
                " (end of results)",
                Style::default().fg(Color::DarkGray),
            ));
        }
        spans.push(Span::styled(
            "  \u{2191}\u{2193} move  / search  t trending  ? help  Esc back",
            Style::default().fg(Color::DarkGray),
        ));
        Line::from(spans)
    };

    frame.render_widget(Paragraph::new(line), area);
}
