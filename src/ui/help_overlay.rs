//! Help overlay listing key bindings per screen

use ratatui::{
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Clear, Row, Table},
    Frame,
};

/// Key bindings grouped by where they apply
const SECTIONS: &[(&str, &[(&str, &str)])] = &[
    (
        "Home",
        &[("Enter/s", "Start searching"), ("q/Esc", "Quit")],
    ),
    (
        "Search input",
        &[
            ("Enter", "Search (empty shows trending)"),
            ("Esc/Tab/\u{2193}", "Jump to results"),
        ],
    ),
    (
        "Results",
        &[
            ("\u{2191}/k \u{2193}/j", "Move; the last result loads more"),
            ("/ or i", "Edit search"),
            ("t", "Show trending"),
            ("Esc", "Back to home"),
            ("q", "Quit"),
            ("?", "Toggle this help"),
        ],
    ),
];

const KEY_COLUMN_WIDTH: u16 = 12;
const OVERLAY_WIDTH: u16 = 52;

/// Renders the help overlay on top of the current view
pub fn render(frame: &mut Frame) {
    let rows = help_rows();
    // Borders plus one row per line
    let height = rows.len() as u16 + 2;
    let area = centered(frame.area(), OVERLAY_WIDTH, height);

    let table = Table::new(
        rows,
        [Constraint::Length(KEY_COLUMN_WIDTH), Constraint::Min(10)],
    )
    .block(
        Block::default()
            .title(" Help ")
            .title_bottom(" ? or Esc to close ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );

    frame.render_widget(Clear, area);
    frame.render_widget(table, area);
}

/// One heading row per section followed by its bindings, sections separated by a blank row
fn help_rows() -> Vec<Row<'static>> {
    let heading = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let key = Style::default().fg(Color::Yellow);

    let mut rows = Vec::new();
    for (index, (title, bindings)) in SECTIONS.iter().enumerate() {
        if index > 0 {
            rows.push(Row::new(vec![""]));
        }
        rows.push(Row::new(vec![*title]).style(heading));
        rows.extend(bindings.iter().map(|(keys, action)| {
            Row::new(vec![
                Cell::from(format!(" {keys}")).style(key),
                Cell::from(*action),
            ])
        }));
    }
    rows
}

/// A `width` x `height` rect centered in `area`, clamped to fit
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height.min(area.height))])
        .flex(Flex::Center)
        .areas(area);
    let [column] = Layout::horizontal([Constraint::Length(width.min(area.width))])
        .flex(Flex::Center)
        .areas(row);
    column
}
