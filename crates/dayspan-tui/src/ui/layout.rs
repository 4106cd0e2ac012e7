/// Frame layout for the demo shell.
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::common::calendar::centered_rect;
use crate::config;
use crate::logger::LogBuffer;
use crate::mount::Mounts;
use crate::range_picker::RangePicker;
use crate::stores::UIStore;
use crate::ui::status_panel::render_status_panel;

/// Render the complete shell: header, calendar + status, footer, and
/// the help overlay on top when open.
pub fn render_layout(
    frame: &mut Frame,
    mounts: &Mounts,
    range_picker: &RangePicker,
    ui_store: &UIStore,
    logs: &LogBuffer,
) {
    let area = frame.area();

    let vertical_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(1),    // Content
            Constraint::Length(3), // Footer
        ])
        .split(area);

    render_header(frame, vertical_chunks[0]);

    let content_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(config::CAL_PANE_WIDTH + 2),
            Constraint::Min(20),
        ])
        .split(vertical_chunks[1]);

    // The calendar pane is a named mount: the range picker resolves it
    // at draw time instead of being handed the area directly.
    mounts.set(config::CALENDAR_MOUNT, content_chunks[0]);
    range_picker.render(frame);

    render_status_panel(frame, content_chunks[1], range_picker, ui_store, logs);
    render_footer(frame, vertical_chunks[2]);

    if ui_store.get_state().show_help {
        render_help(frame, area);
    }
}

fn render_header(frame: &mut Frame, area: Rect) {
    let header = Paragraph::new(Line::from(Span::styled(
        "dayspan - date range picker",
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )))
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(header, area);
}

fn render_footer(frame: &mut Frame, area: Rect) {
    let footer = Paragraph::new(Line::from(
        "click/Enter: pick day | arrows: cursor | n/p: month | c: clear | ?: help | q: quit",
    ))
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(footer, area);
}

fn render_help(frame: &mut Frame, area: Rect) {
    let popup = centered_rect(54, 14, area);
    frame.render_widget(Clear, popup);

    let lines = vec![
        Line::from("Pick two days to select a range: the first pick"),
        Line::from("starts it, the second completes it (endpoints are"),
        Line::from("ordered automatically). A third pick starts over."),
        Line::from(""),
        Line::from("arrows     move the hover cursor"),
        Line::from("Enter      pick the hovered day"),
        Line::from("mouse      click to pick, move to preview"),
        Line::from("n / p      next / previous month"),
        Line::from("c          clear the selection"),
        Line::from("Esc        drop the hover cursor"),
        Line::from("q          quit"),
    ];
    let help =
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Help "));
    frame.render_widget(help, popup);
}
