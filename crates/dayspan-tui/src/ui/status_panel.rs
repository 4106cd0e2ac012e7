/// Right-hand status panel: committed range, hover cursor, recent
/// changes and the log tail.
use dayspan_core::RangeState;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::config;
use crate::logger::LogBuffer;
use crate::range_picker::RangePicker;
use crate::stores::UIStore;

fn describe(state: &RangeState) -> String {
    match (state.start, state.end) {
        (None, _) => "no selection".to_string(),
        (Some(start), None) => format!("{start} .. (picking)"),
        (Some(start), Some(end)) => format!("{start} .. {end}"),
    }
}

pub fn render_status_panel(
    frame: &mut Frame,
    area: Rect,
    range_picker: &RangePicker,
    ui_store: &UIStore,
    logs: &LogBuffer,
) {
    let state = range_picker.state();
    let ui_state = ui_store.get_state();

    let label_style = Style::default().fg(Color::Yellow);
    let heading_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);

    let mut lines = vec![
        Line::from(vec![
            Span::styled("Range: ", label_style),
            Span::raw(describe(&state)),
        ]),
        Line::from(vec![
            Span::styled("Hover: ", label_style),
            Span::raw(match range_picker.hover() {
                Some(date) => date.to_string(),
                None => "-".to_string(),
            }),
        ]),
        Line::from(""),
        Line::from(Span::styled("Recent changes", heading_style)),
    ];

    for entry in ui_state.history.iter().rev() {
        lines.push(Line::from(format!("  {}", describe(entry))));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("Logs", heading_style)));
    for line in logs.recent(config::LOG_TAIL_LINES) {
        lines.push(Line::from(Span::styled(
            line,
            Style::default().fg(Color::DarkGray),
        )));
    }

    let panel =
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Status "));
    frame.render_widget(panel, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn test_describe_each_phase() {
        assert_eq!(describe(&RangeState::default()), "no selection");
        assert_eq!(
            describe(&RangeState {
                start: Some(date!(2024 - 01 - 05)),
                end: None,
            }),
            "2024-01-05 .. (picking)",
        );
        assert_eq!(
            describe(&RangeState {
                start: Some(date!(2024 - 01 - 05)),
                end: Some(date!(2024 - 01 - 10)),
            }),
            "2024-01-05 .. 2024-01-10",
        );
    }
}
