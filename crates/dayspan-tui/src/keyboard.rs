/// Keyboard and mouse input mapping for the demo shell.
use dayspan_core::today;
use ratatui::crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Position;
use time::{Date, Duration};

use crate::actions::Action;
use crate::range_picker::RangePicker;
use crate::stores::UIStore;

/// Map a key press to an Action.
pub fn handle_key_event(
    key_event: KeyEvent,
    range_picker: &RangePicker,
    ui_store: &UIStore,
) -> Option<Action> {
    // the help overlay swallows everything except quit
    if ui_store.get_state().show_help {
        return match key_event.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => Some(Action::Quit),
            _ => Some(Action::ToggleHelp),
        };
    }

    match key_event.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => Some(Action::Quit),
        KeyCode::Char('?') => Some(Action::ToggleHelp),
        KeyCode::Char('n') => Some(Action::ShiftMonth(1)),
        KeyCode::Char('p') => Some(Action::ShiftMonth(-1)),
        KeyCode::Char('c') => Some(Action::ClearRange),
        KeyCode::Esc => Some(Action::Hover(None)),
        KeyCode::Left => move_cursor(range_picker, Duration::days(-1)),
        KeyCode::Right => move_cursor(range_picker, Duration::days(1)),
        KeyCode::Up => move_cursor(range_picker, Duration::days(-7)),
        KeyCode::Down => move_cursor(range_picker, Duration::days(7)),
        KeyCode::Enter => Some(Action::SelectDate(cursor_base(range_picker))),
        _ => None,
    }
}

/// Map a mouse event to an Action: left click picks the day under the
/// pointer, movement drives the hover preview.
pub fn handle_mouse_event(mouse_event: MouseEvent, range_picker: &RangePicker) -> Option<Action> {
    let position = Position {
        x: mouse_event.column,
        y: mouse_event.row,
    };
    let day = range_picker.picker().day_at(position);

    match mouse_event.kind {
        MouseEventKind::Down(MouseButton::Left) => day.map(Action::SelectDate),
        MouseEventKind::Moved => {
            // only raise an action when the hovered day actually changed
            if day != range_picker.hover() {
                Some(Action::Hover(day))
            } else {
                None
            }
        }
        _ => None,
    }
}

/// Where the hover cursor continues from: the current hover, then the
/// last picked day, then today.
fn cursor_base(range_picker: &RangePicker) -> Date {
    range_picker
        .hover()
        .or_else(|| range_picker.picker().selected())
        .unwrap_or_else(today)
}

fn move_cursor(range_picker: &RangePicker, step: Duration) -> Option<Action> {
    cursor_base(range_picker)
        .checked_add(step)
        .map(|date| Action::Hover(Some(date)))
}
