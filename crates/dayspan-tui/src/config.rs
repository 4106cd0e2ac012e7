/// Fixed layout values for the calendar widget and the demo shell.

/// Width of the rendered day grid ("Su Mo Tu We Th Fr Sa")
pub static CAL_GRID_WIDTH: u16 = 20;

/// Width of the calendar pane including padding and borders
pub static CAL_PANE_WIDTH: u16 = 26;

/// Height of the calendar pane: header rows plus up to six week rows
/// plus borders
pub static CAL_PANE_HEIGHT: u16 = 12;

/// Number of committed state changes kept for the status panel history
pub static STATE_HISTORY_MAX: usize = 8;

/// Number of buffered log lines shown in the status panel
pub static LOG_TAIL_LINES: usize = 5;

/// Mount name the demo shell registers for the calendar pane
pub static CALENDAR_MOUNT: &'static str = "calendar";
