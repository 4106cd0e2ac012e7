/// Action types for the demo shell. All state mutations flow through
/// these, dispatched back to the main loop.
use dayspan_core::RangeState;
use time::Date;

/// User intents and system events the shell reacts to.
#[derive(Debug, Clone)]
pub enum Action {
    /// A day was picked (mouse click or Enter on the hover cursor)
    SelectDate(Date),

    /// The hover cursor moved; `None` clears it
    Hover(Option<Date>),

    /// Move the displayed month forward or backward
    ShiftMonth(i32),

    /// Drop the committed range and the hover cursor
    ClearRange,

    /// The range picker reported a committed state change
    RangeChanged(RangeState),

    /// Toggle the help overlay
    ToggleHelp,

    /// Exit the application
    Quit,
}
