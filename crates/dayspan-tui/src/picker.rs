/// The single-date picker: one month grid with selectable days.
use std::sync::{Arc, RwLock};

use dayspan_core::{shift_month, today, ClassSet, DayClass};
use dayspan_events::{Callback, Emitter};
use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Clear, Widget},
};
use time::Date;

use crate::common::calendar::{centered_rect, month_grid};
use crate::config;

/// Event fired after a day is picked. Payload is the picker handle.
pub const SELECT: &str = "select";
/// Event fired after any picker state change, including plain re-render
/// requests. Payload is the picker handle.
pub const STATECHANGE: &str = "statechange";

/// Per-day decoration callback. Returns the visual tags the day should
/// carry; the picker maps tags to terminal styles.
pub type DayDecorator = Arc<dyn Fn(Date) -> ClassSet + Send + Sync>;

/// How the picker occupies the area it is rendered into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PickerMode {
    /// Always drawn inline, filling the given area.
    #[default]
    Permanent,
    /// Drawn as a fixed-size centered overlay on top of the given area.
    Popup,
}

/// Construction options for [`DatePicker`].
#[derive(Clone)]
pub struct PickerOptions {
    pub mode: PickerMode,
    /// Title of the overlay block in `Popup` mode
    pub title: Option<String>,
    pub highlight_today: bool,
    pub decorator: Option<DayDecorator>,
}

impl Default for PickerOptions {
    fn default() -> Self {
        Self {
            mode: PickerMode::default(),
            title: None,
            highlight_today: true,
            decorator: None,
        }
    }
}

/// Geometry of the last-rendered day grid, kept for hit-testing.
#[derive(Debug, Clone, Copy)]
struct GridGeometry {
    /// Top-left of the first week row, column zero
    origin: Position,
    /// First day of the month the grid was drawn for
    view: Date,
    /// Empty cells before day 1 in the first week row
    leading: u16,
    rows: u16,
}

struct PickerInner {
    /// First day of the displayed month
    view: Date,
    selected: Option<Date>,
    opts: PickerOptions,
    render_seq: u64,
    grid: Option<GridGeometry>,
}

/// Shared-handle month calendar. Cloning yields another handle onto the
/// same picker state; events carry a handle as their payload so
/// listeners can read the state that produced them.
#[derive(Clone)]
pub struct DatePicker {
    inner: Arc<RwLock<PickerInner>>,
    emitter: Emitter<DatePicker>,
}

impl DatePicker {
    /// Picker opened at the current month.
    pub fn new(opts: PickerOptions) -> Self {
        Self::with_view(today(), opts)
    }

    /// Picker opened at the month containing `anchor`.
    pub fn with_view(anchor: Date, opts: PickerOptions) -> Self {
        let inner = PickerInner {
            view: anchor.replace_day(1).unwrap(),
            selected: None,
            opts,
            render_seq: 0,
            grid: None,
        };
        Self {
            inner: Arc::new(RwLock::new(inner)),
            emitter: Emitter::new(),
        }
    }

    pub fn on(&self, event: &str, callback: Callback<DatePicker>) {
        self.emitter.on(event, callback);
    }

    pub fn off(&self, event: &str, callback: &Callback<DatePicker>) {
        self.emitter.off(event, callback);
    }

    pub fn selected(&self) -> Option<Date> {
        self.inner.read().unwrap().selected
    }

    /// First day of the month currently shown.
    pub fn view(&self) -> Date {
        self.inner.read().unwrap().view
    }

    pub fn mode(&self) -> PickerMode {
        self.inner.read().unwrap().opts.mode
    }

    /// Times a re-render has been requested. Draw paths use this to know
    /// the decoration callback must be consulted again.
    pub fn render_seq(&self) -> u64 {
        self.inner.read().unwrap().render_seq
    }

    /// Replace the per-day decoration callback.
    pub fn set_decorator(&self, decorator: DayDecorator) {
        self.inner.write().unwrap().opts.decorator = Some(decorator);
        self.refresh();
    }

    /// Run the decoration callback for a day, when one is installed.
    pub fn decorate(&self, day: Date) -> Option<ClassSet> {
        let decorator = self.inner.read().unwrap().opts.decorator.clone();
        decorator.map(|decorate| decorate(day))
    }

    /// Record a day pick, scroll the view to its month and notify
    /// `select` listeners.
    pub fn select_date(&self, date: Date) {
        {
            let mut inner = self.inner.write().unwrap();
            inner.selected = Some(date);
            inner.view = date.replace_day(1).unwrap();
            inner.render_seq += 1;
        }
        self.emitter.emit(SELECT, self);
        self.emitter.emit(STATECHANGE, self);
    }

    /// Move the displayed month without touching the selection.
    pub fn shift_view(&self, months: i32) {
        {
            let mut inner = self.inner.write().unwrap();
            inner.view = shift_month(inner.view, months);
            inner.render_seq += 1;
        }
        self.emitter.emit(STATECHANGE, self);
    }

    /// Show the month containing `date`.
    pub fn scroll_to(&self, date: Date) {
        {
            let mut inner = self.inner.write().unwrap();
            inner.view = date.replace_day(1).unwrap();
            inner.render_seq += 1;
        }
        self.emitter.emit(STATECHANGE, self);
    }

    /// Request a re-render with otherwise unchanged state.
    pub fn refresh(&self) {
        self.inner.write().unwrap().render_seq += 1;
        self.emitter.emit(STATECHANGE, self);
    }

    /// Draw the picker into `area`.
    pub fn render(&self, area: Rect, buf: &mut Buffer) {
        match self.mode() {
            PickerMode::Permanent => self.render_month(area, buf),
            PickerMode::Popup => {
                let title = self.inner.read().unwrap().opts.title.clone();
                let popup = centered_rect(config::CAL_PANE_WIDTH, config::CAL_PANE_HEIGHT, area);
                Clear.render(popup, buf);
                let block = match title {
                    Some(title) => Block::default().borders(Borders::ALL).title(title),
                    None => Block::default().borders(Borders::ALL),
                };
                let inner = block.inner(popup);
                block.render(popup, buf);
                self.render_month(inner, buf);
            }
        }
    }

    fn render_month(&self, area: Rect, buf: &mut Buffer) {
        if area.width < config::CAL_GRID_WIDTH || area.height < 4 {
            self.inner.write().unwrap().grid = None;
            return;
        }

        let (view, selected, highlight_today) = {
            let inner = self.inner.read().unwrap();
            (inner.view, inner.selected, inner.opts.highlight_today)
        };

        let grid_x = area.x + (area.width - config::CAL_GRID_WIDTH) / 2;
        let mut y = area.y;

        let month_header = format!("{:?} {}", view.month(), view.year());
        let header_x = grid_x + config::CAL_GRID_WIDTH.saturating_sub(month_header.len() as u16) / 2;
        buf.set_string(
            header_x,
            y,
            &month_header,
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        );
        y += 2;

        buf.set_string(
            grid_x,
            y,
            "Su Mo Tu We Th Fr Sa",
            Style::default().fg(Color::Yellow),
        );
        y += 1;

        let weeks = month_grid(view);
        let today_date = if highlight_today { Some(today()) } else { None };
        let origin = Position { x: grid_x, y };

        for (row, week) in weeks.iter().enumerate() {
            let line_y = y + row as u16;
            if line_y >= area.y + area.height {
                break;
            }
            for (col, cell) in week.iter().enumerate() {
                let Some(day) = cell else { continue };
                let x = grid_x + col as u16 * 3;
                let style = self.day_style(*day, selected, today_date);
                buf.set_string(x, line_y, format!("{:>2}", day.day()), style);
            }
        }

        let leading = weeks[0].iter().take_while(|cell| cell.is_none()).count() as u16;
        // rows beyond the area were not drawn and must not hit-test
        let rows = (weeks.len() as u16).min((area.y + area.height).saturating_sub(y));
        self.inner.write().unwrap().grid = Some(GridGeometry {
            origin,
            view,
            leading,
            rows,
        });
    }

    fn day_style(&self, day: Date, selected: Option<Date>, today_date: Option<Date>) -> Style {
        let is_today = today_date == Some(day);
        match self.decorate(day) {
            Some(classes) => style_for(&classes, is_today),
            None => {
                if selected == Some(day) {
                    Style::default()
                        .fg(Color::Yellow)
                        .bg(Color::DarkGray)
                        .add_modifier(Modifier::BOLD)
                } else if is_today {
                    Style::default().fg(Color::Green)
                } else {
                    Style::default().fg(Color::White)
                }
            }
        }
    }

    /// Map a terminal position to the day cell rendered there, using the
    /// geometry of the last draw.
    pub fn day_at(&self, position: Position) -> Option<Date> {
        let grid = self.inner.read().unwrap().grid?;
        if position.y < grid.origin.y || position.x < grid.origin.x {
            return None;
        }
        let row = position.y - grid.origin.y;
        let offset = position.x - grid.origin.x;
        // each cell is two digits plus a gutter column
        if row >= grid.rows || offset / 3 >= 7 || offset % 3 == 2 {
            return None;
        }
        let index = i32::from(row) * 7 + i32::from(offset / 3) - i32::from(grid.leading) + 1;
        let month_len = i32::from(grid.view.month().length(grid.view.year()));
        if index < 1 || index > month_len {
            return None;
        }
        Date::from_calendar_date(grid.view.year(), grid.view.month(), index as u8).ok()
    }

    /// Inverse of [`day_at`](Self::day_at): where a day of the displayed
    /// month was rendered.
    pub fn cell_position(&self, date: Date) -> Option<Position> {
        let grid = self.inner.read().unwrap().grid?;
        if date.year() != grid.view.year() || date.month() != grid.view.month() {
            return None;
        }
        let index = u16::from(date.day()) + grid.leading - 1;
        Some(Position {
            x: grid.origin.x + (index % 7) * 3,
            y: grid.origin.y + index / 7,
        })
    }
}

fn style_for(classes: &ClassSet, is_today: bool) -> Style {
    let mut style = Style::default().fg(Color::White);
    if is_today {
        style = style.fg(Color::Green);
    }
    if classes.contains(DayClass::InRange) {
        style = style.bg(Color::DarkGray);
    }
    if classes.contains(DayClass::Selected) {
        style = style
            .fg(Color::Yellow)
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD);
    }
    style
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use time::macros::date;

    fn drawn_picker(anchor: Date) -> (DatePicker, Buffer) {
        let picker = DatePicker::with_view(anchor, PickerOptions::default());
        let area = Rect::new(0, 0, 26, 12);
        let mut buf = Buffer::empty(area);
        picker.render(area, &mut buf);
        (picker, buf)
    }

    #[test]
    fn test_select_date_emits_select_with_picker_payload() {
        let picker = DatePicker::with_view(date!(2024 - 03 - 01), PickerOptions::default());
        let seen: Arc<Mutex<Vec<Option<Date>>>> = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        picker.on(
            SELECT,
            Arc::new(move |dp: &DatePicker| {
                sink.lock().unwrap().push(dp.selected());
            }),
        );

        picker.select_date(date!(2024 - 03 - 15));
        assert_eq!(*seen.lock().unwrap(), vec![Some(date!(2024 - 03 - 15))]);
        assert_eq!(picker.selected(), Some(date!(2024 - 03 - 15)));
    }

    #[test]
    fn test_select_date_scrolls_view() {
        let picker = DatePicker::with_view(date!(2024 - 03 - 01), PickerOptions::default());
        picker.select_date(date!(2024 - 07 - 04));
        assert_eq!(picker.view(), date!(2024 - 07 - 01));
    }

    #[test]
    fn test_shift_view_moves_month() {
        let picker = DatePicker::with_view(date!(2024 - 01 - 20), PickerOptions::default());
        assert_eq!(picker.view(), date!(2024 - 01 - 01));
        picker.shift_view(1);
        assert_eq!(picker.view(), date!(2024 - 02 - 01));
        picker.shift_view(-2);
        assert_eq!(picker.view(), date!(2023 - 12 - 01));
    }

    #[test]
    fn test_refresh_bumps_render_seq() {
        let picker = DatePicker::with_view(date!(2024 - 03 - 01), PickerOptions::default());
        let seq = picker.render_seq();
        picker.refresh();
        assert_eq!(picker.render_seq(), seq + 1);
    }

    #[test]
    fn test_decorate_without_decorator_is_none() {
        let picker = DatePicker::with_view(date!(2024 - 03 - 01), PickerOptions::default());
        assert!(picker.decorate(date!(2024 - 03 - 10)).is_none());
    }

    #[test]
    fn test_render_writes_day_digits() {
        let (_, buf) = drawn_picker(date!(2024 - 03 - 15));
        // grid is centered: x = (26 - 20) / 2 = 3; weeks start at y = 3.
        // March 2024 starts on a Friday (column 5), so day 1 renders at
        // x = 3 + 5 * 3, right-aligned in its two-character cell.
        assert_eq!(buf.cell(Position::new(19, 3)).unwrap().symbol(), "1");
    }

    #[test]
    fn test_day_at_and_cell_position_agree_after_draw() {
        let (picker, _) = drawn_picker(date!(2024 - 03 - 15));
        for day in [
            date!(2024 - 03 - 01),
            date!(2024 - 03 - 09),
            date!(2024 - 03 - 31),
        ] {
            let pos = picker.cell_position(day).unwrap();
            assert_eq!(picker.day_at(pos), Some(day));
        }
    }

    #[test]
    fn test_day_at_rejects_gutters_and_blanks() {
        let (picker, _) = drawn_picker(date!(2024 - 03 - 15));
        // leading blank cell before March 1 (column 0 of the first row)
        let first = picker.cell_position(date!(2024 - 03 - 01)).unwrap();
        assert_eq!(picker.day_at(Position::new(3, first.y)), None);
        // gutter column between two cells
        assert_eq!(picker.day_at(Position::new(first.x + 2, first.y)), None);
        // far outside the grid
        assert_eq!(picker.day_at(Position::new(0, 0)), None);
    }

    #[test]
    fn test_day_at_is_none_before_first_draw() {
        let picker = DatePicker::with_view(date!(2024 - 03 - 01), PickerOptions::default());
        assert_eq!(picker.day_at(Position::new(5, 5)), None);
    }
}
