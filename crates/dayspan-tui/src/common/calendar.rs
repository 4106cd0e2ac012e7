/// Month-grid helpers shared by the picker widget and the demo shell.
use itertools::Itertools;
use ratatui::layout::Rect;
use time::Date;

/// Lay out one month as week rows of optional days. Cells before the
/// first of the month and after the last are `None`; every row holds
/// exactly seven cells, Sunday first.
pub fn month_grid(anchor: Date) -> Vec<Vec<Option<Date>>> {
    let year = anchor.year();
    let month = anchor.month();
    let first = Date::from_calendar_date(year, month, 1).unwrap();
    let leading = usize::from(first.weekday().number_days_from_sunday());
    let days_in_month = usize::from(month.length(year));

    let cells = (0..leading).map(|_| None).chain(
        (1..=days_in_month)
            .map(|day| Some(Date::from_calendar_date(year, month, day as u8).unwrap())),
    );

    let chunks = cells.chunks(7);
    let mut weeks = Vec::new();
    for chunk in &chunks {
        let mut row: Vec<Option<Date>> = chunk.collect();
        row.resize(7, None);
        weeks.push(row);
    }
    weeks
}

/// A `width` x `height` rectangle centered in `r`, shrunk to fit.
pub fn centered_rect(width: u16, height: u16, r: Rect) -> Rect {
    let width = width.min(r.width);
    let height = height.min(r.height);
    Rect {
        x: r.x + (r.width - width) / 2,
        y: r.y + (r.height - height) / 2,
        width,
        height,
    }
}
