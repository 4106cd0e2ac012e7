use time::{Date, Month, OffsetDateTime};

/// Null-safe date equality. A missing date never equals anything,
/// including another missing date.
pub fn dates_eq(a: Option<Date>, b: Option<Date>) -> bool {
    matches!((a, b), (Some(a), Some(b)) if a == b)
}

/// Current date in UTC
pub fn today() -> Date {
    OffsetDateTime::now_utc().date()
}

/// Shift a date by whole months, clamping the day-of-month to the length
/// of the target month (Jan 31 shifted by 1 lands on the last day of
/// February).
pub fn shift_month(date: Date, months: i32) -> Date {
    let total = date.year() * 12 + i32::from(u8::from(date.month())) - 1 + months;
    let year = total.div_euclid(12);
    let month = Month::try_from((total.rem_euclid(12) + 1) as u8).unwrap();
    let day = date.day().min(month.length(year));
    Date::from_calendar_date(year, month, day).unwrap()
}
