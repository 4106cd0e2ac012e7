mod classify;
mod dates;
mod range;

// public api
pub use classify::{classify_day, ClassSet, DayClass};
pub use dates::{dates_eq, shift_month, today};
pub use range::{RangePatch, RangeState};
