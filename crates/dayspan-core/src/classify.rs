use std::fmt;

use serde::{Deserialize, Serialize};
use time::Date;

use crate::dates::dates_eq;
use crate::range::RangeState;

/// Visual role tags for a single rendered day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DayClass {
    RangeStart,
    RangeEnd,
    Selected,
    InRange,
    Hover,
}

impl DayClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RangeStart => "range-start",
            Self::RangeEnd => "range-end",
            Self::Selected => "selected",
            Self::InRange => "in-range",
            Self::Hover => "hover",
        }
    }
}

impl fmt::Display for DayClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An insertion-ordered, duplicate-free collection of [`DayClass`] tags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassSet {
    classes: Vec<DayClass>,
}

impl ClassSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, class: DayClass) {
        if !self.contains(class) {
            self.classes.push(class);
        }
    }

    pub fn contains(&self, class: DayClass) -> bool {
        self.classes.contains(&class)
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = DayClass> + '_ {
        self.classes.iter().copied()
    }
}

impl fmt::Display for ClassSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, class) in self.classes.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            f.write_str(class.as_str())?;
        }
        Ok(())
    }
}

/// Compute the visual tags for `day` given the committed range state and
/// the transient hover date.
///
/// The far comparison endpoint is the committed end when present,
/// otherwise the hover date, so an open range previews against the
/// hovered day. The `hover` tag is attached to every rendered day while
/// any hover date is tracked, not only the hovered day itself; a
/// renderer that wants to mark just the hovered cell compares the day
/// against the hover date directly.
///
/// Pure: identical inputs always produce the identical tag set.
pub fn classify_day(day: Date, state: &RangeState, hover: Option<Date>) -> ClassSet {
    let mut classes = ClassSet::new();

    let far = state.end.or(hover);
    let in_range = match (state.start, far) {
        (Some(start), Some(far)) => far.min(start) <= day && day <= far.max(start),
        _ => false,
    };

    if hover.is_some() {
        classes.insert(DayClass::Hover);
    }
    if dates_eq(Some(day), state.start) {
        classes.insert(DayClass::RangeStart);
        classes.insert(DayClass::Selected);
    }
    if dates_eq(Some(day), state.end) {
        classes.insert(DayClass::RangeEnd);
        classes.insert(DayClass::Selected);
    }
    if in_range {
        classes.insert(DayClass::InRange);
    }

    classes
}
