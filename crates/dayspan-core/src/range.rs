use serde::{Deserialize, Serialize};
use time::Date;

/// The committed start/end pair of a range selection.
///
/// Both fields start out empty. While a selection is underway only
/// `start` is set; once completed, `start <= end` always holds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeState {
    pub start: Option<Date>,
    pub end: Option<Date>,
}

/// A partial update to a [`RangeState`].
///
/// Each field is tri-state: `None` leaves the field untouched,
/// `Some(None)` clears it and `Some(Some(date))` sets it, so a patch can
/// touch either endpoint independently.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RangePatch {
    pub start: Option<Option<Date>>,
    pub end: Option<Option<Date>>,
}

impl RangePatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Patch that clears both endpoints.
    pub fn clear() -> Self {
        Self {
            start: Some(None),
            end: Some(None),
        }
    }

    /// Patch that opens a fresh range at `start`, dropping any end.
    pub fn open(start: Date) -> Self {
        Self {
            start: Some(Some(start)),
            end: Some(None),
        }
    }

    /// Patch that sets both endpoints.
    pub fn complete(start: Date, end: Date) -> Self {
        Self {
            start: Some(Some(start)),
            end: Some(Some(end)),
        }
    }

    pub fn start(mut self, start: Option<Date>) -> Self {
        self.start = Some(start);
        self
    }

    pub fn end(mut self, end: Option<Date>) -> Self {
        self.end = Some(end);
        self
    }
}

impl RangeState {
    /// True while a range is awaiting its second pick.
    pub fn is_open(&self) -> bool {
        self.start.is_some() && self.end.is_none()
    }

    /// Key-wise merge of a partial update. Fields absent from the patch
    /// keep their current value.
    pub fn apply(&mut self, patch: RangePatch) {
        if let Some(start) = patch.start {
            self.start = start;
        }
        if let Some(end) = patch.end {
            self.end = end;
        }
    }

    /// Consuming form of [`apply`](Self::apply).
    pub fn merged(mut self, patch: RangePatch) -> Self {
        self.apply(patch);
        self
    }

    /// Interpret a single day-pick against the current state.
    ///
    /// With no range underway (nothing picked yet, or the previous range
    /// already completed) the pick opens a new range. With a range open,
    /// the pick completes it, ordered so that `start <= end`; picking the
    /// start date a second time yields a zero-length range.
    pub fn select(&self, picked: Date) -> RangePatch {
        match self.start {
            Some(start) if self.end.is_none() => {
                RangePatch::complete(picked.min(start), picked.max(start))
            }
            _ => RangePatch::open(picked),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    fn apply_pick(state: RangeState, picked: Date) -> RangeState {
        state.merged(state.select(picked))
    }

    #[test]
    fn test_first_pick_opens_range() {
        let state = apply_pick(RangeState::default(), date!(2024 - 01 - 10));
        assert_eq!(state.start, Some(date!(2024 - 01 - 10)));
        assert_eq!(state.end, None);
        assert!(state.is_open());
    }

    #[test]
    fn test_second_pick_completes_ordered() {
        let state = apply_pick(RangeState::default(), date!(2024 - 01 - 10));
        let state = apply_pick(state, date!(2024 - 01 - 05));
        assert_eq!(state.start, Some(date!(2024 - 01 - 05)));
        assert_eq!(state.end, Some(date!(2024 - 01 - 10)));
        assert!(!state.is_open());
    }

    #[test]
    fn test_second_pick_after_start_keeps_order() {
        let state = apply_pick(RangeState::default(), date!(2024 - 01 - 05));
        let state = apply_pick(state, date!(2024 - 01 - 10));
        assert_eq!(state.start, Some(date!(2024 - 01 - 05)));
        assert_eq!(state.end, Some(date!(2024 - 01 - 10)));
    }

    #[test]
    fn test_third_pick_starts_over() {
        let state = apply_pick(RangeState::default(), date!(2024 - 01 - 10));
        let state = apply_pick(state, date!(2024 - 01 - 05));
        let state = apply_pick(state, date!(2024 - 01 - 20));
        assert_eq!(state.start, Some(date!(2024 - 01 - 20)));
        assert_eq!(state.end, None);
    }

    #[test]
    fn test_same_day_twice_is_zero_length_range() {
        let state = apply_pick(RangeState::default(), date!(2024 - 01 - 10));
        let state = apply_pick(state, date!(2024 - 01 - 10));
        assert_eq!(state.start, Some(date!(2024 - 01 - 10)));
        assert_eq!(state.end, Some(date!(2024 - 01 - 10)));
    }

    #[test]
    fn test_patch_merge_is_keywise() {
        let mut state = RangeState {
            start: Some(date!(2024 - 01 - 05)),
            end: Some(date!(2024 - 01 - 10)),
        };

        // untouched field survives
        state.apply(RangePatch::new().end(Some(date!(2024 - 01 - 12))));
        assert_eq!(state.start, Some(date!(2024 - 01 - 05)));
        assert_eq!(state.end, Some(date!(2024 - 01 - 12)));

        // explicit clear
        state.apply(RangePatch::new().end(None));
        assert_eq!(state.start, Some(date!(2024 - 01 - 05)));
        assert_eq!(state.end, None);

        state.apply(RangePatch::clear());
        assert_eq!(state, RangeState::default());
    }

    #[test]
    fn test_empty_patch_is_noop() {
        let mut state = RangeState {
            start: Some(date!(2024 - 01 - 05)),
            end: None,
        };
        state.apply(RangePatch::new());
        assert_eq!(state.start, Some(date!(2024 - 01 - 05)));
        assert_eq!(state.end, None);
    }

    #[test]
    fn test_state_round_trips_through_json() {
        let state = RangeState {
            start: Some(date!(2024 - 01 - 05)),
            end: Some(date!(2024 - 01 - 10)),
        };
        let encoded = serde_json::to_string(&state).unwrap();
        let decoded: RangeState = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, state);
    }
}
