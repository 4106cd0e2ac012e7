/// Shell state: help overlay, exit flag, and the history of committed
/// range changes shown in the status panel.
use std::sync::{Arc, RwLock};

use dayspan_core::RangeState;

use crate::actions::Action;
use crate::config;

#[derive(Debug, Clone, Default)]
pub struct UIState {
    /// Whether the help overlay is visible
    pub show_help: bool,

    /// Whether the application should exit
    pub should_exit: bool,

    /// Most recent committed states, oldest first, bounded by
    /// `STATE_HISTORY_MAX`
    pub history: Vec<RangeState>,
}

/// Store that holds shell-level state
#[derive(Clone)]
pub struct UIStore {
    state: Arc<RwLock<UIState>>,
}

impl UIStore {
    pub fn new() -> Self {
        Self {
            state: Arc::new(RwLock::new(UIState::default())),
        }
    }

    /// Get a read-only snapshot of the current state
    pub fn get_state(&self) -> UIState {
        self.state.read().unwrap().clone()
    }

    /// Reducer: fold an action into the shell state
    pub fn reduce(&self, action: &Action) {
        let mut state = self.state.write().unwrap();

        match action {
            Action::ToggleHelp => {
                state.show_help = !state.show_help;
            }

            Action::Quit => {
                state.should_exit = true;
            }

            Action::RangeChanged(range) => {
                if state.history.len() >= config::STATE_HISTORY_MAX {
                    state.history.remove(0);
                }
                state.history.push(*range);
            }

            _ => {
                // not relevant to this store
            }
        }
    }

    pub fn should_exit(&self) -> bool {
        self.state.read().unwrap().should_exit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn test_initial_state() {
        let store = UIStore::new();
        let state = store.get_state();
        assert_eq!(state.show_help, false);
        assert_eq!(state.should_exit, false);
        assert!(state.history.is_empty());
    }

    #[test]
    fn test_toggle_help() {
        let store = UIStore::new();

        store.reduce(&Action::ToggleHelp);
        assert_eq!(store.get_state().show_help, true);

        store.reduce(&Action::ToggleHelp);
        assert_eq!(store.get_state().show_help, false);
    }

    #[test]
    fn test_quit() {
        let store = UIStore::new();
        store.reduce(&Action::Quit);
        assert_eq!(store.should_exit(), true);
    }

    #[test]
    fn test_history_is_bounded() {
        let store = UIStore::new();
        for day in 1..=(config::STATE_HISTORY_MAX + 3) {
            let state = RangeState {
                start: Some(date!(2024 - 01 - 01).replace_day(day as u8).unwrap()),
                end: None,
            };
            store.reduce(&Action::RangeChanged(state));
        }

        let history = store.get_state().history;
        assert_eq!(history.len(), config::STATE_HISTORY_MAX);
        // oldest entries fell off the front
        assert_eq!(
            history[0].start,
            Some(date!(2024 - 01 - 04)),
        );
    }
}
