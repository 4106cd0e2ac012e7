/// Demo shell: owns the range picker and the event loop.
use std::io;
use std::sync::Arc;
use std::time::Duration;

use ratatui::crossterm::event::{self, Event, KeyEventKind};

use crate::actions::Action;
use crate::config;
use crate::dispatcher::{ActionReceiver, Dispatcher};
use crate::keyboard;
use crate::logger::{self, LogBuffer};
use crate::mount::Mounts;
use crate::range_picker::{RangePicker, RangePickerOptions};
use crate::stores::UIStore;
use crate::ui::render_layout;

pub struct App {
    /// Dispatcher for queueing actions
    dispatcher: Dispatcher,

    /// Mount registry the layout fills in every frame
    mounts: Mounts,

    /// The widget under demonstration
    range_picker: RangePicker,

    /// Store for shell state
    ui_store: UIStore,

    /// Captured application logs
    log_buffer: LogBuffer,
}

impl App {
    pub fn new() -> Result<(Self, ActionReceiver), Box<dyn std::error::Error>> {
        let (dispatcher, action_receiver) = Dispatcher::new();
        let log_buffer = logger::init_memory_logger()?;
        let mounts = Mounts::new();
        let ui_store = UIStore::new();

        // Committed changes come back into the loop as actions, like any
        // other event source.
        let tx = dispatcher.clone();
        let range_picker = RangePicker::new(
            config::CALENDAR_MOUNT,
            RangePickerOptions {
                on_state_change: Some(Arc::new(move |rp: &RangePicker| {
                    tx.dispatch(Action::RangeChanged(rp.state()));
                })),
                mounts: mounts.clone(),
                ..Default::default()
            },
        );

        Ok((
            Self {
                dispatcher,
                mounts,
                range_picker,
                ui_store,
                log_buffer,
            },
            action_receiver,
        ))
    }

    /// Main event loop
    pub async fn run(
        &mut self,
        terminal: &mut crate::tui::Tui,
        mut action_receiver: ActionReceiver,
    ) -> io::Result<()> {
        log::info!("dayspan demo started");

        loop {
            terminal.draw(|frame| {
                render_layout(
                    frame,
                    &self.mounts,
                    &self.range_picker,
                    &self.ui_store,
                    &self.log_buffer,
                );
            })?;

            if self.ui_store.should_exit() {
                break;
            }

            tokio::select! {
                // Poll for keyboard and mouse events
                _ = tokio::time::sleep(Duration::from_millis(16)) => {
                    if event::poll(Duration::from_millis(0))? {
                        match event::read()? {
                            Event::Key(key_event) => {
                                // Only process key press events (not release)
                                if key_event.kind == KeyEventKind::Press {
                                    if let Some(action) = keyboard::handle_key_event(
                                        key_event,
                                        &self.range_picker,
                                        &self.ui_store,
                                    ) {
                                        self.dispatcher.dispatch(action);
                                    }
                                }
                            }
                            Event::Mouse(mouse_event) => {
                                if let Some(action) = keyboard::handle_mouse_event(
                                    mouse_event,
                                    &self.range_picker,
                                ) {
                                    self.dispatcher.dispatch(action);
                                }
                            }
                            _ => {}
                        }
                    }
                }

                // Process queued actions
                Some(action) = action_receiver.recv() => {
                    self.handle_action(&action);
                }
            }
        }

        Ok(())
    }

    /// Route an action to the widget and the shell stores.
    fn handle_action(&mut self, action: &Action) {
        log::debug!("handling action: {:?}", action);

        match action {
            Action::SelectDate(date) => {
                self.range_picker.picker().select_date(*date);
            }
            Action::Hover(date) => {
                // keep the hovered month visible while the cursor moves
                if let Some(date) = date {
                    self.range_picker.picker().scroll_to(*date);
                }
                self.range_picker.set_hover(*date);
            }
            Action::ShiftMonth(months) => {
                self.range_picker.picker().shift_view(*months);
            }
            Action::ClearRange => {
                self.range_picker.set_hover(None);
                self.range_picker.set_state(dayspan_core::RangePatch::clear());
            }
            _ => {}
        }

        self.ui_store.reduce(action);
    }
}
