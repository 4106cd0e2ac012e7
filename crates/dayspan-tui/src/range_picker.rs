/// The range picker facade: interprets single-date picks as a start/end
/// pair and exposes the committed range to the host.
use std::sync::{Arc, RwLock, Weak};

use dayspan_core::{classify_day, ClassSet, RangePatch, RangeState};
use dayspan_events::{Callback, Emitter};
use log::{debug, warn};
use ratatui::{
    layout::Position,
    style::Modifier,
    widgets::{Block, Borders, Clear, Widget},
    Frame,
};
use time::Date;

use crate::mount::{Mounts, RenderTarget};
use crate::picker::{DatePicker, DayDecorator, PickerMode, PickerOptions, SELECT};

/// Event emitted after every committed state change. Payload is the
/// facade handle, so listeners read the post-update state from it.
pub const STATECHANGE: &str = "statechange";

/// Selection strategy, invoked with the underlying picker and the facade
/// whenever the picker reports a day pick.
pub type SelectHandler = Arc<dyn Fn(&DatePicker, &RangePicker) + Send + Sync>;

/// Construction options. Every field is optional; the defaults are the
/// built-in behaviors.
#[derive(Default)]
pub struct RangePickerOptions {
    /// Listener registered for `statechange` up front. Default: none.
    pub on_state_change: Option<Callback<RangePicker>>,
    /// Replaces the built-in selection handler, which feeds the picker's
    /// selected date to [`RangePicker::handle_selection`].
    pub date_selected: Option<SelectHandler>,
    /// Forwarded to the underlying picker, except for the two keys the
    /// facade owns: `mode` is forced to `Permanent` and `decorator` to
    /// the day classifier, whatever the caller put there.
    pub end_opts: PickerOptions,
    /// Host registry used to resolve named mount targets at draw time.
    pub mounts: Mounts,
}

struct RangePickerInner {
    state: RwLock<RangeState>,
    hover: RwLock<Option<Date>>,
    emitter: Emitter<RangePicker>,
    picker: DatePicker,
    target: RenderTarget,
    mounts: Mounts,
    date_selected: SelectHandler,
}

/// Clone-able handle over one shared range picker.
#[derive(Clone)]
pub struct RangePicker {
    inner: Arc<RangePickerInner>,
}

impl RangePicker {
    pub fn new(target: impl Into<RenderTarget>, opts: RangePickerOptions) -> Self {
        let RangePickerOptions {
            on_state_change,
            date_selected,
            end_opts,
            mounts,
        } = opts;

        let picker = DatePicker::new(PickerOptions {
            mode: PickerMode::Permanent,
            decorator: None,
            ..end_opts
        });

        let inner = Arc::new(RangePickerInner {
            state: RwLock::new(RangeState::default()),
            hover: RwLock::new(None),
            emitter: Emitter::new(),
            picker: picker.clone(),
            target: target.into(),
            mounts,
            date_selected: date_selected.unwrap_or_else(default_date_selected),
        });
        let me = Self { inner };

        if let Some(listener) = on_state_change {
            me.on(STATECHANGE, listener);
        }

        // The decoration callback and the selection binding hold weak
        // references: the picker must not keep the facade alive.
        picker.set_decorator(make_decorator(Arc::downgrade(&me.inner)));

        let weak = Arc::downgrade(&me.inner);
        picker.on(
            SELECT,
            Arc::new(move |dp: &DatePicker| {
                if let Some(inner) = weak.upgrade() {
                    let me = RangePicker {
                        inner: Arc::clone(&inner),
                    };
                    (inner.date_selected)(dp, &me);
                }
            }),
        );

        me
    }

    /// Snapshot of the committed range.
    pub fn state(&self) -> RangeState {
        *self.inner.state.read().unwrap()
    }

    /// Interpret one day pick: open a new range, or complete the open
    /// one with endpoints ordered `start <= end`.
    pub fn handle_selection(&self, date: Date) {
        let patch = self.state().select(date);
        self.set_state(patch);
    }

    /// Merge a partial update into the committed state, notify
    /// `statechange` listeners, then ask the picker to re-render.
    /// Listeners always observe the post-merge state.
    pub fn set_state(&self, patch: RangePatch) {
        {
            let mut state = self.inner.state.write().unwrap();
            state.apply(patch);
            debug!("range state now {:?}", *state);
        }
        self.inner.emitter.emit(STATECHANGE, self);
        self.inner.picker.refresh();
    }

    pub fn on(&self, event: &str, callback: Callback<RangePicker>) {
        self.inner.emitter.on(event, callback);
    }

    pub fn off(&self, event: &str, callback: &Callback<RangePicker>) {
        self.inner.emitter.off(event, callback);
    }

    /// The transient preview endpoint, if any.
    pub fn hover(&self) -> Option<Date> {
        *self.inner.hover.read().unwrap()
    }

    /// Track (or clear) the preview endpoint and re-render. Hover is not
    /// committed state, so no `statechange` is emitted.
    pub fn set_hover(&self, date: Option<Date>) {
        let changed = {
            let mut hover = self.inner.hover.write().unwrap();
            let changed = *hover != date;
            *hover = date;
            changed
        };
        if changed {
            self.inner.picker.refresh();
        }
    }

    /// The underlying single-date picker.
    pub fn picker(&self) -> DatePicker {
        self.inner.picker.clone()
    }

    /// Draw the widget into its target: the area is cleared, the outer
    /// wrapper drawn, and the picker rendered in the inner calendar
    /// mount. The hovered day, when visible, is underlined on top of
    /// whatever style the classifier produced for it.
    pub fn render(&self, frame: &mut Frame) {
        let Some(area) = self.inner.target.resolve(&self.inner.mounts) else {
            warn!(
                "render target {:?} did not resolve, skipping draw",
                self.inner.target
            );
            return;
        };
        let buf = frame.buffer_mut();

        Clear.render(area, buf);
        let wrapper = Block::default().borders(Borders::ALL).title(" Date range ");
        let cal_mount = wrapper.inner(area);
        wrapper.render(area, buf);
        self.inner.picker.render(cal_mount, buf);

        if let Some(hover) = self.hover() {
            if let Some(pos) = self.inner.picker.cell_position(hover) {
                for dx in 0..2u16 {
                    if let Some(cell) = buf.cell_mut(Position::new(pos.x + dx, pos.y)) {
                        let style = cell.style().add_modifier(Modifier::UNDERLINED);
                        cell.set_style(style);
                    }
                }
            }
        }
    }
}

fn default_date_selected() -> SelectHandler {
    Arc::new(|picker, range| {
        if let Some(date) = picker.selected() {
            range.handle_selection(date);
        }
    })
}

fn make_decorator(inner: Weak<RangePickerInner>) -> DayDecorator {
    Arc::new(move |day| match inner.upgrade() {
        Some(inner) => {
            let state = *inner.state.read().unwrap();
            let hover = *inner.hover.read().unwrap();
            classify_day(day, &state, hover)
        }
        None => ClassSet::default(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use dayspan_core::DayClass;
    use ratatui::layout::Rect;
    use time::macros::date;

    fn target() -> Rect {
        Rect::new(0, 0, 28, 14)
    }

    #[test]
    fn test_fixed_picker_keys_are_overridden_not_merged() {
        let end_opts = PickerOptions {
            mode: PickerMode::Popup,
            title: Some("custom".to_string()),
            highlight_today: false,
            decorator: Some(Arc::new(|_| {
                let mut classes = ClassSet::new();
                classes.insert(DayClass::Hover);
                classes
            })),
        };
        let range_picker = RangePicker::new(
            target(),
            RangePickerOptions {
                end_opts,
                ..Default::default()
            },
        );
        let picker = range_picker.picker();

        // mode and decorator belong to the facade...
        assert_eq!(picker.mode(), PickerMode::Permanent);
        let classes = picker.decorate(date!(2024 - 01 - 10)).unwrap();
        assert!(classes.is_empty());

        // ...while the rest of end_opts is forwarded untouched, which
        // the classifier makes observable once state exists
        range_picker.handle_selection(date!(2024 - 01 - 10));
        let classes = picker.decorate(date!(2024 - 01 - 10)).unwrap();
        assert!(classes.contains(DayClass::RangeStart));
        assert!(classes.contains(DayClass::Selected));
    }

    #[test]
    fn test_decorator_sees_hover_preview() {
        let range_picker = RangePicker::new(target(), RangePickerOptions::default());
        let picker = range_picker.picker();

        range_picker.handle_selection(date!(2024 - 01 - 05));
        range_picker.set_hover(Some(date!(2024 - 01 - 08)));

        let classes = picker.decorate(date!(2024 - 01 - 06)).unwrap();
        assert!(classes.contains(DayClass::InRange));
        assert!(classes.contains(DayClass::Hover));
    }

    #[test]
    fn test_default_selection_handler_feeds_state_machine() {
        let range_picker = RangePicker::new(target(), RangePickerOptions::default());
        range_picker.picker().select_date(date!(2024 - 01 - 10));
        assert_eq!(
            range_picker.state(),
            RangeState {
                start: Some(date!(2024 - 01 - 10)),
                end: None,
            }
        );
    }

    #[test]
    fn test_dropping_every_handle_releases_the_widget() {
        let range_picker = RangePicker::new(target(), RangePickerOptions::default());
        let picker = range_picker.picker();
        drop(range_picker);

        // the picker only holds weak references back to the facade, so a
        // late pick is absorbed without effect
        picker.select_date(date!(2024 - 01 - 10));
        assert_eq!(picker.selected(), Some(date!(2024 - 01 - 10)));
    }
}
