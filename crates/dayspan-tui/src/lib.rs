use std::io;

// Demo shell modules
mod actions;
mod app;
mod dispatcher;
mod keyboard;
mod logger;
mod stores;
mod ui;

// The widget itself
mod common;
pub mod config;
mod mount;
mod picker;
mod range_picker;
mod tui;

pub use app::App;
pub use mount::{Mounts, RenderTarget};
pub use picker::{DatePicker, DayDecorator, PickerMode, PickerOptions};
pub use range_picker::{RangePicker, RangePickerOptions, SelectHandler, STATECHANGE};

/// Run the demo shell until the user quits.
pub async fn tui_main() -> io::Result<()> {
    // Install color-eyre for readable panics BEFORE terminal init
    if let Err(e) = color_eyre::install() {
        eprintln!("warning: failed to install color-eyre: {}", e);
    }

    let mut terminal = tui::init()?;

    let (mut app, action_receiver) = match App::new() {
        Ok(pair) => pair,
        Err(e) => {
            // restore the terminal before reporting
            let _ = tui::restore();
            eprintln!("failed to initialize application: {}", e);
            return Err(io::Error::new(io::ErrorKind::Other, format!("{}", e)));
        }
    };

    let result = app.run(&mut terminal, action_receiver).await;

    let _ = tui::restore();

    result
}
