/// UI module - layout and panels for the demo shell
pub mod layout;
pub mod status_panel;

pub use layout::render_layout;
