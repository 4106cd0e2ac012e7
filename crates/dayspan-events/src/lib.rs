mod emitter;

// public api
pub use emitter::{Callback, Emitter};
