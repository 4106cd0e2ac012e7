/// Minimal synchronous publish/subscribe primitive keyed by event name.
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use log::trace;

/// A subscriber callback. Identity (the `Arc` allocation) is what
/// [`Emitter::off`] matches on, so keep hold of the `Arc` you subscribed
/// with if you intend to unsubscribe later.
pub type Callback<T> = Arc<dyn Fn(&T) + Send + Sync>;

/// Named-event emitter with synchronous delivery.
///
/// Cloning yields another handle onto the same listener table. Listeners
/// for an event run in subscription order; `emit` delivers to a snapshot
/// of the current list, so subscribing or unsubscribing from inside a
/// callback takes effect from the next emit onward.
pub struct Emitter<T> {
    channels: Arc<RwLock<HashMap<String, Vec<Callback<T>>>>>,
}

impl<T> Clone for Emitter<T> {
    fn clone(&self) -> Self {
        Self {
            channels: Arc::clone(&self.channels),
        }
    }
}

impl<T> Default for Emitter<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Emitter<T> {
    pub fn new() -> Self {
        Self {
            channels: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Register `callback` for `event`, after any existing listeners.
    pub fn on(&self, event: &str, callback: Callback<T>) {
        let mut channels = self.channels.write().unwrap();
        channels.entry(event.to_string()).or_default().push(callback);
    }

    /// Remove a previously registered callback by identity. Unknown
    /// events and callbacks that were never registered are ignored.
    pub fn off(&self, event: &str, callback: &Callback<T>) {
        let mut channels = self.channels.write().unwrap();
        if let Some(listeners) = channels.get_mut(event) {
            listeners.retain(|registered| !Arc::ptr_eq(registered, callback));
        }
    }

    /// Synchronously deliver `payload` to every listener of `event`. The
    /// listener table is not locked during delivery, so callbacks are
    /// free to call back into this emitter.
    pub fn emit(&self, event: &str, payload: &T) {
        let listeners: Vec<Callback<T>> = {
            let channels = self.channels.read().unwrap();
            match channels.get(event) {
                Some(listeners) => listeners.clone(),
                None => return,
            }
        };
        trace!("emitting {} to {} listener(s)", event, listeners.len());
        for listener in listeners {
            listener(payload);
        }
    }

    /// Number of listeners currently registered for `event`.
    pub fn listener_count(&self, event: &str) -> usize {
        self.channels
            .read()
            .unwrap()
            .get(event)
            .map_or(0, |listeners| listeners.len())
    }
}
