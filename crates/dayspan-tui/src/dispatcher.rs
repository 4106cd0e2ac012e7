/// Routes Actions from input handlers and widget listeners back to the
/// main loop.
use tokio::sync::mpsc;

use crate::actions::Action;

/// Clone-able sending half, handed to anything that needs to raise an
/// Action, including range picker listeners.
#[derive(Clone)]
pub struct Dispatcher {
    tx: mpsc::UnboundedSender<Action>,
}

impl Dispatcher {
    pub fn new() -> (Self, ActionReceiver) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, ActionReceiver { rx })
    }

    /// Queue an action for the main loop.
    pub fn dispatch(&self, action: Action) {
        if let Err(e) = self.tx.send(action) {
            log::error!("failed to dispatch action: {}", e);
        }
    }
}

/// Receiving half owned by the main loop.
pub struct ActionReceiver {
    rx: mpsc::UnboundedReceiver<Action>,
}

impl ActionReceiver {
    /// Receive the next action, waiting until one is available.
    pub async fn recv(&mut self) -> Option<Action> {
        self.rx.recv().await
    }
}
