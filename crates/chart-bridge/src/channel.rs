// File: crates/chart-bridge/src/channel.rs
// Summary: Ordered, one-directional, text-only command channel from host to sandbox.
// Notes:
// - Sending never blocks and never reports whether anything was applied.
// - The receiving side sees raw text; decoding (and dropping) happens in the sandbox.

use crossbeam_channel::{unbounded, Receiver, Sender, TryRecvError};
use tracing::{debug, warn};

use crate::command::Command;

/// Typed emitter the host talks to. Emission is fire-and-forget.
pub trait CommandSink {
    fn emit(&self, command: &Command);
}

impl<T: CommandSink + ?Sized> CommandSink for &T {
    fn emit(&self, command: &Command) {
        (**self).emit(command)
    }
}

/// Create a connected sender/receiver pair.
pub fn channel() -> (BridgeSender, BridgeReceiver) {
    let (tx, rx) = unbounded::<String>();
    (BridgeSender { tx }, BridgeReceiver { rx })
}

#[derive(Clone)]
pub struct BridgeSender {
    tx: Sender<String>,
}

impl BridgeSender {
    /// Post raw text. Returns false when the sandbox side is gone.
    pub fn post(&self, text: String) -> bool {
        self.tx.send(text).is_ok()
    }
}

impl CommandSink for BridgeSender {
    fn emit(&self, command: &Command) {
        let text = match command.encode() {
            Ok(text) => text,
            Err(e) => {
                warn!(kind = command.kind(), error = %e, "command not sent");
                return;
            }
        };
        if !self.post(text) {
            debug!(kind = command.kind(), "sandbox gone; command discarded");
        }
    }
}

/// Result of a non-blocking read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Poll {
    Message(String),
    Empty,
    Closed,
}

pub struct BridgeReceiver {
    rx: Receiver<String>,
}

impl BridgeReceiver {
    pub fn poll(&self) -> Poll {
        match self.rx.try_recv() {
            Ok(text) => Poll::Message(text),
            Err(TryRecvError::Empty) => Poll::Empty,
            Err(TryRecvError::Disconnected) => Poll::Closed,
        }
    }

    /// Block for the next message; `None` once every sender is dropped and the queue is empty.
    pub fn recv(&self) -> Option<String> {
        self.rx.recv().ok()
    }

    pub fn pending(&self) -> usize {
        self.rx.len()
    }
}
