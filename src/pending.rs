//! Background jobs whose result is picked up by the frame loop.
//!
//! The worker owns the sending half of a one-slot channel. Dropping the
//! `Pending` drops the receiver, so a late result is discarded by the
//! worker's failed `send` and never reaches torn-down state.

use std::sync::mpsc::{self, Receiver, RecvTimeoutError, TryRecvError};
use std::thread;
use std::time::Duration;
use tracing::warn;

#[derive(Debug, PartialEq, Eq)]
pub enum Poll<T> {
    Ready(T),
    Waiting,
    /// Worker exited (or never started) without sending
    Lost,
}

pub struct Pending<T> {
    rx: Receiver<T>,
}

impl<T: Send + 'static> Pending<T> {
    pub fn spawn<F>(name: &str, job: F) -> Self
    where
        F: FnOnce() -> T + Send + 'static,
    {
        let (tx, rx) = mpsc::sync_channel(1);
        let spawned = thread::Builder::new().name(name.to_string()).spawn(move || {
            // Receiver gone means the owner was torn down.
            let _ = tx.send(job());
        });
        if let Err(e) = spawned {
            // The closure (and its sender) is dropped, so poll reports Lost.
            warn!("Failed to spawn worker {}: {}", name, e);
        }
        Self { rx }
    }

    pub fn poll(&self) -> Poll<T> {
        match self.rx.try_recv() {
            Ok(value) => Poll::Ready(value),
            Err(TryRecvError::Empty) => Poll::Waiting,
            Err(TryRecvError::Disconnected) => Poll::Lost,
        }
    }

    pub fn wait(&self, timeout: Duration) -> Poll<T> {
        match self.rx.recv_timeout(timeout) {
            Ok(value) => Poll::Ready(value),
            Err(RecvTimeoutError::Timeout) => Poll::Waiting,
            Err(RecvTimeoutError::Disconnected) => Poll::Lost,
        }
    }
}
