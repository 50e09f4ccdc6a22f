// completion.rs

use std::time::Duration;

use tokio::sync::oneshot;

use crate::error::{DialogError, Result};

/// How a dialog finished.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Outcome<T> {
    Confirmed(T),
    Cancelled,
}

impl<T> Outcome<T> {
    pub fn into_result(self) -> Result<T> {
        match self {
            Outcome::Confirmed(value) => Ok(value),
            Outcome::Cancelled => Err(DialogError::Cancelled),
        }
    }
}

/// Creates a one-shot rendezvous between the UI side, which resolves it
/// exactly once, and a single waiting consumer.
pub fn channel<T>() -> (Completer<T>, Completion<T>) {
    let (sender, receiver) = oneshot::channel();
    (
        Completer { sender },
        Completion {
            receiver: Some(receiver),
        },
    )
}

/// Producer half, held by the dialog on the UI thread. Resolving consumes it,
/// so a result can only be delivered once.
#[derive(Debug)]
pub struct Completer<T> {
    sender: oneshot::Sender<Outcome<T>>,
}

impl<T> Completer<T> {
    /// Delivers the confirmed value. Returns `false` when nobody is waiting anymore.
    pub fn confirm(self, value: T) -> bool {
        self.resolve(Outcome::Confirmed(value))
    }

    pub fn cancel(self) -> bool {
        self.resolve(Outcome::Cancelled)
    }

    fn resolve(self, outcome: Outcome<T>) -> bool {
        let delivered = self.sender.send(outcome).is_ok();
        if !delivered {
            log::debug!("Dialog resolved with no consumer waiting");
        }
        delivered
    }
}

/// Consumer half. Dropping the `Completer` without resolving it wakes the
/// consumer with `DialogError::Disconnected`.
#[derive(Debug)]
pub struct Completion<T> {
    receiver: Option<oneshot::Receiver<Outcome<T>>>,
}

impl<T> Completion<T> {
    /// Blocks the current thread until the dialog resolves.
    ///
    /// Must not be called from inside an async runtime; use [`Completion::recv`] there.
    pub fn wait(&mut self) -> Result<Outcome<T>> {
        let receiver = self.receiver.take().ok_or(DialogError::AlreadyResolved)?;
        receiver
            .blocking_recv()
            .map_err(|_| DialogError::Disconnected)
    }

    /// Like [`Completion::wait`], but gives up with `DialogError::Timeout` after
    /// `timeout`. A timed-out completion can be waited on again.
    ///
    /// Drives the wait on its own short-lived runtime, so it must not be called
    /// from inside an async runtime either.
    pub fn wait_timeout(&mut self, timeout: Duration) -> Result<Outcome<T>> {
        let receiver = self.receiver.as_mut().ok_or(DialogError::AlreadyResolved)?;
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .build()?;
        let outcome = runtime.block_on(async { tokio::time::timeout(timeout, receiver).await });
        match outcome {
            Err(_elapsed) => Err(DialogError::Timeout),
            Ok(received) => {
                self.receiver = None;
                received.map_err(|_| DialogError::Disconnected)
            }
        }
    }

    pub async fn recv(&mut self) -> Result<Outcome<T>> {
        let receiver = self.receiver.as_mut().ok_or(DialogError::AlreadyResolved)?;
        let outcome = receiver.await.map_err(|_| DialogError::Disconnected);
        self.receiver = None;
        outcome
    }

    /// Non-blocking check. `Ok(None)` means the dialog is still open.
    pub fn try_take(&mut self) -> Result<Option<Outcome<T>>> {
        let receiver = self.receiver.as_mut().ok_or(DialogError::AlreadyResolved)?;
        match receiver.try_recv() {
            Ok(outcome) => {
                self.receiver = None;
                Ok(Some(outcome))
            }
            Err(oneshot::error::TryRecvError::Empty) => Ok(None),
            Err(oneshot::error::TryRecvError::Closed) => {
                self.receiver = None;
                Err(DialogError::Disconnected)
            }
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.receiver.is_none()
    }
}
