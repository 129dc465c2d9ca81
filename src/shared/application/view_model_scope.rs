//! Task ownership for UI state holders.
//!
//! Everything a view-model spawns runs under a child of the scope's
//! [`CancellationToken`]; closing (or dropping) the scope stops all of it.
//! A [`JobSlot`] holds the one replaceable job of a kind (the current detail
//! subscription, the current feed), cancelling its predecessor on replace.

use std::future::Future;
use std::sync::Mutex;
use tokio::sync::{mpsc, watch};
use tokio_util::sync::CancellationToken;

use super::ui_state::UiEvent;

#[derive(Debug, Default)]
pub struct ViewModelScope {
    token: CancellationToken,
}

impl ViewModelScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawns `work`; it is dropped at its next suspension point once the
    /// returned token (or the scope) is cancelled.
    pub fn launch<F>(&self, work: F) -> CancellationToken
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.launch_job(|_| work)
    }

    /// Like [`launch`](Self::launch), but hands the job its own token so
    /// state writes can be fenced with [`send_unless_cancelled`].
    pub fn launch_job<F, Fut>(&self, work: F) -> CancellationToken
    where
        F: FnOnce(CancellationToken) -> Fut,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let job = self.token.child_token();
        let guard = job.clone();
        let work = work(job.clone());
        tokio::spawn(async move {
            // Cancellation wins whenever both branches are ready.
            tokio::select! {
                biased;
                _ = guard.cancelled() => {}
                _ = work => {}
            }
        });
        job
    }

    pub fn close(&self) {
        self.token.cancel();
    }

    pub fn is_closed(&self) -> bool {
        self.token.is_cancelled()
    }
}

impl Drop for ViewModelScope {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

/// Applies `modify` under the state lock unless `job` is already cancelled.
///
/// Callers cancel the superseded job before writing the successor's first
/// state, so a stale job either lands before that write or not at all.
pub fn send_unless_cancelled<T>(
    state: &watch::Sender<T>,
    job: &CancellationToken,
    modify: impl FnOnce(&mut T),
) -> bool {
    state.send_if_modified(|value| {
        if job.is_cancelled() {
            return false;
        }
        modify(value);
        true
    })
}

#[derive(Debug, Default)]
pub struct JobSlot {
    current: Mutex<Option<CancellationToken>>,
}

impl JobSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn replace(&self, job: CancellationToken) {
        if let Ok(mut current) = self.current.lock() {
            if let Some(previous) = current.replace(job) {
                previous.cancel();
            }
        }
    }

    pub fn cancel(&self) {
        if let Ok(mut current) = self.current.lock() {
            if let Some(previous) = current.take() {
                previous.cancel();
            }
        }
    }
}

/// Single-consumer channel for [`UiEvent`]s.
#[derive(Debug)]
pub struct UiEvents {
    sender: mpsc::UnboundedSender<UiEvent>,
    receiver: Mutex<Option<mpsc::UnboundedReceiver<UiEvent>>>,
}

impl Default for UiEvents {
    fn default() -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        Self {
            sender,
            receiver: Mutex::new(Some(receiver)),
        }
    }
}

impl UiEvents {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sender(&self) -> mpsc::UnboundedSender<UiEvent> {
        self.sender.clone()
    }

    /// Hands out the receiving end; `None` after the first call.
    pub fn take_receiver(&self) -> Option<mpsc::UnboundedReceiver<UiEvent>> {
        self.receiver.lock().ok().and_then(|mut receiver| receiver.take())
    }
}
