use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::oneshot;
use tracing::{debug, warn};

use super::Result;

/// Result cell that accepts exactly one write; later writes are no-ops.
pub struct ResultSlot<T> {
    sender: Mutex<Option<oneshot::Sender<T>>>,
    rejected: AtomicUsize,
}

impl<T> ResultSlot<T> {
    pub fn new() -> (Arc<Self>, oneshot::Receiver<T>) {
        let (tx, rx) = oneshot::channel();
        let slot = Arc::new(Self {
            sender: Mutex::new(Some(tx)),
            rejected: AtomicUsize::new(0),
        });
        (slot, rx)
    }

    /// Returns `true` if this call was the one that set the value.
    pub fn try_set(&self, value: T) -> bool {
        let sender = match self.sender.lock() {
            Ok(mut guard) => guard.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        };

        match sender {
            Some(tx) => {
                // The waiting side may already be gone; the slot still counts as set.
                let _ = tx.send(value);
                true
            }
            None => {
                self.rejected.fetch_add(1, Ordering::SeqCst);
                false
            }
        }
    }

    pub fn is_set(&self) -> bool {
        match self.sender.lock() {
            Ok(guard) => guard.is_none(),
            Err(poisoned) => poisoned.into_inner().is_none(),
        }
    }

    /// Number of writes that arrived after the slot was already set
    pub fn rejected(&self) -> usize {
        self.rejected.load(Ordering::SeqCst)
    }
}

/// Run a blocking probe on its own thread and race it against `timeout`.
///
/// Whichever side finishes first decides the result. A probe still running
/// at the deadline is abandoned: the OS call cannot be interrupted, so the
/// thread finishes on its own and its outcome is dropped.
pub async fn race_deadline<F>(label: &str, timeout: Duration, work: F) -> bool
where
    F: FnOnce() -> Result<()> + Send + 'static,
{
    let (slot, outcome) = ResultSlot::new();
    run_race(slot, outcome, label, timeout, work).await
}

async fn run_race<F>(
    slot: Arc<ResultSlot<bool>>,
    outcome: oneshot::Receiver<bool>,
    label: &str,
    timeout: Duration,
    work: F,
) -> bool
where
    F: FnOnce() -> Result<()> + Send + 'static,
{
    let worker_slot = slot.clone();
    let worker_label = label.to_string();
    let spawned = std::thread::Builder::new()
        .name("netreach-probe".to_string())
        .spawn(move || {
            let reached = match work() {
                Ok(()) => true,
                Err(e) => {
                    debug!("Unable to reach {}: {}", worker_label, e);
                    false
                }
            };

            if !worker_slot.try_set(reached) {
                debug!("Probe of {} completed after its deadline, result discarded", worker_label);
            }
        });

    if let Err(e) = spawned {
        warn!("Cannot start probe thread for {}: {}", label, e);
        return false;
    }

    let timer_slot = slot;
    let timer_label = label.to_string();
    let timer = tokio::spawn(async move {
        tokio::time::sleep(timeout).await;
        if timer_slot.try_set(false) {
            debug!("Probe of {} timed out after {:?}", timer_label, timeout);
        }
    });

    let reached = outcome.await.unwrap_or(false);
    timer.abort();
    reached
}
