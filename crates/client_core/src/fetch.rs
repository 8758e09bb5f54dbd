//! Cancellable single-flight bridge between a background network call and
//! the UI-owning execution context.

use std::{
    future::Future,
    sync::{
        atomic::{AtomicU8, Ordering},
        Arc,
    },
};

use crossbeam_channel::Sender;
use shared::error::FetchError;
use tokio::runtime::Handle;
use tracing::{debug, warn};

/// Lifecycle of one fetch episode. The three right-hand states are terminal;
/// a coordinator never leaves them and a fresh instance is required for the
/// next fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum FetchState {
    Idle = 0,
    Running = 1,
    Completed = 2,
    Failed = 3,
    Cancelled = 4,
}

impl FetchState {
    fn from_u8(value: u8) -> Self {
        match value {
            0 => FetchState::Idle,
            1 => FetchState::Running,
            2 => FetchState::Completed,
            3 => FetchState::Failed,
            _ => FetchState::Cancelled,
        }
    }
}

/// Delivery callbacks, marshalled to the UI context over the event channel.
#[derive(Debug)]
pub enum FetchEvent<T> {
    ProgressShown { title: String, message: String },
    ProgressHidden,
    Completed(T),
    Failed(FetchError),
}

#[derive(Debug, Clone)]
pub struct ProgressText {
    pub title: String,
    pub message: String,
}

impl ProgressText {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
        }
    }
}

/// Runs one network fetch off the UI context and delivers its outcome back
/// over the event channel, exactly once, unless cancelled first.
///
/// Completion and cancellation race on a compare-exchange of the state word:
/// whichever transition out of `Running` wins decides the episode. The losing
/// side observes a failed exchange and backs off, so a cancelled episode can
/// never emit a delivery event even if the underlying call later finishes.
/// The call itself is not aborted; its result is simply discarded.
pub struct FetchCoordinator<T> {
    runtime: Handle,
    events: Sender<FetchEvent<T>>,
    progress: ProgressText,
    state: Arc<AtomicU8>,
}

impl<T: Send + 'static> FetchCoordinator<T> {
    pub fn new(runtime: Handle, events: Sender<FetchEvent<T>>, progress: ProgressText) -> Self {
        Self {
            runtime,
            events,
            progress,
            state: Arc::new(AtomicU8::new(FetchState::Idle as u8)),
        }
    }

    pub fn state(&self) -> FetchState {
        FetchState::from_u8(self.state.load(Ordering::SeqCst))
    }

    pub fn is_running(&self) -> bool {
        self.state() == FetchState::Running
    }

    /// Begins the fetch. A re-entrant start while the episode is `Running`
    /// is a no-op, as is a start on a finished coordinator.
    pub fn start<F>(&self, fetch: F)
    where
        F: Future<Output = Result<T, FetchError>> + Send + 'static,
    {
        match self.state.compare_exchange(
            FetchState::Idle as u8,
            FetchState::Running as u8,
            Ordering::SeqCst,
            Ordering::SeqCst,
        ) {
            Ok(_) => {}
            Err(current) if current == FetchState::Running as u8 => {
                debug!("fetch already running; start ignored");
                return;
            }
            Err(current) => {
                warn!(
                    state = ?FetchState::from_u8(current),
                    "start called on a finished coordinator; a fresh instance is required"
                );
                return;
            }
        }

        let _ = self.events.send(FetchEvent::ProgressShown {
            title: self.progress.title.clone(),
            message: self.progress.message.clone(),
        });

        let state = Arc::clone(&self.state);
        let events = self.events.clone();
        self.runtime.spawn(async move {
            let outcome = fetch.await;
            let next = match &outcome {
                Ok(_) => FetchState::Completed,
                Err(_) => FetchState::Failed,
            };
            if state
                .compare_exchange(
                    FetchState::Running as u8,
                    next as u8,
                    Ordering::SeqCst,
                    Ordering::SeqCst,
                )
                .is_err()
            {
                debug!("fetch episode cancelled; discarding result");
                return;
            }
            let _ = events.send(FetchEvent::ProgressHidden);
            match outcome {
                Ok(value) => {
                    let _ = events.send(FetchEvent::Completed(value));
                }
                Err(err) => {
                    warn!(error = %err, "fetch failed");
                    let _ = events.send(FetchEvent::Failed(err));
                }
            }
        });
    }

    /// Suppresses any subsequent delivery. Safe to call in any state; only a
    /// transition out of `Idle` or `Running` has an effect.
    pub fn cancel(&self) {
        for from in [FetchState::Running, FetchState::Idle] {
            if self
                .state
                .compare_exchange(
                    from as u8,
                    FetchState::Cancelled as u8,
                    Ordering::SeqCst,
                    Ordering::SeqCst,
                )
                .is_ok()
            {
                debug!(from = ?from, "fetch cancelled");
                return;
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/fetch_tests.rs"]
mod tests;
