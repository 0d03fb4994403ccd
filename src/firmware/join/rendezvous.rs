use core::{
    future::pending,
    sync::atomic::{AtomicBool, Ordering},
};

use embassy_futures::select::{select3, Either3};
use embassy_sync::{blocking_mutex::raw::CriticalSectionRawMutex, signal::Signal};
use embassy_time::{Duration, Timer};

use super::super::types::{JoinError, JoinOutcome};

/// One-shot hand-off of the terminal join outcome to the waiting caller.
///
/// The latch makes `publish` succeed at most once per attempt, no matter how
/// many contexts race to call it. `reset` re-arms it for the next attempt.
pub struct JoinRendezvous {
    outcome: Signal<CriticalSectionRawMutex, JoinOutcome>,
    published: AtomicBool,
}

impl JoinRendezvous {
    pub const fn new() -> Self {
        Self {
            outcome: Signal::new(),
            published: AtomicBool::new(false),
        }
    }

    /// Returns `false` when an outcome was already published for this attempt.
    pub fn publish(&self, outcome: JoinOutcome) -> bool {
        if self.published.swap(true, Ordering::AcqRel) {
            return false;
        }
        self.outcome.signal(outcome);
        true
    }

    pub fn is_published(&self) -> bool {
        self.published.load(Ordering::Acquire)
    }

    pub fn reset(&self) {
        self.outcome.reset();
        self.published.store(false, Ordering::Release);
    }

    /// Waits for the outcome, consuming it. Unbounded unless `options` says otherwise.
    pub async fn wait(&self, options: WaitOptions<'_>) -> Result<JoinOutcome, JoinError> {
        let cancelled = async {
            match options.cancel {
                Some(cancel) => cancel.cancelled().await,
                None => pending::<()>().await,
            }
        };
        let deadline = async {
            match options.timeout {
                Some(timeout) => Timer::after(timeout).await,
                None => pending::<()>().await,
            }
        };

        match select3(self.outcome.wait(), cancelled, deadline).await {
            Either3::First(outcome) => Ok(outcome),
            Either3::Second(()) => Err(JoinError::Cancelled),
            Either3::Third(()) => Err(JoinError::TimedOut),
        }
    }
}

impl Default for JoinRendezvous {
    fn default() -> Self {
        Self::new()
    }
}

/// Lets another task abandon a join wait.
pub struct JoinCancel {
    signal: Signal<CriticalSectionRawMutex, ()>,
}

impl JoinCancel {
    pub const fn new() -> Self {
        Self {
            signal: Signal::new(),
        }
    }

    pub fn cancel(&self) {
        self.signal.signal(());
    }

    pub fn reset(&self) {
        self.signal.reset();
    }

    pub fn is_cancelled(&self) -> bool {
        self.signal.signaled()
    }

    async fn cancelled(&self) {
        self.signal.wait().await;
        // Stay cancelled for any later waiter until reset.
        self.signal.signal(());
    }
}

impl Default for JoinCancel {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Copy, Default)]
pub struct WaitOptions<'a> {
    pub timeout: Option<Duration>,
    pub cancel: Option<&'a JoinCancel>,
}

impl<'a> WaitOptions<'a> {
    pub const fn unbounded() -> Self {
        Self {
            timeout: None,
            cancel: None,
        }
    }

    pub const fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub const fn with_cancel(mut self, cancel: &'a JoinCancel) -> Self {
        self.cancel = Some(cancel);
        self
    }
}
