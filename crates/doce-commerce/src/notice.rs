//! Short-lived confirmation banners.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::task::JoinHandle;

/// How long a confirmation stays up by default.
pub const DEFAULT_NOTICE_DELAY: Duration = Duration::from_secs(2);

#[derive(Debug, Default)]
struct NoticeState {
    message: Option<String>,
    generation: u64,
}

/// A banner that hides itself after a fixed delay.
///
/// Showing a new message restarts the countdown; the dismissal scheduled for
/// an older message is skipped.
#[derive(Debug, Clone)]
pub struct TransientNotice {
    state: Arc<Mutex<NoticeState>>,
    delay: Duration,
}

impl TransientNotice {
    pub fn new(delay: Duration) -> Self {
        Self {
            state: Arc::default(),
            delay,
        }
    }

    fn lock(&self) -> MutexGuard<'_, NoticeState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Show `message` and schedule its dismissal.
    ///
    /// Must be called from within a tokio runtime.
    pub fn show(&self, message: impl Into<String>) -> JoinHandle<()> {
        let generation = {
            let mut state = self.lock();
            state.generation += 1;
            state.message = Some(message.into());
            state.generation
        };

        let notice = self.clone();
        tokio::spawn(async move {
            tokio::time::sleep(notice.delay).await;
            let mut state = notice.lock();
            if state.generation == generation {
                state.message = None;
            }
        })
    }

    /// The message currently on screen.
    pub fn current(&self) -> Option<String> {
        self.lock().message.clone()
    }

    pub fn is_visible(&self) -> bool {
        self.lock().message.is_some()
    }

    /// Hide immediately; any pending dismissal becomes a no-op.
    pub fn dismiss(&self) {
        let mut state = self.lock();
        state.generation += 1;
        state.message = None;
    }
}

impl Default for TransientNotice {
    fn default() -> Self {
        Self::new(DEFAULT_NOTICE_DELAY)
    }
}
