//! Trailing debounce on top of a Tokio timer.
//!
//! A value only reaches subscribers once it has been left alone for the full
//! delay. Each new value restarts the window, so a burst of updates yields a
//! single emission of the last one.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Delay used by search inputs unless configured otherwise.
pub const DEFAULT_DELAY: Duration = Duration::from_millis(150);

/// A scheduled emission. Dropping the guard cancels it.
#[derive(Debug)]
struct TimerGuard(JoinHandle<()>);

impl Drop for TimerGuard {
    fn drop(&mut self) {
        self.0.abort();
    }
}

/// Trailing debouncer with at most one pending timer.
///
/// Timers are spawned on the current Tokio runtime, so [`Debouncer::set`]
/// must be called from within one. Dropping the debouncer cancels the pending
/// timer.
#[derive(Debug)]
pub struct Debouncer<T> {
    delay: Duration,
    tx: Arc<watch::Sender<T>>,
    pending: Option<TimerGuard>,
}

impl<T> Debouncer<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub fn new(initial: T, delay: Duration) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self {
            delay,
            tx: Arc::new(tx),
            pending: None,
        }
    }

    #[inline]
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Schedule `value`, replacing any value still waiting.
    pub fn set(&mut self, value: T) {
        let tx = Arc::clone(&self.tx);
        let delay = self.delay;
        // Assigning drops the previous guard, which aborts its timer.
        self.pending = Some(TimerGuard(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            tx.send_replace(value);
        })));
    }

    /// Publish `value` immediately, dropping anything pending.
    pub fn set_now(&mut self, value: T) {
        self.pending = None;
        self.tx.send_replace(value);
    }

    /// Drop the pending value, if any.
    pub fn cancel(&mut self) {
        if self.pending.take().is_some() {
            tracing::trace!("Debounce timer cancelled");
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|guard| !guard.0.is_finished())
    }

    /// The last value that made it through.
    pub fn value(&self) -> T {
        self.tx.borrow().clone()
    }

    /// A receiver notified on every emission.
    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.tx.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::{Instant, sleep, timeout};

    const DELAY: Duration = Duration::from_millis(150);

    fn debouncer() -> Debouncer<String> {
        Debouncer::new(String::new(), DELAY)
    }

    #[tokio::test(start_paused = true)]
    async fn test_single_value_after_delay() {
        let mut debouncer = debouncer();
        let mut rx = debouncer.subscribe();
        let started = Instant::now();

        debouncer.set("gentle".into());
        assert!(debouncer.is_pending());
        assert_eq!(debouncer.value(), "");

        rx.changed().await.unwrap();
        assert!(started.elapsed() >= DELAY);
        assert_eq!(*rx.borrow_and_update(), "gentle");
        assert_eq!(debouncer.value(), "gentle");
    }

    #[tokio::test(start_paused = true)]
    async fn test_burst_emits_last_value_once() {
        let mut debouncer = debouncer();
        let mut rx = debouncer.subscribe();

        for text in ["g", "ge", "gen", "gent"] {
            debouncer.set(text.into());
            sleep(Duration::from_millis(100)).await;
            assert!(!rx.has_changed().unwrap());
        }
        let last = Instant::now();
        debouncer.set("gentlemax".into());

        rx.changed().await.unwrap();
        assert!(last.elapsed() >= DELAY);
        assert_eq!(*rx.borrow_and_update(), "gentlemax");

        assert!(timeout(Duration::from_secs(1), rx.changed()).await.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel() {
        let mut debouncer = debouncer();
        let rx = debouncer.subscribe();

        debouncer.set("gentle".into());
        debouncer.cancel();
        assert!(!debouncer.is_pending());

        sleep(DELAY * 4).await;
        assert!(!rx.has_changed().unwrap());
        assert_eq!(debouncer.value(), "");
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels_pending_timer() {
        let mut debouncer = debouncer();
        let mut rx = debouncer.subscribe();

        debouncer.set("gentle".into());
        drop(debouncer);

        let fired = matches!(timeout(DELAY * 4, rx.changed()).await, Ok(Ok(())));
        assert!(!fired);
        assert_eq!(*rx.borrow(), "");
    }

    #[tokio::test(start_paused = true)]
    async fn test_set_now_skips_the_wait() {
        let mut debouncer = debouncer();
        let mut rx = debouncer.subscribe();

        debouncer.set("gentle".into());
        debouncer.set_now(String::new());
        assert!(!debouncer.is_pending());
        assert!(rx.has_changed().unwrap());
        rx.borrow_and_update();

        assert!(timeout(DELAY * 4, rx.changed()).await.is_err());
    }
}
