//! Timer-owning debounce primitive.
//!
//! One `Debouncer` exists per logical operation (settle/save, completion
//! fetch, preview composition), each with its own quiet window. Scheduling
//! replaces any pending delivery, so only the most recent payload within a
//! window ever fires. Cancellation and teardown abort without delivering.

use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;

pub struct Debouncer<T: Send + 'static> {
    delay: Duration,
    tx: UnboundedSender<T>,
    pending: Option<JoinHandle<()>>,
}

impl<T: Send + 'static> Debouncer<T> {
    pub fn new(delay: Duration, tx: UnboundedSender<T>) -> Self {
        Self {
            delay,
            tx,
            pending: None,
        }
    }

    /// Schedule `payload` for delivery once the quiet window elapses. A
    /// prior pending delivery is discarded, not queued.
    pub fn schedule(&mut self, payload: T) {
        self.cancel();

        let delay = self.delay;
        let tx = self.tx.clone();
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = tx.send(payload);
        }));
    }

    /// Drop the pending delivery, if any
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl<T: Send + 'static> Drop for Debouncer<T> {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;
    use tokio::time::advance;

    async fn breathe() {
        // Give spawned timer tasks a chance to register their sleeps.
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_only_the_last_payload_within_the_window_fires() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut debouncer = Debouncer::new(Duration::from_millis(500), tx);

        debouncer.schedule(1);
        breathe().await;
        advance(Duration::from_millis(300)).await;

        debouncer.schedule(2);
        breathe().await;
        advance(Duration::from_millis(300)).await;

        debouncer.schedule(3);
        breathe().await;
        advance(Duration::from_millis(500)).await;
        breathe().await;

        assert_eq!(rx.recv().await, Some(3));
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_payload_fires_after_quiet_window() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut debouncer = Debouncer::new(Duration::from_millis(500), tx);

        debouncer.schedule("ready");
        breathe().await;

        advance(Duration::from_millis(499)).await;
        breathe().await;
        assert!(rx.try_recv().is_err());

        advance(Duration::from_millis(1)).await;
        breathe().await;
        assert_eq!(rx.try_recv(), Ok("ready"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_delivers_nothing() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut debouncer = Debouncer::new(Duration::from_millis(100), tx);

        debouncer.schedule(1);
        breathe().await;
        debouncer.cancel();

        advance(Duration::from_millis(200)).await;
        breathe().await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_teardown_delivers_nothing() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut debouncer = Debouncer::new(Duration::from_millis(100), tx);

        debouncer.schedule(1);
        breathe().await;
        drop(debouncer);

        advance(Duration::from_millis(200)).await;
        breathe().await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_reusable_after_firing() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut debouncer = Debouncer::new(Duration::from_millis(100), tx);

        debouncer.schedule(1);
        breathe().await;
        advance(Duration::from_millis(100)).await;
        breathe().await;
        assert_eq!(rx.try_recv(), Ok(1));

        debouncer.schedule(2);
        breathe().await;
        advance(Duration::from_millis(100)).await;
        breathe().await;
        assert_eq!(rx.try_recv(), Ok(2));
    }
}
