//! Debounced trigger loop.

use std::future::Future;
use std::time::Duration;

use tokio::sync::mpsc;

use crate::lifecycle::ShutdownSignal;

/// Collapses bursts of events into one.
pub struct Debouncer<T> {
    rx: mpsc::UnboundedReceiver<T>,
    window: Duration,
}

impl<T> Debouncer<T> {
    pub fn new(rx: mpsc::UnboundedReceiver<T>, window: Duration) -> Self {
        Self { rx, window }
    }

    /// Wait for an event, then keep absorbing events until `window` passes
    /// without one. Returns how many events the burst held, or `None` once
    /// the channel is closed and empty.
    pub async fn next_burst(&mut self) -> Option<usize> {
        self.rx.recv().await?;
        let mut events = 1;
        loop {
            match tokio::time::timeout(self.window, self.rx.recv()).await {
                Ok(Some(_)) => events += 1,
                Ok(None) | Err(_) => return Some(events),
            }
        }
    }
}

/// Run `on_burst` once per debounced burst until the channel closes or
/// shutdown is signalled. A running `on_burst` is always allowed to finish.
///
/// Returns the number of bursts handled.
pub async fn run_trigger_loop<T, F, Fut>(
    mut debouncer: Debouncer<T>,
    mut shutdown: ShutdownSignal,
    mut on_burst: F,
) -> usize
where
    F: FnMut(usize) -> Fut,
    Fut: Future<Output = ()>,
{
    let mut bursts = 0;
    loop {
        tokio::select! {
            burst = debouncer.next_burst() => match burst {
                Some(events) => {
                    bursts += 1;
                    tracing::info!(events, "Document change settled");
                    on_burst(events).await;
                }
                None => {
                    tracing::warn!("Change notifications closed, trigger loop exiting");
                    break;
                }
            },
            () = shutdown.recv() => {
                tracing::info!("Trigger loop received shutdown signal, exiting loop");
                break;
            }
        }
    }
    bursts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lifecycle::Shutdown;

    const WINDOW: Duration = Duration::from_millis(500);

    #[tokio::test(start_paused = true)]
    async fn test_rapid_events_make_one_burst() {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut debouncer = Debouncer::new(rx, WINDOW);

        for _ in 0..5 {
            tx.send(()).unwrap();
        }
        assert_eq!(debouncer.next_burst().await, Some(5));

        // Nothing pending: the next burst only starts with a new event.
        let pending = tokio::time::timeout(Duration::from_secs(5), debouncer.next_burst()).await;
        assert!(pending.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_events_within_window_extend_it() {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut debouncer = Debouncer::new(rx, WINDOW);

        tokio::spawn(async move {
            for _ in 0..4 {
                tx.send(()).unwrap();
                tokio::time::sleep(Duration::from_millis(300)).await;
            }
        });
        assert_eq!(debouncer.next_burst().await, Some(4));
        assert_eq!(debouncer.next_burst().await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_separate_bursts_run_separately() {
        let (tx, rx) = mpsc::unbounded_channel();
        let shutdown = Shutdown::new();

        tokio::spawn(async move {
            tx.send(()).unwrap();
            tx.send(()).unwrap();
            tokio::time::sleep(Duration::from_secs(2)).await;
            tx.send(()).unwrap();
        });

        let mut sizes = Vec::new();
        let bursts = run_trigger_loop(Debouncer::new(rx, WINDOW), shutdown.subscribe(), |events| {
            sizes.push(events);
            async {}
        })
        .await;

        assert_eq!(bursts, 2);
        assert_eq!(sizes, vec![2, 1]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_events_during_cycle_make_one_more_cycle() {
        let (tx, rx) = mpsc::unbounded_channel();
        let shutdown = Shutdown::new();
        tx.send(()).unwrap();

        // The first cycle receives three more notifications while it runs.
        let mut during_cycle = Some(tx);
        let bursts = run_trigger_loop(Debouncer::new(rx, WINDOW), shutdown.subscribe(), |_| {
            if let Some(tx) = during_cycle.take() {
                for _ in 0..3 {
                    tx.send(()).unwrap();
                }
            }
            tokio::time::sleep(Duration::from_secs(3))
        })
        .await;

        assert_eq!(bursts, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_stops_loop() {
        let (_tx, rx) = mpsc::unbounded_channel::<()>();
        let shutdown = Shutdown::new();
        shutdown.trigger();

        let bursts = run_trigger_loop(Debouncer::new(rx, WINDOW), shutdown.subscribe(), |_| async {}).await;
        assert_eq!(bursts, 0);
    }
}
