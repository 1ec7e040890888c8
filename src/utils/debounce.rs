//! Trailing-edge debounce on the tokio timer

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::task::JoinHandle;

/// Wraps `func` so that only the last call within `wait` runs.
///
/// Must be called from inside a tokio runtime.
pub struct Debounced<T> {
    func: Arc<dyn Fn(T) + Send + Sync>,
    wait: Duration,
    pending: Mutex<Option<JoinHandle<()>>>,
}

pub fn debounce<T, F>(func: F, wait: Duration) -> Debounced<T>
where
    F: Fn(T) + Send + Sync + 'static,
{
    Debounced { func: Arc::new(func), wait, pending: Mutex::new(None) }
}

impl<T: Send + 'static> Debounced<T> {
    pub fn call(&self, args: T) {
        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(previous) = pending.take() {
            previous.abort();
        }

        let func = Arc::clone(&self.func);
        let wait = self.wait;
        *pending = Some(tokio::spawn(async move {
            tokio::time::sleep(wait).await;
            func(args);
        }));
    }

    /// Drop a scheduled call, if any.
    pub fn cancel(&self) {
        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(previous) = pending.take() {
            previous.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::debounce;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    fn recorder() -> (Arc<Mutex<Vec<u32>>>, impl Fn(u32) + Send + Sync + 'static) {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&calls);
        (calls, move |value| sink.lock().expect("lock").push(value))
    }

    #[tokio::test(start_paused = true)]
    async fn burst_collapses_to_last_call() {
        let (calls, func) = recorder();
        let debounced = debounce(func, Duration::from_millis(100));

        debounced.call(1);
        debounced.call(2);
        debounced.call(3);
        tokio::time::sleep(Duration::from_millis(150)).await;

        assert_eq!(*calls.lock().expect("lock"), vec![3]);
    }

    #[tokio::test(start_paused = true)]
    async fn spaced_calls_all_run() {
        let (calls, func) = recorder();
        let debounced = debounce(func, Duration::from_millis(50));

        debounced.call(1);
        tokio::time::sleep(Duration::from_millis(80)).await;
        debounced.call(2);
        tokio::time::sleep(Duration::from_millis(80)).await;

        assert_eq!(*calls.lock().expect("lock"), vec![1, 2]);
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_drops_pending_call() {
        let (calls, func) = recorder();
        let debounced = debounce(func, Duration::from_millis(50));

        debounced.call(7);
        debounced.cancel();
        tokio::time::sleep(Duration::from_millis(80)).await;

        assert!(calls.lock().expect("lock").is_empty());
    }
}
