// src/services/load_slot.rs
//
// One logical query slot
//
// A slot runs at most one load at a time. Dispatching a new load aborts
// the one in flight, and a result is only delivered if its load is still
// the most recent dispatch when it completes.

use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

pub struct LoadSlot<T> {
    /// Dispatch counter; guards delivery so a superseded result never lands
    generation: Arc<Mutex<u64>>,
    task: Mutex<Option<JoinHandle<()>>>,
    sender: mpsc::UnboundedSender<T>,
}

impl<T: Send + 'static> LoadSlot<T> {
    /// A slot and the receiving end results are delivered on
    pub fn new() -> (Self, mpsc::UnboundedReceiver<T>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        let slot = Self {
            generation: Arc::new(Mutex::new(0)),
            task: Mutex::new(None),
            sender,
        };
        (slot, receiver)
    }

    /// Start `load`, superseding whatever this slot was running
    ///
    /// Must be called from within a tokio runtime.
    pub fn dispatch<F>(&self, load: F)
    where
        F: Future<Output = T> + Send + 'static,
    {
        let ticket = {
            let mut generation = self.generation.lock().unwrap_or_else(PoisonError::into_inner);
            *generation += 1;
            *generation
        };

        let generation = Arc::clone(&self.generation);
        let sender = self.sender.clone();

        let handle = tokio::spawn(async move {
            let result = load.await;

            let current = generation.lock().unwrap_or_else(PoisonError::into_inner);
            if *current == ticket {
                // Receiver gone means nobody is listening anymore
                let _ = sender.send(result);
            } else {
                log::debug!("Dropping superseded load {} (current {})", ticket, *current);
            }
        });

        let mut task = self.task.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(previous) = task.replace(handle) {
            previous.abort();
        }
    }

    /// Abort the load in flight, if any; nothing is delivered for it
    pub fn cancel(&self) {
        {
            let mut generation = self.generation.lock().unwrap_or_else(PoisonError::into_inner);
            *generation += 1;
        }
        let mut task = self.task.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(previous) = task.take() {
            previous.abort();
        }
    }

    /// True while the most recent dispatch has not finished
    pub fn is_pending(&self) -> bool {
        self.task
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}

impl<T> Drop for LoadSlot<T> {
    fn drop(&mut self) {
        let task = self.task.get_mut().unwrap_or_else(PoisonError::into_inner);
        if let Some(handle) = task.take() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::time::{sleep, timeout};

    #[tokio::test]
    async fn test_single_dispatch_delivers_once() {
        let (slot, mut results) = LoadSlot::new();

        slot.dispatch(async { 7 });

        assert_eq!(results.recv().await, Some(7));
        assert!(timeout(Duration::from_millis(50), results.recv()).await.is_err());
    }

    #[tokio::test]
    async fn test_only_last_dispatch_is_delivered() {
        let (slot, mut results) = LoadSlot::new();

        slot.dispatch(async {
            sleep(Duration::from_millis(200)).await;
            "stale"
        });
        slot.dispatch(async { "fresh" });

        assert_eq!(results.recv().await, Some("fresh"));
        assert!(timeout(Duration::from_millis(400), results.recv()).await.is_err());
    }

    #[tokio::test]
    async fn test_cancel_suppresses_result() {
        let (slot, mut results) = LoadSlot::new();

        slot.dispatch(async {
            sleep(Duration::from_millis(50)).await;
            1
        });
        assert!(slot.is_pending());
        slot.cancel();

        assert!(timeout(Duration::from_millis(150), results.recv()).await.is_err());
        assert!(!slot.is_pending());
    }

    #[tokio::test]
    async fn test_sequential_dispatches_each_deliver() {
        let (slot, mut results) = LoadSlot::new();

        slot.dispatch(async { 1 });
        assert_eq!(results.recv().await, Some(1));

        slot.dispatch(async { 2 });
        assert_eq!(results.recv().await, Some(2));
    }
}
