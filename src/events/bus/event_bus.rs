// src/events/bus/event_bus.rs
//
// Core event bus implementation.
//
// - Synchronous: handlers run on the emitting thread, in subscription order
// - Handlers are invoked outside the registry lock, so a handler may
//   subscribe, unsubscribe or re-query without deadlocking
// - Every emission is logged

use std::any::{Any, TypeId};
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use crate::events::types::DomainEvent;

/// Type-erased event handler function
type EventHandler = Arc<dyn Fn(&dyn Any) + Send + Sync>;

/// Most recent emissions kept for inspection
const EVENT_LOG_CAPACITY: usize = 256;

/// Handle returned by [`EventBus::subscribe`], used to unsubscribe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// The Event Bus
///
/// Writers publish facts after a commit; observers subscribe by event type.
pub struct EventBus {
    /// Map from event TypeId to its handlers, in subscription order
    handlers: Arc<RwLock<HashMap<TypeId, Vec<(SubscriptionId, EventHandler)>>>>,

    next_id: Arc<AtomicU64>,

    /// Event emission log (for debugging)
    event_log: Arc<RwLock<VecDeque<EventLogEntry>>>,
}

/// A logged event for debugging and tracing
#[derive(Debug, Clone)]
pub struct EventLogEntry {
    pub event_type: String,
    pub event_id: String,
    pub occurred_at: String,
    pub handler_count: usize,
}

impl EventBus {
    /// Create a new event bus
    pub fn new() -> Self {
        Self {
            handlers: Arc::new(RwLock::new(HashMap::new())),
            next_id: Arc::new(AtomicU64::new(1)),
            event_log: Arc::new(RwLock::new(VecDeque::new())),
        }
    }

    /// Subscribe to a specific event type
    ///
    /// Handlers are executed in the order they are subscribed.
    ///
    /// Example:
    /// ```ignore
    /// bus.subscribe::<FavoritesChanged, _>(|event| {
    ///     println!("favorites changed: {}", event.uri());
    /// });
    /// ```
    pub fn subscribe<E, F>(&self, handler: F) -> SubscriptionId
    where
        E: DomainEvent + 'static,
        F: Fn(&E) + Send + Sync + 'static,
    {
        let type_id = TypeId::of::<E>();
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));

        let wrapped: EventHandler = Arc::new(move |event_any: &dyn Any| {
            if let Some(event) = event_any.downcast_ref::<E>() {
                handler(event);
            } else {
                log::error!(
                    "Failed to downcast event in handler for {}",
                    std::any::type_name::<E>()
                );
            }
        });

        let mut handlers = self.handlers.write().unwrap_or_else(PoisonError::into_inner);
        handlers.entry(type_id).or_default().push((id, wrapped));

        id
    }

    /// Remove a handler; returns false if it was already gone
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut handlers = self.handlers.write().unwrap_or_else(PoisonError::into_inner);
        for list in handlers.values_mut() {
            if let Some(pos) = list.iter().position(|(sid, _)| *sid == id) {
                list.remove(pos);
                return true;
            }
        }
        false
    }

    /// Emit an event
    ///
    /// Runs every handler for this event type before returning. A panicking
    /// handler is logged and the remaining handlers still run.
    pub fn emit<E>(&self, event: E)
    where
        E: DomainEvent + 'static,
    {
        let type_id = TypeId::of::<E>();

        // Snapshot so handlers run without the registry lock held
        let event_handlers: Vec<EventHandler> = {
            let handlers = self.handlers.read().unwrap_or_else(PoisonError::into_inner);
            handlers
                .get(&type_id)
                .map(|list| list.iter().map(|(_, h)| Arc::clone(h)).collect())
                .unwrap_or_default()
        };

        let log_entry = EventLogEntry {
            event_type: event.event_type().to_string(),
            event_id: event.event_id().to_string(),
            occurred_at: event.occurred_at().to_rfc3339(),
            handler_count: event_handlers.len(),
        };

        log::debug!(
            "[EVENT] {} (id: {}) | {} handlers",
            log_entry.event_type,
            log_entry.event_id,
            log_entry.handler_count
        );

        {
            let mut log = self.event_log.write().unwrap_or_else(PoisonError::into_inner);
            if log.len() == EVENT_LOG_CAPACITY {
                log.pop_front();
            }
            log.push_back(log_entry);
        }

        for (idx, handler) in event_handlers.iter().enumerate() {
            let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                handler(&event as &dyn Any);
            }));

            if let Err(e) = result {
                log::error!(
                    "Handler {} for {} panicked: {:?}",
                    idx,
                    event.event_type(),
                    e
                );
            }
        }
    }

    /// Get the event log (for debugging)
    pub fn get_event_log(&self) -> Vec<EventLogEntry> {
        self.event_log
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .cloned()
            .collect()
    }

    /// Clear the event log
    pub fn clear_event_log(&self) {
        self.event_log
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    /// Get the number of subscribers for a specific event type
    pub fn subscriber_count<E>(&self) -> usize
    where
        E: 'static,
    {
        let type_id = TypeId::of::<E>();
        let handlers = self.handlers.read().unwrap_or_else(PoisonError::into_inner);
        handlers.get(&type_id).map(|h| h.len()).unwrap_or(0)
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

// Clones share the same registry
impl Clone for EventBus {
    fn clone(&self) -> Self {
        Self {
            handlers: Arc::clone(&self.handlers),
            next_id: Arc::clone(&self.next_id),
            event_log: Arc::clone(&self.event_log),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::types::*;
    use crate::repositories::FavoritesRoute;
    use std::sync::atomic::AtomicUsize;
    use std::sync::Mutex;

    fn changed() -> FavoritesChanged {
        FavoritesChanged::new(FavoritesRoute::Collection, ChangeKind::Insert, 1)
    }

    #[test]
    fn test_subscribe_and_emit() {
        let bus = EventBus::new();
        let counter = Arc::new(AtomicUsize::new(0));
        let counter_clone = Arc::clone(&counter);

        bus.subscribe::<FavoritesChanged, _>(move |_event| {
            counter_clone.fetch_add(1, Ordering::SeqCst);
        });

        bus.emit(changed());

        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_multiple_handlers_execute_in_order() {
        let bus = EventBus::new();
        let sequence = Arc::new(Mutex::new(Vec::new()));

        for n in 1..=3 {
            let seq = Arc::clone(&sequence);
            bus.subscribe::<FavoritesChanged, _>(move |_| {
                seq.lock().unwrap().push(n);
            });
        }

        bus.emit(changed());

        assert_eq!(*sequence.lock().unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn test_unsubscribe_stops_delivery() {
        let bus = EventBus::new();
        let counter = Arc::new(AtomicUsize::new(0));
        let counter_clone = Arc::clone(&counter);

        let id = bus.subscribe::<FavoritesChanged, _>(move |_| {
            counter_clone.fetch_add(1, Ordering::SeqCst);
        });
        assert_eq!(bus.subscriber_count::<FavoritesChanged>(), 1);

        assert!(bus.unsubscribe(id));
        assert!(!bus.unsubscribe(id));
        bus.emit(changed());

        assert_eq!(counter.load(Ordering::SeqCst), 0);
        assert_eq!(bus.subscriber_count::<FavoritesChanged>(), 0);
    }

    #[test]
    fn test_handler_may_subscribe_during_emit() {
        let bus = EventBus::new();
        let inner_bus = bus.clone();

        bus.subscribe::<FavoritesChanged, _>(move |_| {
            inner_bus.subscribe::<FavoritesChanged, _>(|_| {});
        });

        bus.emit(changed());

        assert_eq!(bus.subscriber_count::<FavoritesChanged>(), 2);
    }

    #[test]
    fn test_event_log_records_emissions() {
        let bus = EventBus::new();

        bus.emit(changed());
        bus.emit(FavoritesChanged::new(
            FavoritesRoute::Item(3),
            ChangeKind::Delete,
            1,
        ));

        let log = bus.get_event_log();
        assert_eq!(log.len(), 2);
        assert_eq!(log[0].event_type, "FavoritesChanged");

        bus.clear_event_log();
        assert!(bus.get_event_log().is_empty());
    }

    #[test]
    fn test_handler_panic_doesnt_break_bus() {
        let bus = EventBus::new();
        let counter = Arc::new(AtomicUsize::new(0));

        bus.subscribe::<FavoritesChanged, _>(|_| {
            panic!("Intentional panic");
        });

        let counter_clone = Arc::clone(&counter);
        bus.subscribe::<FavoritesChanged, _>(move |_| {
            counter_clone.fetch_add(1, Ordering::SeqCst);
        });

        bus.emit(changed());

        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }
}
