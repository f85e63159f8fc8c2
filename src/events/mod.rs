// src/events/mod.rs
//
// Change notification
//
// The favorites provider publishes a `FavoritesChanged` after each
// committed write; screens and open cursors subscribe to it.

pub mod bus;
pub mod types;

pub use bus::{EventBus, EventLogEntry, SubscriptionId};
pub use types::{ChangeKind, DomainEvent, FavoritesChanged};

/// Initialize a new event bus
pub fn create_event_bus() -> EventBus {
    EventBus::new()
}
