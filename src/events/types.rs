// src/events/types.rs
//
// Events published by the favorites provider.
// Each event is an immutable fact about a write that has already
// been committed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::repositories::FavoritesRoute;

/// Trait that all domain events must implement
pub trait DomainEvent: std::fmt::Debug + Clone {
    /// Unique identifier for this event instance
    fn event_id(&self) -> Uuid;

    /// When this event occurred
    fn occurred_at(&self) -> DateTime<Utc>;

    /// Human-readable event type name
    fn event_type(&self) -> &'static str;
}

/// Which provider verb produced a change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    Insert,
    BulkInsert,
    Update,
    Delete,
}

/// Emitted after the favorites table changed
///
/// `route` is the resource the write addressed: inserts always report the
/// collection, updates and deletes report the route they were issued on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FavoritesChanged {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub route: FavoritesRoute,
    pub kind: ChangeKind,
    pub rows_affected: usize,
}

impl FavoritesChanged {
    pub fn new(route: FavoritesRoute, kind: ChangeKind, rows_affected: usize) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            route,
            kind,
            rows_affected,
        }
    }

    /// Content URI the change is scoped to
    pub fn uri(&self) -> String {
        self.route.uri()
    }
}

impl DomainEvent for FavoritesChanged {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "FavoritesChanged" }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_change_is_scoped_to_route_uri() {
        let event = FavoritesChanged::new(FavoritesRoute::Item(4), ChangeKind::Delete, 1);
        assert_eq!(event.uri(), "content://com.moemke.android.popmovies/favorites/4");
        assert_eq!(event.event_type(), "FavoritesChanged");
    }
}
