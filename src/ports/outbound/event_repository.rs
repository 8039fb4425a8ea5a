use crate::governance::domain::{DomainEvent, EventType};
use crate::shared::Result;
use chrono::{DateTime, Utc};

/// DomainEventRepository port for the append-only audit log
///
/// Writes are best effort: callers log a failed `save` and carry on.
pub trait DomainEventRepository: Send + Sync {
    /// Appends an event to the log
    ///
    /// # Errors
    /// Returns an error if the log cannot be written
    fn save(&self, event: &DomainEvent) -> Result<()>;

    /// Returns every event in append order
    fn find_all(&self) -> Result<Vec<DomainEvent>>;

    fn find_by_event_type(&self, event_type: EventType) -> Result<Vec<DomainEvent>>;

    /// Returns events with `start <= occurred_at < end`
    fn find_by_time_range(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Vec<DomainEvent>>;

    /// Returns the events whose `aggregate_id()` matches
    fn find_by_aggregate_id(&self, aggregate_id: &str) -> Result<Vec<DomainEvent>>;
}
