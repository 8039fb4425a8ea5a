use crate::governance::domain::DomainEvent;
use crate::ports::outbound::DomainEventRepository;
use std::sync::Arc;

/// Best-effort writer for the domain event log
///
/// A failed append is logged and dropped; it never fails the operation
/// that produced the event.
#[derive(Clone)]
pub struct EventRecorder {
    repository: Arc<dyn DomainEventRepository>,
}

impl EventRecorder {
    pub fn new(repository: Arc<dyn DomainEventRepository>) -> Self {
        Self { repository }
    }

    pub fn record(&self, events: impl IntoIterator<Item = DomainEvent>) {
        for event in events {
            if let Err(e) = self.repository.save(&event) {
                tracing::warn!(
                    event_type = %event.event_type(),
                    aggregate = event.aggregate_id(),
                    error = %e,
                    "failed to record domain event"
                );
            }
        }
    }
}
