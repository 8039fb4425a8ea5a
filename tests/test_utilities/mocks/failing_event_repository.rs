use chrono::{DateTime, Utc};
use iso38500_governance::governance::domain::{DomainEvent, EventType};
use iso38500_governance::ports::outbound::DomainEventRepository;
use iso38500_governance::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Event log that rejects every write and counts the attempts
#[derive(Default)]
pub struct FailingEventRepository {
    attempts: AtomicUsize,
}

impl FailingEventRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

impl DomainEventRepository for FailingEventRepository {
    fn save(&self, _event: &DomainEvent) -> Result<()> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        anyhow::bail!("event log unavailable")
    }

    fn find_all(&self) -> Result<Vec<DomainEvent>> {
        Ok(Vec::new())
    }

    fn find_by_event_type(&self, _event_type: EventType) -> Result<Vec<DomainEvent>> {
        Ok(Vec::new())
    }

    fn find_by_time_range(&self, _start: DateTime<Utc>, _end: DateTime<Utc>) -> Result<Vec<DomainEvent>> {
        Ok(Vec::new())
    }

    fn find_by_aggregate_id(&self, _aggregate_id: &str) -> Result<Vec<DomainEvent>> {
        Ok(Vec::new())
    }
}
