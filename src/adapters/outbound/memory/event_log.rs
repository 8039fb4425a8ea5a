use super::{read_lock, write_lock};
use crate::governance::domain::{DomainEvent, EventType};
use crate::ports::outbound::DomainEventRepository;
use crate::shared::Result;
use chrono::{DateTime, Utc};
use std::sync::RwLock;

const STORE: &str = "event log";

/// Append-only in-memory event log
#[derive(Default)]
pub struct InMemoryEventLog {
    events: RwLock<Vec<DomainEvent>>,
}

impl InMemoryEventLog {
    pub fn new() -> Self {
        Self::default()
    }

    fn collect_where(&self, predicate: impl Fn(&DomainEvent) -> bool) -> Result<Vec<DomainEvent>> {
        Ok(read_lock(&self.events, STORE)?
            .iter()
            .filter(|event| predicate(event))
            .cloned()
            .collect())
    }
}

impl DomainEventRepository for InMemoryEventLog {
    fn save(&self, event: &DomainEvent) -> Result<()> {
        write_lock(&self.events, STORE)?.push(event.clone());
        Ok(())
    }

    fn find_all(&self) -> Result<Vec<DomainEvent>> {
        Ok(read_lock(&self.events, STORE)?.clone())
    }

    fn find_by_event_type(&self, event_type: EventType) -> Result<Vec<DomainEvent>> {
        self.collect_where(|event| event.event_type() == event_type)
    }

    fn find_by_time_range(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Vec<DomainEvent>> {
        self.collect_where(|event| event.occurred_at() >= start && event.occurred_at() < end)
    }

    fn find_by_aggregate_id(&self, aggregate_id: &str) -> Result<Vec<DomainEvent>> {
        self.collect_where(|event| event.aggregate_id() == aggregate_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::governance::domain::{AgreementId, PortfolioId};
    use chrono::TimeZone;

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, hour, 0, 0).unwrap()
    }

    fn seeded_log() -> InMemoryEventLog {
        let log = InMemoryEventLog::new();
        log.save(&DomainEvent::PortfolioCreated {
            portfolio_id: PortfolioId::new("p1").unwrap(),
            name: "Core".to_string(),
            owner: "CIO".to_string(),
            occurred_at: at(1),
        })
        .unwrap();
        log.save(&DomainEvent::GovernanceAgreementApproved {
            agreement_id: AgreementId::new("ga-1").unwrap(),
            occurred_at: at(2),
        })
        .unwrap();
        log.save(&DomainEvent::GovernanceAgreementActivated {
            agreement_id: AgreementId::new("ga-1").unwrap(),
            occurred_at: at(3),
        })
        .unwrap();
        log
    }

    #[test]
    fn test_find_all_keeps_append_order() {
        let events = seeded_log().find_all().unwrap();
        let types: Vec<EventType> = events.iter().map(|e| e.event_type()).collect();
        assert_eq!(
            types,
            vec![
                EventType::PortfolioCreated,
                EventType::GovernanceAgreementApproved,
                EventType::GovernanceAgreementActivated,
            ]
        );
    }

    #[test]
    fn test_find_by_event_type_and_aggregate() {
        let log = seeded_log();
        assert_eq!(log.find_by_event_type(EventType::PortfolioCreated).unwrap().len(), 1);
        assert_eq!(log.find_by_aggregate_id("ga-1").unwrap().len(), 2);
        assert_eq!(log.find_by_aggregate_id("p1").unwrap().len(), 1);
        assert!(log.find_by_aggregate_id("unknown").unwrap().is_empty());
    }

    #[test]
    fn test_find_by_time_range_is_half_open() {
        let log = seeded_log();
        assert_eq!(log.find_by_time_range(at(1), at(3)).unwrap().len(), 2);
        assert_eq!(log.find_by_time_range(at(3), at(4)).unwrap().len(), 1);
        assert!(log.find_by_time_range(at(4), at(5)).unwrap().is_empty());
    }
}
