use crate::governance::domain::{
    ApplicationId, Audit, AuditId, AuditStatus, ChangeRequest, ChangeRequestId,
    ChangeRequestStatus, Incident, IncidentId, IncidentStatus, Priority,
};
use crate::ports::outbound::{AuditRepository, ChangeRequestRepository, IncidentRepository};
use crate::shared::{EntityKind, GovernanceError, Result};
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use std::hash::Hash;

/// Values matching `predicate`, ordered by `key` then by map key.
fn collect_where<K, V, O>(
    records: &DashMap<K, V>,
    predicate: impl Fn(&V) -> bool,
    key: impl Fn(&V) -> O,
) -> Vec<V>
where
    K: Eq + Hash + Ord + Clone,
    V: Clone,
    O: Ord,
{
    let mut matching: Vec<(K, V)> = records
        .iter()
        .filter(|entry| predicate(entry.value()))
        .map(|entry| (entry.key().clone(), entry.value().clone()))
        .collect();
    matching.sort_by(|a, b| key(&a.1).cmp(&key(&b.1)).then_with(|| a.0.cmp(&b.0)));
    matching.into_iter().map(|(_, value)| value).collect()
}

#[derive(Default)]
pub struct InMemoryChangeRequestRepository {
    requests: DashMap<ChangeRequestId, ChangeRequest>,
}

impl InMemoryChangeRequestRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn collect_where(&self, predicate: impl Fn(&ChangeRequest) -> bool) -> Vec<ChangeRequest> {
        collect_where(&self.requests, predicate, |request| request.created_at)
    }
}

impl ChangeRequestRepository for InMemoryChangeRequestRepository {
    fn save(&self, request: &ChangeRequest) -> Result<()> {
        request.validate()?;
        if self.requests.contains_key(&request.id) {
            return Err(GovernanceError::already_exists(EntityKind::ChangeRequest, &request.id).into());
        }
        self.requests.insert(request.id.clone(), request.clone());
        Ok(())
    }

    fn find_by_id(&self, id: &ChangeRequestId) -> Result<ChangeRequest> {
        self.requests
            .get(id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| GovernanceError::not_found(EntityKind::ChangeRequest, id).into())
    }

    fn find_by_application_id(&self, application_id: &ApplicationId) -> Result<Vec<ChangeRequest>> {
        Ok(self.collect_where(|request| &request.application_id == application_id))
    }

    fn find_by_status(&self, status: ChangeRequestStatus) -> Result<Vec<ChangeRequest>> {
        Ok(self.collect_where(|request| request.status == status))
    }

    fn find_by_priority(&self, priority: Priority) -> Result<Vec<ChangeRequest>> {
        Ok(self.collect_where(|request| request.priority == priority))
    }

    fn update(&self, request: &ChangeRequest) -> Result<()> {
        request.validate()?;
        let mut entry = self
            .requests
            .get_mut(&request.id)
            .ok_or_else(|| GovernanceError::not_found(EntityKind::ChangeRequest, &request.id))?;
        *entry = request.clone();
        Ok(())
    }

    fn delete(&self, id: &ChangeRequestId) -> Result<()> {
        self.requests
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| GovernanceError::not_found(EntityKind::ChangeRequest, id).into())
    }

    fn exists(&self, id: &ChangeRequestId) -> Result<bool> {
        Ok(self.requests.contains_key(id))
    }
}

#[derive(Default)]
pub struct InMemoryIncidentRepository {
    incidents: DashMap<IncidentId, Incident>,
}

impl InMemoryIncidentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn collect_where(&self, predicate: impl Fn(&Incident) -> bool) -> Vec<Incident> {
        collect_where(&self.incidents, predicate, |incident| incident.created_at)
    }
}

impl IncidentRepository for InMemoryIncidentRepository {
    fn save(&self, incident: &Incident) -> Result<()> {
        incident.validate()?;
        if self.incidents.contains_key(&incident.id) {
            return Err(GovernanceError::already_exists(EntityKind::Incident, &incident.id).into());
        }
        self.incidents.insert(incident.id.clone(), incident.clone());
        Ok(())
    }

    fn find_by_id(&self, id: &IncidentId) -> Result<Incident> {
        self.incidents
            .get(id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| GovernanceError::not_found(EntityKind::Incident, id).into())
    }

    fn find_by_application_id(&self, application_id: &ApplicationId) -> Result<Vec<Incident>> {
        Ok(self.collect_where(|incident| &incident.application_id == application_id))
    }

    fn find_by_status(&self, status: IncidentStatus) -> Result<Vec<Incident>> {
        Ok(self.collect_where(|incident| incident.status == status))
    }

    fn find_by_severity(&self, severity: u8) -> Result<Vec<Incident>> {
        Ok(self.collect_where(|incident| incident.severity == severity))
    }

    fn update(&self, incident: &Incident) -> Result<()> {
        incident.validate()?;
        let mut entry = self
            .incidents
            .get_mut(&incident.id)
            .ok_or_else(|| GovernanceError::not_found(EntityKind::Incident, &incident.id))?;
        *entry = incident.clone();
        Ok(())
    }

    fn delete(&self, id: &IncidentId) -> Result<()> {
        self.incidents
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| GovernanceError::not_found(EntityKind::Incident, id).into())
    }

    fn exists(&self, id: &IncidentId) -> Result<bool> {
        Ok(self.incidents.contains_key(id))
    }
}

#[derive(Default)]
pub struct InMemoryAuditRepository {
    audits: DashMap<AuditId, Audit>,
}

impl InMemoryAuditRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn collect_where(&self, predicate: impl Fn(&Audit) -> bool) -> Vec<Audit> {
        collect_where(&self.audits, predicate, |audit| audit.started_at)
    }
}

impl AuditRepository for InMemoryAuditRepository {
    fn save(&self, audit: &Audit) -> Result<()> {
        audit.validate()?;
        if self.audits.contains_key(&audit.id) {
            return Err(GovernanceError::already_exists(EntityKind::Audit, &audit.id).into());
        }
        self.audits.insert(audit.id.clone(), audit.clone());
        Ok(())
    }

    fn find_by_id(&self, id: &AuditId) -> Result<Audit> {
        self.audits
            .get(id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| GovernanceError::not_found(EntityKind::Audit, id).into())
    }

    fn find_by_application_id(&self, application_id: &ApplicationId) -> Result<Vec<Audit>> {
        Ok(self.collect_where(|audit| &audit.application_id == application_id))
    }

    fn find_by_status(&self, status: AuditStatus) -> Result<Vec<Audit>> {
        Ok(self.collect_where(|audit| audit.status == status))
    }

    fn find_by_period(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Vec<Audit>> {
        Ok(self.collect_where(|audit| audit.started_at >= start && audit.started_at < end))
    }

    fn update(&self, audit: &Audit) -> Result<()> {
        audit.validate()?;
        let mut entry = self
            .audits
            .get_mut(&audit.id)
            .ok_or_else(|| GovernanceError::not_found(EntityKind::Audit, &audit.id))?;
        *entry = audit.clone();
        Ok(())
    }

    fn delete(&self, id: &AuditId) -> Result<()> {
        self.audits
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| GovernanceError::not_found(EntityKind::Audit, id).into())
    }

    fn exists(&self, id: &AuditId) -> Result<bool> {
        Ok(self.audits.contains_key(id))
    }
}
