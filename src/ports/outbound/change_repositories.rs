//! Change-management stores: change requests, incidents and audits.

use crate::governance::domain::{
    ApplicationId, Audit, AuditId, AuditStatus, ChangeRequest, ChangeRequestId,
    ChangeRequestStatus, Incident, IncidentId, IncidentStatus, Priority,
};
use crate::shared::Result;
use chrono::{DateTime, Utc};

pub trait ChangeRequestRepository: Send + Sync {
    /// # Errors
    /// Returns `AlreadyExists` if a change request has this ID
    fn save(&self, request: &ChangeRequest) -> Result<()>;

    /// # Errors
    /// Returns `NotFound` if no change request has this ID
    fn find_by_id(&self, id: &ChangeRequestId) -> Result<ChangeRequest>;

    /// Returns the application's change requests, oldest first
    fn find_by_application_id(&self, application_id: &ApplicationId) -> Result<Vec<ChangeRequest>>;

    fn find_by_status(&self, status: ChangeRequestStatus) -> Result<Vec<ChangeRequest>>;

    fn find_by_priority(&self, priority: Priority) -> Result<Vec<ChangeRequest>>;

    /// # Errors
    /// Returns `NotFound` if the change request was never saved
    fn update(&self, request: &ChangeRequest) -> Result<()>;

    /// # Errors
    /// Returns `NotFound` if no change request has this ID
    fn delete(&self, id: &ChangeRequestId) -> Result<()>;

    fn exists(&self, id: &ChangeRequestId) -> Result<bool>;
}

pub trait IncidentRepository: Send + Sync {
    /// # Errors
    /// Returns `AlreadyExists` if an incident has this ID
    fn save(&self, incident: &Incident) -> Result<()>;

    /// # Errors
    /// Returns `NotFound` if no incident has this ID
    fn find_by_id(&self, id: &IncidentId) -> Result<Incident>;

    /// Returns the application's incidents, oldest first
    fn find_by_application_id(&self, application_id: &ApplicationId) -> Result<Vec<Incident>>;

    fn find_by_status(&self, status: IncidentStatus) -> Result<Vec<Incident>>;

    fn find_by_severity(&self, severity: u8) -> Result<Vec<Incident>>;

    /// # Errors
    /// Returns `NotFound` if the incident was never saved
    fn update(&self, incident: &Incident) -> Result<()>;

    /// # Errors
    /// Returns `NotFound` if no incident has this ID
    fn delete(&self, id: &IncidentId) -> Result<()>;

    fn exists(&self, id: &IncidentId) -> Result<bool>;
}

pub trait AuditRepository: Send + Sync {
    /// # Errors
    /// Returns `AlreadyExists` if an audit has this ID
    fn save(&self, audit: &Audit) -> Result<()>;

    /// # Errors
    /// Returns `NotFound` if no audit has this ID
    fn find_by_id(&self, id: &AuditId) -> Result<Audit>;

    /// Returns the application's audits ordered by start
    fn find_by_application_id(&self, application_id: &ApplicationId) -> Result<Vec<Audit>>;

    fn find_by_status(&self, status: AuditStatus) -> Result<Vec<Audit>>;

    /// Returns audits started in `[start, end)`, earliest first
    fn find_by_period(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Vec<Audit>>;

    /// # Errors
    /// Returns `NotFound` if the audit was never saved
    fn update(&self, audit: &Audit) -> Result<()>;

    /// # Errors
    /// Returns `NotFound` if no audit has this ID
    fn delete(&self, id: &AuditId) -> Result<()>;

    fn exists(&self, id: &AuditId) -> Result<bool>;
}
