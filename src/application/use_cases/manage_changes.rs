use super::EventRecorder;
use crate::application::dto::{
    ComplianceViolationRequest, CreateAuditRequest, CreateChangeRequestRequest,
    ReportIncidentRequest, ResolveIncidentRequest,
};
use crate::application::factories::GovernanceWorkspace;
use crate::governance::domain::{
    ApplicationId, ApprovalDecision, Audit, AuditFinding, AuditId, AuditStatus, AuditType,
    ChangeRequest, ChangeRequestId, DomainEvent, Incident, IncidentId,
};
use crate::governance::domain::change::MOST_SEVERE;
use crate::ports::outbound::{
    ApplicationRepository, AuditRepository, ChangeRequestRepository, Clock, IncidentRepository,
};
use crate::shared::{EntityKind, GovernanceError, Result};
use std::sync::Arc;

/// Audit finding severities that count as compliance violations
const VIOLATION_SEVERITIES: [&str; 2] = ["critical", "high"];

/// ChangeManagementUseCase - change requests, incidents and audits
///
/// Every record belongs to a registered application. State changes are
/// validated by the domain types; this use case loads, applies, stores
/// and records the resulting event.
pub struct ChangeManagementUseCase {
    applications: Arc<dyn ApplicationRepository>,
    change_requests: Arc<dyn ChangeRequestRepository>,
    incidents: Arc<dyn IncidentRepository>,
    audits: Arc<dyn AuditRepository>,
    events: EventRecorder,
    clock: Arc<dyn Clock>,
}

impl ChangeManagementUseCase {
    pub fn new(workspace: &GovernanceWorkspace) -> Self {
        Self {
            applications: workspace.applications.clone(),
            change_requests: workspace.change_requests.clone(),
            incidents: workspace.incidents.clone(),
            audits: workspace.audits.clone(),
            events: EventRecorder::new(workspace.events.clone()),
            clock: workspace.clock.clone(),
        }
    }

    fn require_application(&self, id: &ApplicationId) -> Result<()> {
        if !self.applications.exists(id)? {
            return Err(GovernanceError::not_found(EntityKind::Application, id).into());
        }
        Ok(())
    }

    // Change requests

    /// Drafts a change request
    ///
    /// # Errors
    /// Returns an error if:
    /// - The application does not exist
    /// - A change request with this ID already exists
    /// - The title or requester is blank
    pub fn create_change_request(&self, request: CreateChangeRequestRequest) -> Result<ChangeRequest> {
        self.require_application(&request.application_id)?;
        if self.change_requests.exists(&request.id)? {
            return Err(GovernanceError::already_exists(EntityKind::ChangeRequest, &request.id).into());
        }

        let change = ChangeRequest::new(
            request.id,
            request.application_id,
            request.title,
            request.requester,
            self.clock.now(),
        )?
        .with_type(request.change_type)
        .with_priority(request.priority)
        .with_description(request.description)
        .with_business_case(request.business_case)
        .with_impact(request.impact, request.risk);
        self.change_requests.save(&change)?;

        self.events.record([DomainEvent::ChangeRequestCreated {
            change_request_id: change.id.clone(),
            application_id: change.application_id.clone(),
            requester: change.requester.clone(),
            change_type: change.change_type,
            priority: change.priority,
            description: change.description.clone(),
            occurred_at: change.created_at,
        }]);
        tracing::debug!(change_request = %change.id, application = %change.application_id, "drafted change request");
        Ok(change)
    }

    fn apply_to_change(
        &self,
        id: &ChangeRequestId,
        apply: impl FnOnce(&mut ChangeRequest) -> Result<()>,
    ) -> Result<ChangeRequest> {
        let mut change = self.change_requests.find_by_id(id)?;
        apply(&mut change)?;
        self.change_requests.update(&change)?;
        Ok(change)
    }

    /// # Errors
    /// Returns `NotFound` for an unknown ID, or `InvalidState` unless the
    /// request is a draft
    pub fn submit_change_request(&self, id: &ChangeRequestId) -> Result<ChangeRequest> {
        let now = self.clock.now();
        self.apply_to_change(id, |change| change.submit(now))
    }

    /// # Errors
    /// Returns `NotFound` for an unknown ID, or `InvalidState` unless the
    /// request has been submitted
    pub fn approve_change_request(
        &self,
        id: &ChangeRequestId,
        decision: ApprovalDecision,
    ) -> Result<ChangeRequest> {
        let now = self.clock.now();
        let approver = decision.approver.clone();
        let change = self.apply_to_change(id, |change| change.approve(decision, now))?;
        self.events.record([DomainEvent::ChangeRequestApproved {
            change_request_id: change.id.clone(),
            approver,
            occurred_at: now,
        }]);
        Ok(change)
    }

    /// # Errors
    /// Returns `NotFound` for an unknown ID, or `InvalidState` unless the
    /// request has been submitted
    pub fn reject_change_request(
        &self,
        id: &ChangeRequestId,
        decision: ApprovalDecision,
    ) -> Result<ChangeRequest> {
        let now = self.clock.now();
        self.apply_to_change(id, |change| change.reject(decision, now))
    }

    pub fn implement_change_request(&self, id: &ChangeRequestId) -> Result<ChangeRequest> {
        let now = self.clock.now();
        self.apply_to_change(id, |change| change.mark_implemented(now))
    }

    pub fn close_change_request(&self, id: &ChangeRequestId) -> Result<ChangeRequest> {
        let now = self.clock.now();
        self.apply_to_change(id, |change| change.close(now))
    }

    pub fn change_requests_for(&self, application_id: &ApplicationId) -> Result<Vec<ChangeRequest>> {
        self.change_requests.find_by_application_id(application_id)
    }

    // Incidents

    /// Opens an incident
    ///
    /// # Errors
    /// Returns an error if the application does not exist, the ID is taken,
    /// or the severity is outside 1..=5
    pub fn report_incident(&self, request: ReportIncidentRequest) -> Result<Incident> {
        self.require_application(&request.application_id)?;
        if self.incidents.exists(&request.id)? {
            return Err(GovernanceError::already_exists(EntityKind::Incident, &request.id).into());
        }

        let incident = Incident::report(
            request.id,
            request.application_id,
            request.title,
            request.reporter,
            request.severity,
            self.clock.now(),
        )?
        .with_description(request.description)
        .with_impact(request.impact);
        self.incidents.save(&incident)?;

        self.events.record([DomainEvent::IncidentReported {
            incident_id: incident.id.clone(),
            application_id: incident.application_id.clone(),
            reporter: incident.reporter.clone(),
            severity: incident.severity,
            description: incident.description.clone(),
            occurred_at: incident.created_at,
        }]);
        if incident.severity == MOST_SEVERE {
            tracing::warn!(incident = %incident.id, application = %incident.application_id, "severity 1 incident reported");
        }
        Ok(incident)
    }

    pub fn investigate_incident(&self, id: &IncidentId) -> Result<Incident> {
        let mut incident = self.incidents.find_by_id(id)?;
        incident.investigate(self.clock.now())?;
        self.incidents.update(&incident)?;
        Ok(incident)
    }

    /// # Errors
    /// Returns `NotFound` for an unknown ID, or `InvalidState` when the
    /// incident is already resolved or closed
    pub fn resolve_incident(&self, request: ResolveIncidentRequest) -> Result<Incident> {
        let mut incident = self.incidents.find_by_id(&request.incident_id)?;
        let now = self.clock.now();
        incident.resolve(request.resolution, request.root_cause, now)?;
        self.incidents.update(&incident)?;

        self.events.record([DomainEvent::IncidentResolved {
            incident_id: incident.id.clone(),
            resolver: request.resolver,
            resolution: incident.resolution.clone(),
            time_to_resolve: incident.time_to_resolve,
            occurred_at: now,
        }]);
        Ok(incident)
    }

    pub fn close_incident(&self, id: &IncidentId) -> Result<Incident> {
        let mut incident = self.incidents.find_by_id(id)?;
        incident.close(self.clock.now())?;
        self.incidents.update(&incident)?;
        Ok(incident)
    }

    pub fn incidents_for(&self, application_id: &ApplicationId) -> Result<Vec<Incident>> {
        self.incidents.find_by_application_id(application_id)
    }

    // Audits

    /// Plans an audit
    ///
    /// # Errors
    /// Returns an error if the application does not exist, the ID is taken,
    /// or the auditor is blank
    pub fn plan_audit(&self, request: CreateAuditRequest) -> Result<Audit> {
        self.require_application(&request.application_id)?;
        if self.audits.exists(&request.id)? {
            return Err(GovernanceError::already_exists(EntityKind::Audit, &request.id).into());
        }
        let audit = Audit::plan(
            request.id,
            request.application_id,
            request.auditor,
            request.audit_type,
            request.scope,
            request.starts_at,
        )?;
        self.audits.save(&audit)?;
        Ok(audit)
    }

    pub fn start_audit(&self, id: &AuditId) -> Result<Audit> {
        let mut audit = self.audits.find_by_id(id)?;
        audit.start(self.clock.now())?;
        self.audits.update(&audit)?;
        Ok(audit)
    }

    /// Completes an audit in progress
    ///
    /// Critical and high findings of a compliance audit are also recorded
    /// as compliance violations.
    ///
    /// # Errors
    /// Returns `NotFound` for an unknown ID, or `InvalidState` unless the
    /// audit is in progress
    pub fn complete_audit(
        &self,
        id: &AuditId,
        findings: Vec<AuditFinding>,
        recommendations: Vec<String>,
    ) -> Result<Audit> {
        let mut audit = self.audits.find_by_id(id)?;
        let now = self.clock.now();
        audit.complete(findings, recommendations, now)?;
        self.audits.update(&audit)?;

        let mut events = vec![DomainEvent::AuditCompleted {
            audit_id: audit.id.clone(),
            application_id: audit.application_id.clone(),
            auditor: audit.auditor.clone(),
            scope: audit.scope.clone(),
            findings: audit.findings.iter().map(|f| f.description.clone()).collect(),
            status: audit.status,
            occurred_at: now,
        }];
        if audit.audit_type == AuditType::Compliance {
            events.extend(
                audit
                    .findings
                    .iter()
                    .filter(|finding| {
                        VIOLATION_SEVERITIES.contains(&finding.severity.to_lowercase().as_str())
                    })
                    .map(|finding| DomainEvent::ComplianceViolationDetected {
                        violation_id: format!("{}-{}", audit.id, finding.id),
                        application_id: audit.application_id.clone(),
                        requirement_type: finding.category.clone(),
                        description: finding.description.clone(),
                        severity: finding.severity.clone(),
                        occurred_at: now,
                    }),
            );
        }
        self.events.record(events);
        Ok(audit)
    }

    /// Moves planned audits whose start has passed to Overdue
    pub fn flag_overdue_audits(&self) -> Result<Vec<Audit>> {
        let now = self.clock.now();
        let mut flagged = Vec::new();
        for mut audit in self.audits.find_by_status(AuditStatus::Planned)? {
            if audit.flag_if_overdue(now) {
                self.audits.update(&audit)?;
                flagged.push(audit);
            }
        }
        if !flagged.is_empty() {
            tracing::info!(count = flagged.len(), "flagged overdue audits");
        }
        Ok(flagged)
    }

    pub fn audits_for(&self, application_id: &ApplicationId) -> Result<Vec<Audit>> {
        self.audits.find_by_application_id(application_id)
    }

    /// Records a compliance violation found outside an audit and returns
    /// its generated ID
    ///
    /// # Errors
    /// Returns `NotFound` if the application does not exist, or
    /// `Validation` when the description is blank
    pub fn record_compliance_violation(&self, request: ComplianceViolationRequest) -> Result<String> {
        self.require_application(&request.application_id)?;
        if request.description.trim().is_empty() {
            return Err(GovernanceError::validation("violation description cannot be empty").into());
        }
        let violation_id = format!("violation-{}", uuid::Uuid::new_v4());
        self.events.record([DomainEvent::ComplianceViolationDetected {
            violation_id: violation_id.clone(),
            application_id: request.application_id,
            requirement_type: request.requirement_type,
            description: request.description,
            severity: request.severity,
            occurred_at: self.clock.now(),
        }]);
        Ok(violation_id)
    }
}
