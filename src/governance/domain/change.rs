use super::application::Priority;
use super::components::ChangeType;
use super::ids::{ApplicationId, AuditId, ChangeRequestId, IncidentId};
use crate::shared::{GovernanceError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Lowest and highest incident severity; 1 is the most severe.
pub const MOST_SEVERE: u8 = 1;
pub const LEAST_SEVERE: u8 = 5;

fn require_text(value: &str, what: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(GovernanceError::validation(format!("{} cannot be empty", what)).into());
    }
    Ok(())
}

/// A request to change a governed application.
///
/// Draft → Submitted → Approved → Implemented → Closed, with Submitted →
/// Rejected → Closed as the refusal path. Every decision is kept in
/// `approvals`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeRequest {
    pub id: ChangeRequestId,
    pub application_id: ApplicationId,
    pub requester: String,
    #[serde(rename = "type")]
    pub change_type: ChangeType,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub status: ChangeRequestStatus,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub business_case: String,
    #[serde(default)]
    pub impact: String,
    #[serde(default)]
    pub risk: String,
    #[serde(default)]
    pub approvals: Vec<Approval>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ChangeRequest {
    /// Drafts a normal, medium-priority change.
    ///
    /// # Errors
    /// `Validation` when the title or requester is blank.
    pub fn new(
        id: ChangeRequestId,
        application_id: ApplicationId,
        title: impl Into<String>,
        requester: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Result<Self> {
        let request = Self {
            id,
            application_id,
            requester: requester.into(),
            change_type: ChangeType::Normal,
            priority: Priority::Medium,
            status: ChangeRequestStatus::Draft,
            title: title.into(),
            description: String::new(),
            business_case: String::new(),
            impact: String::new(),
            risk: String::new(),
            approvals: Vec::new(),
            created_at: now,
            updated_at: now,
        };
        request.validate()?;
        Ok(request)
    }

    pub fn with_type(mut self, change_type: ChangeType) -> Self {
        self.change_type = change_type;
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_business_case(mut self, business_case: impl Into<String>) -> Self {
        self.business_case = business_case.into();
        self
    }

    pub fn with_impact(mut self, impact: impl Into<String>, risk: impl Into<String>) -> Self {
        self.impact = impact.into();
        self.risk = risk.into();
        self
    }

    /// # Errors
    /// `Validation` when the title or requester is blank.
    pub fn validate(&self) -> Result<()> {
        require_text(&self.title, "change request title")?;
        require_text(&self.requester, "change request requester")
    }

    fn transition(
        &mut self,
        from: &[ChangeRequestStatus],
        to: ChangeRequestStatus,
        now: DateTime<Utc>,
    ) -> Result<()> {
        if !from.contains(&self.status) {
            return Err(GovernanceError::invalid_state(format!(
                "change request {} cannot move from {} to {}",
                self.id, self.status, to
            ))
            .into());
        }
        self.status = to;
        self.updated_at = now;
        Ok(())
    }

    /// Draft → Submitted.
    ///
    /// # Errors
    /// `InvalidState` unless the request is a draft.
    pub fn submit(&mut self, now: DateTime<Utc>) -> Result<()> {
        self.transition(&[ChangeRequestStatus::Draft], ChangeRequestStatus::Submitted, now)
    }

    /// Submitted → Approved, recording the approval.
    ///
    /// # Errors
    /// `InvalidState` unless the request has been submitted.
    pub fn approve(&mut self, decision: ApprovalDecision, now: DateTime<Utc>) -> Result<()> {
        self.transition(&[ChangeRequestStatus::Submitted], ChangeRequestStatus::Approved, now)?;
        self.approvals.push(decision.into_approval(ApprovalStatus::Approved, now));
        Ok(())
    }

    /// Submitted → Rejected, recording the rejection.
    ///
    /// # Errors
    /// `InvalidState` unless the request has been submitted.
    pub fn reject(&mut self, decision: ApprovalDecision, now: DateTime<Utc>) -> Result<()> {
        self.transition(&[ChangeRequestStatus::Submitted], ChangeRequestStatus::Rejected, now)?;
        self.approvals.push(decision.into_approval(ApprovalStatus::Rejected, now));
        Ok(())
    }

    /// Approved → Implemented.
    ///
    /// # Errors
    /// `InvalidState` unless the request has been approved.
    pub fn mark_implemented(&mut self, now: DateTime<Utc>) -> Result<()> {
        self.transition(&[ChangeRequestStatus::Approved], ChangeRequestStatus::Implemented, now)
    }

    /// Implemented or Rejected → Closed.
    ///
    /// # Errors
    /// `InvalidState` while the request is still open.
    pub fn close(&mut self, now: DateTime<Utc>) -> Result<()> {
        self.transition(
            &[ChangeRequestStatus::Implemented, ChangeRequestStatus::Rejected],
            ChangeRequestStatus::Closed,
            now,
        )
    }

    /// The approver of the latest approval, if the request was approved.
    pub fn approver(&self) -> Option<&str> {
        self.approvals
            .iter()
            .rev()
            .find(|approval| approval.status == ApprovalStatus::Approved)
            .map(|approval| approval.approver.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeRequestStatus {
    #[default]
    Draft,
    Submitted,
    Approved,
    Rejected,
    Implemented,
    Closed,
}

impl ChangeRequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeRequestStatus::Draft => "draft",
            ChangeRequestStatus::Submitted => "submitted",
            ChangeRequestStatus::Approved => "approved",
            ChangeRequestStatus::Rejected => "rejected",
            ChangeRequestStatus::Implemented => "implemented",
            ChangeRequestStatus::Closed => "closed",
        }
    }
}

impl fmt::Display for ChangeRequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Who decided on a change request, in what role, and why.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApprovalDecision {
    pub approver: String,
    pub role: String,
    pub comments: String,
}

impl ApprovalDecision {
    pub fn new(approver: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            approver: approver.into(),
            role: role.into(),
            comments: String::new(),
        }
    }

    pub fn with_comments(mut self, comments: impl Into<String>) -> Self {
        self.comments = comments.into();
        self
    }

    fn into_approval(self, status: ApprovalStatus, now: DateTime<Utc>) -> Approval {
        Approval {
            approver: self.approver,
            role: self.role,
            status,
            comments: self.comments,
            decided_at: now,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Approval {
    pub approver: String,
    #[serde(default)]
    pub role: String,
    pub status: ApprovalStatus,
    #[serde(default)]
    pub comments: String,
    pub decided_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApprovalStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

/// An operational incident raised against an application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Incident {
    pub id: IncidentId,
    pub application_id: ApplicationId,
    pub reporter: String,
    /// 1 (most severe) to 5
    pub severity: u8,
    #[serde(default)]
    pub status: IncidentStatus,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub impact: String,
    #[serde(default)]
    pub root_cause: String,
    #[serde(default)]
    pub resolution: String,
    #[serde(default, with = "crate::shared::duration_ms")]
    pub time_to_resolve: Duration,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved_at: Option<DateTime<Utc>>,
}

impl Incident {
    /// Opens an incident.
    ///
    /// # Errors
    /// `Validation` when the title or reporter is blank or the severity is
    /// outside 1..=5.
    pub fn report(
        id: IncidentId,
        application_id: ApplicationId,
        title: impl Into<String>,
        reporter: impl Into<String>,
        severity: u8,
        now: DateTime<Utc>,
    ) -> Result<Self> {
        let incident = Self {
            id,
            application_id,
            reporter: reporter.into(),
            severity,
            status: IncidentStatus::Open,
            title: title.into(),
            description: String::new(),
            impact: String::new(),
            root_cause: String::new(),
            resolution: String::new(),
            time_to_resolve: Duration::ZERO,
            created_at: now,
            updated_at: now,
            resolved_at: None,
        };
        incident.validate()?;
        Ok(incident)
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_impact(mut self, impact: impl Into<String>) -> Self {
        self.impact = impact.into();
        self
    }

    /// # Errors
    /// `Validation` when the title or reporter is blank or the severity is
    /// outside 1..=5.
    pub fn validate(&self) -> Result<()> {
        require_text(&self.title, "incident title")?;
        require_text(&self.reporter, "incident reporter")?;
        if !(MOST_SEVERE..=LEAST_SEVERE).contains(&self.severity) {
            return Err(GovernanceError::validation(format!(
                "incident severity must be between {} and {} (got {})",
                MOST_SEVERE, LEAST_SEVERE, self.severity
            ))
            .into());
        }
        Ok(())
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self.status, IncidentStatus::Resolved | IncidentStatus::Closed)
    }

    /// Open → Investigating.
    ///
    /// # Errors
    /// `InvalidState` unless the incident is open.
    pub fn investigate(&mut self, now: DateTime<Utc>) -> Result<()> {
        if self.status != IncidentStatus::Open {
            return Err(GovernanceError::invalid_state(format!(
                "only open incidents can be investigated (incident {} is {})",
                self.id, self.status
            ))
            .into());
        }
        self.status = IncidentStatus::Investigating;
        self.updated_at = now;
        Ok(())
    }

    /// Open or Investigating → Resolved, stamping the time to resolve.
    ///
    /// # Errors
    /// `InvalidState` when the incident is already resolved or closed.
    pub fn resolve(
        &mut self,
        resolution: impl Into<String>,
        root_cause: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Result<()> {
        if self.is_resolved() {
            return Err(GovernanceError::invalid_state(format!(
                "incident {} is already {}",
                self.id, self.status
            ))
            .into());
        }
        self.status = IncidentStatus::Resolved;
        self.resolution = resolution.into();
        self.root_cause = root_cause.into();
        self.time_to_resolve = (now - self.created_at).to_std().unwrap_or_default();
        self.resolved_at = Some(now);
        self.updated_at = now;
        Ok(())
    }

    /// Resolved → Closed.
    ///
    /// # Errors
    /// `InvalidState` unless the incident has been resolved.
    pub fn close(&mut self, now: DateTime<Utc>) -> Result<()> {
        if self.status != IncidentStatus::Resolved {
            return Err(GovernanceError::invalid_state(format!(
                "only resolved incidents can be closed (incident {} is {})",
                self.id, self.status
            ))
            .into());
        }
        self.status = IncidentStatus::Closed;
        self.updated_at = now;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncidentStatus {
    #[default]
    Open,
    Investigating,
    Resolved,
    Closed,
}

impl IncidentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            IncidentStatus::Open => "open",
            IncidentStatus::Investigating => "investigating",
            IncidentStatus::Resolved => "resolved",
            IncidentStatus::Closed => "closed",
        }
    }
}

impl fmt::Display for IncidentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A scheduled audit of an application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Audit {
    pub id: AuditId,
    pub application_id: ApplicationId,
    pub auditor: String,
    #[serde(rename = "type")]
    pub audit_type: AuditType,
    #[serde(default)]
    pub status: AuditStatus,
    #[serde(default)]
    pub scope: String,
    #[serde(default)]
    pub findings: Vec<AuditFinding>,
    #[serde(default)]
    pub recommendations: Vec<String>,
    pub started_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

impl Audit {
    /// Plans an audit starting at `starts_at`.
    ///
    /// # Errors
    /// `Validation` when the auditor is blank.
    pub fn plan(
        id: AuditId,
        application_id: ApplicationId,
        auditor: impl Into<String>,
        audit_type: AuditType,
        scope: impl Into<String>,
        starts_at: DateTime<Utc>,
    ) -> Result<Self> {
        let audit = Self {
            id,
            application_id,
            auditor: auditor.into(),
            audit_type,
            status: AuditStatus::Planned,
            scope: scope.into(),
            findings: Vec::new(),
            recommendations: Vec::new(),
            started_at: starts_at,
            completed_at: None,
        };
        audit.validate()?;
        Ok(audit)
    }

    /// # Errors
    /// `Validation` when the auditor is blank.
    pub fn validate(&self) -> Result<()> {
        require_text(&self.auditor, "auditor")
    }

    /// Planned or Overdue → InProgress.
    ///
    /// # Errors
    /// `InvalidState` once the audit has started.
    pub fn start(&mut self, now: DateTime<Utc>) -> Result<()> {
        if !matches!(self.status, AuditStatus::Planned | AuditStatus::Overdue) {
            return Err(GovernanceError::invalid_state(format!(
                "audit {} has already started ({})",
                self.id, self.status
            ))
            .into());
        }
        self.status = AuditStatus::InProgress;
        self.started_at = now;
        Ok(())
    }

    /// Planned → Overdue once `now` is past the planned start.
    ///
    /// Returns whether the status changed.
    pub fn flag_if_overdue(&mut self, now: DateTime<Utc>) -> bool {
        if self.status == AuditStatus::Planned && now > self.started_at {
            self.status = AuditStatus::Overdue;
            return true;
        }
        false
    }

    /// InProgress → Completed with the audit's findings.
    ///
    /// # Errors
    /// `InvalidState` unless the audit is in progress.
    pub fn complete(
        &mut self,
        findings: Vec<AuditFinding>,
        recommendations: Vec<String>,
        now: DateTime<Utc>,
    ) -> Result<()> {
        if self.status != AuditStatus::InProgress {
            return Err(GovernanceError::invalid_state(format!(
                "only audits in progress can be completed (audit {} is {})",
                self.id, self.status
            ))
            .into());
        }
        self.status = AuditStatus::Completed;
        self.findings = findings;
        self.recommendations = recommendations;
        self.completed_at = Some(now);
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditType {
    Security,
    Compliance,
    Performance,
    Operational,
}

impl AuditType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditType::Security => "security",
            AuditType::Compliance => "compliance",
            AuditType::Performance => "performance",
            AuditType::Operational => "operational",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditStatus {
    #[default]
    Planned,
    InProgress,
    Completed,
    Overdue,
}

impl AuditStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditStatus::Planned => "planned",
            AuditStatus::InProgress => "in_progress",
            AuditStatus::Completed => "completed",
            AuditStatus::Overdue => "overdue",
        }
    }
}

impl fmt::Display for AuditStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuditFinding {
    pub id: String,
    pub severity: String,
    pub category: String,
    pub description: String,
    pub evidence: String,
    pub remediation: String,
}

impl AuditFinding {
    pub fn new(id: impl Into<String>, severity: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            severity: severity.into(),
            description: description.into(),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration as ChronoDuration, TimeZone};

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 3, hour, 0, 0).unwrap()
    }

    fn app() -> ApplicationId {
        ApplicationId::new("crm").unwrap()
    }

    fn draft() -> ChangeRequest {
        ChangeRequest::new(
            ChangeRequestId::new("cr-1").unwrap(),
            app(),
            "Upgrade database",
            "dba-team",
            at(9),
        )
        .unwrap()
    }

    fn incident() -> Incident {
        Incident::report(IncidentId::new("inc-1").unwrap(), app(), "Login outage", "noc", 2, at(9))
            .unwrap()
    }

    fn audit() -> Audit {
        Audit::plan(
            AuditId::new("aud-1").unwrap(),
            app(),
            "Internal Audit",
            AuditType::Security,
            "Access control",
            at(9),
        )
        .unwrap()
    }

    fn is_invalid_state(err: &anyhow::Error) -> bool {
        matches!(
            err.downcast_ref::<GovernanceError>(),
            Some(GovernanceError::InvalidState { .. })
        )
    }

    #[test]
    fn test_change_request_defaults() {
        let request = draft();
        assert_eq!(request.status, ChangeRequestStatus::Draft);
        assert_eq!(request.change_type, ChangeType::Normal);
        assert_eq!(request.priority, Priority::Medium);
        assert!(request.approvals.is_empty());
    }

    #[test]
    fn test_change_request_requires_title() {
        let result = ChangeRequest::new(ChangeRequestId::new("cr-2").unwrap(), app(), " ", "ops", at(9));
        assert!(result.unwrap_err().to_string().contains("title cannot be empty"));
    }

    #[test]
    fn test_submit_only_from_draft() {
        let mut request = draft();
        request.submit(at(10)).unwrap();
        assert_eq!(request.status, ChangeRequestStatus::Submitted);
        assert_eq!(request.updated_at, at(10));

        let err = request.submit(at(11)).unwrap_err();
        assert!(is_invalid_state(&err));
    }

    #[test]
    fn test_approve_records_decision() {
        let mut request = draft();
        let err = request
            .approve(ApprovalDecision::new("cab", "Change Advisory Board"), at(10))
            .unwrap_err();
        assert!(is_invalid_state(&err));
        assert!(request.approvals.is_empty());

        request.submit(at(10)).unwrap();
        request
            .approve(
                ApprovalDecision::new("cab", "Change Advisory Board").with_comments("Go"),
                at(11),
            )
            .unwrap();
        assert_eq!(request.status, ChangeRequestStatus::Approved);
        assert_eq!(request.approvals.len(), 1);
        assert_eq!(request.approvals[0].status, ApprovalStatus::Approved);
        assert_eq!(request.approvals[0].decided_at, at(11));
        assert_eq!(request.approver(), Some("cab"));
    }

    #[test]
    fn test_reject_then_close() {
        let mut request = draft();
        request.submit(at(10)).unwrap();
        request.reject(ApprovalDecision::new("cab", "Chair"), at(11)).unwrap();
        assert_eq!(request.status, ChangeRequestStatus::Rejected);
        assert_eq!(request.approvals[0].status, ApprovalStatus::Rejected);
        assert_eq!(request.approver(), None);

        let err = request.approve(ApprovalDecision::new("cab", "Chair"), at(12)).unwrap_err();
        assert!(is_invalid_state(&err));

        request.close(at(12)).unwrap();
        assert_eq!(request.status, ChangeRequestStatus::Closed);
    }

    #[test]
    fn test_implement_requires_approval() {
        let mut request = draft();
        assert!(is_invalid_state(&request.mark_implemented(at(10)).unwrap_err()));
        assert!(is_invalid_state(&request.close(at(10)).unwrap_err()));

        request.submit(at(10)).unwrap();
        request.approve(ApprovalDecision::new("cab", "Chair"), at(11)).unwrap();
        request.mark_implemented(at(12)).unwrap();
        request.close(at(13)).unwrap();
        assert_eq!(request.status, ChangeRequestStatus::Closed);
    }

    #[test]
    fn test_incident_severity_range() {
        for severity in [0, 6] {
            let result =
                Incident::report(IncidentId::new("inc-x").unwrap(), app(), "Outage", "noc", severity, at(9));
            assert!(result.unwrap_err().to_string().contains("severity"));
        }
    }

    #[test]
    fn test_resolve_stamps_time_to_resolve() {
        let mut incident = incident();
        incident.investigate(at(10)).unwrap();
        assert_eq!(incident.status, IncidentStatus::Investigating);

        incident
            .resolve("Restarted identity provider", "Expired certificate", at(12))
            .unwrap();
        assert_eq!(incident.status, IncidentStatus::Resolved);
        assert_eq!(incident.time_to_resolve, ChronoDuration::hours(3).to_std().unwrap());
        assert_eq!(incident.resolved_at, Some(at(12)));
        assert_eq!(incident.root_cause, "Expired certificate");
    }

    #[test]
    fn test_resolved_incident_rejects_transitions() {
        let mut incident = incident();
        incident.resolve("Fixed", "", at(10)).unwrap();

        assert!(is_invalid_state(&incident.resolve("Again", "", at(11)).unwrap_err()));
        assert!(is_invalid_state(&incident.investigate(at(11)).unwrap_err()));

        incident.close(at(11)).unwrap();
        assert!(incident.is_resolved());
        assert!(is_invalid_state(&incident.resolve("Again", "", at(12)).unwrap_err()));
    }

    #[test]
    fn test_close_requires_resolution() {
        let mut incident = incident();
        assert!(is_invalid_state(&incident.close(at(10)).unwrap_err()));
    }

    #[test]
    fn test_audit_lifecycle() {
        let mut audit = audit();
        assert_eq!(audit.status, AuditStatus::Planned);

        let err = audit.complete(Vec::new(), Vec::new(), at(10)).unwrap_err();
        assert!(is_invalid_state(&err));

        audit.start(at(10)).unwrap();
        assert!(is_invalid_state(&audit.start(at(11)).unwrap_err()));

        audit
            .complete(
                vec![AuditFinding::new("f-1", "high", "Shared admin accounts")],
                vec!["Enforce named accounts".to_string()],
                at(15),
            )
            .unwrap();
        assert_eq!(audit.status, AuditStatus::Completed);
        assert_eq!(audit.completed_at, Some(at(15)));
        assert_eq!(audit.findings.len(), 1);

        let err = audit.complete(Vec::new(), Vec::new(), at(16)).unwrap_err();
        assert!(is_invalid_state(&err));
    }

    #[test]
    fn test_overdue_audit_can_still_start() {
        let mut audit = audit();
        assert!(!audit.flag_if_overdue(at(9)));
        assert!(audit.flag_if_overdue(at(10)));
        assert_eq!(audit.status, AuditStatus::Overdue);

        audit.start(at(11)).unwrap();
        assert_eq!(audit.status, AuditStatus::InProgress);
        assert!(!audit.flag_if_overdue(at(12)));
    }

    #[test]
    fn test_change_request_serializes_type_field() {
        let json = serde_json::to_value(draft().with_type(ChangeType::Emergency)).unwrap();
        assert_eq!(json["type"], "emergency");
        assert_eq!(json["status"], "draft");
    }
}
