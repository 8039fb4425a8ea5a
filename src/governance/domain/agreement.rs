use super::components::{
    Acquisition, Conformance, Implementation, Performance, ResponsibilityMatrix, Strategy,
};
use super::ids::{AgreementId, ApplicationId};
use super::principles::{DirectPrinciple, EvaluatePrinciple, MonitorPrinciple};
use crate::shared::{GovernanceError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Initial version stamped on new agreements.
pub const INITIAL_AGREEMENT_VERSION: &str = "1.0";

/// Per-application governance document.
///
/// Linked 1:1 to an application. Status moves draft → approved → active
/// and never backwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GovernanceAgreement {
    pub id: AgreementId,
    pub application_id: ApplicationId,
    pub title: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub status: AgreementStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub responsibility_matrix: ResponsibilityMatrix,
    #[serde(default)]
    pub strategy: Strategy,
    #[serde(default)]
    pub acquisition: Acquisition,
    #[serde(default)]
    pub performance: Performance,
    #[serde(default)]
    pub conformance: Conformance,
    #[serde(default)]
    pub implementation: Implementation,
    #[serde(default)]
    pub evaluate: EvaluatePrinciple,
    #[serde(default)]
    pub direct: DirectPrinciple,
    #[serde(default)]
    pub monitor: MonitorPrinciple,
}

impl GovernanceAgreement {
    /// Creates a draft agreement at the initial version.
    pub fn new(
        id: AgreementId,
        application_id: ApplicationId,
        title: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Result<Self> {
        let agreement = Self {
            id,
            application_id,
            title: title.into(),
            version: INITIAL_AGREEMENT_VERSION.to_string(),
            status: AgreementStatus::Draft,
            created_at: now,
            updated_at: now,
            responsibility_matrix: ResponsibilityMatrix::default(),
            strategy: Strategy::default(),
            acquisition: Acquisition::default(),
            performance: Performance::default(),
            conformance: Conformance::default(),
            implementation: Implementation::default(),
            evaluate: EvaluatePrinciple::default(),
            direct: DirectPrinciple::default(),
            monitor: MonitorPrinciple::default(),
        };
        agreement.validate()?;
        Ok(agreement)
    }

    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(GovernanceError::validation(format!(
                "governance agreement title cannot be empty (id: {})",
                self.id
            ))
            .into());
        }
        Ok(())
    }

    /// Draft → Approved.
    ///
    /// # Errors
    /// `InvalidState` when the agreement is not a draft.
    pub fn approve(&mut self, now: DateTime<Utc>) -> Result<()> {
        if self.status != AgreementStatus::Draft {
            return Err(GovernanceError::invalid_state(format!(
                "only draft agreements can be approved (agreement {} is {})",
                self.id, self.status
            ))
            .into());
        }
        self.status = AgreementStatus::Approved;
        self.updated_at = now;
        Ok(())
    }

    /// Approved → Active.
    ///
    /// # Errors
    /// `InvalidState` when the agreement has not been approved.
    pub fn activate(&mut self, now: DateTime<Utc>) -> Result<()> {
        if self.status != AgreementStatus::Approved {
            return Err(GovernanceError::invalid_state(format!(
                "only approved agreements can be activated (agreement {} is {})",
                self.id, self.status
            ))
            .into());
        }
        self.status = AgreementStatus::Active;
        self.updated_at = now;
        Ok(())
    }

    /// Replaces one governance component and returns its name.
    pub fn replace_component(&mut self, component: GovernanceComponent, now: DateTime<Utc>) -> &'static str {
        let name = component.name();
        match component {
            GovernanceComponent::Strategy(strategy) => self.strategy = strategy,
            GovernanceComponent::Acquisition(acquisition) => self.acquisition = acquisition,
            GovernanceComponent::Performance(performance) => self.performance = performance,
            GovernanceComponent::Conformance(conformance) => self.conformance = conformance,
            GovernanceComponent::Implementation(implementation) => {
                self.implementation = implementation
            }
        }
        self.updated_at = now;
        name
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgreementStatus {
    #[default]
    Draft,
    Approved,
    Active,
    Suspended,
    Retired,
}

impl AgreementStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AgreementStatus::Draft => "draft",
            AgreementStatus::Approved => "approved",
            AgreementStatus::Active => "active",
            AgreementStatus::Suspended => "suspended",
            AgreementStatus::Retired => "retired",
        }
    }
}

impl fmt::Display for AgreementStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One of the five replaceable governance components.
#[derive(Debug, Clone, PartialEq)]
pub enum GovernanceComponent {
    Strategy(Strategy),
    Acquisition(Acquisition),
    Performance(Performance),
    Conformance(Conformance),
    Implementation(Implementation),
}

impl GovernanceComponent {
    pub fn name(&self) -> &'static str {
        match self {
            GovernanceComponent::Strategy(_) => "strategy",
            GovernanceComponent::Acquisition(_) => "acquisition",
            GovernanceComponent::Performance(_) => "performance",
            GovernanceComponent::Conformance(_) => "conformance",
            GovernanceComponent::Implementation(_) => "implementation",
        }
    }
}
