use crate::governance::domain::{
    Application, ApplicationId, Audit, ChangeRequest, GovernanceAgreement, Incident, Kpi,
    KpiMeasurement, MitigationPlan, PortfolioId, Risk,
};
use crate::shared::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Everything needed to seed an in-memory governance workspace
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GovernanceDataset {
    pub applications: Vec<Application>,
    pub agreements: Vec<GovernanceAgreement>,
    pub portfolios: Vec<PortfolioSeed>,
    pub kpis: Vec<Kpi>,
    pub kpi_measurements: Vec<KpiMeasurement>,
    pub risks: Vec<Risk>,
    pub mitigation_plans: Vec<MitigationPlan>,
    pub change_requests: Vec<ChangeRequest>,
    pub incidents: Vec<Incident>,
    pub audits: Vec<Audit>,
}

impl GovernanceDataset {
    pub fn has_kpi_data(&self) -> bool {
        !self.kpis.is_empty() || !self.kpi_measurements.is_empty()
    }

    pub fn has_risk_data(&self) -> bool {
        !self.risks.is_empty() || !self.mitigation_plans.is_empty()
    }
}

/// A portfolio to create, with the IDs of the applications it should hold
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortfolioSeed {
    pub id: PortfolioId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub owner: String,
    #[serde(default)]
    pub applications: Vec<ApplicationId>,
}

/// DatasetReader port for loading a governance dataset
pub trait DatasetReader {
    /// Reads and parses a dataset file
    ///
    /// # Arguments
    /// * `path` - Path to a `.json`, `.toml`, `.yml` or `.yaml` file
    ///
    /// # Errors
    /// Returns an error if:
    /// - The file is missing, a symlink, or larger than the size limit
    /// - The extension is not recognised
    /// - The content does not parse as a dataset
    fn read_dataset(&self, path: &Path) -> Result<GovernanceDataset>;
}
