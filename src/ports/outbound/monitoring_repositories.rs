//! Optional monitoring collaborators.
//!
//! A monitoring service configured without these stores falls back to a
//! fixed set of illustrative measurements and indicators.

use crate::governance::domain::{Kpi, KpiMeasurement, MitigationPlan, Risk, RiskLevel};
use crate::shared::Result;
use chrono::{DateTime, Utc};

pub trait KpiRepository: Send + Sync {
    fn save(&self, kpi: &Kpi) -> Result<()>;

    /// # Errors
    /// Returns `NotFound` if no KPI has this ID
    fn find_by_id(&self, id: &str) -> Result<Kpi>;

    /// Returns every KPI ordered by ID
    fn find_all(&self) -> Result<Vec<Kpi>>;

    fn find_by_category(&self, category: &str) -> Result<Vec<Kpi>>;

    /// # Errors
    /// Returns `NotFound` if no KPI has this ID
    fn delete(&self, id: &str) -> Result<()>;
}

pub trait KpiMeasurementRepository: Send + Sync {
    fn save(&self, measurement: &KpiMeasurement) -> Result<()>;

    /// Returns the measurements for a KPI, oldest first
    fn find_by_kpi_id(&self, kpi_id: &str) -> Result<Vec<KpiMeasurement>>;

    /// Returns the most recent measurement for a KPI, if any
    fn find_latest(&self, kpi_id: &str) -> Result<Option<KpiMeasurement>>;

    /// Returns measurements taken in `[start, end)`, oldest first
    fn find_by_period(
        &self,
        kpi_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<KpiMeasurement>>;
}

pub trait RiskRepository: Send + Sync {
    fn save(&self, risk: &Risk) -> Result<()>;

    /// # Errors
    /// Returns `NotFound` if no risk has this ID
    fn find_by_id(&self, id: &str) -> Result<Risk>;

    /// Returns every risk ordered by ID
    fn find_all(&self) -> Result<Vec<Risk>>;

    fn find_by_level(&self, level: RiskLevel) -> Result<Vec<Risk>>;

    fn find_by_category(&self, category: &str) -> Result<Vec<Risk>>;

    /// # Errors
    /// Returns `NotFound` if no risk has this ID
    fn delete(&self, id: &str) -> Result<()>;
}

pub trait MitigationPlanRepository: Send + Sync {
    fn save(&self, plan: &MitigationPlan) -> Result<()>;

    fn find_by_risk_id(&self, risk_id: &str) -> Result<Vec<MitigationPlan>>;

    /// Returns every plan ordered by risk ID
    fn find_all(&self) -> Result<Vec<MitigationPlan>>;
}
