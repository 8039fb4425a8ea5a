use crate::application::dto::GovernanceMonitoringResult;
use crate::governance::domain::{
    AgreementId, ComplianceMonitoring, GovernanceAgreement, KpiMeasurement, MitigationTracking,
    RiskMonitoring,
};
use crate::governance::policies::MonitoringThresholds;
use crate::governance::services::MonitoringSamples;
use crate::ports::outbound::{
    Clock, GovernanceAgreementRepository, KpiMeasurementRepository, KpiRepository,
    MitigationPlanRepository, RiskRepository,
};
use crate::shared::Result;
use std::sync::Arc;

/// Note attached to placeholder measurements for KPIs never measured.
pub const NO_MEASUREMENT_NOTE: &str = "No measurement available";

/// MonitoringEngine - the "Monitor" side of governance
///
/// The KPI and risk stores are optional. Without them the engine reports
/// [`MonitoringSamples`] instead of failing.
pub struct MonitoringEngine {
    agreements: Arc<dyn GovernanceAgreementRepository>,
    clock: Arc<dyn Clock>,
    kpis: Option<(Arc<dyn KpiRepository>, Arc<dyn KpiMeasurementRepository>)>,
    risks: Option<Arc<dyn RiskRepository>>,
    mitigations: Option<Arc<dyn MitigationPlanRepository>>,
}

impl MonitoringEngine {
    pub fn new(agreements: Arc<dyn GovernanceAgreementRepository>, clock: Arc<dyn Clock>) -> Self {
        Self {
            agreements,
            clock,
            kpis: None,
            risks: None,
            mitigations: None,
        }
    }

    pub fn with_kpi_repositories(
        mut self,
        kpis: Arc<dyn KpiRepository>,
        measurements: Arc<dyn KpiMeasurementRepository>,
    ) -> Self {
        self.kpis = Some((kpis, measurements));
        self
    }

    pub fn with_risk_repository(mut self, risks: Arc<dyn RiskRepository>) -> Self {
        self.risks = Some(risks);
        self
    }

    pub fn with_mitigation_repository(mut self, mitigations: Arc<dyn MitigationPlanRepository>) -> Self {
        self.mitigations = Some(mitigations);
        self
    }

    /// Latest measurement of every stored KPI, ordered by KPI ID
    ///
    /// Achievement is recomputed against the KPI's own target.
    ///
    /// # Errors
    /// Returns `NotFound` if the agreement does not exist
    pub fn monitor_kpis(&self, agreement_id: &AgreementId) -> Result<Vec<KpiMeasurement>> {
        let agreement = self.agreements.find_by_id(agreement_id)?;
        self.kpis_for(&agreement)
    }

    /// # Errors
    /// Returns `NotFound` if the agreement does not exist
    pub fn monitor_compliance(&self, agreement_id: &AgreementId) -> Result<ComplianceMonitoring> {
        let agreement = self.agreements.find_by_id(agreement_id)?;
        Ok(Self::compliance_for(&agreement))
    }

    /// Risk indicators for every stored risk, plus mitigation progress when
    /// a mitigation store is configured
    ///
    /// # Errors
    /// Returns `NotFound` if the agreement does not exist
    pub fn monitor_risks(&self, agreement_id: &AgreementId) -> Result<RiskMonitoring> {
        let agreement = self.agreements.find_by_id(agreement_id)?;
        self.risks_for(&agreement)
    }

    /// Runs KPI, compliance and risk monitoring together against a single
    /// read of the agreement
    ///
    /// # Errors
    /// Returns `NotFound` if the agreement does not exist
    pub fn monitor(&self, agreement_id: &AgreementId) -> Result<GovernanceMonitoringResult> {
        let agreement = self.agreements.find_by_id(agreement_id)?;
        Ok(GovernanceMonitoringResult {
            kpi_measurements: self.kpis_for(&agreement)?,
            compliance_status: Self::compliance_for(&agreement),
            risk_status: self.risks_for(&agreement)?,
        })
    }

    fn kpis_for(&self, agreement: &GovernanceAgreement) -> Result<Vec<KpiMeasurement>> {
        let now = self.clock.now();

        let Some((kpis, measurements)) = &self.kpis else {
            tracing::debug!(agreement = %agreement.id, "no KPI store configured, reporting samples");
            return Ok(MonitoringSamples::kpi_measurements(now));
        };

        kpis.find_all()?
            .into_iter()
            .map(|kpi| -> Result<KpiMeasurement> {
                let mut measurement = measurements.find_latest(&kpi.id)?.unwrap_or_else(|| KpiMeasurement {
                    kpi_id: kpi.id.clone(),
                    value: 0.0,
                    target: kpi.target,
                    achieved: false,
                    measured_at: now,
                    notes: NO_MEASUREMENT_NOTE.to_string(),
                });
                measurement.achieved = MonitoringThresholds::kpi_achieved(&kpi, measurement.value);
                Ok(measurement)
            })
            .collect()
    }

    fn compliance_for(agreement: &GovernanceAgreement) -> ComplianceMonitoring {
        agreement.conformance.compliance_monitoring.clone()
    }

    fn risks_for(&self, agreement: &GovernanceAgreement) -> Result<RiskMonitoring> {
        let Some(risks) = &self.risks else {
            tracing::debug!(agreement = %agreement.id, "no risk store configured, reporting samples");
            return Ok(MonitoringSamples::risk_monitoring());
        };

        let risk_indicators = risks
            .find_all()?
            .iter()
            .map(MonitoringThresholds::risk_indicator)
            .collect();

        let mitigation_tracking: Vec<MitigationTracking> = match &self.mitigations {
            Some(mitigations) => mitigations
                .find_all()?
                .iter()
                .map(MonitoringThresholds::mitigation_tracking)
                .collect(),
            None => Vec::new(),
        };

        Ok(RiskMonitoring {
            risk_indicators,
            risk_heat_maps: Vec::new(),
            mitigation_tracking,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::outbound::clock::FixedClock;
    use crate::adapters::outbound::memory::{
        InMemoryAgreementRepository, InMemoryKpiMeasurementRepository, InMemoryKpiRepository,
        InMemoryMitigationPlanRepository, InMemoryRiskRepository,
    };
    use crate::governance::domain::{
        ActionStatus, ApplicationId, GovernanceAgreement, Kpi, MitigationPlan, Risk, RiskImpact,
        RiskLevel, RiskStatus,
    };
    use crate::governance::domain::AgreementStatus;
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Agreement store that counts `find_by_id` calls
    struct CountingAgreementRepository {
        inner: Arc<InMemoryAgreementRepository>,
        lookups: AtomicUsize,
    }

    impl GovernanceAgreementRepository for CountingAgreementRepository {
        fn save(&self, agreement: &GovernanceAgreement) -> Result<()> {
            self.inner.save(agreement)
        }

        fn find_by_id(&self, id: &AgreementId) -> Result<GovernanceAgreement> {
            self.lookups.fetch_add(1, Ordering::SeqCst);
            self.inner.find_by_id(id)
        }

        fn find_by_application_id(&self, application_id: &ApplicationId) -> Result<GovernanceAgreement> {
            self.inner.find_by_application_id(application_id)
        }

        fn find_all(&self) -> Result<Vec<GovernanceAgreement>> {
            self.inner.find_all()
        }

        fn find_by_status(&self, status: AgreementStatus) -> Result<Vec<GovernanceAgreement>> {
            self.inner.find_by_status(status)
        }

        fn update(&self, agreement: &GovernanceAgreement) -> Result<()> {
            self.inner.update(agreement)
        }

        fn delete(&self, id: &AgreementId) -> Result<()> {
            self.inner.delete(id)
        }

        fn exists(&self, id: &AgreementId) -> Result<bool> {
            self.inner.exists(id)
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 4, 1, 9, 0, 0).unwrap()
    }

    fn agreement_id() -> AgreementId {
        AgreementId::new("ga-1").unwrap()
    }

    fn agreements() -> Arc<InMemoryAgreementRepository> {
        let repo = Arc::new(InMemoryAgreementRepository::new());
        let mut agreement = GovernanceAgreement::new(
            agreement_id(),
            ApplicationId::new("app-1").unwrap(),
            "Agreement",
            now(),
        )
        .unwrap();
        agreement.conformance.compliance_monitoring.monitoring_frequency = "quarterly".to_string();
        repo.save(&agreement).unwrap();
        repo
    }

    fn engine() -> MonitoringEngine {
        MonitoringEngine::new(agreements(), Arc::new(FixedClock::new(now())))
    }

    #[test]
    fn test_monitor_kpis_without_store_reports_samples() {
        let measurements = engine().monitor_kpis(&agreement_id()).unwrap();

        assert_eq!(measurements.len(), 2);
        assert_eq!(measurements[0].kpi_id, "kpi-001");
        assert_eq!(measurements[0].value, 95.5);
        assert_eq!(measurements[0].target, 100.0);
        assert!(!measurements[0].achieved);
        assert_eq!(measurements[1].kpi_id, "kpi-002");
        assert_eq!(measurements[1].value, 99.2);
        assert_eq!(measurements[1].target, 98.0);
        assert!(measurements[1].achieved);
        assert_eq!(measurements[0].measured_at, now());
    }

    #[test]
    fn test_monitor_requires_existing_agreement() {
        let missing = AgreementId::new("ga-404").unwrap();
        let engine = engine();
        assert!(engine.monitor_kpis(&missing).is_err());
        assert!(engine.monitor_compliance(&missing).is_err());
        assert!(engine.monitor_risks(&missing).is_err());
    }

    #[test]
    fn test_monitor_kpis_recomputes_achievement() {
        let kpis = Arc::new(InMemoryKpiRepository::new());
        let measurements = Arc::new(InMemoryKpiMeasurementRepository::new());
        kpis.save(&Kpi::new("kpi-cost", "Cost per ticket", 12.0).with_category("efficiency"))
            .unwrap();
        kpis.save(&Kpi::new("kpi-avail", "Availability", 99.5).with_category("performance"))
            .unwrap();
        kpis.save(&Kpi::new("kpi-nps", "NPS", 40.0)).unwrap();
        for (kpi_id, value, target, days_ago) in [
            ("kpi-cost", 14.0, 15.0, 10),
            ("kpi-cost", 11.0, 15.0, 1),
            ("kpi-avail", 99.7, 99.0, 2),
        ] {
            measurements
                .save(&KpiMeasurement {
                    kpi_id: kpi_id.to_string(),
                    value,
                    target,
                    achieved: false,
                    measured_at: now() - Duration::days(days_ago),
                    notes: String::new(),
                })
                .unwrap();
        }

        let engine = engine().with_kpi_repositories(kpis, measurements);
        let results = engine.monitor_kpis(&agreement_id()).unwrap();

        let ids: Vec<&str> = results.iter().map(|m| m.kpi_id.as_str()).collect();
        assert_eq!(ids, vec!["kpi-avail", "kpi-cost", "kpi-nps"]);

        assert!(results[0].achieved);
        assert_eq!(results[1].value, 11.0);
        assert_eq!(results[1].target, 15.0);
        assert!(results[1].achieved);

        assert_eq!(results[2].value, 0.0);
        assert_eq!(results[2].target, 40.0);
        assert!(!results[2].achieved);
        assert_eq!(results[2].notes, NO_MEASUREMENT_NOTE);
    }

    #[test]
    fn test_monitor_compliance_is_passthrough() {
        let compliance = engine().monitor_compliance(&agreement_id()).unwrap();
        assert_eq!(compliance.monitoring_frequency, "quarterly");
    }

    #[test]
    fn test_monitor_risks_without_store_reports_samples() {
        let monitoring = engine().monitor_risks(&agreement_id()).unwrap();

        assert_eq!(monitoring.risk_indicators.len(), 2);
        assert_eq!(monitoring.risk_indicators[0].name, "Technical Debt");
        assert_eq!(monitoring.risk_indicators[0].status, RiskStatus::Warning);
        assert_eq!(monitoring.risk_indicators[1].name, "Security Vulnerabilities");
        assert_eq!(monitoring.risk_indicators[1].status, RiskStatus::Normal);
        assert!(monitoring.mitigation_tracking.is_empty());
    }

    #[test]
    fn test_monitor_risks_with_stores() {
        let risks = Arc::new(InMemoryRiskRepository::new());
        risks
            .save(&Risk {
                id: "r-1".to_string(),
                name: "Vendor lock-in".to_string(),
                description: String::new(),
                category: "vendor".to_string(),
                probability: 0.9,
                impact: RiskImpact::Critical,
                level: RiskLevel::Low,
            })
            .unwrap();
        let mitigations = Arc::new(InMemoryMitigationPlanRepository::new());
        mitigations
            .save(&MitigationPlan {
                risk_id: "r-1".to_string(),
                responsible: "Procurement".to_string(),
                effectiveness: 0.4,
                ..MitigationPlan::default()
            })
            .unwrap();

        let engine = engine()
            .with_risk_repository(risks)
            .with_mitigation_repository(mitigations);
        let monitoring = engine.monitor_risks(&agreement_id()).unwrap();

        assert_eq!(monitoring.risk_indicators.len(), 1);
        let indicator = &monitoring.risk_indicators[0];
        assert!((indicator.value - 3.6).abs() < 1e-9);
        assert_eq!(indicator.threshold, 2.0);
        assert_eq!(indicator.status, RiskStatus::Critical);

        assert_eq!(monitoring.mitigation_tracking.len(), 1);
        assert_eq!(monitoring.mitigation_tracking[0].mitigation_id, "mit-r-1");
        assert_eq!(monitoring.mitigation_tracking[0].status, ActionStatus::InProgress);
    }

    #[test]
    fn test_monitor_combines_all_three() {
        let result = engine().monitor(&agreement_id()).unwrap();
        assert_eq!(result.kpi_measurements.len(), 2);
        assert!(result.compliance_status.is_configured());
        assert_eq!(result.risk_status.risk_indicators.len(), 2);
    }

    #[test]
    fn test_monitor_reads_agreement_once() {
        let repo = Arc::new(CountingAgreementRepository {
            inner: agreements(),
            lookups: AtomicUsize::new(0),
        });
        let engine = MonitoringEngine::new(repo.clone(), Arc::new(FixedClock::new(now())))
            .with_risk_repository(Arc::new(InMemoryRiskRepository::new()));

        let result = engine.monitor(&agreement_id()).unwrap();
        assert_eq!(result.compliance_status.monitoring_frequency, "quarterly");
        assert_eq!(repo.lookups.load(Ordering::SeqCst), 1);

        assert!(engine.monitor(&AgreementId::new("ga-404").unwrap()).is_err());
        assert_eq!(repo.lookups.load(Ordering::SeqCst), 2);
    }
}
