use crate::governance::domain::{Kpi, KpiMeasurement, MitigationPlan, Risk, RiskLevel};
use crate::ports::outbound::{
    KpiMeasurementRepository, KpiRepository, MitigationPlanRepository, RiskRepository,
};
use crate::shared::{EntityKind, GovernanceError, Result};
use chrono::{DateTime, Utc};
use dashmap::DashMap;

fn sorted_by<T, K: Ord>(mut items: Vec<T>, key: impl Fn(&T) -> K) -> Vec<T> {
    items.sort_by_key(|item| key(item));
    items
}

#[derive(Default)]
pub struct InMemoryKpiRepository {
    kpis: DashMap<String, Kpi>,
}

impl InMemoryKpiRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KpiRepository for InMemoryKpiRepository {
    fn save(&self, kpi: &Kpi) -> Result<()> {
        kpi.validate()?;
        self.kpis.insert(kpi.id.clone(), kpi.clone());
        Ok(())
    }

    fn find_by_id(&self, id: &str) -> Result<Kpi> {
        self.kpis
            .get(id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| GovernanceError::not_found(EntityKind::Kpi, id).into())
    }

    fn find_all(&self) -> Result<Vec<Kpi>> {
        let all: Vec<Kpi> = self.kpis.iter().map(|entry| entry.value().clone()).collect();
        Ok(sorted_by(all, |kpi: &Kpi| kpi.id.clone()))
    }

    fn find_by_category(&self, category: &str) -> Result<Vec<Kpi>> {
        let matching: Vec<Kpi> = self
            .kpis
            .iter()
            .filter(|entry| entry.value().category == category)
            .map(|entry| entry.value().clone())
            .collect();
        Ok(sorted_by(matching, |kpi: &Kpi| kpi.id.clone()))
    }

    fn delete(&self, id: &str) -> Result<()> {
        self.kpis
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| GovernanceError::not_found(EntityKind::Kpi, id).into())
    }
}

/// Measurements per KPI, kept ordered by `measured_at`
#[derive(Default)]
pub struct InMemoryKpiMeasurementRepository {
    measurements: DashMap<String, Vec<KpiMeasurement>>,
}

impl InMemoryKpiMeasurementRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KpiMeasurementRepository for InMemoryKpiMeasurementRepository {
    fn save(&self, measurement: &KpiMeasurement) -> Result<()> {
        let mut series = self.measurements.entry(measurement.kpi_id.clone()).or_default();
        let position = series.partition_point(|existing| existing.measured_at <= measurement.measured_at);
        series.insert(position, measurement.clone());
        Ok(())
    }

    fn find_by_kpi_id(&self, kpi_id: &str) -> Result<Vec<KpiMeasurement>> {
        Ok(self
            .measurements
            .get(kpi_id)
            .map(|series| series.value().clone())
            .unwrap_or_default())
    }

    fn find_latest(&self, kpi_id: &str) -> Result<Option<KpiMeasurement>> {
        Ok(self
            .measurements
            .get(kpi_id)
            .and_then(|series| series.last().cloned()))
    }

    fn find_by_period(
        &self,
        kpi_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<KpiMeasurement>> {
        Ok(self
            .find_by_kpi_id(kpi_id)?
            .into_iter()
            .filter(|m| m.measured_at >= start && m.measured_at < end)
            .collect())
    }
}

#[derive(Default)]
pub struct InMemoryRiskRepository {
    risks: DashMap<String, Risk>,
}

impl InMemoryRiskRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn collect_where(&self, predicate: impl Fn(&Risk) -> bool) -> Vec<Risk> {
        let matching: Vec<Risk> = self
            .risks
            .iter()
            .filter(|entry| predicate(entry.value()))
            .map(|entry| entry.value().clone())
            .collect();
        sorted_by(matching, |risk: &Risk| risk.id.clone())
    }
}

impl RiskRepository for InMemoryRiskRepository {
    fn save(&self, risk: &Risk) -> Result<()> {
        if risk.id.trim().is_empty() {
            return Err(GovernanceError::validation("risk ID cannot be empty").into());
        }
        self.risks.insert(risk.id.clone(), risk.clone());
        Ok(())
    }

    fn find_by_id(&self, id: &str) -> Result<Risk> {
        self.risks
            .get(id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| GovernanceError::not_found(EntityKind::Risk, id).into())
    }

    fn find_all(&self) -> Result<Vec<Risk>> {
        Ok(self.collect_where(|_| true))
    }

    fn find_by_level(&self, level: RiskLevel) -> Result<Vec<Risk>> {
        Ok(self.collect_where(|risk| risk.level == level))
    }

    fn find_by_category(&self, category: &str) -> Result<Vec<Risk>> {
        Ok(self.collect_where(|risk| risk.category == category))
    }

    fn delete(&self, id: &str) -> Result<()> {
        self.risks
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| GovernanceError::not_found(EntityKind::Risk, id).into())
    }
}

#[derive(Default)]
pub struct InMemoryMitigationPlanRepository {
    plans: DashMap<String, Vec<MitigationPlan>>,
}

impl InMemoryMitigationPlanRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MitigationPlanRepository for InMemoryMitigationPlanRepository {
    fn save(&self, plan: &MitigationPlan) -> Result<()> {
        self.plans
            .entry(plan.risk_id.clone())
            .or_default()
            .push(plan.clone());
        Ok(())
    }

    fn find_by_risk_id(&self, risk_id: &str) -> Result<Vec<MitigationPlan>> {
        Ok(self
            .plans
            .get(risk_id)
            .map(|plans| plans.value().clone())
            .unwrap_or_default())
    }

    fn find_all(&self) -> Result<Vec<MitigationPlan>> {
        let mut keyed: Vec<(String, Vec<MitigationPlan>)> = self
            .plans
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect();
        keyed.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(keyed.into_iter().flat_map(|(_, plans)| plans).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::governance::domain::RiskImpact;
    use chrono::{Duration, TimeZone};

    fn at(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, day, 0, 0, 0).unwrap()
    }

    fn measurement(kpi_id: &str, value: f64, day: u32) -> KpiMeasurement {
        KpiMeasurement {
            kpi_id: kpi_id.to_string(),
            value,
            target: 99.0,
            achieved: false,
            measured_at: at(day),
            notes: String::new(),
        }
    }

    fn risk(id: &str, level: RiskLevel, category: &str) -> Risk {
        Risk {
            id: id.to_string(),
            name: id.to_uppercase(),
            description: String::new(),
            category: category.to_string(),
            probability: 0.5,
            impact: RiskImpact::Medium,
            level,
        }
    }

    #[test]
    fn test_kpi_repository_orders_and_filters() {
        let repo = InMemoryKpiRepository::new();
        repo.save(&Kpi::new("kpi-b", "Throughput", 10.0).with_category("performance")).unwrap();
        repo.save(&Kpi::new("kpi-a", "Cost", 5.0).with_category("efficiency")).unwrap();

        let ids: Vec<String> = repo.find_all().unwrap().into_iter().map(|k| k.id).collect();
        assert_eq!(ids, vec!["kpi-a", "kpi-b"]);
        assert_eq!(repo.find_by_category("efficiency").unwrap().len(), 1);

        repo.delete("kpi-a").unwrap();
        assert!(repo.find_by_id("kpi-a").is_err());
        assert!(repo.delete("kpi-a").is_err());
        assert!(repo.save(&Kpi::new("", "Nameless", 1.0)).is_err());
    }

    #[test]
    fn test_find_latest_ignores_insertion_order() {
        let repo = InMemoryKpiMeasurementRepository::new();
        repo.save(&measurement("kpi-1", 90.0, 10)).unwrap();
        repo.save(&measurement("kpi-1", 80.0, 3)).unwrap();
        repo.save(&measurement("kpi-1", 85.0, 7)).unwrap();

        assert_eq!(repo.find_latest("kpi-1").unwrap().unwrap().value, 90.0);
        assert!(repo.find_latest("kpi-2").unwrap().is_none());

        let values: Vec<f64> = repo
            .find_by_kpi_id("kpi-1")
            .unwrap()
            .into_iter()
            .map(|m| m.value)
            .collect();
        assert_eq!(values, vec![80.0, 85.0, 90.0]);
    }

    #[test]
    fn test_find_by_period_is_half_open() {
        let repo = InMemoryKpiMeasurementRepository::new();
        repo.save(&measurement("kpi-1", 1.0, 1)).unwrap();
        repo.save(&measurement("kpi-1", 2.0, 2)).unwrap();
        repo.save(&measurement("kpi-1", 3.0, 3)).unwrap();

        let period = repo.find_by_period("kpi-1", at(1), at(3)).unwrap();
        assert_eq!(period.len(), 2);
        let period = repo
            .find_by_period("kpi-1", at(1) + Duration::hours(1), at(3) + Duration::hours(1))
            .unwrap();
        assert_eq!(period.len(), 2);
    }

    #[test]
    fn test_risk_repository_queries() {
        let repo = InMemoryRiskRepository::new();
        repo.save(&risk("r-2", RiskLevel::High, "security")).unwrap();
        repo.save(&risk("r-1", RiskLevel::Low, "vendor")).unwrap();
        repo.save(&risk("r-3", RiskLevel::High, "vendor")).unwrap();

        let ids: Vec<String> = repo.find_all().unwrap().into_iter().map(|r| r.id).collect();
        assert_eq!(ids, vec!["r-1", "r-2", "r-3"]);
        assert_eq!(repo.find_by_level(RiskLevel::High).unwrap().len(), 2);
        assert_eq!(repo.find_by_category("vendor").unwrap().len(), 2);
        assert_eq!(repo.find_by_id("r-2").unwrap().category, "security");

        repo.delete("r-2").unwrap();
        assert!(repo.find_by_id("r-2").is_err());
    }

    #[test]
    fn test_mitigation_plans_by_risk() {
        let repo = InMemoryMitigationPlanRepository::new();
        for (risk_id, effectiveness) in [("r-2", 0.5), ("r-1", 0.1), ("r-2", 0.9)] {
            repo.save(&MitigationPlan {
                risk_id: risk_id.to_string(),
                effectiveness,
                ..MitigationPlan::default()
            })
            .unwrap();
        }

        assert_eq!(repo.find_by_risk_id("r-2").unwrap().len(), 2);
        assert!(repo.find_by_risk_id("r-9").unwrap().is_empty());
        let order: Vec<String> = repo.find_all().unwrap().into_iter().map(|p| p.risk_id).collect();
        assert_eq!(order, vec!["r-1", "r-2", "r-2"]);
    }
}
