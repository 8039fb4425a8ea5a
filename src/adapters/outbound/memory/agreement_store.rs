use super::{read_lock, write_lock};
use crate::governance::domain::{AgreementId, AgreementStatus, ApplicationId, GovernanceAgreement};
use crate::ports::outbound::GovernanceAgreementRepository;
use crate::shared::{EntityKind, GovernanceError, Result};
use std::collections::{BTreeMap, HashMap};
use std::sync::RwLock;

const STORE: &str = "agreement store";

#[derive(Default)]
struct Tables {
    by_id: BTreeMap<AgreementId, GovernanceAgreement>,
    by_application: HashMap<ApplicationId, AgreementId>,
}

/// Agreement store with a one-to-one index from application to agreement
#[derive(Default)]
pub struct InMemoryAgreementRepository {
    tables: RwLock<Tables>,
}

impl InMemoryAgreementRepository {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub(crate) fn assert_indexes_consistent(&self) {
        let tables = self.tables.read().unwrap();
        let scanned: HashMap<ApplicationId, AgreementId> = tables
            .by_id
            .values()
            .map(|agreement| (agreement.application_id.clone(), agreement.id.clone()))
            .collect();
        assert_eq!(tables.by_application, scanned);
    }
}

impl GovernanceAgreementRepository for InMemoryAgreementRepository {
    fn save(&self, agreement: &GovernanceAgreement) -> Result<()> {
        let mut tables = write_lock(&self.tables, STORE)?;

        if let Some(existing) = tables.by_application.get(&agreement.application_id) {
            if existing != &agreement.id {
                return Err(GovernanceError::already_exists(
                    EntityKind::GovernanceAgreement,
                    format!("{} (application {})", existing, agreement.application_id),
                )
                .into());
            }
        }

        let previous_application = tables
            .by_id
            .get(&agreement.id)
            .map(|previous| previous.application_id.clone());
        if let Some(previous_application) = previous_application {
            tables.by_application.remove(&previous_application);
        }

        tables
            .by_application
            .insert(agreement.application_id.clone(), agreement.id.clone());
        tables.by_id.insert(agreement.id.clone(), agreement.clone());
        Ok(())
    }

    fn find_by_id(&self, id: &AgreementId) -> Result<GovernanceAgreement> {
        read_lock(&self.tables, STORE)?
            .by_id
            .get(id)
            .cloned()
            .ok_or_else(|| GovernanceError::not_found(EntityKind::GovernanceAgreement, id).into())
    }

    fn find_by_application_id(&self, application_id: &ApplicationId) -> Result<GovernanceAgreement> {
        let tables = read_lock(&self.tables, STORE)?;
        tables
            .by_application
            .get(application_id)
            .and_then(|id| tables.by_id.get(id))
            .cloned()
            .ok_or_else(|| {
                GovernanceError::not_found(
                    EntityKind::GovernanceAgreement,
                    format!("for application {}", application_id),
                )
                .into()
            })
    }

    fn find_all(&self) -> Result<Vec<GovernanceAgreement>> {
        Ok(read_lock(&self.tables, STORE)?.by_id.values().cloned().collect())
    }

    fn find_by_status(&self, status: AgreementStatus) -> Result<Vec<GovernanceAgreement>> {
        Ok(read_lock(&self.tables, STORE)?
            .by_id
            .values()
            .filter(|agreement| agreement.status == status)
            .cloned()
            .collect())
    }

    fn update(&self, agreement: &GovernanceAgreement) -> Result<()> {
        if !self.exists(&agreement.id)? {
            return Err(GovernanceError::not_found(EntityKind::GovernanceAgreement, &agreement.id).into());
        }
        self.save(agreement)
    }

    fn delete(&self, id: &AgreementId) -> Result<()> {
        let mut tables = write_lock(&self.tables, STORE)?;
        let removed = tables
            .by_id
            .remove(id)
            .ok_or_else(|| GovernanceError::not_found(EntityKind::GovernanceAgreement, id))?;
        tables.by_application.remove(&removed.application_id);
        Ok(())
    }

    fn exists(&self, id: &AgreementId) -> Result<bool> {
        Ok(read_lock(&self.tables, STORE)?.by_id.contains_key(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn agreement(id: &str, app: &str) -> GovernanceAgreement {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        GovernanceAgreement::new(
            AgreementId::new(id).unwrap(),
            ApplicationId::new(app).unwrap(),
            "Agreement",
            now,
        )
        .unwrap()
    }

    #[test]
    fn test_find_by_application_id() {
        let repo = InMemoryAgreementRepository::new();
        repo.save(&agreement("ga-1", "app-1")).unwrap();

        let found = repo
            .find_by_application_id(&ApplicationId::new("app-1").unwrap())
            .unwrap();
        assert_eq!(found.id.as_str(), "ga-1");
        assert!(repo
            .find_by_application_id(&ApplicationId::new("app-2").unwrap())
            .is_err());
        repo.assert_indexes_consistent();
    }

    #[test]
    fn test_second_agreement_for_application_is_rejected() {
        let repo = InMemoryAgreementRepository::new();
        repo.save(&agreement("ga-1", "app-1")).unwrap();

        let err = repo.save(&agreement("ga-2", "app-1")).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<GovernanceError>(),
            Some(GovernanceError::AlreadyExists { .. })
        ));
        // re-saving the same agreement is an upsert
        repo.save(&agreement("ga-1", "app-1")).unwrap();
        assert_eq!(repo.find_all().unwrap().len(), 1);
        repo.assert_indexes_consistent();
    }

    #[test]
    fn test_moving_agreement_to_another_application_updates_index() {
        let repo = InMemoryAgreementRepository::new();
        repo.save(&agreement("ga-1", "app-1")).unwrap();
        repo.update(&agreement("ga-1", "app-2")).unwrap();

        assert!(repo
            .find_by_application_id(&ApplicationId::new("app-1").unwrap())
            .is_err());
        repo.assert_indexes_consistent();
    }

    #[test]
    fn test_find_by_status_and_delete() {
        let repo = InMemoryAgreementRepository::new();
        let mut approved = agreement("ga-1", "app-1");
        approved.approve(approved.created_at).unwrap();
        repo.save(&approved).unwrap();
        repo.save(&agreement("ga-2", "app-2")).unwrap();

        assert_eq!(repo.find_by_status(AgreementStatus::Approved).unwrap().len(), 1);
        assert_eq!(repo.find_by_status(AgreementStatus::Draft).unwrap().len(), 1);

        repo.delete(&AgreementId::new("ga-1").unwrap()).unwrap();
        assert!(repo.delete(&AgreementId::new("ga-1").unwrap()).is_err());
        assert!(repo.update(&approved).is_err());
        repo.assert_indexes_consistent();
    }
}
