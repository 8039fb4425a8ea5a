use super::{read_lock, write_lock};
use crate::governance::domain::{Application, ApplicationId, ApplicationPortfolio, PortfolioId};
use crate::ports::outbound::{ApplicationPortfolioRepository, Clock};
use crate::shared::{EntityKind, GovernanceError, Result};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::{Arc, RwLock};

const STORE: &str = "portfolio store";

#[derive(Default)]
struct Tables {
    by_id: BTreeMap<PortfolioId, ApplicationPortfolio>,
    by_owner: HashMap<String, BTreeSet<PortfolioId>>,
}

impl Tables {
    fn upsert(&mut self, portfolio: &ApplicationPortfolio) {
        let previous_owner = self
            .by_id
            .get(&portfolio.id)
            .map(|previous| previous.owner.clone());
        if let Some(previous_owner) = previous_owner {
            self.unindex_owner(&previous_owner, &portfolio.id);
        }
        self.by_owner
            .entry(portfolio.owner.clone())
            .or_default()
            .insert(portfolio.id.clone());
        self.by_id.insert(portfolio.id.clone(), portfolio.clone());
    }

    fn unindex_owner(&mut self, owner: &str, id: &PortfolioId) {
        if let Some(ids) = self.by_owner.get_mut(owner) {
            ids.remove(id);
            if ids.is_empty() {
                self.by_owner.remove(owner);
            }
        }
    }

    fn portfolio_mut(&mut self, id: &PortfolioId) -> Result<&mut ApplicationPortfolio> {
        self.by_id
            .get_mut(id)
            .ok_or_else(|| GovernanceError::not_found(EntityKind::Portfolio, id).into())
    }
}

/// Portfolio store with a by-owner index
///
/// The membership helpers stamp `updated_at` from the injected clock.
pub struct InMemoryPortfolioRepository {
    tables: RwLock<Tables>,
    clock: Arc<dyn Clock>,
}

impl InMemoryPortfolioRepository {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            tables: RwLock::new(Tables::default()),
            clock,
        }
    }

    #[cfg(test)]
    pub(crate) fn assert_indexes_consistent(&self) {
        let tables = self.tables.read().unwrap();
        let mut scanned: HashMap<String, BTreeSet<PortfolioId>> = HashMap::new();
        for portfolio in tables.by_id.values() {
            scanned
                .entry(portfolio.owner.clone())
                .or_default()
                .insert(portfolio.id.clone());
        }
        assert_eq!(tables.by_owner, scanned);
    }
}

impl ApplicationPortfolioRepository for InMemoryPortfolioRepository {
    fn save(&self, portfolio: &ApplicationPortfolio) -> Result<()> {
        write_lock(&self.tables, STORE)?.upsert(portfolio);
        Ok(())
    }

    fn find_by_id(&self, id: &PortfolioId) -> Result<ApplicationPortfolio> {
        read_lock(&self.tables, STORE)?
            .by_id
            .get(id)
            .cloned()
            .ok_or_else(|| GovernanceError::not_found(EntityKind::Portfolio, id).into())
    }

    fn find_by_owner(&self, owner: &str) -> Result<Vec<ApplicationPortfolio>> {
        let tables = read_lock(&self.tables, STORE)?;
        let Some(ids) = tables.by_owner.get(owner) else {
            return Ok(Vec::new());
        };
        Ok(ids.iter().filter_map(|id| tables.by_id.get(id)).cloned().collect())
    }

    fn find_all(&self) -> Result<Vec<ApplicationPortfolio>> {
        Ok(read_lock(&self.tables, STORE)?.by_id.values().cloned().collect())
    }

    fn update(&self, portfolio: &ApplicationPortfolio) -> Result<()> {
        let mut tables = write_lock(&self.tables, STORE)?;
        if !tables.by_id.contains_key(&portfolio.id) {
            return Err(GovernanceError::not_found(EntityKind::Portfolio, &portfolio.id).into());
        }
        tables.upsert(portfolio);
        Ok(())
    }

    fn delete(&self, id: &PortfolioId) -> Result<()> {
        let mut tables = write_lock(&self.tables, STORE)?;
        let removed = tables
            .by_id
            .remove(id)
            .ok_or_else(|| GovernanceError::not_found(EntityKind::Portfolio, id))?;
        tables.unindex_owner(&removed.owner, id);
        Ok(())
    }

    fn exists(&self, id: &PortfolioId) -> Result<bool> {
        Ok(read_lock(&self.tables, STORE)?.by_id.contains_key(id))
    }

    fn add_application(&self, portfolio_id: &PortfolioId, app: &Application) -> Result<()> {
        let now = self.clock.now();
        let mut tables = write_lock(&self.tables, STORE)?;
        tables.portfolio_mut(portfolio_id)?.add_application(app.clone(), now)
    }

    fn remove_application(&self, portfolio_id: &PortfolioId, app_id: &ApplicationId) -> Result<()> {
        let now = self.clock.now();
        let mut tables = write_lock(&self.tables, STORE)?;
        tables
            .portfolio_mut(portfolio_id)?
            .remove_application(app_id, now)
            .map(|_| ())
    }
}
