use super::{read_lock, write_lock};
use crate::governance::domain::{Application, ApplicationId, PortfolioId};
use crate::ports::outbound::ApplicationRepository;
use crate::shared::{EntityKind, GovernanceError, Result};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::RwLock;

const STORE: &str = "application store";

#[derive(Default)]
struct Tables {
    by_id: BTreeMap<ApplicationId, Application>,
    /// Name to IDs in save order, so lookups return the first saved match.
    by_name: HashMap<String, Vec<ApplicationId>>,
    memberships: BTreeMap<PortfolioId, BTreeSet<ApplicationId>>,
}

impl Tables {
    fn unindex_name(&mut self, name: &str, id: &ApplicationId) {
        if let Some(ids) = self.by_name.get_mut(name) {
            ids.retain(|existing| existing != id);
            if ids.is_empty() {
                self.by_name.remove(name);
            }
        }
    }

    fn upsert(&mut self, app: &Application) {
        if let Some(previous) = self.by_id.get(&app.id) {
            if previous.name != app.name {
                let previous_name = previous.name.clone();
                self.unindex_name(&previous_name, &app.id);
            }
        }
        let ids = self.by_name.entry(app.name.clone()).or_default();
        if !ids.contains(&app.id) {
            ids.push(app.id.clone());
        }
        self.by_id.insert(app.id.clone(), app.clone());
    }
}

/// Application store keeping a by-name index and portfolio membership links
#[derive(Default)]
pub struct InMemoryApplicationRepository {
    tables: RwLock<Tables>,
}

impl InMemoryApplicationRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Asserts that the name index matches a scan of the primary map
    #[cfg(test)]
    pub(crate) fn assert_indexes_consistent(&self) {
        let tables = self.tables.read().unwrap();
        let mut scanned: HashMap<String, BTreeSet<ApplicationId>> = HashMap::new();
        for app in tables.by_id.values() {
            scanned.entry(app.name.clone()).or_default().insert(app.id.clone());
        }
        let indexed: HashMap<String, BTreeSet<ApplicationId>> = tables
            .by_name
            .iter()
            .map(|(name, ids)| (name.clone(), ids.iter().cloned().collect()))
            .collect();
        assert_eq!(indexed, scanned);
        for members in tables.memberships.values() {
            assert!(members.iter().all(|id| tables.by_id.contains_key(id)));
        }
    }
}

impl ApplicationRepository for InMemoryApplicationRepository {
    fn save(&self, app: &Application) -> Result<()> {
        write_lock(&self.tables, STORE)?.upsert(app);
        Ok(())
    }

    fn find_by_id(&self, id: &ApplicationId) -> Result<Application> {
        read_lock(&self.tables, STORE)?
            .by_id
            .get(id)
            .cloned()
            .ok_or_else(|| GovernanceError::not_found(EntityKind::Application, id).into())
    }

    fn find_by_name(&self, name: &str) -> Result<Application> {
        let tables = read_lock(&self.tables, STORE)?;
        tables
            .by_name
            .get(name)
            .and_then(|ids| ids.first())
            .and_then(|id| tables.by_id.get(id))
            .cloned()
            .ok_or_else(|| GovernanceError::not_found(EntityKind::Application, name).into())
    }

    fn find_all(&self) -> Result<Vec<Application>> {
        Ok(read_lock(&self.tables, STORE)?.by_id.values().cloned().collect())
    }

    fn find_by_portfolio(&self, portfolio_id: &PortfolioId) -> Result<Vec<Application>> {
        let tables = read_lock(&self.tables, STORE)?;
        let Some(members) = tables.memberships.get(portfolio_id) else {
            return Ok(Vec::new());
        };
        Ok(members
            .iter()
            .filter_map(|id| tables.by_id.get(id))
            .cloned()
            .collect())
    }

    fn update(&self, app: &Application) -> Result<()> {
        let mut tables = write_lock(&self.tables, STORE)?;
        if !tables.by_id.contains_key(&app.id) {
            return Err(GovernanceError::not_found(EntityKind::Application, &app.id).into());
        }
        tables.upsert(app);
        Ok(())
    }

    fn delete(&self, id: &ApplicationId) -> Result<()> {
        let mut tables = write_lock(&self.tables, STORE)?;
        let removed = tables
            .by_id
            .remove(id)
            .ok_or_else(|| GovernanceError::not_found(EntityKind::Application, id))?;
        tables.unindex_name(&removed.name, id);
        for members in tables.memberships.values_mut() {
            members.remove(id);
        }
        Ok(())
    }

    fn exists(&self, id: &ApplicationId) -> Result<bool> {
        Ok(read_lock(&self.tables, STORE)?.by_id.contains_key(id))
    }

    fn link_to_portfolio(&self, id: &ApplicationId, portfolio_id: &PortfolioId) -> Result<()> {
        let mut tables = write_lock(&self.tables, STORE)?;
        if !tables.by_id.contains_key(id) {
            return Err(GovernanceError::not_found(EntityKind::Application, id).into());
        }
        tables
            .memberships
            .entry(portfolio_id.clone())
            .or_default()
            .insert(id.clone());
        Ok(())
    }

    fn unlink_from_portfolio(&self, id: &ApplicationId, portfolio_id: &PortfolioId) -> Result<()> {
        let mut tables = write_lock(&self.tables, STORE)?;
        if let Some(members) = tables.memberships.get_mut(portfolio_id) {
            members.remove(id);
        }
        Ok(())
    }
}
