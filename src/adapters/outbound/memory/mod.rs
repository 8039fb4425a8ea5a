//! In-memory adapters for the repository ports.
//!
//! Relational stores guard their primary map and secondary indexes with a
//! single `RwLock`; the monitoring and change-management stores are keyed
//! `DashMap`s.

mod agreement_store;
mod application_store;
mod change_stores;
mod event_log;
mod monitoring_stores;
mod portfolio_store;

pub use agreement_store::InMemoryAgreementRepository;
pub use application_store::InMemoryApplicationRepository;
pub use change_stores::{
    InMemoryAuditRepository, InMemoryChangeRequestRepository, InMemoryIncidentRepository,
};
pub use event_log::InMemoryEventLog;
pub use monitoring_stores::{
    InMemoryKpiMeasurementRepository, InMemoryKpiRepository, InMemoryMitigationPlanRepository,
    InMemoryRiskRepository,
};
pub use portfolio_store::InMemoryPortfolioRepository;

use crate::shared::Result;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

pub(crate) fn read_lock<'a, T>(lock: &'a RwLock<T>, store: &str) -> Result<RwLockReadGuard<'a, T>> {
    lock.read()
        .map_err(|_| anyhow::anyhow!("{} lock poisoned by a panicked writer", store))
}

pub(crate) fn write_lock<'a, T>(lock: &'a RwLock<T>, store: &str) -> Result<RwLockWriteGuard<'a, T>> {
    lock.write()
        .map_err(|_| anyhow::anyhow!("{} lock poisoned by a panicked writer", store))
}
