//! Governance domain: entities, scoring policies and pure domain services.

pub mod domain;
pub mod policies;
pub mod services;
