//! Read models for CQRS-lite pattern
//!
//! This module contains view-optimized structs that provide
//! a denormalized representation of governance results for output.

pub mod governance_report;

pub use governance_report::{ApplicationReport, GovernanceReport, MonitoringReport, PortfolioReport};
