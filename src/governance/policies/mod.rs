pub mod business_value;
pub mod monitoring_thresholds;
pub mod risk_classification;
pub mod technical_health;

pub use business_value::BusinessValuePolicy;
pub use monitoring_thresholds::MonitoringThresholds;
pub use risk_classification::RiskClassification;
pub use technical_health::{HealthSignals, TechnicalHealthPolicy};

use chrono::{DateTime, Utc};

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Fractional days from `since` to `now`; negative when `since` is in the future.
pub(crate) fn elapsed_days(since: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    (now - since).num_milliseconds() as f64 / MILLIS_PER_DAY
}

pub(crate) fn elapsed_years(since: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    elapsed_days(since, now) / 365.0
}
