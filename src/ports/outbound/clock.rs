use chrono::{DateTime, Utc};

/// Clock port supplying "now" to every time-dependent computation
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}
