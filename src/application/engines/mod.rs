//! Store-backed engines for the Evaluate, Direct and Monitor principles.

mod direction_engine;
mod evaluation_engine;
mod monitoring_engine;

pub use direction_engine::DirectionEngine;
pub use evaluation_engine::{EvaluationEngine, PORTFOLIO_EVALUATOR};
pub use monitoring_engine::{MonitoringEngine, NO_MEASUREMENT_NOTE};
