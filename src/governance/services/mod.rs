mod application_evaluator;
mod direction_planner;
mod monitoring_samples;
mod portfolio_health;

pub use application_evaluator::ApplicationEvaluator;
pub use direction_planner::DirectionPlanner;
pub use monitoring_samples::MonitoringSamples;
pub use portfolio_health::PortfolioHealthCalculator;
