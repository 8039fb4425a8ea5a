/// Mock implementations for testing
mod failing_event_repository;
mod mock_progress_reporter;

pub use failing_event_repository::FailingEventRepository;
pub use mock_progress_reporter::MockProgressReporter;
