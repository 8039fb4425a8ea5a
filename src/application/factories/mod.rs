mod formatter_factory;
mod presenter_factory;
mod workspace_factory;

pub use formatter_factory::FormatterFactory;
pub use presenter_factory::{PresenterFactory, PresenterType};
pub use workspace_factory::{GovernanceWorkspace, WorkspaceFactory};
