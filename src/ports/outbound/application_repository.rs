use crate::governance::domain::{Application, ApplicationId, PortfolioId};
use crate::shared::Result;

/// ApplicationRepository port for canonical application records
///
/// Portfolios hold value copies of applications; this repository owns the
/// authoritative record. Implementations must be `Send + Sync` so a store
/// can be shared between the CLI, the MCP server and use cases.
pub trait ApplicationRepository: Send + Sync {
    /// Inserts or replaces an application keyed by its ID
    ///
    /// # Errors
    /// Returns an error if the backing store cannot be written
    fn save(&self, app: &Application) -> Result<()>;

    /// Looks up an application by ID
    ///
    /// # Errors
    /// Returns `NotFound` if no application has this ID
    fn find_by_id(&self, id: &ApplicationId) -> Result<Application>;

    /// Returns the first saved application with this name
    ///
    /// # Errors
    /// Returns `NotFound` if no application has this name
    fn find_by_name(&self, name: &str) -> Result<Application>;

    /// Returns every application ordered by ID
    fn find_all(&self) -> Result<Vec<Application>>;

    /// Returns the applications linked to a portfolio, ordered by ID
    ///
    /// # Arguments
    /// * `portfolio_id` - Portfolio whose membership links are followed
    fn find_by_portfolio(&self, portfolio_id: &PortfolioId) -> Result<Vec<Application>>;

    /// Replaces an existing application
    ///
    /// # Errors
    /// Returns `NotFound` if the application was never saved
    fn update(&self, app: &Application) -> Result<()>;

    /// Removes an application and its membership links
    ///
    /// # Errors
    /// Returns `NotFound` if the application was never saved
    fn delete(&self, id: &ApplicationId) -> Result<()>;

    fn exists(&self, id: &ApplicationId) -> Result<bool>;

    /// Records that an application belongs to a portfolio
    ///
    /// # Errors
    /// Returns `NotFound` if the application was never saved
    fn link_to_portfolio(&self, id: &ApplicationId, portfolio_id: &PortfolioId) -> Result<()>;

    /// Drops a membership link; unlinking an absent link is a no-op
    fn unlink_from_portfolio(&self, id: &ApplicationId, portfolio_id: &PortfolioId) -> Result<()>;
}
