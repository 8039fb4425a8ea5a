use crate::governance::domain::{Application, ApplicationId, ApplicationPortfolio, PortfolioId};
use crate::shared::Result;

/// ApplicationPortfolioRepository port
///
/// Portfolios embed value copies of their member applications. The
/// `add_application`/`remove_application` helpers mutate that embedded list
/// in place.
pub trait ApplicationPortfolioRepository: Send + Sync {
    /// Inserts or replaces a portfolio keyed by its ID
    fn save(&self, portfolio: &ApplicationPortfolio) -> Result<()>;

    /// # Errors
    /// Returns `NotFound` if no portfolio has this ID
    fn find_by_id(&self, id: &PortfolioId) -> Result<ApplicationPortfolio>;

    fn find_by_owner(&self, owner: &str) -> Result<Vec<ApplicationPortfolio>>;

    fn find_all(&self) -> Result<Vec<ApplicationPortfolio>>;

    /// # Errors
    /// Returns `NotFound` if the portfolio was never saved
    fn update(&self, portfolio: &ApplicationPortfolio) -> Result<()>;

    /// # Errors
    /// Returns `NotFound` if the portfolio was never saved
    fn delete(&self, id: &PortfolioId) -> Result<()>;

    fn exists(&self, id: &PortfolioId) -> Result<bool>;

    /// Appends a copy of `app` to the portfolio's member list
    ///
    /// # Errors
    /// Returns an error if:
    /// - The portfolio does not exist (`NotFound`)
    /// - The portfolio already holds an application with this ID (`AlreadyExists`)
    fn add_application(&self, portfolio_id: &PortfolioId, app: &Application) -> Result<()>;

    /// Removes a member copy from the portfolio
    ///
    /// # Errors
    /// Returns `NotFound` if the portfolio or the member does not exist
    fn remove_application(&self, portfolio_id: &PortfolioId, app_id: &ApplicationId) -> Result<()>;
}
