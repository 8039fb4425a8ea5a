use crate::governance::domain::{AgreementId, AgreementStatus, ApplicationId, GovernanceAgreement};
use crate::shared::Result;

/// GovernanceAgreementRepository port
///
/// Each application has at most one agreement, so implementations keep a
/// one-to-one index from application ID to agreement ID.
pub trait GovernanceAgreementRepository: Send + Sync {
    /// Inserts or replaces an agreement keyed by its ID
    ///
    /// # Errors
    /// Returns `AlreadyExists` if the application is already governed by a
    /// different agreement
    fn save(&self, agreement: &GovernanceAgreement) -> Result<()>;

    /// # Errors
    /// Returns `NotFound` if no agreement has this ID
    fn find_by_id(&self, id: &AgreementId) -> Result<GovernanceAgreement>;

    /// Looks up the agreement governing an application
    ///
    /// # Errors
    /// Returns `NotFound` if the application has no agreement
    fn find_by_application_id(&self, application_id: &ApplicationId) -> Result<GovernanceAgreement>;

    fn find_all(&self) -> Result<Vec<GovernanceAgreement>>;

    fn find_by_status(&self, status: AgreementStatus) -> Result<Vec<GovernanceAgreement>>;

    /// # Errors
    /// Returns `NotFound` if the agreement was never saved
    fn update(&self, agreement: &GovernanceAgreement) -> Result<()>;

    /// # Errors
    /// Returns `NotFound` if the agreement was never saved
    fn delete(&self, id: &AgreementId) -> Result<()>;

    fn exists(&self, id: &AgreementId) -> Result<bool>;
}
