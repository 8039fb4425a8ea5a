/// Crate-wide result type.
///
/// Domain failures travel as [`GovernanceError`](crate::shared::GovernanceError)
/// inside the `anyhow::Error`; recover them with `downcast_ref`.
pub type Result<T> = std::result::Result<T, anyhow::Error>;
