use crate::shared::{GovernanceError, Result};
use serde::{Deserialize, Serialize};

/// Maximum length for entity identifiers (security limit)
const MAX_ID_LENGTH: usize = 128;

fn validate_id(value: &str, label: &str) -> std::result::Result<(), GovernanceError> {
    if value.trim().is_empty() {
        return Err(GovernanceError::validation(format!(
            "{} ID cannot be empty",
            label
        )));
    }
    if value.len() > MAX_ID_LENGTH {
        return Err(GovernanceError::validation(format!(
            "{} ID is too long ({} bytes). Maximum allowed: {} bytes",
            label,
            value.len(),
            MAX_ID_LENGTH
        )));
    }
    if value.chars().any(char::is_control) {
        return Err(GovernanceError::validation(format!(
            "{} ID contains control characters",
            label
        )));
    }
    Ok(())
}

/// Declares an opaque, validated string identifier.
///
/// Deserialization runs the same validation as `new`, so an ID read from a
/// dataset file is as trustworthy as one built in code.
macro_rules! governance_id {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Result<Self> {
                let value = value.into();
                validate_id(&value, $label)?;
                Ok(Self(value))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = GovernanceError;

            fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
                validate_id(&value, $label)?;
                Ok(Self(value))
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

governance_id!(
    /// Identifier of an [`Application`](super::Application)
    ApplicationId,
    "Application"
);

governance_id!(
    /// Identifier of a [`GovernanceAgreement`](super::GovernanceAgreement)
    AgreementId,
    "Governance agreement"
);

governance_id!(
    /// Identifier of an [`ApplicationPortfolio`](super::ApplicationPortfolio)
    PortfolioId,
    "Portfolio"
);

governance_id!(
    /// Identifier of a [`ChangeRequest`](super::ChangeRequest)
    ChangeRequestId,
    "Change request"
);

governance_id!(IncidentId, "Incident");

governance_id!(AuditId, "Audit");
