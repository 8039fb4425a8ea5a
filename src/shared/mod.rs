pub mod duration_ms;
pub mod error;
pub mod result;
pub mod security;

pub use error::{EntityKind, ExitCode, GovernanceError};
pub use result::Result;
