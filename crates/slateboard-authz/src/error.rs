//! Authorization error taxonomy.
//!
//! Three terminal outcomes a caller must keep apart:
//!
//! - [`AuthzError::PolicyNotConfigured`]: the role has no usable permission
//!   record (absent, inactive, or empty). Blocks the request, but with a
//!   different message than an explicit deny.
//! - [`AuthzError::PermissionDenied`]: a record exists and the specific
//!   feature/action is absent or false.
//! - [`AuthzError::Lookup`]: the store could not be read at all. This is a
//!   server fault and must never surface as an access denial.

use slateboard_core::AppError;
use slateboard_models::{Action, Feature};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthzError {
    #[error("No permissions configured for this role")]
    PolicyNotConfigured,

    #[error("Access denied: cannot {action} {feature}")]
    PermissionDenied { feature: Feature, action: Action },

    #[error("permission lookup failed: {0}")]
    Lookup(#[from] anyhow::Error),
}

impl AuthzError {
    /// Whether this error is a denial (403) rather than a server fault (500).
    pub fn is_denial(&self) -> bool {
        matches!(
            self,
            AuthzError::PolicyNotConfigured | AuthzError::PermissionDenied { .. }
        )
    }
}

impl From<AuthzError> for AppError {
    fn from(err: AuthzError) -> Self {
        match err {
            AuthzError::PolicyNotConfigured | AuthzError::PermissionDenied { .. } => {
                AppError::forbidden(anyhow::anyhow!("{err}"))
            }
            AuthzError::Lookup(source) => AppError::database(source),
        }
    }
}
