//! Error types for investigation submission.

use lantern_core::{ToolId, ValidationError};
use thiserror::Error;

/// Errors returned synchronously from [`crate::DispatchCoordinator::submit`].
///
/// None of these variants leave a trace in the ledger. A record only
/// exists once a submission has been accepted.
#[derive(Debug, Error)]
pub enum SubmitError {
    /// The tool was unknown or the input failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The tool requires a premium entitlement the caller does not hold.
    #[error("access denied: tool '{tool_id}' requires a premium entitlement")]
    AccessDenied {
        /// The gated tool.
        tool_id: ToolId,
    },

    /// The ledger rejected the new record.
    #[error("internal error: {0}")]
    Internal(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_convert_transparently() {
        let err = SubmitError::from(ValidationError::MissingInput);
        assert_eq!(err.to_string(), ValidationError::MissingInput.to_string());
    }

    #[test]
    fn access_denied_names_the_tool() {
        let tool_id = ToolId::new("phone").expect("valid tool id");
        let err = SubmitError::AccessDenied { tool_id };
        assert!(err.to_string().contains("'phone'"));
    }
}
