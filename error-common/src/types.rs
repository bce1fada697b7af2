use crate::context::ErrorContext;

/// Implemented by every domain error in the workspace.
pub trait CodedError: std::error::Error {
    /// Stable code from [`crate::codes`].
    fn code(&self) -> &'static str;

    /// Whether the failure came from rejecting caller input rather than
    /// from a missing record or an external collaborator.
    fn is_validation(&self) -> bool {
        true
    }
}

/// Log a coded error together with its context.
///
/// Validation failures are expected during normal front-desk use and are
/// logged at `warn`; everything else at `error`.
pub fn log_error(context: &ErrorContext, error: &dyn CodedError) {
    if error.is_validation() {
        tracing::warn!(
            operation = %context.operation,
            entity_id = context.entity_id.as_deref().unwrap_or("-"),
            error_code = error.code(),
            error = %error,
            "operation rejected"
        );
    } else {
        tracing::error!(
            operation = %context.operation,
            entity_id = context.entity_id.as_deref().unwrap_or("-"),
            error_code = error.code(),
            error = %error,
            "operation failed"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codes;

    #[derive(Debug, thiserror::Error)]
    #[error("missing record")]
    struct Missing;

    impl CodedError for Missing {
        fn code(&self) -> &'static str {
            codes::lookup::NOT_FOUND
        }

        fn is_validation(&self) -> bool {
            false
        }
    }

    #[test]
    fn test_code_and_classification() {
        let err = Missing;
        assert_eq!(err.code(), "LOOKUP_4003");
        assert!(!err.is_validation());
        // logging without a subscriber installed must not panic
        log_error(&ErrorContext::new("lookup").with_entity_id("P001"), &err);
    }
}
