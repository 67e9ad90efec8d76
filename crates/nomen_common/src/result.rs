//! Common result and error types for the Nomen toolchain.

/// The result type for operations that can only fail because of a bug.
///
/// User-facing problems (naming violations, collisions, stale edits) have
/// their own error enums in the crates that detect them. `InternalError`
/// signals a broken invariant inside Nomen itself.
pub type NomenResult<T> = Result<T, InternalError>;

/// An internal error indicating a bug in Nomen, not a problem with the input.
#[derive(Debug, thiserror::Error)]
#[error("internal error: {message}")]
pub struct InternalError {
    /// Description of the internal error.
    pub message: String,
}

impl InternalError {
    /// Creates a new internal error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<String> for InternalError {
    fn from(message: String) -> Self {
        Self { message }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_format() {
        let err = InternalError::new("edit set out of order");
        assert_eq!(format!("{err}"), "internal error: edit set out of order");
    }

    #[test]
    fn err_path() {
        let r: NomenResult<()> = Err(InternalError::new("unreachable symbol"));
        assert_eq!(r.unwrap_err().message, "unreachable symbol");
    }

    #[test]
    fn from_string() {
        let err: InternalError = "from string".to_string().into();
        assert_eq!(err.message, "from string");
    }
}
