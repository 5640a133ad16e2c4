/// Domain-level failures shared by every layer.
///
/// The HTTP layer decides how each variant is rendered; only
/// [`CoreError::Unauthorized`] leaves the normal success-range status.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    /// Credentials were supplied but did not check out (login, password change,
    /// token refresh). Distinct from [`CoreError::Unauthorized`], which means
    /// the request carried no usable bearer token at all.
    #[error("Invalid credentials: {0}")]
    InvalidCredentials(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// The human-readable message without the variant prefix.
    pub fn message(&self) -> &str {
        match self {
            CoreError::NotFound(msg)
            | CoreError::Validation(msg)
            | CoreError::Conflict(msg)
            | CoreError::InvalidCredentials(msg)
            | CoreError::Forbidden(msg)
            | CoreError::Unauthorized(msg)
            | CoreError::Internal(msg) => msg,
        }
    }
}
