use thiserror::Error;

/// Result alias used by every client and API method.
pub type ApiResult<T> = Result<T, ApiError>;

/// Errors surfaced by the API client.
///
/// Expected failure modes are all modeled here; client methods never panic on
/// network or server misbehavior.
#[derive(Debug, Error)]
pub enum ApiError {
    /// An authenticated request was attempted with no stored access token.
    #[error("no access token stored, login required")]
    NoCredential,

    /// A token refresh was needed but no refresh token is stored.
    #[error("no refresh token stored, login required")]
    NoRefreshToken,

    /// The retried request was rejected again after a successful refresh.
    #[error("session expired, login required")]
    AuthExpired,

    /// The refresh endpoint rejected the stored refresh token.
    #[error("token refresh rejected: {0}")]
    RefreshRejected(String),

    /// Any non-success HTTP status not handled by the refresh path.
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// The server returned a 2xx response whose body was not valid JSON.
    #[error("malformed response body: {0}")]
    MalformedResponse(#[from] serde_json::Error),

    /// Transport-level failure (DNS, connection refused, timeout).
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl ApiError {
    /// Whether this error means the session is gone and the user must log in again.
    pub fn requires_login(&self) -> bool {
        matches!(
            self,
            ApiError::NoCredential
                | ApiError::NoRefreshToken
                | ApiError::AuthExpired
                | ApiError::RefreshRejected(_)
        )
    }

    /// HTTP status code for server-reported errors, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}
