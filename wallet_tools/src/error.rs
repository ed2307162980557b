use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum WalletApiError {
    #[error("Could not initialize client: {0}")]
    Initialization(String),
    #[error("Invalid wallet configuration. {0}")]
    ConfigurationError(String),
    #[error("Resource not found: {0}")]
    NotFound(String),
    #[error("Invalid REST request: {0}")]
    RestRequestError(String),
    #[error("Invalid REST response: {0}")]
    RestResponseError(String),
    #[error("Could not deserialize JSON: {0}")]
    JsonError(String),
    #[error("Query failed. Error {status}. {message}")]
    QueryError { status: u16, message: String },
    #[error("Could not obtain an access token. {0}")]
    AuthError(String),
    #[error("Could not sign token. {0}")]
    SigningError(String),
}

impl WalletApiError {
    /// A missing resource is the expected outcome of an existence check, rather than a failure.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}
