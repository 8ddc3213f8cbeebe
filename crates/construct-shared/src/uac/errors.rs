use crate::errors::ValidationError;

/// Reasons a login or registration did not establish a session
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// The backend refused the credentials, holds its reason
    #[error("{0}")]
    Rejected(String),
    #[error("Network error. Could not connect to the server.")]
    Network,
}
