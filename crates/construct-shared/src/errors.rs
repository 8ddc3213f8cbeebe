use thiserror::Error;

use crate::const_config::validation::VALIDATION_MIN_PASSWORD_LENGTH;

#[derive(Debug, thiserror::Error, PartialEq, Eq, Clone)]
pub enum ConversionError {
    #[error("Empty not allowed")]
    Empty,
    #[error("Maximum length exceeded. {max} allowed but found {actual}")]
    MaxExceeded { max: usize, actual: usize },
    #[error("{0:?} is not allowed, use letters, digits and @/./+/-/_ only")]
    IllegalCharacter(char),
}

/// Problems found in user input before any request is sent
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ValidationError {
    #[error("Please enter both username and password.")]
    MissingLoginFields,
    #[error("All fields are required.")]
    MissingRegistrationFields,
    #[error("Passwords do not match.")]
    PasswordsDoNotMatch,
    #[error("Password must be at least {VALIDATION_MIN_PASSWORD_LENGTH} characters long.")]
    PasswordTooShort,
    #[error("Please enter a valid email address.")]
    InvalidEmail,
    #[error("Invalid username. {0}")]
    InvalidUsername(ConversionError),
    #[error("Please enter a valid positive amount.")]
    InvalidAmount,
    #[error("Please select a payment method.")]
    MissingPaymentMethod,
    #[error("Please select an image to upload.")]
    MissingImage,
}

/// Failures while loading or submitting view data
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum FetchError {
    #[error("Authentication token missing. Please log in.")]
    MissingToken,
    #[error("Invalid {0} ID provided.")]
    InvalidId(&'static str),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("{0}")]
    Rejected(String),
    #[error("Network error. {0}")]
    Network(String),
}
