//! This module stores the expected format of the arguments for the requests
//! The structure of the module is supposed to match the path of the endpoints.
//! For example `/api/payments/` would map to
//! [`api::InitiatePaymentReqArgs`]. Credentials are not serializable on purpose,
//! the client builds the request bodies from them explicitly.

use regex::Regex;
use secrecy::{ExposeSecret, SecretString};
use std::{fmt::Debug, sync::LazyLock};

use crate::{
    const_config::validation::VALIDATION_MIN_PASSWORD_LENGTH, errors::ValidationError,
    uac::Username,
};

pub mod api;

static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\S+@\S+\.\S+").expect("email pattern is a valid regex"));

#[derive(Clone)]
pub struct LoginReqArgs {
    pub username: String,
    pub password: SecretString,
}

#[derive(Clone)]
pub struct RegisterReqArgs {
    pub username: String,
    pub email: String,
    pub password: SecretString,
    pub password2: SecretString,
}

impl LoginReqArgs {
    pub fn new<S: Into<String>>(username: S, password: SecretString) -> Self {
        Self {
            username: username.into(),
            password,
        }
    }

    /// Checks the arguments before anything is sent and returns the username
    /// the session will be stored under
    pub fn validate(&self) -> Result<Username, ValidationError> {
        if self.username.is_empty() || self.password.expose_secret().is_empty() {
            return Err(ValidationError::MissingLoginFields);
        }
        Username::try_from(self.username.as_str()).map_err(ValidationError::InvalidUsername)
    }
}

impl RegisterReqArgs {
    pub fn new<S: Into<String>>(
        username: S,
        email: S,
        password: SecretString,
        password2: SecretString,
    ) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
            password,
            password2,
        }
    }

    /// Checks are done in the order the user is expected to fix them
    pub fn validate(&self) -> Result<Username, ValidationError> {
        let password = self.password.expose_secret();
        let password2 = self.password2.expose_secret();
        if self.username.is_empty()
            || self.email.is_empty()
            || password.is_empty()
            || password2.is_empty()
        {
            return Err(ValidationError::MissingRegistrationFields);
        }
        if password != password2 {
            return Err(ValidationError::PasswordsDoNotMatch);
        }
        if password.chars().count() < VALIDATION_MIN_PASSWORD_LENGTH {
            return Err(ValidationError::PasswordTooShort);
        }
        if !EMAIL_PATTERN.is_match(&self.email) {
            return Err(ValidationError::InvalidEmail);
        }
        Username::new_account(&self.username).map_err(ValidationError::InvalidUsername)
    }
}

impl Debug for LoginReqArgs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginReqArgs")
            .field("username", &self.username)
            .field("has_password", &!self.password.expose_secret().is_empty())
            .finish()
    }
}

impl Debug for RegisterReqArgs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisterReqArgs")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("has_password", &!self.password.expose_secret().is_empty())
            .field("has_password2", &!self.password2.expose_secret().is_empty())
            .finish()
    }
}
