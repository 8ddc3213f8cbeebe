//! The navigable locations of the application
//!
//! Detail routes keep their id segment as written so that the page can report
//! an invalid id instead of the router silently treating it as unknown.

use std::{convert::Infallible, fmt::Display, str::FromStr};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    Root,
    Login,
    Register,
    Dashboard,
    Payments,
    PaymentDetail(String),
    InitiatePayment,
    UploadImage,
    ImageDetail(String),
    /// Holds the path that failed to match
    NotFound(String),
}

/// Navigation requested as the result of an operation
///
/// Operations return this instead of navigating themselves so they can be
/// used without a router.
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigateTo(pub Route);

impl Route {
    pub fn parse(path: &str) -> Self {
        let trimmed = path.trim();
        let without_query = trimmed.split(['?', '#']).next().unwrap_or_default();
        let segments: Vec<&str> = without_query
            .trim_matches('/')
            .split('/')
            .filter(|segment| !segment.is_empty())
            .collect();
        match segments.as_slice() {
            [] => Self::Root,
            ["login"] => Self::Login,
            ["register"] => Self::Register,
            ["dashboard"] => Self::Dashboard,
            ["payments"] => Self::Payments,
            ["payments", id] => Self::PaymentDetail(id.to_string()),
            ["initiate-payment"] => Self::InitiatePayment,
            ["upload-image"] => Self::UploadImage,
            ["images", id] => Self::ImageDetail(id.to_string()),
            _ => Self::NotFound(trimmed.to_string()),
        }
    }

    /// Views that may only be shown to an authenticated user
    pub fn requires_auth(&self) -> bool {
        match self {
            Route::Dashboard
            | Route::Payments
            | Route::PaymentDetail(_)
            | Route::InitiatePayment
            | Route::UploadImage
            | Route::ImageDetail(_) => true,
            Route::Root | Route::Login | Route::Register | Route::NotFound(_) => false,
        }
    }

    /// Views that make no sense once logged in
    pub fn is_auth_only(&self) -> bool {
        matches!(self, Route::Login | Route::Register)
    }
}

impl FromStr for Route {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Route::Root => write!(f, "/"),
            Route::Login => write!(f, "/login"),
            Route::Register => write!(f, "/register"),
            Route::Dashboard => write!(f, "/dashboard"),
            Route::Payments => write!(f, "/payments"),
            Route::PaymentDetail(id) => write!(f, "/payments/{id}"),
            Route::InitiatePayment => write!(f, "/initiate-payment"),
            Route::UploadImage => write!(f, "/upload-image"),
            Route::ImageDetail(id) => write!(f, "/images/{id}"),
            Route::NotFound(path) => write!(f, "{path}"),
        }
    }
}
