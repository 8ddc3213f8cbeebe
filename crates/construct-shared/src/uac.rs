//! Shared items related to user account control

mod errors;
mod responses;
mod user;

pub use errors::AuthError;
pub use responses::{rejection_reason, TokenResponse};
pub use user::Username;
