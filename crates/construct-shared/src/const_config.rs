//! Stores settings that are not expected to need to change but grouped together
//! for discoverability and reuse. Each constant should be prefixed by the module
//! name to allow importing the constant only and still be readable

pub const PANIC_ON_RARE_ERR: bool = true;

pub mod client {
    /// Key under which the bearer token is kept in durable storage
    pub const CLIENT_TOKEN_STORAGE_KEY: &str = "authToken";

    /// The backend has no "who am I" endpoint so a restored session gets this
    /// placeholder until the next login
    pub const CLIENT_RESTORED_USERNAME: &str = "AuthenticatedUser";

    pub const CLIENT_DEFAULT_SERVER_ADDRESS: &str = "http://127.0.0.1:8000";

    /// Number of records of each kind shown on the dashboard
    pub const CLIENT_DASHBOARD_RECENT_LIMIT: usize = 3;

    /// Upper bound on guard redirects followed for a single navigation
    pub const CLIENT_MAX_REDIRECTS: usize = 4;
}

pub mod validation {
    pub const VALIDATION_MIN_PASSWORD_LENGTH: usize = 6;
}

pub mod error {
    pub const ERR_LOGIN_FALLBACK: &str =
        "Invalid credentials. Please check your username and password.";
    pub const ERR_REGISTER_FALLBACK: &str = "Registration failed.";

    /// Fields checked (in order) for a human readable reason when the backend
    /// rejects a login and sends no `detail`
    pub const ERR_LOGIN_FIELDS: &[&str] = &["non_field_errors"];

    /// Fields checked (in order) for a human readable reason when the backend
    /// rejects a registration and sends no `detail`
    pub const ERR_REGISTER_FIELDS: &[&str] = &["username", "email", "password", "non_field_errors"];
}

pub mod path {
    mod path_spec;
    pub use path_spec::PathSpec;
    pub const PATH_LOGIN: PathSpec = PathSpec::post("/api/login/");
    pub const PATH_REGISTER: PathSpec = PathSpec::post("/api/register/");
    pub const PATH_API_PAYMENTS: PathSpec = PathSpec::get("/api/payments/");
    pub const PATH_API_PAYMENT_CREATE: PathSpec = PathSpec::post("/api/payments/");
    pub const PATH_API_PAYMENT: PathSpec = PathSpec::get("/api/payments/{id}/");
    pub const PATH_API_IMAGES: PathSpec = PathSpec::get("/api/images/");
    pub const PATH_API_IMAGE_UPLOAD: PathSpec = PathSpec::post("/api/images/");
    pub const PATH_API_IMAGE: PathSpec = PathSpec::get("/api/images/{id}/");
}

#[cfg(test)]
mod tests {
    use static_assertions::const_assert;

    use super::client::CLIENT_MAX_REDIRECTS;

    // "/" redirects to "/dashboard" which may in turn redirect to "/login"
    const_assert!(CLIENT_MAX_REDIRECTS >= 2);
}
