use reqwest::Method;

use crate::id::RecordId;

const ID_PLACEHOLDER: &str = "{id}";

#[derive(Debug, Clone)]
pub struct PathSpec {
    pub path: &'static str,
    pub method: reqwest::Method,
}

impl PathSpec {
    pub const fn get(path: &'static str) -> Self {
        Self {
            path,
            method: Method::GET,
        }
    }

    pub const fn post(path: &'static str) -> Self {
        Self {
            path,
            method: Method::POST,
        }
    }

    /// Fills in the `{id}` segment of the path (if any)
    pub fn path_with_id(&self, id: RecordId) -> String {
        self.path.replace(ID_PLACEHOLDER, &id.to_string())
    }
}
