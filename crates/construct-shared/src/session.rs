use crate::{token::AuthToken, uac::Username};

#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq, Eq)]
pub struct SessionUser {
    pub username: Username,
}

/// Snapshot of the authentication state shared by every view
///
/// The default value is the state before durable storage has been read, in
/// which no redirect decision may be taken.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: Option<AuthToken>,
    pub user: Option<SessionUser>,
    pub is_loading: bool,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            token: None,
            user: None,
            is_loading: true,
        }
    }
}

impl Session {
    pub fn unauthenticated() -> Self {
        Self {
            token: None,
            user: None,
            is_loading: false,
        }
    }

    pub fn authenticated(token: AuthToken, username: Username) -> Self {
        Self {
            token: Some(token),
            user: Some(SessionUser { username }),
            is_loading: false,
        }
    }

    /// A present token is what makes a session authenticated
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub fn username(&self) -> Option<&Username> {
        self.user.as_ref().map(|user| &user.username)
    }
}
