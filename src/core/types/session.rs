//! Authenticated session handle

use chrono::{DateTime, Utc};

/// Token issued by the platform at login, shared read-only by every
/// pipeline of the batch. Transport state (cookies) stays inside the runner.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionHandle {
    token: String,
    username: String,
    established_at: DateTime<Utc>,
}

impl SessionHandle {
    pub fn new(token: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            username: username.into(),
            established_at: Utc::now(),
        }
    }

    /// Session confirmation number sent as `_dynSessConf`
    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn established_at(&self) -> DateTime<Utc> {
        self.established_at
    }
}

impl std::fmt::Debug for SessionHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionHandle")
            .field("token", &"***")
            .field("username", &self.username)
            .field("established_at", &self.established_at)
            .finish()
    }
}
