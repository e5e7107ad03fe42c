use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// In-memory user table, keyed by username
pub type UserTable = BTreeMap<String, UserRecord>;

/// Stored credential record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub username: String,
    /// Hex-encoded password digest, never plaintext
    pub password: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fullname: Option<String>,
}

/// Input for creating a user. The password is plaintext and gets digested on insert.
#[derive(Debug, Clone, Default)]
pub struct NewUser {
    pub username: String,
    pub password: String,
    pub fullname: Option<String>,
}

impl NewUser {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            fullname: None,
        }
    }

    pub fn with_fullname(mut self, fullname: impl Into<String>) -> Self {
        self.fullname = Some(fullname.into());
        self
    }
}

/// Changes applied by `UserStore::set_user`.
///
/// Fields left as `None` (or set to an empty string) keep their stored value.
/// `force_override` skips the current-password check.
#[derive(Debug, Clone, Default)]
pub struct UserUpdate {
    /// New plaintext password
    pub password: Option<String>,
    pub fullname: Option<String>,
    pub force_override: bool,
}

impl UserUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    pub fn fullname(mut self, fullname: impl Into<String>) -> Self {
        self.fullname = Some(fullname.into());
        self
    }

    pub fn force(mut self) -> Self {
        self.force_override = true;
        self
    }

    pub(super) fn new_password(&self) -> Option<&str> {
        non_empty(self.password.as_deref())
    }

    pub(super) fn new_fullname(&self) -> Option<&str> {
        non_empty(self.fullname.as_deref())
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Returns true when `username` is usable both as a table key and as a directory name
pub fn is_valid_username(username: &str) -> bool {
    !username.is_empty()
        && username != "."
        && username != ".."
        && !username.contains(['/', '\\', '\0'])
}
