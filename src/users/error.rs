use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum UserStoreError {
    #[error("Username \"{0}\" does not exist!")]
    NotFound(String),

    #[error("Username \"{0}\" already exists!")]
    AlreadyExists(String),

    #[error("Password for \"{0}\" does not match!")]
    PasswordMismatch(String),

    #[error("Invalid username \"{0}\"")]
    InvalidUsername(String),

    #[error("Failed to parse user store {}: {source}", path.display())]
    MalformedStore {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid record \"{key}\" in user store {}: {source}", path.display())]
    InvalidRecord {
        path: PathBuf,
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Inconsistent user store {}: key \"{key}\" holds user \"{username}\"", path.display())]
    KeyMismatch {
        path: PathBuf,
        key: String,
        username: String,
    },

    #[error("IO error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl UserStoreError {
    pub(super) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        UserStoreError::Io {
            path: path.into(),
            source,
        }
    }

    /// True for errors caused by a corrupt store file rather than by the caller
    pub fn is_malformed(&self) -> bool {
        matches!(
            self,
            UserStoreError::MalformedStore { .. }
                | UserStoreError::InvalidRecord { .. }
                | UserStoreError::KeyMismatch { .. }
        )
    }
}

pub type Result<T, E = UserStoreError> = std::result::Result<T, E>;
