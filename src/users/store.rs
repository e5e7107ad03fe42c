use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use crate::ui::prelude::*;

use super::digest::password_digest;
use super::error::{Result, UserStoreError};
use super::models::{NewUser, UserRecord, UserTable, UserUpdate, is_valid_username};

/// File-backed user table.
///
/// Every mutation rewrites the whole backing file. Home directories live next
/// to the data file, one per username.
#[derive(Debug)]
pub struct UserStore {
    path: PathBuf,
    home_base: PathBuf,
    users: UserTable,
}

impl UserStore {
    /// Open the store at `path`, creating an empty one if the file doesn't exist
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let home_base = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };

        if !path.exists() {
            fs::create_dir_all(&home_base).map_err(|e| UserStoreError::io(&home_base, e))?;
            write_table(&path, &UserTable::new())?;
            emit(
                Level::Debug,
                "users.store.created",
                &format!("Created empty user store at {}", path.display()),
                None,
            );
        }

        let users = read_table(&path)?;
        emit(
            Level::Debug,
            "users.store.loaded",
            &format!("Loaded {} user(s) from {}", users.len(), path.display()),
            None,
        );

        Ok(Self {
            path,
            home_base,
            users,
        })
    }

    /// Path of the backing JSON file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory that holds the per-user home directories
    pub fn home_base(&self) -> &Path {
        &self.home_base
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Iterate over all users in username order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &UserRecord)> {
        self.users.iter()
    }

    /// Get a user record by username
    pub fn get_user(&self, username: &str) -> Option<&UserRecord> {
        self.users.get(username)
    }

    /// Check a plaintext password against the stored digest. Unknown users never match.
    pub fn pass_match(&self, username: &str, plaintext: &str) -> bool {
        self.users
            .get(username)
            .is_some_and(|user| user.password == password_digest(plaintext))
    }

    /// Add a new user and persist the table
    pub fn add_user(&mut self, user: NewUser) -> Result<UserRecord> {
        if !is_valid_username(&user.username) {
            return Err(UserStoreError::InvalidUsername(user.username));
        }
        if self.users.contains_key(&user.username) {
            return Err(UserStoreError::AlreadyExists(user.username));
        }

        let record = UserRecord {
            username: user.username.clone(),
            password: password_digest(&user.password),
            fullname: user.fullname,
        };

        self.commit(record.clone(), None)?;
        emit(
            Level::Debug,
            "users.add",
            &format!("Added user {}", record.username),
            None,
        );
        Ok(record)
    }

    /// Update an existing user and persist the table.
    ///
    /// `user.password` is compared to the stored digest as-is, so it must be a
    /// digest too (for example a record previously returned by `get_user`).
    /// The check is skipped when `update.force_override` is set.
    pub fn set_user(&mut self, user: &UserRecord, update: UserUpdate) -> Result<UserRecord> {
        let stored = self
            .users
            .get(&user.username)
            .ok_or_else(|| UserStoreError::NotFound(user.username.clone()))?;

        if stored.password != user.password && !update.force_override {
            return Err(UserStoreError::PasswordMismatch(user.username.clone()));
        }

        let updated = UserRecord {
            username: stored.username.clone(),
            password: update
                .new_password()
                .map(password_digest)
                .unwrap_or_else(|| stored.password.clone()),
            fullname: update
                .new_fullname()
                .map(str::to_string)
                .or_else(|| stored.fullname.clone()),
        };
        let previous = stored.clone();

        self.commit(updated.clone(), Some(previous))?;
        emit(
            Level::Debug,
            "users.set",
            &format!("Updated user {}", updated.username),
            None,
        );
        Ok(updated)
    }

    /// Create `<home_base>/<username>` if needed and return it
    pub fn set_home(&self, username: &str) -> Result<PathBuf> {
        if !is_valid_username(username) {
            return Err(UserStoreError::InvalidUsername(username.to_string()));
        }
        let home = self.home_base.join(username);
        if !home.is_dir() {
            fs::create_dir(&home).map_err(|e| UserStoreError::io(&home, e))?;
            emit(
                Level::Debug,
                "users.home.created",
                &format!("Created home directory {}", home.display()),
                None,
            );
        }
        Ok(home)
    }

    /// Path of the user's home directory, if it has been created
    pub fn get_home(&self, username: &str) -> Option<PathBuf> {
        if !is_valid_username(username) {
            return None;
        }
        let home = self.home_base.join(username);
        home.is_dir().then_some(home)
    }

    /// Insert `record` and persist. On write failure the table is put back the way it was.
    fn commit(&mut self, record: UserRecord, previous: Option<UserRecord>) -> Result<()> {
        let username = record.username.clone();
        self.users.insert(username.clone(), record);

        if let Err(err) = write_table(&self.path, &self.users) {
            match previous {
                Some(previous) => {
                    self.users.insert(username, previous);
                }
                None => {
                    self.users.remove(&username);
                }
            }
            return Err(err);
        }
        Ok(())
    }
}

fn read_table(path: &Path) -> Result<UserTable> {
    let contents = fs::read(path).map_err(|e| UserStoreError::io(path, e))?;
    let entries: BTreeMap<String, serde_json::Value> =
        serde_json::from_slice(&contents).map_err(|source| UserStoreError::MalformedStore {
            path: path.to_path_buf(),
            source,
        })?;

    let mut users = UserTable::new();
    for (key, value) in entries {
        let record: UserRecord =
            serde_json::from_value(value).map_err(|source| UserStoreError::InvalidRecord {
                path: path.to_path_buf(),
                key: key.clone(),
                source,
            })?;
        if key != record.username {
            return Err(UserStoreError::KeyMismatch {
                path: path.to_path_buf(),
                key,
                username: record.username,
            });
        }
        users.insert(key, record);
    }

    Ok(users)
}

fn write_table(path: &Path, users: &UserTable) -> Result<()> {
    let contents =
        serde_json::to_string(users).map_err(|e| UserStoreError::io(path, e.into()))?;
    fs::write(path, contents).map_err(|e| UserStoreError::io(path, e))?;
    emit(
        Level::Debug,
        "users.store.saved",
        &format!("Wrote {} user(s) to {}", users.len(), path.display()),
        None,
    );
    Ok(())
}
