//! File-backed user account store with per-user home directories.

pub mod cli;
pub mod common;
pub mod ui;
pub mod users;

pub use users::{NewUser, UserRecord, UserStore, UserStoreError, UserUpdate, password_digest};
