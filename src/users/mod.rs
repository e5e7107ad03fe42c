//! File-backed user accounts
//!
//! A JSON table of credential records plus per-user home directories created
//! next to the data file.

mod commands;
mod digest;
mod error;
mod models;
mod store;

pub use commands::handle_user_command;
pub use digest::password_digest;
pub use error::{Result, UserStoreError};
pub use models::{NewUser, UserRecord, UserTable, UserUpdate, is_valid_username};
pub use store::UserStore;
