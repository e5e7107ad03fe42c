use anyhow::{Context, Result};
use dialoguer::Password;
use serde_json::json;

use crate::cli::{Commands, HomeCommands};
use crate::common::config::Config;
use crate::ui::prelude::*;

use super::{NewUser, UserRecord, UserStore, UserUpdate, password_digest};

/// Run a CLI command against the store. Returns the process exit status.
pub fn handle_user_command(command: Commands, store: &mut UserStore, config: &Config) -> Result<i32> {
    match command {
        Commands::Get { username } => show_user(store, &username),
        Commands::List => {
            list_users(store);
            Ok(0)
        }
        Commands::Add {
            username,
            fullname,
            password,
            home,
        } => {
            let password = match password {
                Some(password) => password,
                None => prompt_new_password()?,
            };
            let mut user = NewUser::new(username, password);
            user.fullname = fullname;

            let record = store.add_user(user)?;
            emit(
                Level::Success,
                "users.add.success",
                &format!("Added user {}", record.username),
                Some(json!({ "username": record.username })),
            );

            if home || config.create_home {
                let path = store.set_home(&record.username)?;
                emit(
                    Level::Info,
                    "users.home.set",
                    &format!("Home directory: {}", path.display()),
                    Some(json!({ "path": path.display().to_string() })),
                );
            }
            Ok(0)
        }
        Commands::Set {
            username,
            password,
            fullname,
            current,
            force,
        } => {
            let current = if force {
                String::new()
            } else {
                match current {
                    Some(current) => current,
                    None => prompt_password(&format!("Current password for {username}"))?,
                }
            };
            let credential = UserRecord {
                username,
                password: password_digest(&current),
                fullname: None,
            };
            let update = UserUpdate {
                password,
                fullname,
                force_override: force,
            };

            let record = store.set_user(&credential, update)?;
            emit(
                Level::Success,
                "users.set.success",
                &format!("Updated user {}", record.username),
                Some(json!({ "username": record.username })),
            );
            Ok(0)
        }
        Commands::Check { username, password } => {
            let password = match password {
                Some(password) => password,
                None => prompt_password(&format!("Password for {username}"))?,
            };
            if store.pass_match(&username, &password) {
                emit(
                    Level::Success,
                    "users.check.match",
                    "Password matches",
                    Some(json!({ "username": username, "match": true })),
                );
                Ok(0)
            } else {
                emit(
                    Level::Warn,
                    "users.check.mismatch",
                    "Password does not match",
                    Some(json!({ "username": username, "match": false })),
                );
                Ok(1)
            }
        }
        Commands::Home { command } => handle_home_command(command, store),
    }
}

fn handle_home_command(command: HomeCommands, store: &UserStore) -> Result<i32> {
    match command {
        HomeCommands::Set { username } => {
            let path = store.set_home(&username)?;
            emit(
                Level::Info,
                "users.home.set",
                &path.display().to_string(),
                Some(json!({ "username": username, "path": path.display().to_string() })),
            );
            Ok(0)
        }
        HomeCommands::Get { username } => match store.get_home(&username) {
            Some(path) => {
                emit(
                    Level::Info,
                    "users.home.get",
                    &path.display().to_string(),
                    Some(json!({ "username": username, "path": path.display().to_string() })),
                );
                Ok(0)
            }
            None => {
                emit(
                    Level::Warn,
                    "users.home.missing",
                    &format!("No home directory for {username}"),
                    Some(json!({ "username": username })),
                );
                Ok(1)
            }
        },
    }
}

fn show_user(store: &UserStore, username: &str) -> Result<i32> {
    let Some(user) = store.get_user(username) else {
        emit(
            Level::Warn,
            "users.get.missing",
            &format!("User {username} not found"),
            Some(json!({ "username": username })),
        );
        return Ok(1);
    };

    // JSON consumers read the record from the event data
    let message = match (get_output_format(), &user.fullname) {
        (OutputFormat::Json, _) => user.username.clone(),
        (OutputFormat::Text, Some(fullname)) => {
            format!("{} ({})\n  password: {}", user.username, fullname, user.password)
        }
        (OutputFormat::Text, None) => format!("{}\n  password: {}", user.username, user.password),
    };
    emit(
        Level::Info,
        "users.get",
        &message,
        Some(serde_json::to_value(user).context("serializing user record")?),
    );
    Ok(0)
}

fn list_users(store: &UserStore) {
    if store.is_empty() {
        emit(Level::Info, "users.list.empty", "No users.", None);
        return;
    }
    for (username, user) in store.iter() {
        let line = match &user.fullname {
            Some(fullname) => format!("{username: <20} {fullname}"),
            None => username.clone(),
        };
        emit(
            Level::Info,
            "users.list.entry",
            &line,
            Some(json!({ "username": username, "fullname": user.fullname })),
        );
    }
}

fn prompt_password(prompt: &str) -> Result<String> {
    Password::new()
        .with_prompt(prompt)
        .allow_empty_password(true)
        .interact()
        .context("reading password")
}

fn prompt_new_password() -> Result<String> {
    Password::new()
        .with_prompt("Password")
        .with_confirmation("Confirm password", "Passwords do not match.")
        .interact()
        .context("reading password")
}
