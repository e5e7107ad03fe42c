use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Manage a file-backed table of user accounts
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Activate debug mode
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Emit events as JSON lines
    #[arg(long, global = true)]
    pub json: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Path to the user store (overrides USERMODE_STORE and the config file)
    #[arg(short, long, global = true, value_name = "PATH")]
    pub store: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show a single user
    Get { username: String },

    /// List all users
    List,

    /// Add a new user
    Add {
        username: String,
        /// Full name of the user
        #[arg(short, long)]
        fullname: Option<String>,
        /// Password (prompted for when omitted)
        #[arg(short, long)]
        password: Option<String>,
        /// Also create the home directory
        #[arg(long)]
        home: bool,
    },

    /// Update an existing user
    Set {
        username: String,
        /// New password
        #[arg(short, long)]
        password: Option<String>,
        /// New full name
        #[arg(short, long)]
        fullname: Option<String>,
        /// Current password (prompted for unless --force)
        #[arg(long)]
        current: Option<String>,
        /// Skip the current password check
        #[arg(long)]
        force: bool,
    },

    /// Check a password; exits with status 1 when it does not match
    Check {
        username: String,
        /// Password to check (prompted for when omitted)
        #[arg(short, long)]
        password: Option<String>,
    },

    /// Home directory management
    Home {
        #[command(subcommand)]
        command: HomeCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum HomeCommands {
    /// Create the home directory if needed and print its path
    Set { username: String },
    /// Print the home directory path if it exists
    Get { username: String },
}
