use anyhow::{Context, Result};
use clap::Parser;

use usermode::cli::Cli;
use usermode::common::config::{Config, STORE_ENV};
use usermode::ui::{self, prelude::*};
use usermode::users::{UserStore, handle_user_command};

fn main() {
    let cli = Cli::parse();

    ui::set_debug_mode(cli.debug);
    let format = if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::Text
    };
    ui::init(format, !cli.no_color);

    match run(cli) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            emit(Level::Error, "usermode.error", &format!("Error: {e:#}"), None);
            std::process::exit(1);
        }
    }
}

fn run(cli: Cli) -> Result<i32> {
    let config = Config::load()?;
    let env_store = std::env::var(STORE_ENV).ok();
    let path = config.resolve_store_path(cli.store.as_deref(), env_store.as_deref());
    emit(
        Level::Debug,
        "usermode.store",
        &format!("Using user store {}", path.display()),
        None,
    );

    let mut store = UserStore::open(&path)
        .with_context(|| format!("opening user store {}", path.display()))?;
    handle_user_command(cli.command, &mut store, &config)
}
