use std::io::{self, IsTerminal};

use anyhow::{Context, Result};
use clap::Args;
use tracing::debug;

use crate::config::{self, Config};
use crate::db::{self, Database};
use crate::logging;
use crate::ui::Console;

/// Flags shared by every menu program
#[derive(Args, Debug, Clone, Default)]
pub struct CommonArgs {
    /// Postgres connection URL (overrides DATABASE_URL and the DB_* variables)
    #[arg(long, value_name = "URL")]
    pub database_url: Option<String>,

    /// Log connection and statement activity to stderr
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

/// Logging, configuration and the connection helper, ready for a menu
pub fn bootstrap(args: &CommonArgs) -> Result<(Config, Database)> {
    logging::init_tracing(args.verbose)?;

    let config = config::init()
        .context("failed to load configuration")?
        .with_database_url(args.database_url.clone());
    let db = db::init(&config).context("invalid database settings")?;
    debug!(bcrypt_cost = config.bcrypt_cost, "configuration loaded");

    Ok((config, db))
}

/// Console bound to the process's standard streams. Passwords are hidden
/// when both streams are a terminal.
pub fn terminal() -> Console<io::StdinLock<'static>, io::Stdout> {
    let interactive = io::stdin().is_terminal() && io::stdout().is_terminal();
    Console::new(io::stdin().lock(), io::stdout()).with_hidden_passwords(interactive)
}
