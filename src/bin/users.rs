use anyhow::Result;
use clap::Parser;

use rut_crud::cli::{self, CommonArgs};
use rut_crud::ui;

/// User accounts: create, log in, list and deactivate
#[derive(Parser, Debug)]
#[command(name = "rut-users", version, about)]
struct Cli {
    #[command(flatten)]
    common: CommonArgs,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Cli::parse();
    let (config, db) = cli::bootstrap(&args.common)?;

    let mut console = cli::terminal();
    ui::users::run(&db, &mut console, config.bcrypt_cost).await?;

    Ok(())
}
