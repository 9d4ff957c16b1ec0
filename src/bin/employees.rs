use anyhow::Result;
use clap::Parser;

use rut_crud::cli::{self, CommonArgs};
use rut_crud::ui;

/// Manage employee records: create, read, update, delete and list
#[derive(Parser, Debug)]
#[command(name = "rut-employees", version, about)]
struct Cli {
    #[command(flatten)]
    common: CommonArgs,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Cli::parse();
    let (_config, db) = cli::bootstrap(&args.common)?;

    let mut console = cli::terminal();
    ui::employees::run(&db, &mut console).await?;

    Ok(())
}
