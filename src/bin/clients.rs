use anyhow::Result;
use clap::Parser;

use rut_crud::cli::{self, CommonArgs};
use rut_crud::ui;

/// Create, read, update and delete clients keyed by RUT
#[derive(Parser, Debug)]
#[command(name = "rut-clients", version, about)]
struct Cli {
    #[command(flatten)]
    common: CommonArgs,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Cli::parse();
    let (_config, db) = cli::bootstrap(&args.common)?;

    let mut console = cli::terminal();
    ui::clients::run(&db, &mut console).await?;

    Ok(())
}
