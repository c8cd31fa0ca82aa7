pub mod app;
pub mod cli;
pub mod color;
pub mod components;
pub mod config;
pub mod constants;
pub mod error;
pub mod scene;
pub mod tui;
pub mod utils;

use clap::Parser;
use color_eyre::eyre::Result;

use crate::{
    app::App,
    cli::Cli,
    config::Config,
    utils::{initialize_logging, initialize_panic_handler},
};

async fn tokio_main() -> Result<()> {
    let cli = Cli::parse();

    initialize_logging()?;

    initialize_panic_handler()?;

    let config = Config::new(&cli)?;

    let mut app = App::new(config)?;
    app.run().await?;

    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    if let Err(e) = tokio_main().await {
        eprintln!("{} error: Something went wrong", env!("CARGO_PKG_NAME"));
        Err(e)
    } else {
        Ok(())
    }
}
