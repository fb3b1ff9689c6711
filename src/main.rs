mod cli;
mod commands;
mod config;
mod env;
mod error;
mod logging;
mod output;
mod pages;
mod sink;
mod source;
mod table;
mod tui;

use clap::Parser;

#[tokio::main]
async fn main() {
    let cli = cli::Cli::parse();
    logging::init();

    if let Err(err) = commands::dispatch(cli).await {
        log::error!("{err}");
        eprintln!("{err}");
        std::process::exit(1);
    }
}
