//! CLI entry point for sitewatch.

mod app;
mod cli;

use clap::Parser;

#[tokio::main]
async fn main() {
    let args = cli::Args::parse();
    let code = app::entry::run(args).await;
    if code != 0 {
        std::process::exit(code);
    }
}
