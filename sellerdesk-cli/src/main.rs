//! sellerdesk table URL tool
//!
//! Usage:
//!   sellerdesk --config tables.toml tables
//!   sellerdesk inspect orders '?page=2&status=active'
//!   sellerdesk apply orders '?page=5' --filter status=active,pending --page-count 3

use anyhow::Result;
use clap::Parser;
use sellerdesk_cli::{Cli, run};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let stdout = std::io::stdout();
    run(&cli, &mut stdout.lock())
}
