//! Vitrine CLI binary.
//!
//! This binary provides command-line access to the media catalog:
//! - List the current version of every asset, one page at a time
//! - Report which storage backends are usable
//! - Delete assets and prune superseded versions

use clap::Parser;
use vitrine::{LoggingConfig, init_logging};

mod cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use cli::{Cli, handle_command, load_config};

    let _ = dotenvy::dotenv();

    // Parse command-line arguments
    let cli = Cli::parse();

    init_logging(&LoggingConfig::from_verbosity(cli.verbose).with_json_logs(cli.json_logs))?;

    let config = load_config(cli.config.as_deref())?;
    handle_command(cli.command, &config).await?;

    Ok(())
}
