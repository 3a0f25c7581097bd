// SPDX-License-Identifier: Apache-2.0

//! Binary entry point for the Labelbot webhook server.

use anyhow::Result;
use clap::Parser;

use labelbot_server::logging::init_logging;

/// Webhook-triggered issue-triage assistant for GitHub.
#[derive(Debug, Parser)]
#[command(name = "labelbot-server", version, about)]
struct Args {
    /// Bind host (overrides configuration).
    #[arg(long)]
    host: Option<String>,

    /// Bind port (overrides configuration).
    #[arg(long)]
    port: Option<u16>,

    /// Path to a TOML configuration file.
    #[arg(long)]
    config: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    init_logging();

    let mut config = labelbot_core::load_config(args.config.as_deref())?;
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    let state = labelbot_server::build_state(&config)?;
    labelbot_server::run(&config, state).await
}
