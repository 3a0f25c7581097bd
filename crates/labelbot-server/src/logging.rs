// SPDX-License-Identifier: Apache-2.0

//! Logging initialization for the Labelbot server.
//!
//! Uses `tracing` with `tracing-subscriber` for structured logging.
//! Log level can be controlled via the `RUST_LOG` environment variable.
//!
//! # Examples
//!
//! ```bash
//! # Default: info level for labelbot, warn for dependencies
//! labelbot-server
//!
//! # Debug output for troubleshooting
//! RUST_LOG=labelbot=debug labelbot-server
//! ```

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

/// Initialize the logging subsystem.
///
/// The `RUST_LOG` environment variable overrides the default filter.
pub fn init_logging() {
    let fmt_layer = fmt::layer().with_target(false).with_writer(std::io::stderr);

    let default_filter = "labelbot=info,labelbot_core=info,labelbot_server=info,octocrab=warn,reqwest=warn";
    let filter_layer = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .expect("valid default filter directives");

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();
}
