// SPDX-License-Identifier: Apache-2.0

//! Webhook server wiring labelbot-core to GitHub issue deliveries.
//!
//! This crate hosts the axum HTTP server: it authenticates webhook
//! deliveries, decodes `issues` events, and drives the core triage
//! handler. All state is constructed once at startup and read-only
//! afterwards.

pub mod logging;
pub mod server;

use std::sync::Arc;

use anyhow::{Context, Result};
use secrecy::SecretString;
use tokio::net::TcpListener;
use tracing::info;

use labelbot_core::{AppConfig, KeyPhraseClient, SampleCatalog};

pub use server::{AppState, router};

/// Resolves the GitHub token from the environment.
///
/// Checks `GITHUB_TOKEN`, then `GH_TOKEN`.
///
/// # Errors
///
/// Returns an error when neither variable is set.
pub fn resolve_github_token() -> Result<SecretString> {
    for var in ["GITHUB_TOKEN", "GH_TOKEN"] {
        if let Ok(token) = std::env::var(var)
            && !token.is_empty()
        {
            return Ok(SecretString::from(token));
        }
    }
    anyhow::bail!("Missing GitHub token - set the GITHUB_TOKEN environment variable")
}

/// Builds the shared server state from configuration.
///
/// # Errors
///
/// Returns an error if the GitHub client, key-phrase client, or sample
/// catalog cannot be constructed.
pub fn build_state(config: &AppConfig) -> Result<AppState> {
    let token = resolve_github_token()?;
    let github = labelbot_core::github::create_client(&token)?;
    let phrases = KeyPhraseClient::new(&config.keyphrase)?;
    let catalog = SampleCatalog::load()?;

    let webhook_secret = if config.github.webhook_secret.is_empty() {
        None
    } else {
        Some(config.github.webhook_secret.clone().into_bytes())
    };

    Ok(AppState {
        github,
        phrases,
        catalog,
        webhook_secret,
    })
}

/// Runs the webhook server until ctrl-c.
///
/// # Errors
///
/// Returns an error if the listener cannot bind or the server fails.
pub async fn run(config: &AppConfig, state: AppState) -> Result<()> {
    let app = router(Arc::new(state));

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    info!("Webhook server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c()
                .await
                .expect("Failed to install Ctrl+C handler");
            info!("Received Ctrl+C, shutting down gracefully");
        })
        .await?;

    Ok(())
}
