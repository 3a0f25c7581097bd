// SPDX-License-Identifier: Apache-2.0

//! Webhook routing and delivery handling.
//!
//! One POST route receives GitHub webhook deliveries, authenticates them
//! against the shared webhook secret when one is configured, and drives
//! the core handler for `issues` events. Everything else is acknowledged
//! and ignored.

use std::sync::Arc;

use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use hmac::{Hmac, Mac};
use octocrab::Octocrab;
use serde::Deserialize;
use sha2::Sha256;
use tracing::{debug, error, info};

use labelbot_core::github::GithubIssueHost;
use labelbot_core::{Issue, IssueAction, IssueEvent, KeyPhraseClient, SampleCatalog};

/// Webhook event types this server reacts to.
const ISSUES_EVENT: &str = "issues";

type HmacSha256 = Hmac<Sha256>;

/// Shared, read-only server state.
pub struct AppState {
    /// Authenticated GitHub client; scoped per issue on each delivery.
    pub github: Octocrab,
    /// Key-phrase service client.
    pub phrases: KeyPhraseClient,
    /// Sample catalog, loaded once at startup.
    pub catalog: SampleCatalog,
    /// Webhook shared secret; deliveries are unauthenticated when `None`.
    pub webhook_secret: Option<Vec<u8>>,
}

/// Builds the axum router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/webhook", post(webhook))
        .with_state(state)
}

/// Liveness probe.
async fn healthz() -> &'static str {
    "ok"
}

/// The slice of the `issues` payload the bot cares about.
#[derive(Debug, Deserialize)]
struct IssuesPayload {
    action: IssueAction,
    issue: PayloadIssue,
    repository: PayloadRepository,
}

#[derive(Debug, Deserialize)]
struct PayloadIssue {
    number: u64,
    #[serde(flatten)]
    content: Issue,
}

#[derive(Debug, Deserialize)]
struct PayloadRepository {
    name: String,
    owner: PayloadOwner,
}

#[derive(Debug, Deserialize)]
struct PayloadOwner {
    login: String,
}

/// Verifies a delivery signature against the shared secret.
///
/// GitHub sends `X-Hub-Signature-256: sha256=<hex hmac>` computed over the
/// raw request body. Comparison is constant-time via the MAC verifier.
fn verify_signature(secret: &[u8], body: &[u8], signature_header: Option<&str>) -> bool {
    let Some(header) = signature_header else {
        return false;
    };
    let Some(hex_digest) = header.strip_prefix("sha256=") else {
        return false;
    };
    let Ok(digest) = hex::decode(hex_digest) else {
        return false;
    };

    let mut mac = HmacSha256::new_from_slice(secret).expect("HMAC accepts any key length");
    mac.update(body);
    mac.verify_slice(&digest).is_ok()
}

/// Handles one webhook delivery.
async fn webhook(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    if let Some(secret) = &state.webhook_secret {
        let signature = headers
            .get("X-Hub-Signature-256")
            .and_then(|v| v.to_str().ok());
        if !verify_signature(secret, &body, signature) {
            info!("Rejected delivery with missing or invalid signature");
            return (StatusCode::UNAUTHORIZED, "invalid signature").into_response();
        }
    }

    let event_type = headers
        .get("X-GitHub-Event")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();

    if event_type != ISSUES_EVENT {
        debug!(event_type, "Ignoring non-issue event");
        return StatusCode::NO_CONTENT.into_response();
    }

    let payload: IssuesPayload = match serde_json::from_slice(&body) {
        Ok(payload) => payload,
        Err(err) => {
            info!(error = %err, "Rejected malformed issues payload");
            return (StatusCode::BAD_REQUEST, "malformed payload").into_response();
        }
    };

    let owner = payload.repository.owner.login;
    let repo = payload.repository.name;
    let number = payload.issue.number;

    info!(
        action = ?payload.action,
        issue = %format!("{owner}/{repo}#{number}"),
        "Handling issue event"
    );

    let host = GithubIssueHost::new(state.github.clone(), owner, repo, number);
    let event = IssueEvent {
        action: payload.action,
        issue: payload.issue.content,
    };

    match labelbot_core::handle_issue_event(&event, &host, &state.phrases, &state.catalog).await {
        Ok(outcome) => axum::Json(outcome).into_response(),
        Err(err) => {
            error!(error = %format!("{err:#}"), "Issue event handling failed");
            (StatusCode::INTERNAL_SERVER_ERROR, "event handling failed").into_response()
        }
    }
}
