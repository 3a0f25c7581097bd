// SPDX-License-Identifier: Apache-2.0

//! GitHub issue operations.
//!
//! Thin wrapper over octocrab, scoped to the single issue an event is
//! about. Failures are not handled here; they propagate with context to
//! the webhook layer, which surfaces them in the delivery log.

use anyhow::{Context, Result};
use async_trait::async_trait;
use octocrab::Octocrab;
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, instrument};

/// Host-API surface the event handler needs for one issue.
#[async_trait]
pub trait IssueHost: Send + Sync {
    /// Posts a comment on the issue.
    async fn post_comment(&self, body: &str) -> Result<()>;

    /// Adds labels to the issue. Existing labels are kept; the host treats
    /// the list as an unordered set.
    async fn add_labels(&self, labels: &[String]) -> Result<()>;
}

/// Creates an octocrab client authenticated with a personal access token.
///
/// # Errors
///
/// Returns an error if the client cannot be constructed.
pub fn create_client(token: &SecretString) -> Result<Octocrab> {
    Octocrab::builder()
        .personal_token(token.expose_secret().to_string())
        .build()
        .context("Failed to create GitHub client")
}

/// [`IssueHost`] implementation over the GitHub REST API.
#[derive(Debug, Clone)]
pub struct GithubIssueHost {
    client: Octocrab,
    owner: String,
    repo: String,
    number: u64,
}

impl GithubIssueHost {
    /// Scopes a client to one issue.
    #[must_use]
    pub fn new(client: Octocrab, owner: String, repo: String, number: u64) -> Self {
        Self {
            client,
            owner,
            repo,
            number,
        }
    }
}

#[async_trait]
impl IssueHost for GithubIssueHost {
    #[instrument(skip(self, body), fields(owner = %self.owner, repo = %self.repo, number = self.number))]
    async fn post_comment(&self, body: &str) -> Result<()> {
        debug!("Posting issue comment");

        self.client
            .issues(&self.owner, &self.repo)
            .create_comment(self.number, body)
            .await
            .with_context(|| format!("Failed to post comment to issue #{}", self.number))?;

        Ok(())
    }

    #[instrument(skip(self), fields(owner = %self.owner, repo = %self.repo, number = self.number))]
    async fn add_labels(&self, labels: &[String]) -> Result<()> {
        debug!(labels = ?labels, "Adding issue labels");

        self.client
            .issues(&self.owner, &self.repo)
            .add_labels(self.number, labels)
            .await
            .with_context(|| format!("Failed to add labels to issue #{}", self.number))?;

        Ok(())
    }
}
