// SPDX-License-Identifier: Apache-2.0

#![warn(missing_docs)]

//! # Labelbot Core
//!
//! Core library for Labelbot - a webhook-triggered, rule-based issue
//! triage assistant for GitHub.
//!
//! This crate provides reusable components for:
//! - Label classification (title markers, library-identifier dictionary,
//!   key-phrase heuristics)
//! - Code-sample recommendation from a bundled catalog
//! - GitHub issue API integration (comments, labels)
//! - Key-phrase service integration
//! - Configuration management
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use labelbot_core::{
//!     IssueEvent, KeyPhraseClient, SampleCatalog, handle_issue_event, load_config,
//! };
//! use labelbot_core::github::{GithubIssueHost, create_client};
//! use anyhow::Result;
//!
//! # async fn example(event: IssueEvent) -> Result<()> {
//! let config = load_config(None)?;
//! let catalog = SampleCatalog::load()?;
//! let phrases = KeyPhraseClient::new(&config.keyphrase)?;
//!
//! let client = create_client(&secrecy::SecretString::from("token"))?;
//! let host = GithubIssueHost::new(client, "Azure".into(), "azure-sdk-for-java".into(), 123);
//!
//! let outcome = handle_issue_event(&event, &host, &phrases, &catalog).await?;
//! println!("applied: {:?}", outcome.labels);
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`classify`] - rule-based label derivation
//! - [`config`] - configuration loading
//! - [`error`] - error types
//! - [`event`] - issue event data model
//! - [`github`] - GitHub API collaborator
//! - [`handler`] - per-event orchestration
//! - [`keyphrase`] - key-phrase service collaborator
//! - [`samples`] - sample catalog and recommender

// ============================================================================
// Error Handling
// ============================================================================

pub use error::LabelbotError;

/// Convenience Result type for Labelbot operations.
///
/// This is equivalent to `std::result::Result<T, LabelbotError>`.
pub type Result<T> = std::result::Result<T, LabelbotError>;

// ============================================================================
// Configuration
// ============================================================================

pub use config::{AppConfig, GitHubConfig, KeyPhraseConfig, ServerConfig, load_config};

// ============================================================================
// Event Model
// ============================================================================

pub use event::{Issue, IssueAction, IssueEvent};

// ============================================================================
// Classification
// ============================================================================

pub use classify::{
    LabelSet, MAX_BODY_LINES, extract_library_identifier, label_from_title, labels_from_body,
    map_identifier_to_label,
};
pub use keyphrase::{Extraction, KeyPhraseClient, PhraseProvider, phrases_to_labels};

// ============================================================================
// Samples
// ============================================================================

pub use samples::{Sample, SampleCatalog, recommend_samples};

// ============================================================================
// Event Handling
// ============================================================================

pub use github::IssueHost;
pub use handler::{TriageOutcome, handle_issue_event};

// ============================================================================
// Modules
// ============================================================================

pub mod classify;
pub mod config;
pub mod error;
pub mod event;
pub mod github;
pub mod handler;
pub mod keyphrase;
pub mod samples;
