// SPDX-License-Identifier: Apache-2.0

//! Key-phrase extraction via the Text Analytics service.
//!
//! The service is an opaque collaborator: one POST per issue, pre-shared
//! key auth, no retry. Every failure mode (non-200, network error,
//! timeout) degrades to [`Extraction::Unavailable`]; callers treat that as
//! "no phrases found" and the event pipeline never sees an error. The
//! distinction is kept explicit rather than collapsed into an empty list
//! so that tests and logs can tell degradation from a genuinely empty
//! extraction.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::classify::LABEL_MGMT;
use crate::config::KeyPhraseConfig;

/// Fixed path of the key-phrase endpoint, appended to the configured base.
const KEY_PHRASES_PATH: &str = "/text/analytics/v2.1/keyPhrases";

/// Language tag sent with every document.
const LANGUAGE: &str = "en";

/// Phrase substrings that mark management-plane content.
const MGMT_PHRASE_MARKERS: &[&str] = &["fluent", "manager", "management"];

/// Result of one key-phrase extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    /// The service answered; the list may be empty.
    Phrases(Vec<String>),
    /// The service failed or was unreachable; treated as empty downstream.
    Unavailable,
}

impl Extraction {
    /// The extracted phrases, with `Unavailable` degraded to none.
    #[must_use]
    pub fn phrases(&self) -> &[String] {
        match self {
            Extraction::Phrases(phrases) => phrases,
            Extraction::Unavailable => &[],
        }
    }
}

/// Source of key phrases for a piece of text.
#[async_trait]
pub trait PhraseProvider: Send + Sync {
    /// Extracts key phrases from `text`, degrading all failures to
    /// [`Extraction::Unavailable`].
    async fn key_phrases(&self, text: &str) -> Extraction;
}

/// One document in the key-phrase request envelope.
#[derive(Debug, Serialize)]
struct Document<'a> {
    language: &'static str,
    id: String,
    text: &'a str,
}

/// Request envelope for the key-phrase endpoint.
#[derive(Debug, Serialize)]
struct KeyPhraseRequest<'a> {
    documents: Vec<Document<'a>>,
}

/// Response envelope from the key-phrase endpoint.
#[derive(Debug, Deserialize)]
struct KeyPhraseResponse {
    documents: Vec<ResponseDocument>,
}

/// Per-document phrase list in the response.
#[derive(Debug, Deserialize)]
struct ResponseDocument {
    #[serde(rename = "keyPhrases")]
    key_phrases: Vec<String>,
}

/// HTTP client for the key-phrase service.
#[derive(Debug)]
pub struct KeyPhraseClient {
    /// HTTP client with configured timeout.
    http: Client,
    /// Base endpoint of the service; empty when unconfigured.
    endpoint: String,
    /// Pre-shared subscription key.
    key: SecretString,
}

impl KeyPhraseClient {
    /// Creates a client from configuration.
    ///
    /// An empty endpoint is accepted; requests against it fail cleanly and
    /// degrade to [`Extraction::Unavailable`].
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(config: &KeyPhraseConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            http,
            endpoint: config.endpoint.clone(),
            key: SecretString::from(config.key.clone()),
        })
    }

    /// Sends one extraction request and parses the phrase list.
    ///
    /// Separated from the trait impl so the degrade policy lives in exactly
    /// one place.
    async fn request_phrases(&self, text: &str) -> Result<Vec<String>> {
        let url = format!(
            "{}{KEY_PHRASES_PATH}",
            self.endpoint.trim_end_matches('/')
        );

        let request = KeyPhraseRequest {
            documents: vec![Document {
                language: LANGUAGE,
                id: chrono::Utc::now().timestamp_millis().to_string(),
                text,
            }],
        };

        let response = self
            .http
            .post(&url)
            .header("Ocp-Apim-Subscription-Key", self.key.expose_secret())
            .json(&request)
            .send()
            .await
            .context("Failed to send key-phrase request")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(crate::LabelbotError::KeyPhrase {
                message: body,
                status: status.as_u16(),
            }
            .into());
        }

        let parsed: KeyPhraseResponse = response
            .json()
            .await
            .context("Failed to parse key-phrase response")?;

        let phrases = parsed
            .documents
            .into_iter()
            .next()
            .map(|d| d.key_phrases)
            .unwrap_or_default();

        Ok(phrases)
    }
}

#[async_trait]
impl PhraseProvider for KeyPhraseClient {
    #[instrument(skip(self, text), fields(text_len = text.len()))]
    async fn key_phrases(&self, text: &str) -> Extraction {
        match self.request_phrases(text).await {
            Ok(phrases) => {
                debug!(count = phrases.len(), "Extracted key phrases");
                Extraction::Phrases(phrases)
            }
            Err(err) => {
                warn!(error = %err, "Key-phrase extraction unavailable");
                Extraction::Unavailable
            }
        }
    }
}

/// Maps extracted phrases to labels.
///
/// A phrase containing `fluent`, `manager`, or `management`
/// (case-insensitive) marks management-plane content and derives the
/// `mgmt` label, once across all phrases.
#[must_use]
pub fn phrases_to_labels(phrases: &[String]) -> Vec<String> {
    let mut labels = Vec::new();
    for phrase in phrases {
        let phrase = phrase.to_lowercase();
        if MGMT_PHRASE_MARKERS.iter().any(|m| phrase.contains(m))
            && !labels.iter().any(|l| l == LABEL_MGMT)
        {
            labels.push(LABEL_MGMT.to_string());
        }
    }
    labels
}
