// SPDX-License-Identifier: Apache-2.0

//! Per-event triage orchestration.
//!
//! One linear pass per issue event: greeting comment, title rule, body
//! scan, key-phrase rule, label application, sample recommendation. No
//! state survives between events.

use std::fmt::Write;

use anyhow::Result;
use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::classify::{LabelSet, label_from_title, labels_from_body};
use crate::event::{IssueAction, IssueEvent};
use crate::github::IssueHost;
use crate::keyphrase::{PhraseProvider, phrases_to_labels};
use crate::samples::{QUERY_MARKER, SampleCatalog, recommend_samples};

/// Greeting posted on every newly opened issue.
const GREETING: &str = "Thanks for opening this issue!";

/// Body character counts that qualify for key-phrase extraction.
///
/// Bodies at or below the lower bound carry too little signal; bodies at
/// or above the upper bound exceed the per-document service limit.
const KEY_PHRASE_MIN_CHARS: usize = 100;
const KEY_PHRASE_MAX_CHARS: usize = 5120;

/// What one event handling actually did, for logging and tests.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct TriageOutcome {
    /// Whether the greeting comment was posted.
    pub greeted: bool,
    /// Labels applied, in discovery order. Empty when no rule fired.
    pub labels: Vec<String>,
    /// Sample URLs recommended in a comment, if any.
    pub samples_recommended: Vec<String>,
}

/// Whether the body length qualifies for the key-phrase call.
fn in_key_phrase_range(body: &str) -> bool {
    let chars = body.chars().count();
    chars > KEY_PHRASE_MIN_CHARS && chars < KEY_PHRASE_MAX_CHARS
}

/// The query text after the `[query]` title marker, if present.
fn query_from_title(title: &str) -> Option<&str> {
    let lowered = title.to_lowercase();
    let pos = lowered.find(QUERY_MARKER)?;
    // Indexing the original with an offset found in the lowered copy is only
    // guaranteed safe for ASCII titles; fall back to no query otherwise.
    let rest = title.get(pos + QUERY_MARKER.len()..)?;
    Some(rest.trim())
}

/// Handles one issue event.
///
/// Rules fire according to the action:
/// - `opened`: greeting comment, all labeling rules, sample recommendation;
/// - `edited`: title and body labeling rules only;
/// - anything else: no-op.
///
/// Key-phrase failures degrade inside the provider and never fail the
/// event; host API failures propagate to the caller.
///
/// # Errors
///
/// Returns an error if a host API call (comment or labels) fails.
#[instrument(skip_all, fields(action = ?event.action, title = %event.issue.title))]
pub async fn handle_issue_event(
    event: &IssueEvent,
    host: &dyn IssueHost,
    phrases: &dyn PhraseProvider,
    catalog: &SampleCatalog,
) -> Result<TriageOutcome> {
    let mut outcome = TriageOutcome::default();

    if event.action == IssueAction::Other {
        debug!("Ignoring unrecognized issue action");
        return Ok(outcome);
    }

    if event.action == IssueAction::Opened {
        host.post_comment(GREETING).await?;
        outcome.greeted = true;
    }

    let issue = &event.issue;
    let mut labels = LabelSet::new();

    // Rule: title markers.
    if let Some(label) = label_from_title(&issue.title) {
        labels.push(label);
    }

    // Rule: library markers in the body.
    labels.extend(labels_from_body(&issue.body));
    labels.expand_implied();

    // Rule: key phrases, opened issues with a mid-sized body only.
    if event.action == IssueAction::Opened && in_key_phrase_range(&issue.body) {
        let extraction = phrases.key_phrases(&issue.body).await;
        labels.extend(phrases_to_labels(extraction.phrases()));
    }

    if !labels.is_empty() {
        host.add_labels(labels.as_slice()).await?;
        outcome.labels = labels.into_vec();
        info!(labels = ?outcome.labels, "Applied labels");
    }

    // Sample recommendation, opened issues with a [query] title only.
    if event.action == IssueAction::Opened
        && let Some(query) = query_from_title(&issue.title)
    {
        let samples = recommend_samples(query, phrases, catalog).await;
        if !samples.is_empty() {
            let mut comment = String::from(
                "You may find these samples useful:\n",
            );
            for sample in &samples {
                let _ = writeln!(comment, "- [{}]({})", sample.description, sample.url);
            }
            host.post_comment(&comment).await?;
            outcome.samples_recommended = samples.iter().map(|s| s.url.clone()).collect();
            info!(count = outcome.samples_recommended.len(), "Recommended samples");
        }
    }

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::event::Issue;
    use crate::keyphrase::Extraction;

    /// Records host API calls instead of performing them.
    #[derive(Default)]
    struct RecordingHost {
        comments: Mutex<Vec<String>>,
        labels: Mutex<Vec<Vec<String>>>,
    }

    impl RecordingHost {
        fn comments(&self) -> Vec<String> {
            self.comments.lock().unwrap().clone()
        }

        fn label_calls(&self) -> Vec<Vec<String>> {
            self.labels.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl IssueHost for RecordingHost {
        async fn post_comment(&self, body: &str) -> Result<()> {
            self.comments.lock().unwrap().push(body.to_string());
            Ok(())
        }

        async fn add_labels(&self, labels: &[String]) -> Result<()> {
            self.labels.lock().unwrap().push(labels.to_vec());
            Ok(())
        }
    }

    /// Counts extraction calls and returns a fixed phrase list.
    #[derive(Default)]
    struct StubPhrases {
        phrases: Vec<String>,
        calls: Mutex<u32>,
    }

    impl StubPhrases {
        fn with(phrases: &[&str]) -> Self {
            Self {
                phrases: phrases.iter().map(ToString::to_string).collect(),
                calls: Mutex::new(0),
            }
        }

        fn calls(&self) -> u32 {
            *self.calls.lock().unwrap()
        }
    }

    #[async_trait]
    impl PhraseProvider for StubPhrases {
        async fn key_phrases(&self, _text: &str) -> Extraction {
            *self.calls.lock().unwrap() += 1;
            Extraction::Phrases(self.phrases.clone())
        }
    }

    fn catalog() -> SampleCatalog {
        SampleCatalog::from_json(
            r#"{
                "javaSamples": [
                    {"filePath": "a.java", "description": "Create a storage account with custom network rules"}
                ]
            }"#,
        )
        .unwrap()
    }

    fn event(action: IssueAction, title: &str, body: &str) -> IssueEvent {
        IssueEvent {
            action,
            issue: Issue {
                title: title.to_string(),
                body: body.to_string(),
            },
        }
    }

    /// A body long enough to pass the key-phrase gate.
    fn mid_sized_body() -> String {
        "x".repeat(200)
    }

    #[tokio::test]
    async fn opened_posts_greeting() {
        let host = RecordingHost::default();
        let phrases = StubPhrases::default();

        let outcome = handle_issue_event(
            &event(IssueAction::Opened, "plain title", "short"),
            &host,
            &phrases,
            &catalog(),
        )
        .await
        .unwrap();

        assert!(outcome.greeted);
        assert_eq!(host.comments(), ["Thanks for opening this issue!"]);
    }

    #[tokio::test]
    async fn edited_posts_no_greeting() {
        let host = RecordingHost::default();
        let phrases = StubPhrases::default();

        let outcome = handle_issue_event(
            &event(IssueAction::Edited, "plain title", "short"),
            &host,
            &phrases,
            &catalog(),
        )
        .await
        .unwrap();

        assert!(!outcome.greeted);
        assert!(host.comments().is_empty());
    }

    #[tokio::test]
    async fn other_action_is_a_noop() {
        let host = RecordingHost::default();
        let phrases = StubPhrases::with(&["storage management"]);

        let outcome = handle_issue_event(
            &event(IssueAction::Other, "[bug] title", &mid_sized_body()),
            &host,
            &phrases,
            &catalog(),
        )
        .await
        .unwrap();

        assert_eq!(outcome, TriageOutcome::default());
        assert!(host.comments().is_empty());
        assert!(host.label_calls().is_empty());
        assert_eq!(phrases.calls(), 0);
    }

    #[tokio::test]
    async fn bug_title_labels_bug_only() {
        let host = RecordingHost::default();
        let phrases = StubPhrases::default();

        let outcome = handle_issue_event(
            &event(IssueAction::Opened, "[BUG] crash on startup", "short"),
            &host,
            &phrases,
            &catalog(),
        )
        .await
        .unwrap();

        assert_eq!(outcome.labels, ["bug"]);
        assert_eq!(host.label_calls(), [vec!["bug".to_string()]]);
    }

    #[tokio::test]
    async fn feature_request_title_label() {
        let host = RecordingHost::default();
        let phrases = StubPhrases::default();

        let outcome = handle_issue_event(
            &event(IssueAction::Edited, "[Feature Request] add X", "short"),
            &host,
            &phrases,
            &catalog(),
        )
        .await
        .unwrap();

        assert_eq!(outcome.labels, ["feature-request"]);
    }

    #[tokio::test]
    async fn body_library_marker_implies_mgmt() {
        let host = RecordingHost::default();
        let phrases = StubPhrases::default();

        let outcome = handle_issue_event(
            &event(
                IssueAction::Edited,
                "plain",
                "Library used: azure-resourcemanager-storage for blob access",
            ),
            &host,
            &phrases,
            &catalog(),
        )
        .await
        .unwrap();

        assert_eq!(outcome.labels, ["mgmt-storage", "mgmt"]);
    }

    #[tokio::test]
    async fn azure_core_has_no_mgmt_implication() {
        let host = RecordingHost::default();
        let phrases = StubPhrases::default();

        let outcome = handle_issue_event(
            &event(IssueAction::Edited, "plain", "<artifactId>azure-core</artifactId>"),
            &host,
            &phrases,
            &catalog(),
        )
        .await
        .unwrap();

        assert_eq!(outcome.labels, ["azure-core"]);
    }

    #[tokio::test]
    async fn no_labels_means_no_label_call() {
        let host = RecordingHost::default();
        let phrases = StubPhrases::default();

        let outcome = handle_issue_event(
            &event(IssueAction::Opened, "plain", "short"),
            &host,
            &phrases,
            &catalog(),
        )
        .await
        .unwrap();

        assert!(outcome.labels.is_empty());
        assert!(host.label_calls().is_empty());
    }

    #[tokio::test]
    async fn key_phrase_rule_fires_inside_gate() {
        let host = RecordingHost::default();
        let phrases = StubPhrases::with(&["Resource Manager client"]);

        let outcome = handle_issue_event(
            &event(IssueAction::Opened, "plain", &mid_sized_body()),
            &host,
            &phrases,
            &catalog(),
        )
        .await
        .unwrap();

        assert_eq!(phrases.calls(), 1);
        assert_eq!(outcome.labels, ["mgmt"]);
    }

    #[tokio::test]
    async fn key_phrase_gate_boundaries() {
        for (len, expected_calls) in [(100, 0), (101, 1), (5119, 1), (5120, 0)] {
            let host = RecordingHost::default();
            let phrases = StubPhrases::with(&[]);

            handle_issue_event(
                &event(IssueAction::Opened, "plain", &"x".repeat(len)),
                &host,
                &phrases,
                &catalog(),
            )
            .await
            .unwrap();

            assert_eq!(phrases.calls(), expected_calls, "body length {len}");
        }
    }

    #[tokio::test]
    async fn key_phrase_rule_never_fires_on_edited() {
        let host = RecordingHost::default();
        let phrases = StubPhrases::with(&["storage management"]);

        let outcome = handle_issue_event(
            &event(IssueAction::Edited, "plain", &mid_sized_body()),
            &host,
            &phrases,
            &catalog(),
        )
        .await
        .unwrap();

        assert_eq!(phrases.calls(), 0);
        assert!(outcome.labels.is_empty());
    }

    #[tokio::test]
    async fn key_phrase_mgmt_label_dedups_with_body_rule() {
        let host = RecordingHost::default();
        let phrases = StubPhrases::with(&["storage management"]);

        let mut body = String::from("Library used: azure-resourcemanager-storage\n");
        body.push_str(&mid_sized_body());

        let outcome = handle_issue_event(
            &event(IssueAction::Opened, "plain", &body),
            &host,
            &phrases,
            &catalog(),
        )
        .await
        .unwrap();

        assert_eq!(outcome.labels, ["mgmt-storage", "mgmt"]);
    }

    #[tokio::test]
    async fn query_title_recommends_samples() {
        let host = RecordingHost::default();
        let phrases = StubPhrases::with(&["storage account"]);

        let outcome = handle_issue_event(
            &event(
                IssueAction::Opened,
                "[Query] how to create a storage account",
                "short",
            ),
            &host,
            &phrases,
            &catalog(),
        )
        .await
        .unwrap();

        assert_eq!(outcome.samples_recommended.len(), 1);
        let comments = host.comments();
        assert_eq!(comments.len(), 2);
        assert!(comments[1].contains("Create a storage account"));
        assert!(comments[1].contains("]("));
    }

    #[tokio::test]
    async fn query_rule_never_fires_on_edited() {
        let host = RecordingHost::default();
        let phrases = StubPhrases::with(&["storage account"]);

        let outcome = handle_issue_event(
            &event(
                IssueAction::Edited,
                "[query] how to create a storage account",
                "short",
            ),
            &host,
            &phrases,
            &catalog(),
        )
        .await
        .unwrap();

        assert!(outcome.samples_recommended.is_empty());
        assert!(host.comments().is_empty());
        assert_eq!(phrases.calls(), 0);
    }

    #[tokio::test]
    async fn query_without_matches_posts_no_comment() {
        let host = RecordingHost::default();
        let phrases = StubPhrases::with(&["kubernetes operator"]);

        let outcome = handle_issue_event(
            &event(IssueAction::Opened, "[query] unrelated topic", "short"),
            &host,
            &phrases,
            &catalog(),
        )
        .await
        .unwrap();

        assert!(outcome.samples_recommended.is_empty());
        // Greeting only.
        assert_eq!(host.comments().len(), 1);
    }

    #[test]
    fn query_text_is_everything_after_the_marker() {
        assert_eq!(
            query_from_title("[Query] how to create a storage account"),
            Some("how to create a storage account")
        );
        assert_eq!(query_from_title("no marker here"), None);
        assert_eq!(query_from_title("[query]"), Some(""));
    }

    #[test]
    fn gate_counts_characters_not_bytes() {
        // 101 multi-byte characters pass the gate.
        let body = "é".repeat(101);
        assert!(in_key_phrase_range(&body));
        let body = "é".repeat(100);
        assert!(!in_key_phrase_range(&body));
    }
}
