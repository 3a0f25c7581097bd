// SPDX-License-Identifier: Apache-2.0

//! Rule-based label classification.
//!
//! Maps free-text issue content to the controlled label vocabulary:
//! static title markers, a library-identifier dictionary applied line by
//! line over the body, and the `mgmt-*` → `mgmt` implication.

pub mod extract;

pub use extract::extract_library_identifier;

/// Maximum number of body lines scanned for library markers.
///
/// Lines past this bound are ignored; issue templates put the library
/// information near the top, and runaway pasted logs should not be scanned.
pub const MAX_BODY_LINES: usize = 256;

/// Label applied when the title carries the `[feature request]` marker.
pub const LABEL_FEATURE_REQUEST: &str = "feature-request";

/// Label applied when the title carries the `[bug]` marker.
pub const LABEL_BUG: &str = "bug";

/// Generic management-plane label implied by any `mgmt-*` label.
pub const LABEL_MGMT: &str = "mgmt";

/// Fixed library-identifier → label dictionary. Case-sensitive exact match.
const LIBRARY_LABELS: &[(&str, &str)] = &[
    ("azure-core", "azure-core"),
    ("azure-resourcemanager-resources", "mgmt-resources"),
    ("azure-resourcemanager-storage", "mgmt-storage"),
    ("azure-resourcemanager-compute", "mgmt-compute"),
    ("azure-resourcemanager-network", "mgmt-network"),
];

/// Looks up the label for a library identifier.
#[must_use]
pub fn map_identifier_to_label(id: &str) -> Option<&'static str> {
    LIBRARY_LABELS
        .iter()
        .find(|(key, _)| *key == id)
        .map(|(_, label)| *label)
}

/// Ordered, duplicate-free accumulation of labels for one event.
///
/// Order reflects discovery order; the GitHub API treats the final set as
/// unordered. Dedup is a linear scan, which is fine at this scale (the
/// vocabulary holds fewer than ten labels).
#[derive(Debug, Default, Clone)]
pub struct LabelSet {
    labels: Vec<String>,
}

impl LabelSet {
    /// Creates an empty label set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a label unless it is already present.
    pub fn push(&mut self, label: impl Into<String>) {
        let label = label.into();
        if !self.labels.iter().any(|l| *l == label) {
            self.labels.push(label);
        }
    }

    /// Appends every label from `iter`, deduplicating.
    pub fn extend<I, S>(&mut self, iter: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for label in iter {
            self.push(label);
        }
    }

    /// Appends the generic `mgmt` label when any `mgmt-*` label is present.
    pub fn expand_implied(&mut self) {
        if self.labels.iter().any(|l| l.starts_with("mgmt-")) {
            self.push(LABEL_MGMT);
        }
    }

    /// Whether no label has been accumulated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// The accumulated labels, in discovery order.
    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.labels
    }

    /// Consumes the set, yielding the labels in discovery order.
    #[must_use]
    pub fn into_vec(self) -> Vec<String> {
        self.labels
    }
}

/// Derives the title-marker label, if any.
///
/// `[feature request]` wins over `[bug]`; the two are mutually exclusive.
/// Matching is case-insensitive.
#[must_use]
pub fn label_from_title(title: &str) -> Option<&'static str> {
    let title = title.to_lowercase();
    if title.contains("[feature request]") {
        Some(LABEL_FEATURE_REQUEST)
    } else if title.contains("[bug]") {
        Some(LABEL_BUG)
    } else {
        None
    }
}

/// Scans the issue body for library markers and maps them to labels.
///
/// Only the first [`MAX_BODY_LINES`] lines are considered. The returned
/// labels are deduplicated and in discovery order; the `mgmt` implication
/// is NOT applied here (see [`LabelSet::expand_implied`]).
#[must_use]
pub fn labels_from_body(body: &str) -> Vec<String> {
    let mut set = LabelSet::new();
    for line in body.lines().take(MAX_BODY_LINES) {
        if let Some(id) = extract_library_identifier(line)
            && let Some(label) = map_identifier_to_label(&id)
        {
            set.push(label);
        }
    }
    set.into_vec()
}
