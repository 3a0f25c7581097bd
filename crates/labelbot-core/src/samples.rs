// SPDX-License-Identifier: Apache-2.0

//! Code-sample catalog and phrase-based recommendation.
//!
//! A static list of (url, description) sample records is bundled with the
//! crate and parsed once at startup. The catalog is constructed explicitly
//! and passed by reference into the recommender, so initialization order is
//! visible and testable instead of hiding behind a lazy process-wide
//! singleton.

use anyhow::Result;
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::keyphrase::PhraseProvider;

/// Bundled catalog data, embedded at compile time.
const CATALOG_DATA: &str = include_str!("../data/samples.json");

/// Base URL each catalog `filePath` is resolved against.
const SAMPLE_BASE_URL: &str = "https://github.com/Azure/azure-sdk-for-java/blob/main/sdk/resourcemanager/azure-resourcemanager-samples/src/main/java/com/azure/resourcemanager/";

/// Marker in an issue title that requests sample recommendations.
pub const QUERY_MARKER: &str = "[query]";

/// One raw catalog entry as stored in the data file.
#[derive(Debug, Deserialize)]
struct CatalogEntry {
    #[serde(rename = "filePath")]
    file_path: String,
    description: String,
}

/// The catalog file groups entries under named collections.
#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(rename = "javaSamples")]
    java_samples: Vec<CatalogEntry>,
}

/// A published code sample.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sample {
    /// Public URL of the sample source.
    pub url: String,
    /// One-line description, matched against key phrases.
    pub description: String,
}

/// The loaded sample catalog, read-only after construction.
#[derive(Debug)]
pub struct SampleCatalog {
    samples: Vec<Sample>,
}

impl SampleCatalog {
    /// Parses the bundled catalog data.
    ///
    /// # Errors
    ///
    /// Returns an error if the bundled data file does not parse.
    pub fn load() -> Result<Self> {
        Self::from_json(CATALOG_DATA)
    }

    /// Parses catalog data from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if the data does not match the catalog schema.
    pub fn from_json(data: &str) -> Result<Self> {
        let file: CatalogFile =
            serde_json::from_str(data).map_err(|e| crate::LabelbotError::Catalog {
                message: e.to_string(),
            })?;

        let samples = file
            .java_samples
            .into_iter()
            .map(|entry| Sample {
                url: format!("{SAMPLE_BASE_URL}{}", entry.file_path),
                description: entry.description,
            })
            .collect();

        Ok(Self { samples })
    }

    /// Number of samples in the catalog.
    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Matches phrases against sample descriptions.
    ///
    /// A sample matches a phrase when its description contains the phrase,
    /// case-insensitively. Each sample is included at most once, on its
    /// first matching phrase; output order is catalog order.
    #[must_use]
    pub fn match_phrases(&self, phrases: &[String]) -> Vec<&Sample> {
        let phrases: Vec<String> = phrases.iter().map(|p| p.to_lowercase()).collect();
        self.samples
            .iter()
            .filter(|sample| {
                let description = sample.description.to_lowercase();
                phrases.iter().any(|phrase| description.contains(phrase))
            })
            .collect()
    }
}

/// Recommends samples for a free-text query.
///
/// Extracts key phrases from the query (no length gate applies here) and
/// matches them against the catalog. An unavailable extraction yields no
/// recommendations.
#[instrument(skip(provider, catalog), fields(query_len = query.len()))]
pub async fn recommend_samples<'a>(
    query: &str,
    provider: &dyn PhraseProvider,
    catalog: &'a SampleCatalog,
) -> Vec<&'a Sample> {
    let extraction = provider.key_phrases(query).await;
    let matched = catalog.match_phrases(extraction.phrases());
    debug!(
        phrases = extraction.phrases().len(),
        matched = matched.len(),
        "Matched samples for query"
    );
    matched
}
