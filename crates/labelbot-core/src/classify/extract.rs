// SPDX-License-Identifier: Apache-2.0

//! Library-identifier extraction from issue body lines.
//!
//! Issue templates ask reporters to state the SDK library they use, either
//! as a `Library used: <name>` line or by pasting the Maven dependency
//! block with its `<artifactId>` tag. Both markers are scanned per line;
//! the `Library used:` form wins when both are present.

/// Marker for the issue-template "Library used:" line.
pub const MARKER_LIBRARY_USED: &str = "Library used:";

/// Opening tag of a pasted Maven dependency block.
pub const MARKER_ARTIFACT_ID: &str = "<artifactId>";

/// Closing tag of a pasted Maven dependency block.
const MARKER_ARTIFACT_ID_CLOSE: &str = "</artifactId>";

/// Extracts a candidate library identifier from one line of issue body.
///
/// Rules, in priority order:
/// 1. `Library used:`: the token after the last occurrence of the marker,
///    trimmed, up to the first space. An empty token is no candidate.
/// 2. `<artifactId>`: the text between the opening tag and
///    `</artifactId>`, or to the end of the line when the closing tag is
///    absent, trimmed. Only consulted when rule 1 yielded nothing.
///
/// Returns `None` when neither marker produces a non-empty candidate.
#[must_use]
pub fn extract_library_identifier(line: &str) -> Option<String> {
    if let Some(id) = extract_after_library_used(line) {
        return Some(id);
    }
    extract_from_artifact_tag(line)
}

/// Rule 1: token after the last `Library used:` marker.
fn extract_after_library_used(line: &str) -> Option<String> {
    let pos = line.rfind(MARKER_LIBRARY_USED)? + MARKER_LIBRARY_USED.len();
    let rest = line[pos..].trim();
    let token = match rest.find(' ') {
        Some(space) => &rest[..space],
        None => rest,
    };
    let token = token.trim();
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}

/// Rule 2: text between `<artifactId>` and `</artifactId>`.
fn extract_from_artifact_tag(line: &str) -> Option<String> {
    let pos = line.find(MARKER_ARTIFACT_ID)? + MARKER_ARTIFACT_ID.len();
    let end = line[pos..]
        .find(MARKER_ARTIFACT_ID_CLOSE)
        .map_or(line.len(), |close| pos + close);
    let token = line[pos..end].trim();
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}
