use serde::{Deserialize, Serialize};

use super::document::LayoutDocument;
use super::integrity::document_issues;

pub const LAYOUT_SNAPSHOT_VERSION: u32 = 1;

/// Import/export failure. Import never mutates state on any of these.
#[derive(Debug)]
pub enum LayoutError {
    UnsupportedVersion { found: u32, expected: u32 },
    Serialize(ron::Error),
    Parse(ron::error::SpannedError),
    /// Parsed, but the document violates a structural invariant.
    Invalid(String),
}

impl std::fmt::Display for LayoutError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnsupportedVersion { found, expected } => {
                write!(
                    f,
                    "unsupported layout snapshot version: {found} (expected {expected})"
                )
            }
            Self::Serialize(err) => write!(f, "ron serialize error: {err}"),
            Self::Parse(err) => write!(f, "ron parse error: {err}"),
            Self::Invalid(msg) => write!(f, "invalid layout document: {msg}"),
        }
    }
}

impl std::error::Error for LayoutError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::UnsupportedVersion { .. } | Self::Invalid(_) => None,
            Self::Serialize(err) => Some(err),
            Self::Parse(err) => Some(err),
        }
    }
}

impl From<ron::Error> for LayoutError {
    fn from(err: ron::Error) -> Self {
        Self::Serialize(err)
    }
}

impl From<ron::error::SpannedError> for LayoutError {
    fn from(err: ron::error::SpannedError) -> Self {
        Self::Parse(err)
    }
}

/// The versioned wire form. The version is bumped on any breaking change to
/// [`LayoutDocument`]'s serialized shape.
#[derive(Clone, Debug, Serialize, Deserialize)]
struct LayoutSnapshot {
    version: u32,
    document: LayoutDocument,
}

/// Serialize a document to its stable textual form (pretty RON).
///
/// # Errors
/// Returns [`LayoutError::Serialize`] if RON serialization fails.
pub fn export_layout(doc: &LayoutDocument) -> Result<String, LayoutError> {
    let snapshot = LayoutSnapshot {
        version: LAYOUT_SNAPSHOT_VERSION,
        document: doc.clone(),
    };
    Ok(ron::ser::to_string_pretty(
        &snapshot,
        ron::ser::PrettyConfig::default(),
    )?)
}

/// Parse and validate a previously exported document.
///
/// # Errors
/// Returns [`LayoutError::Parse`] on malformed text,
/// [`LayoutError::UnsupportedVersion`] on a version mismatch and
/// [`LayoutError::Invalid`] when the parsed document violates an invariant.
pub fn import_layout(text: &str) -> Result<LayoutDocument, LayoutError> {
    let snapshot: LayoutSnapshot = ron::from_str(text)?;
    if snapshot.version != LAYOUT_SNAPSHOT_VERSION {
        return Err(LayoutError::UnsupportedVersion {
            found: snapshot.version,
            expected: LAYOUT_SNAPSHOT_VERSION,
        });
    }

    let issues = document_issues(&snapshot.document);
    if let Some(first) = issues.first() {
        return Err(LayoutError::Invalid(first.clone()));
    }
    Ok(snapshot.document)
}
