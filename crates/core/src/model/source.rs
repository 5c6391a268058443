use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SourceIdError {
    #[error("source id must not be empty")]
    Empty,
    #[error("path has no usable file stem: {0}")]
    NoFileStem(String),
}

/// Identifier of a quiz source: the corpus file's base name without extension.
///
/// The identifier doubles as the expected answer for a round.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SourceId(String);

impl SourceId {
    /// Build an identifier from raw text.
    ///
    /// # Errors
    ///
    /// Returns `SourceIdError::Empty` if the trimmed text is empty.
    pub fn new(raw: impl Into<String>) -> Result<Self, SourceIdError> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(SourceIdError::Empty);
        }
        if trimmed.len() == raw.len() {
            Ok(Self(raw))
        } else {
            Ok(Self(trimmed.to_owned()))
        }
    }

    /// Derive the identifier from a file path (`songs/Hello.txt` -> `Hello`).
    ///
    /// # Errors
    ///
    /// Returns `SourceIdError::NoFileStem` when the path has no stem.
    pub fn from_path(path: &Path) -> Result<Self, SourceIdError> {
        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| SourceIdError::NoFileStem(path.display().to_string()))?;
        Self::new(stem)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for SourceId {
    type Error = SourceIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<SourceId> for String {
    fn from(value: SourceId) -> Self {
        value.0
    }
}

impl fmt::Debug for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SourceId({:?})", self.0)
    }
}

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_blank_ids() {
        assert_eq!(SourceId::new("   ").unwrap_err(), SourceIdError::Empty);
        assert_eq!(SourceId::new(" Lemon ").unwrap().as_str(), "Lemon");
    }

    #[test]
    fn derives_id_from_file_stem() {
        let id = SourceId::from_path(Path::new("songs/Pretender.txt")).unwrap();
        assert_eq!(id.as_str(), "Pretender");

        let dotted = SourceId::from_path(Path::new("songs/Mr.Children.txt")).unwrap();
        assert_eq!(dotted.as_str(), "Mr.Children");
    }
}
