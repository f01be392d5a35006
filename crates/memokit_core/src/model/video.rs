//! Video catalog model.
//!
//! # Responsibility
//! - Define the record served by video sources and cached by the proxy.
//! - Validate external identifiers before they reach storage or caches.
//!
//! # Invariants
//! - A `VideoId` always matches `^[A-Za-z0-9_-]{1,64}$`.
//! - A valid `Video` has a non-blank title.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

static VIDEO_ID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_-]{1,64}$").expect("valid video id regex"));

/// Validated external video identifier.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct VideoId(String);

impl VideoId {
    /// Parses a raw identifier after trimming surrounding whitespace.
    pub fn parse(raw: &str) -> Result<Self, VideoValidationError> {
        let trimmed = raw.trim();
        if !VIDEO_ID_RE.is_match(trimmed) {
            return Err(VideoValidationError::InvalidId(trimmed.to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for VideoId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for VideoId {
    type Error = VideoValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<VideoId> for String {
    fn from(value: VideoId) -> Self {
        value.0
    }
}

/// Catalog record for one video.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Video {
    pub id: VideoId,
    pub title: String,
    pub channel: String,
    pub duration_secs: u32,
}

impl Video {
    pub fn new(id: VideoId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            channel: String::new(),
            duration_secs: 0,
        }
    }

    /// Validates record-level invariants before persistence.
    pub fn validate(&self) -> Result<(), VideoValidationError> {
        if self.title.trim().is_empty() {
            return Err(VideoValidationError::EmptyTitle(self.id.clone()));
        }
        Ok(())
    }
}

/// Validation failures for video identifiers and records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VideoValidationError {
    InvalidId(String),
    EmptyTitle(VideoId),
}

impl Display for VideoValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidId(value) => write!(f, "video id is invalid: `{value}`"),
            Self::EmptyTitle(id) => write!(f, "video `{id}` must have a non-empty title"),
        }
    }
}

impl Error for VideoValidationError {}

#[cfg(test)]
mod tests {
    use super::{Video, VideoId, VideoValidationError};

    #[test]
    fn parse_accepts_trimmed_ids() {
        let id = VideoId::parse("  dQw4w9WgXcQ ").expect("valid id");
        assert_eq!(id.as_str(), "dQw4w9WgXcQ");
        assert_eq!(id.to_string(), "dQw4w9WgXcQ");
    }

    #[test]
    fn parse_rejects_blank_long_or_symbolic_ids() {
        let too_long = "a".repeat(65);
        for raw in ["", "   ", "has space", "semi;colon", too_long.as_str()] {
            let err = VideoId::parse(raw).expect_err("invalid id must fail");
            assert!(matches!(err, VideoValidationError::InvalidId(_)));
        }
    }

    #[test]
    fn validate_rejects_blank_title() {
        let video = Video::new(VideoId::parse("42").unwrap(), "  ");
        assert!(matches!(
            video.validate(),
            Err(VideoValidationError::EmptyTitle(_))
        ));
    }

    #[test]
    fn serde_rejects_invalid_id() {
        let err = serde_json::from_str::<VideoId>("\"bad id\"");
        assert!(err.is_err());
        let ok: VideoId = serde_json::from_str("\"abc_1-2\"").unwrap();
        assert_eq!(ok.as_str(), "abc_1-2");
    }
}
