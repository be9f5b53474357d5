//! File metadata value object.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

const MAX_KEYWORDS: usize = 20;
const SUMMARY_LINES: usize = 3;
const SUMMARY_CHARS: usize = 200;

/// Metadata derived from a file's content every time it is written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileMetadata {
    /// Text encoding, always `utf-8` for stored content.
    #[serde(default = "default_encoding")]
    pub encoding: String,
    /// `text/markdown` for `.md` files, `text/plain` otherwise.
    #[serde(default = "default_mime_type")]
    pub mime_type: String,
    /// Caller supplied tags.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    /// Number of whitespace separated words.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub word_count: Option<u64>,
    /// Number of newline separated lines.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_count: Option<u64>,
    /// Distinct lower-cased alphabetic words longer than four characters.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,
    /// The first non-blank lines, joined and truncated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

impl Default for FileMetadata {
    fn default() -> Self {
        Self {
            encoding: default_encoding(),
            mime_type: default_mime_type(),
            tags: Vec::new(),
            word_count: None,
            line_count: None,
            keywords: Vec::new(),
            summary: None,
        }
    }
}

impl FileMetadata {
    /// Derive metadata for `content` stored under `file_name`.
    pub fn derive(content: &str, file_name: &str) -> Self {
        let words: Vec<&str> = content.split_whitespace().collect();

        let mut seen = HashSet::new();
        let keywords = words
            .iter()
            .filter(|w| w.len() > 4 && w.chars().all(|c| c.is_ascii_alphabetic()))
            .map(|w| w.to_lowercase())
            .filter(|w| seen.insert(w.clone()))
            .take(MAX_KEYWORDS)
            .collect();

        let summary: String = content
            .split('\n')
            .filter(|line| !line.trim().is_empty())
            .take(SUMMARY_LINES)
            .collect::<Vec<_>>()
            .join(" ")
            .chars()
            .take(SUMMARY_CHARS)
            .collect();

        let mime_type = if file_name.ends_with(".md") {
            "text/markdown"
        } else {
            "text/plain"
        };

        Self {
            encoding: default_encoding(),
            mime_type: mime_type.to_string(),
            tags: Vec::new(),
            word_count: Some(words.len() as u64),
            line_count: Some(content.split('\n').count() as u64),
            keywords,
            summary: (!summary.is_empty()).then_some(summary),
        }
    }
}

/// SHA-256 of `content`, lowercase hex.
pub fn content_checksum(content: &str) -> String {
    format!("{:x}", Sha256::digest(content.as_bytes()))
}

fn default_encoding() -> String {
    "utf-8".to_string()
}

fn default_mime_type() -> String {
    "text/plain".to_string()
}
