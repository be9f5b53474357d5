//! File entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::metadata::FileMetadata;

/// A named document stored inside a project. This is the live content;
/// its history lives in [`FileVersion`](crate::version::FileVersion) records.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct File {
    /// Unique file identifier.
    pub id: Uuid,
    /// The file name, unique within its project.
    pub name: String,
    /// Current full text content.
    pub content: String,
    /// Owning project.
    pub project_name: String,
    /// When the file was first written.
    pub created_at: DateTime<Utc>,
    /// When the content was last replaced.
    pub updated_at: DateTime<Utc>,
    /// UTF-8 byte length of `content`.
    pub size: i64,
    /// SHA-256 of `content`, lowercase hex.
    pub checksum: String,
    /// Metadata derived from the content at write time.
    pub metadata: FileMetadata,
}

impl File {
    /// Build a fresh file record for `content`, deriving size, checksum
    /// and metadata.
    pub fn new(project_name: &str, name: &str, content: &str) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
            content: content.to_string(),
            project_name: project_name.to_string(),
            created_at: now,
            updated_at: now,
            size: content.len() as i64,
            checksum: super::metadata::content_checksum(content),
            metadata: FileMetadata::derive(content, name),
        }
    }

    /// Replace the content in place, refreshing every derived field.
    pub fn replace_content(&mut self, content: &str) {
        self.content = content.to_string();
        self.updated_at = Utc::now();
        self.size = content.len() as i64;
        self.checksum = super::metadata::content_checksum(content);
        self.metadata = FileMetadata::derive(content, &self.name);
    }

    /// Get the file extension (lowercase), if any.
    pub fn extension(&self) -> Option<String> {
        self.name
            .rsplit('.')
            .next()
            .filter(|ext| *ext != self.name)
            .map(|ext| ext.to_lowercase())
    }
}
