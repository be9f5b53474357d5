//! File version entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::file::{File, FileMetadata};

/// An immutable snapshot of a file's full content.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileVersion {
    /// Unique version identifier.
    pub id: Uuid,
    /// The file this version was taken from. Not a cascading foreign key.
    pub file_id: Uuid,
    /// Denormalized project name.
    pub project_name: String,
    /// Denormalized file name.
    pub file_name: String,
    /// Full text, not a delta.
    pub content: String,
    /// Sequential version number, 1-based, unique per `(project, file)`.
    pub version: i32,
    /// SHA-256 checksum. Informational only, not unique.
    pub checksum: String,
    /// Size in bytes.
    pub size: i64,
    /// When this version was created.
    pub created_at: DateTime<Utc>,
    /// Optional descriptive metadata.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<VersionMetadata>,
}

/// Descriptive metadata attached to a version.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionMetadata {
    /// Content metadata captured at snapshot time.
    #[serde(flatten)]
    pub content: FileMetadata,
    /// What changed in this version.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub change_description: Option<String>,
    /// Whether the system, not a person, triggered the save.
    #[serde(default)]
    pub is_auto_save: bool,
}

/// A version record before the store assigns its id.
#[derive(Debug, Clone)]
pub struct NewFileVersion {
    /// The file this version was taken from.
    pub file_id: Uuid,
    /// Owning project.
    pub project_name: String,
    /// File name within the project.
    pub file_name: String,
    /// Full text content.
    pub content: String,
    /// Version number computed by the caller.
    pub version: i32,
    /// SHA-256 checksum of `content`.
    pub checksum: String,
    /// Size in bytes.
    pub size: i64,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Optional metadata.
    pub metadata: Option<VersionMetadata>,
}

impl NewFileVersion {
    /// Snapshot the current state of `file` as version `version`.
    pub fn snapshot(
        file: &File,
        version: i32,
        change_description: Option<String>,
        is_auto_save: bool,
    ) -> Self {
        Self {
            file_id: file.id,
            project_name: file.project_name.clone(),
            file_name: file.name.clone(),
            content: file.content.clone(),
            version,
            checksum: file.checksum.clone(),
            size: file.size,
            created_at: Utc::now(),
            metadata: Some(VersionMetadata {
                content: file.metadata.clone(),
                change_description,
                is_auto_save,
            }),
        }
    }

    /// Attach a freshly generated id.
    pub fn into_version(self) -> FileVersion {
        self.into_version_with_id(Uuid::new_v4())
    }

    /// Attach an existing id.
    pub fn into_version_with_id(self, id: Uuid) -> FileVersion {
        FileVersion {
            id,
            file_id: self.file_id,
            project_name: self.project_name,
            file_name: self.file_name,
            content: self.content,
            version: self.version,
            checksum: self.checksum,
            size: self.size,
            created_at: self.created_at,
            metadata: self.metadata,
        }
    }
}
