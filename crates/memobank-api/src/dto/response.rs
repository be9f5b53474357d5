//! Response DTOs.
//!
//! Field names are camelCase on the wire to match existing version-history
//! clients.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use memobank_entity::file::File;
use memobank_entity::version::{DiffEntry, FileVersion, VersionComparison};

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall status.
    pub status: String,
    /// Server version.
    pub version: String,
    /// Database status: `connected`, `unavailable` or `in-memory`.
    pub database: String,
}

/// Project listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectListResponse {
    /// Project names, sorted.
    pub projects: Vec<String>,
    /// Number of projects.
    pub total: usize,
}

/// File without its content.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileSummary {
    /// File name.
    pub name: String,
    /// Size in bytes.
    pub size: i64,
    /// SHA-256 of the content.
    pub checksum: String,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last content change.
    pub updated_at: DateTime<Utc>,
}

impl From<File> for FileSummary {
    fn from(file: File) -> Self {
        Self {
            name: file.name,
            size: file.size,
            checksum: file.checksum,
            created_at: file.created_at,
            updated_at: file.updated_at,
        }
    }
}

/// Files of one project.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileListResponse {
    /// Project name.
    pub project_name: String,
    /// Files, sorted by name.
    pub files: Vec<FileSummary>,
    /// Number of files.
    pub total: usize,
}

/// Generic deletion acknowledgement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeletedResponse {
    /// Whether something was removed.
    pub deleted: bool,
}

/// The subset of version metadata shown in listings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionSummaryMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub word_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub change_description: Option<String>,
    pub is_auto_save: bool,
}

/// One entry of a version listing, without content.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionSummary {
    pub version: i32,
    pub size: i64,
    pub checksum: String,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<VersionSummaryMetadata>,
}

impl From<FileVersion> for VersionSummary {
    fn from(version: FileVersion) -> Self {
        Self {
            version: version.version,
            size: version.size,
            checksum: version.checksum,
            created_at: version.created_at,
            metadata: version.metadata.map(|m| VersionSummaryMetadata {
                word_count: m.content.word_count,
                line_count: m.content.line_count,
                change_description: m.change_description,
                is_auto_save: m.is_auto_save,
            }),
        }
    }
}

/// Version history of one file, newest first.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionListResponse {
    pub project_name: String,
    pub file_name: String,
    pub versions: Vec<VersionSummary>,
    pub total_versions: usize,
}

/// Result of comparing two versions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonResponse {
    pub version1: i32,
    pub version2: i32,
    pub version1_content: String,
    pub version2_content: String,
    pub differences: Vec<DiffEntry>,
    pub differences_count: usize,
}

impl ComparisonResponse {
    /// Wrap a comparison of `version1` against `version2`.
    pub fn new(version1: i32, version2: i32, comparison: VersionComparison) -> Self {
        Self {
            version1,
            version2,
            differences_count: comparison.differences.len(),
            version1_content: comparison.version1_content,
            version2_content: comparison.version2_content,
            differences: comparison.differences,
        }
    }
}

/// Result of a revert.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevertResponse {
    /// The historical version whose content was restored.
    pub reverted_to_version: i32,
    /// The version the revert appended.
    pub new_version: i32,
}

/// Result of a cleanup pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CleanupResponse {
    pub project_name: String,
    pub deleted_versions: u64,
    pub max_versions_per_file: usize,
}
