//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Body of `PUT /api/projects/{project}/files/{file}`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct WriteFileRequest {
    /// New full content.
    pub content: String,
    /// What changed, recorded on the version.
    #[validate(length(max = 1000, message = "Change description is too long"))]
    pub change_description: Option<String>,
    /// Whether the save was triggered by a client autosave.
    #[serde(default)]
    pub is_auto_save: bool,
}

/// Query string of the compare endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompareQuery {
    /// First (base) version number.
    pub version1: String,
    /// Second version number.
    pub version2: String,
}

/// Body of `POST /api/projects/{project}/versions/cleanup`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CleanupRequest {
    /// Keep this many newest versions per file. Falls back to the
    /// configured default when absent.
    #[validate(range(min = 1, message = "maxVersionsPerFile must be at least 1"))]
    pub max_versions_per_file: Option<u32>,
}
