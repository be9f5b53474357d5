//! Version history handlers.

use axum::Json;
use axum::extract::{Path, Query, State};

use memobank_core::error::AppError;
use memobank_entity::version::FileVersion;

use crate::error::ApiError;
use crate::dto::request::{CleanupRequest, CompareQuery};
use crate::dto::response::{
    ApiResponse, CleanupResponse, ComparisonResponse, RevertResponse, VersionListResponse,
    VersionSummary,
};
use crate::extractors::{ValidatedJson, parse_version_number, require_name};
use crate::state::AppState;

/// GET /api/projects/{project}/files/{file}/versions
pub async fn list_versions(
    State(state): State<AppState>,
    Path((project, file)): Path<(String, String)>,
) -> Result<Json<ApiResponse<VersionListResponse>>, ApiError> {
    require_name("Project", &project)?;
    require_name("File", &file)?;

    let versions: Vec<VersionSummary> = state
        .version_service
        .get_file_versions(&project, &file)
        .await?
        .into_iter()
        .map(VersionSummary::from)
        .collect();

    Ok(Json(ApiResponse::ok(VersionListResponse {
        project_name: project,
        file_name: file,
        total_versions: versions.len(),
        versions,
    })))
}

/// GET /api/projects/{project}/files/{file}/versions/{version}
pub async fn get_version(
    State(state): State<AppState>,
    Path((project, file, version)): Path<(String, String, String)>,
) -> Result<Json<ApiResponse<FileVersion>>, ApiError> {
    require_name("Project", &project)?;
    require_name("File", &file)?;
    let version = parse_version_number(&version)?;

    let found = state
        .version_service
        .get_file_version(&project, &file, version)
        .await?
        .ok_or_else(|| {
            AppError::not_found(format!("Version {version} of '{file}' not found"))
        })?;
    Ok(Json(ApiResponse::ok(found)))
}

/// GET /api/projects/{project}/files/{file}/compare?version1=..&version2=..
pub async fn compare_versions(
    State(state): State<AppState>,
    Path((project, file)): Path<(String, String)>,
    Query(query): Query<CompareQuery>,
) -> Result<Json<ApiResponse<ComparisonResponse>>, ApiError> {
    require_name("Project", &project)?;
    require_name("File", &file)?;
    let version1 = parse_version_number(&query.version1)?;
    let version2 = parse_version_number(&query.version2)?;

    let comparison = state
        .version_service
        .compare_file_versions(&project, &file, version1, version2)
        .await?
        .ok_or_else(|| {
            AppError::not_found(format!(
                "Cannot compare versions {version1} and {version2} of '{file}': one or both do not exist"
            ))
        })?;

    Ok(Json(ApiResponse::ok(ComparisonResponse::new(
        version1, version2, comparison,
    ))))
}

/// POST /api/projects/{project}/files/{file}/versions/{version}/revert
pub async fn revert_version(
    State(state): State<AppState>,
    Path((project, file, version)): Path<(String, String, String)>,
) -> Result<Json<ApiResponse<RevertResponse>>, ApiError> {
    require_name("Project", &project)?;
    require_name("File", &file)?;
    let version = parse_version_number(&version)?;

    let created = state
        .version_service
        .revert_to_version(&project, &file, version)
        .await?
        .ok_or_else(|| {
            AppError::not_found(format!(
                "Cannot revert '{file}' to version {version}: version or file does not exist"
            ))
        })?;

    Ok(Json(ApiResponse::ok(RevertResponse {
        reverted_to_version: version,
        new_version: created.version,
    })))
}

/// POST /api/projects/{project}/versions/cleanup
pub async fn cleanup_versions(
    State(state): State<AppState>,
    Path(project): Path<String>,
    body: Option<ValidatedJson<CleanupRequest>>,
) -> Result<Json<ApiResponse<CleanupResponse>>, ApiError> {
    require_name("Project", &project)?;
    let ValidatedJson(req) = body.unwrap_or_else(|| ValidatedJson(CleanupRequest::default()));

    let deleted = state
        .version_service
        .cleanup_old_versions(&project, req.max_versions_per_file)
        .await?;
    let config = state.version_service.retention_config(req.max_versions_per_file);

    Ok(Json(ApiResponse::ok(CleanupResponse {
        project_name: project,
        deleted_versions: deleted,
        max_versions_per_file: config.max_versions_per_file,
    })))
}
