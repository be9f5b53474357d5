//! Project and file handlers.

use axum::Json;
use axum::extract::{Path, State};

use memobank_core::error::AppError;
use memobank_entity::file::File;
use memobank_service::{ProjectDeletion, SaveOptions, SavedFile};

use crate::error::ApiError;
use crate::dto::request::WriteFileRequest;
use crate::dto::response::{
    ApiResponse, DeletedResponse, FileListResponse, FileSummary, ProjectListResponse,
};
use crate::extractors::{ValidatedJson, require_name};
use crate::state::AppState;

/// GET /api/projects
pub async fn list_projects(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<ProjectListResponse>>, ApiError> {
    let projects = state.file_service.list_projects().await?;
    Ok(Json(ApiResponse::ok(ProjectListResponse {
        total: projects.len(),
        projects,
    })))
}

/// DELETE /api/projects/{project}
pub async fn delete_project(
    State(state): State<AppState>,
    Path(project): Path<String>,
) -> Result<Json<ApiResponse<ProjectDeletion>>, ApiError> {
    require_name("Project", &project)?;
    let outcome = state.file_service.delete_project(&project).await?;
    Ok(Json(ApiResponse::ok(outcome)))
}

/// GET /api/projects/{project}/files
pub async fn list_files(
    State(state): State<AppState>,
    Path(project): Path<String>,
) -> Result<Json<ApiResponse<FileListResponse>>, ApiError> {
    require_name("Project", &project)?;
    let files: Vec<FileSummary> = state
        .file_service
        .list_files(&project)
        .await?
        .into_iter()
        .map(FileSummary::from)
        .collect();

    Ok(Json(ApiResponse::ok(FileListResponse {
        project_name: project,
        total: files.len(),
        files,
    })))
}

/// GET /api/projects/{project}/files/{file}
pub async fn get_file(
    State(state): State<AppState>,
    Path((project, file)): Path<(String, String)>,
) -> Result<Json<ApiResponse<File>>, ApiError> {
    require_name("Project", &project)?;
    require_name("File", &file)?;

    let found = state
        .file_service
        .get_file(&project, &file)
        .await?
        .ok_or_else(|| AppError::not_found(format!("File '{file}' not found in project '{project}'")))?;
    Ok(Json(ApiResponse::ok(found)))
}

/// PUT /api/projects/{project}/files/{file}
pub async fn write_file(
    State(state): State<AppState>,
    Path((project, file)): Path<(String, String)>,
    ValidatedJson(req): ValidatedJson<WriteFileRequest>,
) -> Result<Json<ApiResponse<SavedFile>>, ApiError> {
    require_name("Project", &project)?;
    require_name("File", &file)?;

    let options = SaveOptions {
        change_description: req.change_description,
        is_auto_save: req.is_auto_save,
    };
    let saved = state
        .file_service
        .write_file(&project, &file, &req.content, options)
        .await?;
    Ok(Json(ApiResponse::ok(saved)))
}

/// DELETE /api/projects/{project}/files/{file}
pub async fn delete_file(
    State(state): State<AppState>,
    Path((project, file)): Path<(String, String)>,
) -> Result<Json<ApiResponse<DeletedResponse>>, ApiError> {
    require_name("Project", &project)?;
    require_name("File", &file)?;

    if !state.file_service.delete_file(&project, &file).await? {
        return Err(AppError::not_found(format!(
            "File '{file}' not found in project '{project}'"
        ))
        .into());
    }
    Ok(Json(ApiResponse::ok(DeletedResponse { deleted: true })))
}
