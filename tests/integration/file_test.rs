//! Integration tests for project and file operations.

use axum::http::StatusCode;
use serde_json::json;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_health_reports_connected_database() {
    let app = TestApp::new().await;

    let response = app.request("GET", "/api/health", None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["success"], true);
    assert_eq!(response.body["data"]["status"], "ok");
    assert_eq!(response.body["data"]["database"], "connected");
}

#[tokio::test]
async fn test_write_creates_file_and_first_version() {
    let app = TestApp::new().await;

    let response = app
        .request(
            "PUT",
            "/api/projects/notes/files/todo.md",
            Some(json!({ "content": "# Todo\nbuy milk", "changeDescription": "initial" })),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let data = &response.body["data"];
    assert_eq!(data["version"], 1);
    assert_eq!(data["file"]["name"], "todo.md");
    assert_eq!(data["file"]["projectName"], "notes");
    assert_eq!(data["file"]["size"], 15);

    let fetched = app.request("GET", "/api/projects/notes/files/todo.md", None).await;
    assert_eq!(fetched.status, StatusCode::OK);
    assert_eq!(fetched.body["data"]["content"], "# Todo\nbuy milk");
}

#[tokio::test]
async fn test_every_write_appends_a_version() {
    let app = TestApp::new().await;

    assert_eq!(app.write("notes", "a.md", "one").await, 1);
    assert_eq!(app.write("notes", "a.md", "two").await, 2);
    assert_eq!(app.write("notes", "a.md", "three").await, 3);

    let fetched = app.request("GET", "/api/projects/notes/files/a.md", None).await;
    assert_eq!(fetched.body["data"]["content"], "three");
}

#[tokio::test]
async fn test_list_projects_and_files() {
    let app = TestApp::new().await;
    app.write("beta", "x.md", "x").await;
    app.write("alpha", "b.md", "b").await;
    app.write("alpha", "a.md", "a").await;

    let projects = app.request("GET", "/api/projects", None).await;
    assert_eq!(projects.status, StatusCode::OK);
    assert_eq!(projects.body["data"]["projects"], json!(["alpha", "beta"]));
    assert_eq!(projects.body["data"]["total"], 2);

    let files = app.request("GET", "/api/projects/alpha/files", None).await;
    assert_eq!(files.status, StatusCode::OK);
    assert_eq!(files.body["data"]["projectName"], "alpha");
    assert_eq!(files.body["data"]["total"], 2);
    assert_eq!(files.body["data"]["files"][0]["name"], "a.md");
    assert!(files.body["data"]["files"][0].get("content").is_none());
}

#[tokio::test]
async fn test_get_missing_file_is_not_found() {
    let app = TestApp::new().await;

    let response = app.request("GET", "/api/projects/notes/files/nope.md", None).await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["error"], "NOT_FOUND");
}

#[tokio::test]
async fn test_write_without_content_is_rejected() {
    let app = TestApp::new().await;

    let response = app
        .request(
            "PUT",
            "/api/projects/notes/files/a.md",
            Some(json!({ "isAutoSave": true })),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_delete_file_removes_its_history() {
    let app = TestApp::new().await;
    app.write("notes", "a.md", "one").await;
    app.write("notes", "a.md", "two").await;

    let deleted = app.request("DELETE", "/api/projects/notes/files/a.md", None).await;
    assert_eq!(deleted.status, StatusCode::OK);
    assert_eq!(deleted.body["data"]["deleted"], true);

    let versions = app
        .request("GET", "/api/projects/notes/files/a.md/versions", None)
        .await;
    assert_eq!(versions.body["data"]["totalVersions"], 0);

    let again = app.request("DELETE", "/api/projects/notes/files/a.md", None).await;
    assert_eq!(again.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_project_removes_files_and_versions() {
    let app = TestApp::new().await;
    app.write("notes", "a.md", "a").await;
    app.write("notes", "b.md", "b").await;
    app.write("other", "c.md", "c").await;

    let response = app.request("DELETE", "/api/projects/notes", None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["filesDeleted"], 2);
    assert_eq!(response.body["data"]["versionsDeleted"], true);

    let projects = app.request("GET", "/api/projects", None).await;
    assert_eq!(projects.body["data"]["projects"], json!(["other"]));
}
