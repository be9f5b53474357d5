//! Integration tests for version history endpoints.

use axum::http::StatusCode;
use serde_json::json;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_list_versions_newest_first_without_content() {
    let app = TestApp::new().await;
    app.write("notes", "a.md", "one").await;
    app.write("notes", "a.md", "one two").await;

    let response = app
        .request("GET", "/api/projects/notes/files/a.md/versions", None)
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let data = &response.body["data"];
    assert_eq!(data["projectName"], "notes");
    assert_eq!(data["fileName"], "a.md");
    assert_eq!(data["totalVersions"], 2);
    assert_eq!(data["versions"][0]["version"], 2);
    assert_eq!(data["versions"][1]["version"], 1);
    assert!(data["versions"][0].get("content").is_none());
    assert_eq!(data["versions"][0]["metadata"]["isAutoSave"], false);
}

#[tokio::test]
async fn test_get_version_returns_full_record() {
    let app = TestApp::new().await;
    app.write("notes", "a.md", "first").await;
    app.write("notes", "a.md", "second").await;

    let response = app
        .request("GET", "/api/projects/notes/files/a.md/versions/1", None)
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["version"], 1);
    assert_eq!(response.body["data"]["content"], "first");
}

#[tokio::test]
async fn test_get_version_rejects_bad_numbers() {
    let app = TestApp::new().await;
    app.write("notes", "a.md", "first").await;

    let zero = app
        .request("GET", "/api/projects/notes/files/a.md/versions/0", None)
        .await;
    assert_eq!(zero.status, StatusCode::BAD_REQUEST);

    let text = app
        .request("GET", "/api/projects/notes/files/a.md/versions/latest", None)
        .await;
    assert_eq!(text.status, StatusCode::BAD_REQUEST);

    let missing = app
        .request("GET", "/api/projects/notes/files/a.md/versions/9", None)
        .await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_compare_versions_reports_line_differences() {
    let app = TestApp::new().await;
    app.write("notes", "a.md", "a\nb").await;
    app.write("notes", "a.md", "a\nc\nd").await;

    let response = app
        .request(
            "GET",
            "/api/projects/notes/files/a.md/compare?version1=1&version2=2",
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let data = &response.body["data"];
    assert_eq!(data["version1Content"], "a\nb");
    assert_eq!(data["version2Content"], "a\nc\nd");
    assert_eq!(data["differencesCount"], 2);
    assert_eq!(
        data["differences"],
        json!([
            { "type": "modification", "line": 2, "content": "From: \"b\" To: \"c\"" },
            { "type": "addition", "line": 3, "content": "d" },
        ])
    );
}

#[tokio::test]
async fn test_compare_with_missing_version_is_not_found() {
    let app = TestApp::new().await;
    app.write("notes", "a.md", "a").await;

    let response = app
        .request(
            "GET",
            "/api/projects/notes/files/a.md/compare?version1=1&version2=5",
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_revert_appends_a_new_version() {
    let app = TestApp::new().await;
    app.write("notes", "a.md", "original").await;
    app.write("notes", "a.md", "edited").await;

    let response = app
        .request("POST", "/api/projects/notes/files/a.md/versions/1/revert", None)
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["revertedToVersion"], 1);
    assert_eq!(response.body["data"]["newVersion"], 3);

    let file = app.request("GET", "/api/projects/notes/files/a.md", None).await;
    assert_eq!(file.body["data"]["content"], "original");

    let latest = app
        .request("GET", "/api/projects/notes/files/a.md/versions/3", None)
        .await;
    assert_eq!(
        latest.body["data"]["metadata"]["changeDescription"],
        "Reverted to version 1"
    );
}

#[tokio::test]
async fn test_revert_to_missing_version_is_not_found() {
    let app = TestApp::new().await;
    app.write("notes", "a.md", "original").await;

    let response = app
        .request("POST", "/api/projects/notes/files/a.md/versions/4/revert", None)
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_cleanup_with_explicit_limit() {
    let app = TestApp::new().await;
    for i in 0..5 {
        app.write("notes", "a.md", &format!("rev {i}")).await;
    }
    app.write("notes", "b.md", "only").await;

    let response = app
        .request(
            "POST",
            "/api/projects/notes/versions/cleanup",
            Some(json!({ "maxVersionsPerFile": 2 })),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["projectName"], "notes");
    assert_eq!(response.body["data"]["deletedVersions"], 3);
    assert_eq!(response.body["data"]["maxVersionsPerFile"], 2);

    let versions = app
        .request("GET", "/api/projects/notes/files/a.md/versions", None)
        .await;
    assert_eq!(versions.body["data"]["totalVersions"], 2);
    assert_eq!(versions.body["data"]["versions"][0]["version"], 5);
    assert_eq!(versions.body["data"]["versions"][1]["version"], 4);
}

#[tokio::test]
async fn test_cleanup_without_body_uses_configured_limit() {
    let mut config = TestApp::test_config();
    config.versioning.max_versions_per_file = 3;
    let app = TestApp::with_config(config).await;
    for i in 0..4 {
        app.write("notes", "a.md", &format!("rev {i}")).await;
    }

    let response = app
        .request("POST", "/api/projects/notes/versions/cleanup", None)
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["deletedVersions"], 1);
    assert_eq!(response.body["data"]["maxVersionsPerFile"], 3);
}

#[tokio::test]
async fn test_cleanup_rejects_zero_limit() {
    let app = TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/api/projects/notes/versions/cleanup",
            Some(json!({ "maxVersionsPerFile": 0 })),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
}
