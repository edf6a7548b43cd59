//! Integration tests for the link endpoints.

use http::StatusCode;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_health() {
    let app = TestApp::new();
    let response = app.request("GET", "/api/health", None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["success"], true);
    assert_eq!(response.body["data"]["status"], "ok");
}

#[tokio::test]
async fn test_generate_link() {
    let app = TestApp::new();
    let data = app.generate("https://example.com/some/long/path", None).await;

    let link = data["link"].as_str().expect("link");
    assert!(link.starts_with("https://safelinkurl.wahyu-blogger.site/safelink.html?url="));
    assert_eq!(data["param_name"], "url");
    assert_eq!(data["password_protected"], false);
    assert_eq!(data["original_length"], 34);
    assert!(
        data["shortener_url"]
            .as_str()
            .expect("shortener_url")
            .starts_with("https://tinyurl.com/create.php?url=https%3A%2F%2F")
    );
}

#[tokio::test]
async fn test_generate_rejects_private_url() {
    let app = TestApp::new();
    let response = app
        .request(
            "POST",
            "/api/links",
            Some(serde_json::json!({ "url": "http://127.0.0.1/admin" })),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
    assert_eq!(
        response.body["message"],
        "Local URLs cannot be used for public SafeLinks"
    );
}

#[tokio::test]
async fn test_generate_requires_url() {
    let app = TestApp::new();
    let response = app
        .request("POST", "/api/links", Some(serde_json::json!({ "url": "" })))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
    assert!(response.body["details"]["url"].is_array());
}

#[tokio::test]
async fn test_inspect_open_link() {
    let app = TestApp::new();
    let data = app.generate("https://example.com/page", None).await;
    let token = data["token"].as_str().expect("token");

    let response = app
        .request("GET", &format!("/api/links/inspect?go={token}"), None)
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["target_url"], "https://example.com/page");
    assert_eq!(response.body["data"]["password_required"], false);
    assert_eq!(response.body["data"]["tier"], "structured");
}

#[tokio::test]
async fn test_inspect_protected_link_hides_target() {
    let app = TestApp::new();
    let data = app.generate("https://example.com/private", Some("hunter2")).await;
    let token = data["token"].as_str().expect("token");

    let response = app
        .request("GET", &format!("/api/links/inspect?url={token}"), None)
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body["data"]["target_url"].is_null());
    assert_eq!(response.body["data"]["password_required"], true);
}

#[tokio::test]
async fn test_inspect_without_token() {
    let app = TestApp::new();
    let response = app.request("GET", "/api/links/inspect?foo=bar", None).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_inspect_corrupt_token() {
    let app = TestApp::new();
    let response = app.request("GET", "/api/links/inspect?url=!!!", None).await;
    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(response.body["error"], "DECODE_ERROR");
}

#[tokio::test]
async fn test_unlock() {
    let app = TestApp::new();
    let data = app.generate("https://example.com/private", Some("hunter2")).await;
    let token = data["token"].as_str().expect("token");

    let wrong = app
        .request(
            "POST",
            "/api/links/unlock",
            Some(serde_json::json!({ "token": token, "password": "wrong" })),
        )
        .await;
    assert_eq!(wrong.status, StatusCode::FORBIDDEN);
    assert_eq!(wrong.body["error"], "PASSWORD_MISMATCH");
    assert_eq!(wrong.body["message"], "Incorrect password! Please try again.");

    let right = app
        .request(
            "POST",
            "/api/links/unlock",
            Some(serde_json::json!({ "token": token, "password": "hunter2" })),
        )
        .await;
    assert_eq!(right.status, StatusCode::OK);
    assert_eq!(right.body["data"]["target_url"], "https://example.com/private");
}

#[tokio::test]
async fn test_validate_endpoint() {
    let app = TestApp::new();

    let ok = app
        .request(
            "POST",
            "/api/validate",
            Some(serde_json::json!({ "url": "https://example.com/page" })),
        )
        .await;
    assert_eq!(ok.status, StatusCode::OK);
    assert_eq!(ok.body["data"]["valid"], true);
    assert!(ok.body["data"].get("reason").is_none());

    let bad = app
        .request(
            "POST",
            "/api/validate",
            Some(serde_json::json!({ "url": "ftp://example.com/x" })),
        )
        .await;
    assert_eq!(bad.status, StatusCode::OK);
    assert_eq!(bad.body["data"]["valid"], false);
    assert_eq!(bad.body["data"]["reason"], "bad-scheme");
}

#[tokio::test]
async fn test_unknown_route() {
    let app = TestApp::new();
    let response = app.request("GET", "/api/nope", None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["error"], "NOT_FOUND");
}

#[tokio::test]
async fn test_custom_base_url() {
    let mut config = safelink_core::config::AppConfig::default();
    config.link.base_url = "https://go.example.org".to_string();
    let app = TestApp::with_config(config);

    let data = app.generate("https://example.com/page", None).await;
    assert!(
        data["link"]
            .as_str()
            .expect("link")
            .starts_with("https://go.example.org/safelink.html?url=")
    );
    assert_eq!(app.config.link.base_url, "https://go.example.org");
}
