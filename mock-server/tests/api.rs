use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, app_with_db, db, Envelope, DEMO_FILE_ID, LOCKED_FILE_ID};
use tower::ServiceExt;

const BEARER: &str = "Bearer test-token";

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn authed_get(uri: &str) -> Request<String> {
    Request::builder()
        .uri(uri)
        .header(http::header::AUTHORIZATION, BEARER)
        .body(String::new())
        .unwrap()
}

fn token_request(body: &str) -> Request<String> {
    Request::builder()
        .method("POST")
        .uri("/dev/file/download/token")
        .header(http::header::AUTHORIZATION, BEARER)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

// --- basic ---

#[tokio::test]
async fn index_is_html() {
    let resp = app()
        .oneshot(Request::builder().uri("/").body(String::new()).unwrap())
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let ctype = resp.headers()[http::header::CONTENT_TYPE].to_str().unwrap().to_string();
    assert!(ctype.starts_with("text/html"));
    let body = body_bytes(resp).await;
    assert_eq!(body, mock_server::index_page().as_bytes());
}

#[tokio::test]
async fn swagger_is_json() {
    let resp = app()
        .oneshot(Request::builder().uri("/api-docs/swagger.json").body(String::new()).unwrap())
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let doc: serde_json::Value = body_json(resp).await;
    assert_eq!(doc["info"]["title"], "Suiknit API");
}

// --- auth / admin ---

#[tokio::test]
async fn login_by_token_requires_bearer() {
    let resp = app()
        .oneshot(Request::builder().uri("/dev/auth/loginByToken").body(String::new()).unwrap())
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Envelope = body_json(resp).await;
    assert_eq!(body.code, 401);
    assert!(body.data.is_null());
}

#[tokio::test]
async fn login_by_token_echoes_token() {
    let resp = app().oneshot(authed_get("/dev/auth/loginByToken")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Envelope = body_json(resp).await;
    assert_eq!(body.data["token"], "test-token");
    assert_eq!(body.data["role"], "admin");
}

#[tokio::test]
async fn admin_logs_honours_tail() {
    let resp = app().oneshot(authed_get("/dev/admin/logs?tail=2")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = body_json(resp).await;
    assert_eq!(body["count"], 2);
    assert_eq!(body["total"], 5);
    assert!(body["lines"][1].as_str().unwrap().contains("download/token"));
}

#[tokio::test]
async fn admin_log_files_is_bare_array() {
    let resp = app().oneshot(authed_get("/dev/admin/logs/files")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = body_json(resp).await;
    assert_eq!(body.as_array().unwrap().len(), 2);
}

// --- files ---

#[tokio::test]
async fn file_public_unknown_returns_404() {
    let resp = app().oneshot(authed_get("/dev/file/public?fileId=nope")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn file_public_missing_id_returns_400() {
    let resp = app().oneshot(authed_get("/dev/file/public")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn download_token_for_locked_file_is_forbidden() {
    let resp = app()
        .oneshot(token_request(&format!(r#"{{"fileId":"{LOCKED_FILE_ID}"}}"#)))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    let body: Envelope = body_json(resp).await;
    assert!(body.data.is_null());
}

#[tokio::test]
async fn download_without_key_returns_400() {
    let resp = app()
        .oneshot(authed_get(&format!("/dev/file/download/{DEMO_FILE_ID}")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// --- token → ranged download lifecycle ---

#[tokio::test]
async fn token_then_ranged_download() {
    use tower::Service;

    let db = db();
    let mut app = app_with_db(db.clone()).into_service();

    // token
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(token_request(&format!(r#"{{"fileId":"{DEMO_FILE_ID}"}}"#)))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Envelope = body_json(resp).await;
    let url = body.data["downloadUrl"].as_str().unwrap().to_string();
    assert!(url.starts_with(&format!("/dev/file/download/{DEMO_FILE_ID}?key=")));

    // first kilobyte
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(
            Request::builder()
                .uri(&url)
                .header(http::header::RANGE, "bytes=0-1023")
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::PARTIAL_CONTENT);
    assert_eq!(resp.headers()[http::header::CONTENT_RANGE], "bytes 0-1023/4096");
    let chunk = body_bytes(resp).await;
    assert_eq!(chunk.len(), 1024);
    assert_eq!(chunk[300], (300 % 251) as u8);

    // key is single use
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(Request::builder().uri(&url).body(String::new()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::GONE);

    // every request was recorded, range included
    let store = db.read().await;
    let recorded = store.requests();
    assert_eq!(recorded.len(), 3);
    assert_eq!(recorded[0].method, "POST");
    assert_eq!(recorded[1].range.as_deref(), Some("bytes=0-1023"));
    assert!(recorded[2].range.is_none());
}
