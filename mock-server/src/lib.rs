use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, Query, Request, State},
    http::{header, HeaderMap, HeaderName, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

/// Seeded file that can be downloaded.
pub const DEMO_FILE_ID: &str = "abc123";
/// Seeded file the caller has no download permission for.
pub const LOCKED_FILE_ID: &str = "locked";
pub const DEMO_FILE_LEN: usize = 4096;

const LOG_LINES: [&str; 5] = [
    "[2025-09-29 10:00:01] method:GET path:\"/\" status:'200'",
    "[2025-09-29 10:00:02] method:GET path:\"/api-docs/swagger.json\" status:'200'",
    "[2025-09-29 10:00:03] method:GET path:\"/dev/auth/loginByToken\" status:'200'",
    "[2025-09-29 10:00:04] method:GET path:\"/dev/admin/users\" status:'200'",
    "[2025-09-29 10:00:05] method:POST path:\"/dev/file/download/token\" status:'200'",
];

/// The `{code, message, data}` envelope the Suiknit API wraps replies in.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Envelope {
    pub code: u16,
    pub message: String,
    pub data: Value,
}

#[derive(Clone, Debug)]
pub struct StoredFile {
    pub name: String,
    pub content: Vec<u8>,
    pub downloadable: bool,
}

/// What the server saw of one incoming request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
    pub range: Option<String>,
    pub user_agent: Option<String>,
}

#[derive(Debug, Default)]
pub struct Store {
    files: HashMap<String, StoredFile>,
    keys: HashMap<String, DownloadKey>,
    requests: Vec<RecordedRequest>,
}

#[derive(Debug)]
struct DownloadKey {
    file_id: String,
    used: bool,
}

impl Store {
    pub fn seeded() -> Self {
        let mut store = Store::default();
        store.insert_file(
            DEMO_FILE_ID,
            StoredFile {
                name: "demo.bin".to_string(),
                content: (0..DEMO_FILE_LEN).map(|i| (i % 251) as u8).collect(),
                downloadable: true,
            },
        );
        store.insert_file(
            LOCKED_FILE_ID,
            StoredFile {
                name: "locked.txt".to_string(),
                content: b"secret".to_vec(),
                downloadable: false,
            },
        );
        store
    }

    pub fn insert_file(&mut self, id: &str, file: StoredFile) {
        self.files.insert(id.to_string(), file);
    }

    pub fn requests(&self) -> &[RecordedRequest] {
        &self.requests
    }
}

pub type Db = Arc<RwLock<Store>>;

pub fn db() -> Db {
    Arc::new(RwLock::new(Store::seeded()))
}

/// Landing page served at `/`, long enough to be truncated by the probe.
pub fn index_page() -> String {
    let mut page = String::from("<!DOCTYPE html>\n<html>\n<head><title>Suiknit API</title></head>\n<body>\n");
    for i in 0..60 {
        page.push_str(&format!("<p>Suiknit API documentation section {i}</p>\n"));
    }
    page.push_str("</body>\n</html>\n");
    page
}

pub fn app() -> Router {
    app_with_db(db())
}

pub fn app_with_db(db: Db) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api-docs/swagger.json", get(swagger))
        .route("/dev/auth/loginByToken", get(login_by_token))
        .route("/dev/admin/users", get(list_users))
        .route("/dev/admin/logs/files", get(list_log_files))
        .route("/dev/admin/logs", get(get_logs))
        .route("/dev/file/public", get(file_public))
        .route("/dev/file/download/token", post(download_token))
        .route("/dev/file/download/{file_id}", get(download_file))
        .layer(middleware::from_fn_with_state(db.clone(), record))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    run_with_db(listener, db()).await
}

pub async fn run_with_db(listener: TcpListener, db: Db) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with_db(db)).await
}

async fn record(State(db): State<Db>, request: Request, next: Next) -> Response {
    let headers = request.headers();
    let entry = RecordedRequest {
        method: request.method().to_string(),
        path: request.uri().path().to_string(),
        query: request.uri().query().map(str::to_string),
        authorization: header_value(headers, header::AUTHORIZATION),
        range: header_value(headers, header::RANGE),
        user_agent: header_value(headers, header::USER_AGENT),
    };
    db.write().await.requests.push(entry);
    next.run(request).await
}

fn header_value(headers: &HeaderMap, name: HeaderName) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

fn bearer(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .filter(|token| !token.is_empty())
}

fn envelope(status: StatusCode, message: &str, data: Value) -> Response {
    let body = Envelope {
        code: status.as_u16(),
        message: message.to_string(),
        data,
    };
    (status, Json(body)).into_response()
}

fn unauthorized() -> Response {
    envelope(StatusCode::UNAUTHORIZED, "未授权访问", Value::Null)
}

async fn index() -> Response {
    ([(header::CONTENT_TYPE, "text/html; charset=utf-8")], index_page()).into_response()
}

async fn swagger() -> Json<Value> {
    Json(json!({
        "openapi": "3.0.0",
        "info": { "title": "Suiknit API", "version": "1.0.0" },
        "paths": {
            "/dev/auth/loginByToken": { "get": { "summary": "Login by token" } },
            "/dev/file/download/token": { "post": { "summary": "Generate Download Token" } }
        }
    }))
}

async fn login_by_token(headers: HeaderMap) -> Response {
    let Some(token) = bearer(&headers) else {
        return unauthorized();
    };
    envelope(
        StatusCode::OK,
        "登录成功",
        json!({ "id": "68ca0e363c77c82b9fc51ee7", "name": "suileyan", "role": "admin", "token": token }),
    )
}

async fn list_users(headers: HeaderMap) -> Response {
    if bearer(&headers).is_none() {
        return unauthorized();
    }
    envelope(
        StatusCode::OK,
        "success",
        json!([
            { "id": "68ca0e363c77c82b9fc51ee7", "name": "suileyan", "role": "admin" },
            { "id": "68ca0e363c77c82b9fc51ee8", "name": "测试用户", "role": "user" }
        ]),
    )
}

async fn list_log_files(headers: HeaderMap) -> Response {
    if bearer(&headers).is_none() {
        return unauthorized();
    }
    Json(json!([
        { "name": "2025-09-28.log", "path": "resource/logs/2025-09-28.log", "date": "2025-09-28" },
        { "name": "2025-09-29.log", "path": "resource/logs/2025-09-29.log", "date": "2025-09-29" }
    ]))
    .into_response()
}

#[derive(Deserialize)]
struct LogQuery {
    tail: Option<String>,
}

async fn get_logs(headers: HeaderMap, Query(query): Query<LogQuery>) -> Response {
    if bearer(&headers).is_none() {
        return unauthorized();
    }
    let tail = query
        .tail
        .and_then(|t| t.parse::<usize>().ok())
        .unwrap_or(200)
        .clamp(1, 5000);
    let lines = &LOG_LINES[LOG_LINES.len().saturating_sub(tail)..];
    Json(json!({
        "file": "2025-09-29.log",
        "count": lines.len(),
        "total": LOG_LINES.len(),
        "lines": lines,
    }))
    .into_response()
}

#[derive(Deserialize)]
struct FileQuery {
    #[serde(rename = "fileId")]
    file_id: Option<String>,
}

async fn file_public(State(db): State<Db>, Query(query): Query<FileQuery>) -> Response {
    let Some(file_id) = query.file_id.filter(|id| !id.is_empty()) else {
        return envelope(StatusCode::BAD_REQUEST, "缺少文件ID参数", Value::Null);
    };
    let store = db.read().await;
    match store.files.get(&file_id) {
        Some(file) => envelope(
            StatusCode::OK,
            "success",
            json!({ "fileId": file_id, "name": file.name, "size": file.content.len() }),
        ),
        None => envelope(StatusCode::NOT_FOUND, "文件不存在", Value::Null),
    }
}

#[derive(Deserialize)]
struct TokenRequest {
    #[serde(rename = "fileId")]
    file_id: Option<String>,
}

async fn download_token(
    State(db): State<Db>,
    headers: HeaderMap,
    Json(input): Json<TokenRequest>,
) -> Response {
    if bearer(&headers).is_none() {
        return unauthorized();
    }
    let Some(file_id) = input.file_id.filter(|id| !id.is_empty()) else {
        return envelope(StatusCode::BAD_REQUEST, "缺少文件ID参数", Value::Null);
    };
    let mut store = db.write().await;
    match store.files.get(&file_id) {
        None => return envelope(StatusCode::NOT_FOUND, "文件不存在", Value::Null),
        Some(file) if !file.downloadable => {
            return envelope(StatusCode::FORBIDDEN, "您没有下载此文件的权限", Value::Null)
        }
        Some(_) => {}
    }
    let key = Uuid::new_v4().simple().to_string();
    store.keys.insert(
        key.clone(),
        DownloadKey {
            file_id: file_id.clone(),
            used: false,
        },
    );
    envelope(
        StatusCode::OK,
        "下载令牌生成成功",
        json!({ "downloadUrl": format!("/dev/file/download/{file_id}?key={key}") }),
    )
}

#[derive(Deserialize)]
struct DownloadQuery {
    key: Option<String>,
}

async fn download_file(
    State(db): State<Db>,
    Path(file_id): Path<String>,
    Query(query): Query<DownloadQuery>,
    headers: HeaderMap,
) -> Response {
    let Some(key) = query.key.filter(|k| !k.is_empty()) else {
        return envelope(StatusCode::BAD_REQUEST, "缺少下载令牌参数", Value::Null);
    };
    let mut store = db.write().await;
    let Some(content) = store.files.get(&file_id).map(|f| f.content.clone()) else {
        return envelope(StatusCode::NOT_FOUND, "文件不存在", Value::Null);
    };
    match store.keys.get_mut(&key) {
        None => return envelope(StatusCode::UNAUTHORIZED, "下载令牌无效或已过期", Value::Null),
        Some(entry) if entry.file_id != file_id => {
            return envelope(StatusCode::FORBIDDEN, "下载令牌与文件不匹配", Value::Null)
        }
        Some(entry) if entry.used => {
            return envelope(StatusCode::GONE, "下载令牌已使用", Value::Null)
        }
        Some(entry) => entry.used = true,
    }
    drop(store);

    let range = headers
        .get(header::RANGE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| parse_range(v, content.len()));
    match range {
        Some((start, end)) => (
            StatusCode::PARTIAL_CONTENT,
            [
                (header::CONTENT_TYPE, "application/octet-stream".to_string()),
                (header::CONTENT_RANGE, format!("bytes {start}-{end}/{}", content.len())),
            ],
            content[start..=end].to_vec(),
        )
            .into_response(),
        None => (
            [(header::CONTENT_TYPE, "application/octet-stream")],
            content,
        )
            .into_response(),
    }
}

/// Parse a single `bytes=start-end` range, clamping `end` to the content.
pub fn parse_range(value: &str, len: usize) -> Option<(usize, usize)> {
    let (start, end) = value.strip_prefix("bytes=")?.split_once('-')?;
    let start: usize = start.trim().parse().ok()?;
    let end = match end.trim() {
        "" => len.checked_sub(1)?,
        end => end.parse::<usize>().ok()?.min(len.checked_sub(1)?),
    };
    (start <= end).then_some((start, end))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_serializes_with_code_message_data() {
        let body = Envelope {
            code: 200,
            message: "success".to_string(),
            data: json!({"downloadUrl": "/x"}),
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["code"], 200);
        assert_eq!(json["message"], "success");
        assert_eq!(json["data"]["downloadUrl"], "/x");
    }

    #[test]
    fn parse_range_bounded() {
        assert_eq!(parse_range("bytes=0-1023", 4096), Some((0, 1023)));
    }

    #[test]
    fn parse_range_clamps_to_content() {
        assert_eq!(parse_range("bytes=0-1023", 10), Some((0, 9)));
    }

    #[test]
    fn parse_range_open_ended() {
        assert_eq!(parse_range("bytes=100-", 4096), Some((100, 4095)));
    }

    #[test]
    fn parse_range_rejects_garbage() {
        assert_eq!(parse_range("items=0-1", 10), None);
        assert_eq!(parse_range("bytes=5-1", 10), None);
        assert_eq!(parse_range("bytes=0-10", 0), None);
        assert_eq!(parse_range("bytes=x-1", 10), None);
    }

    #[test]
    fn seeded_store_has_demo_and_locked_files() {
        let store = Store::seeded();
        assert_eq!(store.files[DEMO_FILE_ID].content.len(), DEMO_FILE_LEN);
        assert!(!store.files[LOCKED_FILE_ID].downloadable);
        assert!(store.requests().is_empty());
    }

    #[test]
    fn index_page_exceeds_preview_limit() {
        assert!(index_page().chars().count() > 1000);
    }
}
