//! End-to-end request handling against the in-memory store.

use std::sync::Arc;

use async_trait::async_trait;
use http_body_util::{BodyExt, Full};
use hyper::body::Bytes;
use hyper::{Request, Response};

use gridgate::config::GatewayConfig;
use gridgate::handler::{Downstream, Gateway};
use gridgate::store::{FileStore, LookupError, MemoryStore, StoreFault, StoredFile};

const PNG: &[u8] = &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a, 1, 2, 3];

/// Stand-in for the wrapped application; answers every request it sees
/// with a recognizable body.
struct EchoApp;

#[async_trait]
impl Downstream<Full<Bytes>> for EchoApp {
    async fn call(&self, req: Request<Full<Bytes>>) -> Response<Full<Bytes>> {
        Response::builder()
            .status(200)
            .header("Content-Type", "text/plain")
            .header("X-App", "echo")
            .body(Full::new(Bytes::from(format!(
                "app saw {}",
                req.uri().path()
            ))))
            .unwrap()
    }
}

fn gateway(store: MemoryStore) -> Gateway<EchoApp> {
    Gateway::new("files", Arc::new(store), EchoApp)
}

fn get(path: &str) -> Request<Full<Bytes>> {
    Request::get(path).body(Full::new(Bytes::new())).unwrap()
}

async fn body_bytes(resp: Response<Full<Bytes>>) -> Bytes {
    resp.into_body().collect().await.unwrap().to_bytes()
}

#[tokio::test]
async fn passes_unclaimed_paths_to_the_app() {
    let gw = gateway(MemoryStore::new());
    let resp = gw.handle(get("/other/path")).await.unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(resp.headers()["X-App"], "echo");
    assert_eq!(body_bytes(resp).await.as_ref(), b"app saw /other/path");
}

#[tokio::test]
async fn prefix_without_an_id_is_not_claimed() {
    let gw = gateway(MemoryStore::new());
    for path in ["/files", "/files/", "/filesystem/abc"] {
        let resp = gw.handle(get(path)).await.unwrap();
        assert_eq!(resp.headers()["X-App"], "echo", "path {path}");
    }
}

#[tokio::test]
async fn prefix_is_matched_literally() {
    let gw = Gateway::new("a+b", Arc::new(MemoryStore::new()), EchoApp);
    // "+" repeats in a pattern; here it is just a byte of the prefix.
    let resp = gw.handle(get("/aab/whatever")).await.unwrap();
    assert_eq!(resp.headers()["X-App"], "echo");

    let resp = gw.handle(get("/a+b/whatever")).await.unwrap();
    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn serves_a_stored_file() {
    let store = MemoryStore::new();
    let id = store.insert("image/png", PNG).await;
    let gw = gateway(store);

    let resp = gw.handle(get(&format!("/files/{id}"))).await.unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(resp.headers()["Content-Type"], "image/png");
    assert_eq!(resp.headers()["Etag"], id.as_str());
    assert!(resp.headers().contains_key("Last-Modified"));
    assert_eq!(body_bytes(resp).await.as_ref(), PNG);
}

#[tokio::test]
async fn replay_with_if_none_match_gets_304() {
    let store = MemoryStore::new();
    let id = store.insert("image/png", PNG).await;
    let gw = gateway(store);

    // A stale If-Modified-Since must not matter once the Etag matches.
    let req = Request::get(format!("/files/{id}"))
        .header("If-None-Match", id.as_str())
        .header("If-Modified-Since", "Thu, 01 Jan 1970 00:00:00 GMT")
        .body(Full::new(Bytes::new()))
        .unwrap();
    let resp = gw.handle(req).await.unwrap();
    assert_eq!(resp.status(), 304);
    assert_eq!(resp.headers()["Content-Type"], "text/plain");
    assert_eq!(body_bytes(resp).await.as_ref(), b"Not modified");
}

#[tokio::test]
async fn replay_with_matching_date_gets_304() {
    let store = MemoryStore::new();
    let id = store.insert("text/plain; charset=utf-8", "hello").await;
    let gw = gateway(store);

    let first = gw.handle(get(&format!("/files/{id}"))).await.unwrap();
    let last_modified = first.headers()["Last-Modified"]
        .to_str()
        .unwrap()
        .to_string();

    let req = Request::get(format!("/files/{id}"))
        .header("If-Modified-Since", last_modified)
        .body(Full::new(Bytes::new()))
        .unwrap();
    let resp = gw.handle(req).await.unwrap();
    assert_eq!(resp.status(), 304);
}

#[tokio::test]
async fn mismatched_validators_get_the_full_file() {
    let store = MemoryStore::new();
    let id = store.insert("image/png", PNG).await;
    let gw = gateway(store);

    let req = Request::get(format!("/files/{id}"))
        .header("If-None-Match", "0123456789abcdef01234567")
        .header("If-Modified-Since", "Thu, 01 Jan 1970 00:00:00 GMT")
        .body(Full::new(Bytes::new()))
        .unwrap();
    let resp = gw.handle(req).await.unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(body_bytes(resp).await.as_ref(), PNG);
}

#[tokio::test]
async fn missing_file_is_404() {
    let gw = gateway(MemoryStore::new());
    let resp = gw
        .handle(get("/files/0123456789abcdef01234567"))
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
    assert_eq!(resp.headers()["Content-Type"], "text/plain");
    assert_eq!(body_bytes(resp).await.as_ref(), b"File not found.");
}

#[tokio::test]
async fn malformed_id_is_404() {
    let gw = gateway(MemoryStore::new());
    let resp = gw.handle(get("/files/doesnotexist")).await.unwrap();
    assert_eq!(resp.status(), 404);
    assert_eq!(resp.headers()["Content-Type"], "text/plain");
    assert_eq!(body_bytes(resp).await.as_ref(), b"File not found.");
}

#[tokio::test]
async fn not_found_can_echo_the_id() {
    let gw = gateway(MemoryStore::new()).not_found_includes_id(true);
    let resp = gw.handle(get("/files/doesnotexist")).await.unwrap();
    assert_eq!(resp.status(), 404);
    assert_eq!(
        body_bytes(resp).await.as_ref(),
        b"File not found: doesnotexist"
    );
}

#[tokio::test]
async fn head_gets_headers_without_a_body() {
    let store = MemoryStore::new();
    let id = store.insert("image/png", PNG).await;
    let gw = gateway(store);

    let req = Request::head(format!("/files/{id}"))
        .body(Full::new(Bytes::new()))
        .unwrap();
    let resp = gw.handle(req).await.unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(
        resp.headers()["Content-Length"],
        PNG.len().to_string().as_str()
    );
    assert_eq!(resp.headers()["Etag"], id.as_str());
    assert!(body_bytes(resp).await.is_empty());
}

/// A store whose lookups fail with something other than the two mapped
/// error kinds.
struct BrokenStore;

#[async_trait]
impl FileStore for BrokenStore {
    async fn open_for_read(&self, _id: &str) -> Result<Box<dyn StoredFile>, LookupError> {
        Err(LookupError::Backend(StoreFault(
            "cursor timeout".to_string(),
        )))
    }
}

#[tokio::test]
async fn unclassified_store_faults_propagate() {
    let gw = Gateway::new("files", Arc::new(BrokenStore), EchoApp);
    let err = gw
        .handle(get("/files/0123456789abcdef01234567"))
        .await
        .unwrap_err();
    assert!(err.to_string().contains("cursor timeout"));
}

#[tokio::test]
async fn broken_store_still_delegates_unclaimed_paths() {
    let gw = Gateway::new("files", Arc::new(BrokenStore), EchoApp);
    let resp = gw.handle(get("/healthz")).await.unwrap();
    assert_eq!(resp.headers()["X-App"], "echo");
}

#[tokio::test]
async fn open_connects_before_serving() {
    let cfg = GatewayConfig {
        hostname: "localhost".to_string(),
        port: 27017,
        database: "app".to_string(),
        prefix: "files".to_string(),
        user: None,
        password: None,
        not_found_includes_id: false,
    };
    let gw = Gateway::open::<MemoryStore>(&cfg, EchoApp)
        .await
        .expect("open");
    let resp = gw
        .handle(get("/files/0123456789abcdef01234567"))
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
}
