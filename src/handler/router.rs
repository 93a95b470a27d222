//! Request routing dispatch module
//!
//! Entry point for HTTP request processing. Routes are checked in a fixed
//! order: the three JSON endpoints first, then static files for anything else.

use crate::api;
use crate::config::AppState;
use crate::handler::static_files;
use crate::logger::{self, AccessLogEntry};
use http_body_util::Full;
use hyper::body::{Body, Bytes};
use hyper::{Method, Request, Response};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

/// Which handler a request goes to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    ListSelected,
    Select,
    Deselect,
    Static,
}

impl Route {
    /// Match on method and path only; query strings never affect routing
    pub fn resolve(method: &Method, path: &str) -> Self {
        match (method, path) {
            (&Method::GET, "/api/selected") => Self::ListSelected,
            (&Method::POST, "/api/select") => Self::Select,
            (&Method::POST, "/api/deselect") => Self::Deselect,
            _ => Self::Static,
        }
    }
}

/// Main entry point for HTTP request handling
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
    peer_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible>
where
    B: Body,
    B::Error: std::fmt::Display,
{
    let started = Instant::now();
    let entry = state
        .access_log_enabled()
        .then(|| access_entry(&req, peer_addr));

    let response = route_request(req, &state).await;

    if let Some(mut entry) = entry {
        entry.status = response.status().as_u16();
        entry.body_bytes = response
            .body()
            .size_hint()
            .exact()
            .and_then(|n| usize::try_from(n).ok())
            .unwrap_or(0);
        entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

async fn route_request<B>(req: Request<B>, state: &AppState) -> Response<Full<Bytes>>
where
    B: Body,
    B::Error: std::fmt::Display,
{
    match Route::resolve(req.method(), req.uri().path()) {
        Route::ListSelected => api::handle_list_selected(state).await,
        Route::Select => api::handle_select(req, state).await,
        Route::Deselect => api::handle_deselect(req, state).await,
        Route::Static => {
            let is_head = req.method() == Method::HEAD;
            static_files::serve(req.uri().path(), is_head, state).await
        }
    }
}

fn access_entry<B>(req: &Request<B>, peer_addr: SocketAddr) -> AccessLogEntry {
    let header = |name: &str| {
        req.headers()
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(ToString::to_string)
    };

    let mut entry = AccessLogEntry::new(
        peer_addr.to_string(),
        req.method().to_string(),
        req.uri().path().to_string(),
    );
    entry.query = req.uri().query().map(ToString::to_string);
    entry.http_version = format!("{:?}", req.version())
        .trim_start_matches("HTTP/")
        .to_string();
    entry.referer = header("referer");
    entry.user_agent = header("user-agent");
    entry
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::FilesResponse;
    use crate::config::Config;
    use http_body_util::BodyExt;
    use hyper::StatusCode;
    use std::fs;
    use tempfile::TempDir;

    struct Fixture {
        _dir: TempDir,
        state: Arc<AppState>,
    }

    fn fixture() -> Fixture {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("emojis/faces")).unwrap();
        fs::create_dir_all(root.join("selected")).unwrap();
        fs::write(root.join("emojis/grin.png"), b"grin-bytes").unwrap();
        fs::write(root.join("emojis/faces/wink.png"), b"wink-bytes").unwrap();
        fs::write(root.join("emoji_browser.html"), "<html>picker</html>").unwrap();
        fs::write(root.join("app.js"), "console.log(1)").unwrap();

        let mut cfg = Config::load_from(&root.join("config").to_string_lossy()).unwrap();
        cfg.emoji_directory = root.join("emojis").to_string_lossy().into_owned();
        cfg.paths.web_root = root.to_string_lossy().into_owned();
        cfg.paths.selected_directory = root.join("selected").to_string_lossy().into_owned();
        cfg.logging.access_log = false;

        Fixture {
            _dir: dir,
            state: Arc::new(AppState::new(cfg)),
        }
    }

    fn peer() -> SocketAddr {
        "127.0.0.1:40000".parse().unwrap()
    }

    async fn send(
        state: &Arc<AppState>,
        method: Method,
        uri: &str,
        body: &str,
    ) -> (StatusCode, Response<Full<Bytes>>) {
        let req = Request::builder()
            .method(method)
            .uri(uri)
            .body(Full::new(Bytes::from(body.to_string())))
            .unwrap();
        let resp = handle_request(req, Arc::clone(state), peer()).await.unwrap();
        (resp.status(), resp)
    }

    async fn body_bytes(resp: Response<Full<Bytes>>) -> Bytes {
        resp.into_body().collect().await.unwrap().to_bytes()
    }

    async fn body_json(resp: Response<Full<Bytes>>) -> serde_json::Value {
        serde_json::from_slice(&body_bytes(resp).await).unwrap()
    }

    async fn listed(state: &Arc<AppState>) -> Vec<String> {
        let (status, resp) = send(state, Method::GET, "/api/selected", "").await;
        assert_eq!(status, StatusCode::OK);
        let mut files: FilesResponse = serde_json::from_slice(&body_bytes(resp).await).unwrap();
        files.files.sort();
        files.files
    }

    #[test]
    fn test_route_priority() {
        assert_eq!(Route::resolve(&Method::GET, "/api/selected"), Route::ListSelected);
        assert_eq!(Route::resolve(&Method::POST, "/api/select"), Route::Select);
        assert_eq!(Route::resolve(&Method::POST, "/api/deselect"), Route::Deselect);
        assert_eq!(Route::resolve(&Method::POST, "/api/selected"), Route::Static);
        assert_eq!(Route::resolve(&Method::GET, "/api/select"), Route::Static);
        assert_eq!(Route::resolve(&Method::GET, "/"), Route::Static);
    }

    #[tokio::test]
    async fn test_select_then_list() {
        let fx = fixture();

        let (status, resp) = send(
            &fx.state,
            Method::POST,
            "/api/select",
            r#"{"filename":"grin.png"}"#,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(resp.headers()["Content-Type"], "application/json");
        assert_eq!(body_bytes(resp).await, Bytes::from_static(br#"{"success":true}"#));

        let (_, resp) = send(&fx.state, Method::GET, "/api/selected", "").await;
        assert_eq!(body_bytes(resp).await, Bytes::from_static(br#"{"files":["grin.png"]}"#));
    }

    #[tokio::test]
    async fn test_select_nested_lists_base_name_once() {
        let fx = fixture();

        for _ in 0..2 {
            let (status, _) = send(
                &fx.state,
                Method::POST,
                "/api/select",
                r#"{"filename":"faces/wink.png"}"#,
            )
            .await;
            assert_eq!(status, StatusCode::OK);
        }

        assert_eq!(listed(&fx.state).await, vec!["wink.png".to_string()]);
    }

    #[tokio::test]
    async fn test_deselect_twice() {
        let fx = fixture();
        send(&fx.state, Method::POST, "/api/select", r#"{"filename":"grin.png"}"#).await;

        for _ in 0..2 {
            let (status, resp) = send(
                &fx.state,
                Method::POST,
                "/api/deselect",
                r#"{"filename":"grin.png"}"#,
            )
            .await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(body_json(resp).await["success"], true);
        }

        assert!(listed(&fx.state).await.is_empty());
    }

    #[tokio::test]
    async fn test_select_missing_source_is_500() {
        let fx = fixture();

        let (status, resp) = send(
            &fx.state,
            Method::POST,
            "/api/select",
            r#"{"filename":"missing.png"}"#,
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body_json(resp).await["error"].is_string());
        assert!(listed(&fx.state).await.is_empty());
    }

    #[tokio::test]
    async fn test_deselect_failure_is_500() {
        let fx = fixture();
        fs::create_dir(fx.state.store.selected_dir().join("x.png")).unwrap();

        let (status, resp) = send(
            &fx.state,
            Method::POST,
            "/api/deselect",
            r#"{"filename":"x.png"}"#,
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body_json(resp).await["error"].is_string());
        assert!(fx.state.store.selected_dir().join("x.png").is_dir());
    }

    #[tokio::test]
    async fn test_invalid_bodies_are_400_without_side_effects() {
        let fx = fixture();

        for path in ["/api/select", "/api/deselect"] {
            for body in [
                "",
                "not json",
                "{}",
                "[]",
                r#"["grin.png"]"#,
                r#"{"filename":""}"#,
                r#"{"filename":7}"#,
            ] {
                let (status, resp) = send(&fx.state, Method::POST, path, body).await;
                assert_eq!(status, StatusCode::BAD_REQUEST, "{path} {body}");
                assert_eq!(body_json(resp).await["error"], "Invalid request");
            }
        }

        assert!(listed(&fx.state).await.is_empty());
    }

    #[tokio::test]
    async fn test_oversized_body_is_413() {
        let fx = fixture();
        let req = Request::builder()
            .method(Method::POST)
            .uri("/api/select")
            .header("content-length", "999999999")
            .body(Full::new(Bytes::from_static(br#"{"filename":"grin.png"}"#)))
            .unwrap();

        let resp = handle_request(req, Arc::clone(&fx.state), peer()).await.unwrap();
        assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert!(listed(&fx.state).await.is_empty());
    }

    #[tokio::test]
    async fn test_root_serves_landing_page() {
        let fx = fixture();

        let (status, root) = send(&fx.state, Method::GET, "/", "").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(root.headers()["Content-Type"], "text/html");
        let root = body_bytes(root).await;

        let (_, named) = send(&fx.state, Method::GET, "/emoji_browser.html", "").await;
        assert_eq!(root, body_bytes(named).await);
    }

    #[tokio::test]
    async fn test_static_content_types() {
        let fx = fixture();

        let (status, resp) = send(&fx.state, Method::GET, "/app.js?v=3", "").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(resp.headers()["Content-Type"], "text/javascript");

        let (status, resp) = send(&fx.state, Method::GET, "/emojis/grin.png", "").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(resp.headers()["Content-Type"], "image/png");
        assert_eq!(body_bytes(resp).await, Bytes::from_static(b"grin-bytes"));
    }

    #[tokio::test]
    async fn test_missing_static_is_404_html() {
        let fx = fixture();

        let (status, resp) = send(&fx.state, Method::GET, "/nope.png", "").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(resp.headers()["Content-Type"], "text/html");
        assert_eq!(body_bytes(resp).await, Bytes::from_static(b"<h1>404 Not Found</h1>"));
    }

    #[tokio::test]
    async fn test_directory_read_is_500() {
        let fx = fixture();

        let (status, resp) = send(&fx.state, Method::GET, "/selected", "").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_bytes(resp).await;
        assert!(body.starts_with(b"Server Error: "));
    }

    #[tokio::test]
    async fn test_percent_encoded_paths() {
        let fx = fixture();
        fs::write(fx.state.store.source_dir().join("party parrot.gif"), b"gif").unwrap();

        let (status, resp) = send(&fx.state, Method::GET, "/emojis/party%20parrot.gif", "").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(resp.headers()["Content-Type"], "image/gif");

        let (status, _) = send(&fx.state, Method::GET, "/%FF.png", "").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_head_has_no_body() {
        let fx = fixture();

        let (status, resp) = send(&fx.state, Method::HEAD, "/emojis/grin.png", "").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(resp.headers()["Content-Length"], "10");
        assert!(body_bytes(resp).await.is_empty());
    }

    #[tokio::test]
    async fn test_list_failure_is_500() {
        let fx = fixture();
        fs::remove_dir_all(fx.state.store.selected_dir()).unwrap();

        let (status, resp) = send(&fx.state, Method::GET, "/api/selected", "").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body_json(resp).await["error"].is_string());
    }
}
