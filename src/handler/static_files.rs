//! Static file serving module
//!
//! Maps request paths straight onto the filesystem: `/` is the landing page,
//! the emoji route prefix reads from the source directory, everything else
//! reads from the web root. Paths are percent-decoded and otherwise passed
//! through untouched, `..` included.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use std::borrow::Cow;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};
use tokio::fs;

use crate::config::{join_relative, AppState};
use crate::http::{self, mime};
use crate::logger;

/// Serve the file behind a raw (still percent-encoded) request path
pub async fn serve(raw_path: &str, is_head: bool, state: &AppState) -> Response<Full<Bytes>> {
    let decoded = match decode_path(raw_path) {
        Ok(path) => path,
        Err(e) => {
            logger::log_warning(&format!("Undecodable request path '{raw_path}': {e}"));
            return http::build_400_response("malformed percent-encoding");
        }
    };

    if has_parent_segment(&decoded) {
        // Traversal is not blocked for this local tool, only reported
        logger::log_warning(&format!(
            "Request path '{decoded}' walks up the directory tree"
        ));
    }

    let file_path = resolve_path(state, &decoded);

    match fs::read(&file_path).await {
        Ok(content) => {
            http::build_file_response(content, mime::content_type_for(&file_path), is_head)
        }
        Err(e) if e.kind() == ErrorKind::NotFound => http::build_404_response(),
        Err(e) => {
            logger::log_error(&format!(
                "Failed to read file '{}': {e}",
                file_path.display()
            ));
            http::build_500_response(&format!("{:?}", e.kind()))
        }
    }
}

pub fn decode_path(raw_path: &str) -> Result<Cow<'_, str>, std::string::FromUtf8Error> {
    urlencoding::decode(raw_path)
}

/// Filesystem location for a decoded request path
pub fn resolve_path(state: &AppState, decoded: &str) -> PathBuf {
    if decoded == "/" {
        return state.landing_page.clone();
    }

    if let Some(rest) = decoded.strip_prefix(state.emoji_route.as_str()) {
        return join_relative(state.store.source_dir(), rest);
    }

    join_relative(&state.web_root, decoded)
}

fn has_parent_segment(decoded: &str) -> bool {
    Path::new(decoded)
        .components()
        .any(|c| matches!(c, Component::ParentDir))
}
