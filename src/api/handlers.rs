// Selection endpoint handlers

use http_body_util::{BodyExt, Full};
use hyper::body::{Body, Bytes};
use hyper::{Request, Response, StatusCode};

use super::response::{invalid_request, json_response, server_error, success};
use super::types::{FilesResponse, SelectionRequest};
use crate::config::AppState;
use crate::http;
use crate::logger;

type ApiResponse = Response<Full<Bytes>>;

/// `GET /api/selected`
pub async fn handle_list_selected(state: &AppState) -> ApiResponse {
    match state.store.list().await {
        Ok(files) => json_response(StatusCode::OK, &FilesResponse { files }),
        Err(e) => {
            logger::log_error(&format!("List error: {e}"));
            server_error(&e.to_string())
        }
    }
}

/// `POST /api/select`
pub async fn handle_select<B>(req: Request<B>, state: &AppState) -> ApiResponse
where
    B: Body,
    B::Error: std::fmt::Display,
{
    let filename = match read_filename(req, state.config.http.max_body_size).await {
        Ok(name) => name,
        Err(resp) => return resp,
    };

    match state.store.select(&filename).await {
        Ok(base) => {
            logger::log_info(&format!("Copied: {filename} -> {base}"));
            success()
        }
        Err(e) => {
            logger::log_error(&format!("Copy error: {e}"));
            server_error(&e.to_string())
        }
    }
}

/// `POST /api/deselect`
pub async fn handle_deselect<B>(req: Request<B>, state: &AppState) -> ApiResponse
where
    B: Body,
    B::Error: std::fmt::Display,
{
    let filename = match read_filename(req, state.config.http.max_body_size).await {
        Ok(name) => name,
        Err(resp) => return resp,
    };

    match state.store.deselect(&filename).await {
        Ok(base) => {
            logger::log_info(&format!("Deleted: {base}"));
            success()
        }
        Err(e) => {
            logger::log_error(&format!("Delete error: {e}"));
            server_error(&e.to_string())
        }
    }
}

/// Read `{"filename": ...}` from the body, or the error response to send instead
async fn read_filename<B>(req: Request<B>, max_body_size: u64) -> Result<String, ApiResponse>
where
    B: Body,
    B::Error: std::fmt::Display,
{
    if let Some(resp) = check_body_size(&req, max_body_size) {
        return Err(resp);
    }

    let bytes = match req.into_body().collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(e) => {
            logger::log_warning(&format!("Failed to read request body: {e}"));
            return Err(invalid_request());
        }
    };

    let Some(request) = SelectionRequest::parse(&bytes) else {
        return Err(invalid_request());
    };

    request
        .filename()
        .map(ToString::to_string)
        .ok_or_else(invalid_request)
}

/// Validate Content-Length header and return 413 if exceeded
fn check_body_size<B>(req: &Request<B>, max_body_size: u64) -> Option<ApiResponse> {
    let content_length = req.headers().get("content-length")?;
    let size = content_length.to_str().ok()?.parse::<u64>().ok()?;
    if size > max_body_size {
        logger::log_warning(&format!(
            "Request body too large: {size} bytes (max: {max_body_size})"
        ));
        return Some(http::build_413_response());
    }
    None
}
