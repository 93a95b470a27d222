// API request/response types

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of `POST /api/select` and `POST /api/deselect`
#[derive(Debug, Deserialize)]
pub struct SelectionRequest {
    #[serde(default)]
    pub filename: Option<String>,
}

impl SelectionRequest {
    /// Parse a request body. Anything but a JSON object is rejected, since
    /// serde would otherwise accept a sequence like `["grin.png"]` for the struct.
    pub fn parse(body: &[u8]) -> Option<Self> {
        match serde_json::from_slice::<Value>(body).ok()? {
            value @ Value::Object(_) => serde_json::from_value(value).ok(),
            _ => None,
        }
    }

    /// The requested name, if present and non-empty
    pub fn filename(&self) -> Option<&str> {
        self.filename.as_deref().filter(|name| !name.is_empty())
    }
}

/// Body of `GET /api/selected`
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct FilesResponse {
    pub files: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse<'a> {
    pub error: &'a str,
}
