//! Request handler module
//!
//! Dispatches requests to the selection API or to static file serving.

pub mod router;
pub mod static_files;

// Re-export main entry point
pub use router::{handle_request, Route};
