//! HTTP protocol layer module
//!
//! Content types and plain-text/HTML response builders, independent of the
//! selection workflow.

pub mod mime;
pub mod response;

// Re-export commonly used builders
pub use response::{
    build_400_response, build_404_response, build_413_response, build_500_response,
    build_file_response,
};
