//! emoji-select
//!
//! Local static file server for an emoji picker page. Besides serving files
//! it exposes three JSON endpoints that copy images from a source directory
//! into a `selected` directory and back out again.

pub mod api;
pub mod config;
pub mod error;
pub mod handler;
pub mod http;
pub mod logger;
pub mod selection;
pub mod server;
pub mod startup;
