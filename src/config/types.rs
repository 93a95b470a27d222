// Configuration types module
// Defines all configuration-related data structures

use serde::{Deserialize, Serialize};

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Source directory holding the selectable images (may start with `~`)
    // `config` may lowercase keys read from files, hence the extra alias
    #[serde(
        default = "default_emoji_directory",
        alias = "emojiDirectory",
        alias = "emojidirectory"
    )]
    pub emoji_directory: String,
    pub host: String,
    pub port: u16,
    pub paths: PathsConfig,
    pub logging: LoggingConfig,
    pub performance: PerformanceConfig,
    pub http: HttpConfig,
    pub generation: GenerationConfig,
}

#[allow(clippy::missing_const_for_fn)]
fn default_emoji_directory() -> String {
    "emojis".to_string()
}

/// Filesystem layout served by the handler
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct PathsConfig {
    /// Root for static files, `.` serves the working directory
    pub web_root: String,
    pub selected_directory: String,
    /// File served for `/`, relative to the web root
    pub landing_page: String,
    /// URL prefix remapped onto the source directory
    pub emoji_route: String,
}

/// Logging configuration
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub access_log: bool,
    /// Access log format (simple, common, combined, json, or custom pattern)
    pub access_log_format: String,
    /// Access log file path (optional, stdout if not set)
    #[serde(default)]
    pub access_log_file: Option<String>,
    /// Error log file path (optional, stderr if not set)
    #[serde(default)]
    pub error_log_file: Option<String>,
}

/// Connection handling
#[derive(Debug, Deserialize, Clone)]
pub struct PerformanceConfig {
    pub keep_alive: bool,
    /// Seconds before a connection is dropped, 0 disables the timeout
    pub connection_timeout: u64,
    pub max_connections: Option<u64>,
}

/// HTTP configuration
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct HttpConfig {
    pub max_body_size: u64,
}

/// Checks against the output of the external HTML generator
#[derive(Debug, Deserialize, Clone)]
pub struct GenerationConfig {
    /// Refuse to start when generated files are missing or stale
    pub verify: bool,
    /// JSON file recording the source directory used for generation
    pub state_file: String,
    /// Generated files that must be present, relative to the web root
    pub files: Vec<String>,
}
