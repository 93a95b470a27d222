// Configuration module entry point
// Loads configuration once and resolves it into the immutable application state

mod generation;
mod paths;
mod state;
mod types;

use std::net::SocketAddr;
use std::path::Path;

pub use generation::{verify_generated_files, GenerationState};
pub use paths::{expand_tilde, join_relative};
pub use state::AppState;
pub use types::{
    Config, GenerationConfig, HttpConfig, LoggingConfig, PathsConfig, PerformanceConfig,
};

/// Extensions the `config` crate probes for a file source
const CONFIG_EXTENSIONS: [&str; 7] = ["toml", "json", "yaml", "yml", "ini", "ron", "json5"];

impl Config {
    /// Load configuration from specified file path (without extension)
    ///
    /// The file is optional. When it exists the server runs in the
    /// configuration-driven mode, which turns generated-file verification on
    /// unless the file says otherwise.
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let file_found = config_file_exists(config_path);

        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(
                config::Environment::with_prefix("EMOJI")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .set_default("host", "127.0.0.1")?
            .set_default("port", 8000)?
            .set_default("paths.web_root", ".")?
            .set_default("paths.selected_directory", "selected")?
            .set_default("paths.landing_page", "emoji_browser.html")?
            .set_default("paths.emoji_route", "/emojis/")?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("logging.access_log_format", "simple")?
            .set_default("performance.keep_alive", true)?
            .set_default("performance.connection_timeout", 0)?
            .set_default("http.max_body_size", 1_048_576)? // 1MB
            .set_default("generation.verify", file_found)?
            .set_default("generation.state_file", ".emoji_generation.json")?
            .set_default("generation.files", vec!["emoji_browser.html"])?
            .build()?;

        settings.try_deserialize()
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}

fn config_file_exists(config_path: &str) -> bool {
    if Path::new(config_path).is_file() {
        return true;
    }
    CONFIG_EXTENSIONS
        .iter()
        .any(|ext| Path::new(&format!("{config_path}.{ext}")).is_file())
}
