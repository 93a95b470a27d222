// Application state module
// Resolved, immutable settings shared by every connection

use std::path::PathBuf;

use super::paths::expand_tilde;
use super::types::Config;
use crate::selection::SelectionStore;

/// Application state
///
/// Built once at startup from [`Config`] and handed to the server behind an
/// `Arc`. Nothing in here changes while the server runs.
#[derive(Debug)]
pub struct AppState {
    pub config: Config,
    /// Source and selected directories
    pub store: SelectionStore,
    pub web_root: PathBuf,
    pub landing_page: PathBuf,
    pub emoji_route: String,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let source_dir = expand_tilde(&config.emoji_directory);
        let selected_dir = expand_tilde(&config.paths.selected_directory);
        let web_root = expand_tilde(&config.paths.web_root);
        let landing_page = web_root.join(&config.paths.landing_page);

        let mut emoji_route = config.paths.emoji_route.clone();
        if !emoji_route.ends_with('/') {
            emoji_route.push('/');
        }

        Self {
            store: SelectionStore::new(source_dir, selected_dir),
            web_root,
            landing_page,
            emoji_route,
            config,
        }
    }

    pub fn access_log_enabled(&self) -> bool {
        self.config.logging.access_log
    }
}
