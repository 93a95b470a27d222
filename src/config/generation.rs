// Generated file guard
// Detects a landing page that was generated for a different source directory

use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Component, Path};

use super::paths::expand_tilde;
use super::state::AppState;
use crate::error::StartupError;

/// Contents of the generation state file written next to the generated page
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct GenerationState {
    #[serde(rename = "emojiDirectory", alias = "emoji_directory")]
    pub emoji_directory: String,
}

impl GenerationState {
    pub fn load(path: &Path) -> Result<Self, StartupError> {
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(StartupError::GenerationStateMissing(path.to_path_buf()));
            }
            Err(e) => {
                return Err(StartupError::GenerationStateInvalid {
                    path: path.to_path_buf(),
                    reason: e.to_string(),
                });
            }
        };

        serde_json::from_str(&raw).map_err(|e| StartupError::GenerationStateInvalid {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }
}

/// Check that generated files exist and were built for the configured source directory.
///
/// Does nothing unless `generation.verify` is set.
pub fn verify_generated_files(state: &AppState) -> Result<(), StartupError> {
    let generation = &state.config.generation;
    if !generation.verify {
        return Ok(());
    }

    for file in &generation.files {
        let path = state.web_root.join(file);
        if !path.is_file() {
            return Err(StartupError::GeneratedFileMissing(path));
        }
    }

    let state_path = state.web_root.join(&generation.state_file);
    let recorded = GenerationState::load(&state_path)?;

    if !same_directory(&expand_tilde(&recorded.emoji_directory), state.store.source_dir()) {
        return Err(StartupError::StaleGeneration {
            generated_for: recorded.emoji_directory,
            configured: state.config.emoji_directory.clone(),
        });
    }

    Ok(())
}

/// Component-wise path equality that ignores `.` segments, so `./emojis`,
/// `emojis/` and `emojis` all name the same directory
fn same_directory(a: &Path, b: &Path) -> bool {
    fn meaningful(p: &Path) -> Vec<Component<'_>> {
        p.components()
            .filter(|c| !matches!(c, Component::CurDir))
            .collect::<Vec<_>>()
    }
    meaningful(a) == meaningful(b)
}
