//! Startup preconditions
//!
//! Everything that must hold before the listener is bound. Any failure is
//! fatal; the caller prints the error and exits.

use std::fs;

use crate::config::{verify_generated_files, AppState};
use crate::error::StartupError;
use crate::logger;

/// Check the source directory and generated files, then create the selected directory
pub fn prepare(state: &AppState) -> Result<(), StartupError> {
    let source_dir = state.store.source_dir();
    if !source_dir.is_dir() {
        return Err(StartupError::SourceDirectoryMissing(source_dir.to_path_buf()));
    }

    verify_generated_files(state)?;

    let selected_dir = state.store.selected_dir();
    if !selected_dir.is_dir() {
        fs::create_dir_all(selected_dir).map_err(|source| StartupError::SelectedDirectory {
            path: selected_dir.to_path_buf(),
            source,
        })?;
        logger::log_info(&format!(
            "Created \"{}\" directory",
            selected_dir.display()
        ));
    }

    Ok(())
}
