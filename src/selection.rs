//! Selection store
//!
//! The selected set is nothing more than the files present in the selected
//! directory. Selecting copies a source image in under its base name,
//! deselecting deletes it again. Calls are not synchronized with each other.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::config::join_relative;
use crate::error::SelectionError;
use crate::logger;

#[derive(Debug, Clone)]
pub struct SelectionStore {
    source_dir: PathBuf,
    selected_dir: PathBuf,
}

impl SelectionStore {
    pub const fn new(source_dir: PathBuf, selected_dir: PathBuf) -> Self {
        Self {
            source_dir,
            selected_dir,
        }
    }

    pub fn source_dir(&self) -> &Path {
        &self.source_dir
    }

    pub fn selected_dir(&self) -> &Path {
        &self.selected_dir
    }

    /// Names of the regular files in the selected directory, in enumeration order
    pub async fn list(&self) -> Result<Vec<String>, SelectionError> {
        let mut entries = fs::read_dir(&self.selected_dir).await?;
        let mut files = Vec::new();

        while let Some(entry) = entries.next_entry().await? {
            // Follows symlinks; entries that vanish mid-listing are skipped
            let is_file = fs::metadata(entry.path())
                .await
                .is_ok_and(|meta| meta.is_file());
            if !is_file {
                continue;
            }

            match entry.file_name().into_string() {
                Ok(name) => files.push(name),
                Err(raw) => logger::log_warning(&format!(
                    "Skipping non UTF-8 file name in selected directory: {raw:?}"
                )),
            }
        }

        Ok(files)
    }

    /// Copy `<source>/<filename>` to `<selected>/<basename>`, returning the base name.
    ///
    /// Two sources with the same base name overwrite each other.
    pub async fn select(&self, filename: &str) -> Result<String, SelectionError> {
        let base = base_name(filename)?;
        let source = join_relative(&self.source_dir, filename);
        let destination = self.selected_dir.join(&base);

        fs::copy(&source, &destination).await?;
        Ok(base)
    }

    /// Remove `<selected>/<basename>`. Removing a file that is not there succeeds.
    pub async fn deselect(&self, filename: &str) -> Result<String, SelectionError> {
        let base = base_name(filename)?;

        match fs::remove_file(self.selected_dir.join(&base)).await {
            Ok(()) => Ok(base),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(base),
            Err(e) => Err(e.into()),
        }
    }
}

/// Strip any directory components from a requested name
pub fn base_name(filename: &str) -> Result<String, SelectionError> {
    Path::new(filename)
        .file_name()
        .and_then(|name| name.to_str())
        .map(ToString::to_string)
        .ok_or_else(|| SelectionError::NoBaseName(filename.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs as std_fs;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> SelectionStore {
        let source = dir.path().join("emojis");
        let selected = dir.path().join("selected");
        std_fs::create_dir_all(source.join("faces")).unwrap();
        std_fs::create_dir_all(&selected).unwrap();
        std_fs::write(source.join("grin.png"), b"grin").unwrap();
        std_fs::write(source.join("faces/wink.png"), b"wink").unwrap();
        std_fs::write(source.join("faces/grin.png"), b"other grin").unwrap();
        SelectionStore::new(source, selected)
    }

    #[test]
    fn test_base_name() {
        assert_eq!(base_name("grin.png").unwrap(), "grin.png");
        assert_eq!(base_name("faces/wink.png").unwrap(), "wink.png");
        assert_eq!(base_name("/faces/wink.png").unwrap(), "wink.png");
        assert!(matches!(base_name(".."), Err(SelectionError::NoBaseName(_))));
        assert!(matches!(base_name("/"), Err(SelectionError::NoBaseName(_))));
    }

    #[tokio::test]
    async fn test_select_then_list() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        assert_eq!(store.select("grin.png").await.unwrap(), "grin.png");
        assert_eq!(store.list().await.unwrap(), vec!["grin.png".to_string()]);

        // Selecting twice does not duplicate
        store.select("grin.png").await.unwrap();
        assert_eq!(store.list().await.unwrap(), vec!["grin.png".to_string()]);
    }

    #[tokio::test]
    async fn test_select_flattens_subdirectories() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        assert_eq!(store.select("faces/wink.png").await.unwrap(), "wink.png");
        let copied = std_fs::read(store.selected_dir().join("wink.png")).unwrap();
        assert_eq!(copied, b"wink");
    }

    #[tokio::test]
    async fn test_select_collision_overwrites() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        store.select("grin.png").await.unwrap();
        store.select("faces/grin.png").await.unwrap();

        assert_eq!(store.list().await.unwrap().len(), 1);
        let copied = std_fs::read(store.selected_dir().join("grin.png")).unwrap();
        assert_eq!(copied, b"other grin");
    }

    #[tokio::test]
    async fn test_select_missing_source() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        let err = store.select("nope.png").await.unwrap_err();
        assert!(matches!(err, SelectionError::Io(ref e) if e.kind() == ErrorKind::NotFound));
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_deselect_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        store.select("faces/wink.png").await.unwrap();
        assert_eq!(store.deselect("faces/wink.png").await.unwrap(), "wink.png");
        assert!(store.list().await.unwrap().is_empty());
        assert!(store.deselect("wink.png").await.is_ok());
    }

    #[tokio::test]
    async fn test_list_skips_directories() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        std_fs::create_dir(store.selected_dir().join("nested")).unwrap();
        store.select("grin.png").await.unwrap();

        assert_eq!(store.list().await.unwrap(), vec!["grin.png".to_string()]);
    }

    #[tokio::test]
    async fn test_list_missing_directory_fails() {
        let dir = TempDir::new().unwrap();
        let store = SelectionStore::new(dir.path().join("emojis"), dir.path().join("absent"));

        assert!(store.list().await.is_err());
    }
}
