// Path helpers for configured directories

use std::path::{Path, PathBuf};

/// Expand a leading `~` against the current user's home directory.
///
/// Only `~` and `~/...` are rewritten. `~user` forms and paths without a
/// tilde come back unchanged, as do all paths when no home directory is known.
pub fn expand_tilde(path: &str) -> PathBuf {
    expand_tilde_with(path, dirs::home_dir().as_deref())
}

fn expand_tilde_with(path: &str, home: Option<&Path>) -> PathBuf {
    let Some(home) = home else {
        return PathBuf::from(path);
    };

    if path == "~" {
        return home.to_path_buf();
    }

    match path.strip_prefix("~/") {
        Some(rest) => home.join(rest),
        None => PathBuf::from(path),
    }
}

/// Join a client supplied name under `base`.
///
/// Leading separators are dropped so an absolute-looking name still resolves
/// inside `base` instead of replacing it.
pub fn join_relative(base: &Path, name: &str) -> PathBuf {
    base.join(name.trim_start_matches(['/', '\\']))
}
