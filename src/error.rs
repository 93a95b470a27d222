//! Error types
//!
//! Startup errors are fatal and their `Display` text is the diagnostic shown
//! before the process exits. Selection errors are reported to the client.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StartupError {
    #[error(
        "\"{}\" directory not found!\n\
         Please create it and add your emoji images to it, then regenerate the HTML.",
        .0.display()
    )]
    SourceDirectoryMissing(PathBuf),

    #[error(
        "generated file \"{}\" not found!\nRun the HTML generator before starting the server.",
        .0.display()
    )]
    GeneratedFileMissing(PathBuf),

    #[error(
        "generation state \"{}\" not found!\nRe-run the HTML generator for the current configuration.",
        .0.display()
    )]
    GenerationStateMissing(PathBuf),

    #[error("generation state \"{}\" is unreadable: {reason}", .path.display())]
    GenerationStateInvalid { path: PathBuf, reason: String },

    #[error(
        "generated HTML is stale: it was built for \"{generated_for}\" but the configuration uses \"{configured}\".\n\
         Re-run the HTML generator."
    )]
    StaleGeneration {
        generated_for: String,
        configured: String,
    },

    #[error("could not create \"{}\": {source}", .path.display())]
    SelectedDirectory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Debug, Error)]
pub enum SelectionError {
    #[error("\"{0}\" has no file name component")]
    NoBaseName(String),

    #[error(transparent)]
    Io(#[from] io::Error),
}
