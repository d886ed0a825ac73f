/// Error type shared by the workspace, settings and preview code.
///
/// Almost nothing here is fatal: callers log the error and fall back
/// (empty text, skipped write, default settings).

use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// The folder itself could not be listed
    #[error("cannot read folder {}: {source}", path.display())]
    ReadDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot read {}: {source}", path.display())]
    ReadText {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot write {}: {source}", path.display())]
    WriteText {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("settings file {}: {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("settings file {} is malformed: {source}", path.display())]
    ConfigFormat {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("no config directory available on this platform")]
    NoConfigDir,

    /// Image preview could not be produced
    #[error("preview for {}: {reason}", path.display())]
    Preview { path: PathBuf, reason: String },
}

impl Error {
    /// The file this error is about, when there is one
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            Error::ReadDir { path, .. }
            | Error::ReadText { path, .. }
            | Error::WriteText { path, .. }
            | Error::Config { path, .. }
            | Error::ConfigFormat { path, .. }
            | Error::Preview { path, .. } => Some(path),
            Error::NoConfigDir => None,
        }
    }
}
