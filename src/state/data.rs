/// Shared data structures for the application state
///
/// These structs represent the data model that flows between
/// the workspace and the UI layer.

use std::path::{Path, PathBuf};

/// Number of (image, text) rows shown per page
pub const SLOTS_PER_PAGE: usize = 4;

/// A transcript and the scan it was typed from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pair {
    /// Full path to the text file (the cache key)
    pub text_path: PathBuf,
    /// Full path to the matching image
    pub image_path: PathBuf,
}

impl Pair {
    /// File name of the transcript, for labels and logs
    pub fn label(&self) -> String {
        file_label(&self.text_path)
    }
}

/// What the user picked in the unsaved-changes prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseChoice {
    SaveAndExit,
    DiscardAndExit,
    Cancel,
}

pub(crate) fn file_label(path: &Path) -> String {
    path.file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string()
}
