/// In-memory transcript text, keyed by path.
///
/// This is the single source of truth for edits. Entries are never evicted;
/// the whole cache is replaced when another folder is opened.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq)]
struct Entry {
    text: String,
    /// Differs from what was last read from or written to disk
    dirty: bool,
    /// The initial read failed; the text is a stand-in
    unreadable: bool,
}

#[derive(Debug, Default)]
pub struct TextCache {
    entries: HashMap<PathBuf, Entry>,
}

impl TextCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, path: &Path) -> Option<&str> {
        self.entries.get(path).map(|entry| entry.text.as_str())
    }

    /// Store the latest text for `path`. Returns true if it changed.
    pub fn set(&mut self, path: &Path, text: String) -> bool {
        match self.entries.get_mut(path) {
            Some(entry) if entry.text == text => false,
            Some(entry) => {
                entry.text = text;
                entry.dirty = true;
                true
            }
            None => {
                self.entries.insert(
                    path.to_path_buf(),
                    Entry {
                        text,
                        dirty: true,
                        unreadable: false,
                    },
                );
                true
            }
        }
    }

    /// Record text that was just read from disk
    pub fn insert_loaded(&mut self, path: PathBuf, text: String) {
        self.entries.insert(
            path,
            Entry {
                text,
                ..Entry::default()
            },
        );
    }

    /// Record a file whose read failed; it shows as empty
    pub fn insert_unreadable(&mut self, path: PathBuf) {
        self.entries.insert(
            path,
            Entry {
                unreadable: true,
                ..Entry::default()
            },
        );
    }

    /// Whether saving `path` could overwrite a file we never managed to read
    pub fn is_untouched_unreadable(&self, path: &Path) -> bool {
        self.entries
            .get(path)
            .is_some_and(|entry| entry.unreadable && !entry.dirty)
    }

    /// Disk now matches the cached text
    pub fn mark_saved(&mut self, path: &Path) {
        if let Some(entry) = self.entries.get_mut(path) {
            entry.dirty = false;
            entry.unreadable = false;
        }
    }

    pub fn is_dirty(&self, path: &Path) -> bool {
        self.entries.get(path).is_some_and(|entry| entry.dirty)
    }

    pub fn dirty_count(&self) -> usize {
        self.entries.values().filter(|entry| entry.dirty).count()
    }

    pub fn unreadable_count(&self) -> usize {
        self.entries.values().filter(|entry| entry.unreadable).count()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
