/// Folder scanning: match every transcript with its scan.

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use super::cache::TextCache;
use super::data::Pair;
use crate::error::{Error, Result};

/// Which files count as transcripts and which as their images
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairingRules {
    /// Transcript extension, without the dot (case-sensitive)
    pub text_extension: String,
    /// Image extensions in priority order, without the dot
    pub image_extensions: Vec<String>,
}

impl Default for PairingRules {
    fn default() -> Self {
        Self {
            text_extension: "txt".to_string(),
            image_extensions: vec!["png".to_string(), "jpg".to_string(), "jpeg".to_string()],
        }
    }
}

/// Result of scanning one folder
#[derive(Debug)]
pub struct FolderScan {
    pub folder: PathBuf,
    /// Pairs sorted by transcript file name
    pub pairs: Vec<Pair>,
    /// Every paired transcript, pre-read
    pub cache: TextCache,
}

impl FolderScan {
    /// Transcripts that could not be read and were cached as empty
    pub fn unreadable_count(&self) -> usize {
        self.cache.unreadable_count()
    }
}

/// Scan `folder` (not recursive) and pair each transcript with an image.
///
/// Transcripts with no image are left out. Each paired transcript is read
/// into the cache; a file that cannot be read is cached as empty and logged.
/// Only failing to list the folder is an error.
pub fn pair_folder(folder: &Path, rules: &PairingRules) -> Result<FolderScan> {
    let folder = folder.canonicalize().map_err(|source| Error::ReadDir {
        path: folder.to_path_buf(),
        source,
    })?;

    let suffix = format!(".{}", rules.text_extension);
    let mut pairs = Vec::new();
    let mut cache = TextCache::new();
    let mut orphans = 0usize;

    let walker = WalkDir::new(&folder)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name();

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            // The root itself failing means the folder is unusable
            Err(e) if e.depth() == 0 => {
                return Err(Error::ReadDir {
                    path: folder,
                    source: e.into(),
                });
            }
            Err(e) => {
                tracing::warn!("skipping entry: {e}");
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        let Some(name) = entry.file_name().to_str() else {
            tracing::debug!("skipping non UTF-8 name {:?}", entry.file_name());
            continue;
        };
        let Some(base) = name.strip_suffix(&suffix) else {
            continue;
        };

        let text_path = entry.path().to_path_buf();
        let Some(image_path) = find_image(&folder, base, &rules.image_extensions) else {
            orphans += 1;
            tracing::debug!("no image for {name}, skipping");
            continue;
        };

        match read_text(&text_path) {
            Ok(content) => cache.insert_loaded(text_path.clone(), content),
            Err(e) => {
                tracing::warn!("{e}");
                cache.insert_unreadable(text_path.clone());
            }
        }

        pairs.push(Pair { text_path, image_path });
    }

    tracing::info!(
        "📁 Paired {} transcripts in {} ({} without an image)",
        pairs.len(),
        folder.display(),
        orphans
    );

    Ok(FolderScan { folder, pairs, cache })
}

/// First `<base>.<ext>` that exists, trying extensions in order
fn find_image(folder: &Path, base: &str, extensions: &[String]) -> Option<PathBuf> {
    extensions
        .iter()
        .map(|ext| folder.join(format!("{base}.{ext}")))
        .find(|candidate| candidate.is_file())
}

/// Read a transcript as UTF-8
pub fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| Error::ReadText {
        path: path.to_path_buf(),
        source,
    })
}
