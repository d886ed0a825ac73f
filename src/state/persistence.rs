/// Writing cached text back to the transcript files.
///
/// Saving is best-effort: one failed file is logged and recorded, the rest
/// of the batch still gets written.

use std::fs;
use std::path::PathBuf;

use super::data::CloseChoice;
use super::workspace::{SlotView, Workspace};
use crate::error::Error;

/// Outcome of one save pass
#[derive(Debug, Default)]
pub struct SaveReport {
    pub written: usize,
    /// Never-read files left alone instead of being blanked
    pub skipped: Vec<PathBuf>,
    pub failed: Vec<Error>,
}

impl SaveReport {
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

impl Workspace {
    /// Flush the visible slots, then write every cached transcript (UTF-8,
    /// overwriting) in pair order.
    ///
    /// A transcript that could not be read when the folder was opened and
    /// has not been edited since is left alone and listed in
    /// [`SaveReport::skipped`], so its file is never replaced by the empty
    /// stand-in.
    pub fn save_all(&mut self, view: &impl SlotView) -> SaveReport {
        self.flush_visible(view);

        let mut report = SaveReport::default();
        let mut saved = Vec::new();
        for pair in self.pairs() {
            let path = &pair.text_path;
            let Some(text) = self.cache.get(path) else {
                continue;
            };

            if self.cache.is_untouched_unreadable(path) {
                tracing::debug!("not overwriting unread file {}", path.display());
                report.skipped.push(path.clone());
                continue;
            }

            match fs::write(path, text) {
                Ok(()) => {
                    report.written += 1;
                    saved.push(path.clone());
                }
                Err(source) => {
                    let error = Error::WriteText {
                        path: path.clone(),
                        source,
                    };
                    tracing::error!("{error}");
                    report.failed.push(error);
                }
            }
        }

        // Only what actually reached disk is clean
        for path in &saved {
            self.cache.mark_saved(path);
        }

        tracing::info!(
            "💾 Saved {} files ({} failed, {} skipped)",
            report.written,
            report.failed.len(),
            report.skipped.len()
        );
        report
    }

    /// Timer-driven save. Never fails; problems are only logged so the
    /// timer keeps running.
    pub fn auto_save(&mut self, view: &impl SlotView) -> SaveReport {
        if !self.is_open() {
            return SaveReport::default();
        }

        let report = self.save_all(view);
        if !report.is_clean() {
            tracing::warn!("auto-save: {} files could not be written", report.failed.len());
        }
        report
    }

    /// Apply the user's answer to the unsaved-changes prompt.
    /// Returns true when the window may close.
    pub fn resolve_close(&mut self, choice: CloseChoice, view: &impl SlotView) -> bool {
        match choice {
            CloseChoice::SaveAndExit => {
                self.save_all(view);
                true
            }
            CloseChoice::DiscardAndExit => true,
            CloseChoice::Cancel => false,
        }
    }
}
