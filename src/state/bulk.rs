/// Search highlighting and edits applied to every transcript at once.

use std::ops::Range;

use super::data::SLOTS_PER_PAGE;
use super::persistence::SaveReport;
use super::workspace::{SlotView, Workspace};

/// Byte ranges of every occurrence of `query` in `text`.
///
/// Scans from the start, left to right; a match resumes after the end of
/// the previous one, so overlapping occurrences are found once.
pub fn find_matches(text: &str, query: &str) -> Vec<Range<usize>> {
    if query.is_empty() {
        return Vec::new();
    }
    text.match_indices(query)
        .map(|(start, found)| start..start + found.len())
        .collect()
}

/// Match ranges for each visible slot
pub type PageMatches = [Vec<Range<usize>>; SLOTS_PER_PAGE];

impl Workspace {
    /// Where `query` occurs in the visible slots. Display only: the cache
    /// and files are untouched. Every call starts fresh from position 0.
    pub fn highlight(&self, view: &impl SlotView, query: &str) -> Option<PageMatches> {
        if query.is_empty() {
            return None;
        }

        let mut matches = PageMatches::default();
        for (slot, ranges) in matches.iter_mut().enumerate() {
            let Some(path) = self.bound_path(slot) else {
                continue;
            };
            let text = view
                .slot_text(slot)
                .or_else(|| self.cache.get(path).map(str::to_string))
                .unwrap_or_default();
            *ranges = find_matches(&text, query);
        }
        Some(matches)
    }

    /// Remove every occurrence of `query` from every cached transcript.
    ///
    /// Visible slots are refreshed; nothing is written until the next save.
    /// Returns how many transcripts changed.
    pub fn delete_occurrences(&mut self, view: &mut impl SlotView, query: &str) -> usize {
        if query.is_empty() {
            return 0;
        }

        self.flush_visible(view);
        let changed = self.rewrite_all(view, |text| text.replace(query, ""));

        tracing::info!("🧹 Removed {query:?} from {changed} files");
        changed
    }

    /// Append a new line with `text` to every cached transcript, then save
    /// everything immediately.
    pub fn append_to_all(&mut self, view: &mut impl SlotView, text: &str) -> Option<SaveReport> {
        if text.is_empty() {
            return None;
        }

        self.flush_visible(view);
        let changed = self.rewrite_all(view, |content| format!("{content}\n{text}"));
        tracing::info!("➕ Appended {text:?} to {changed} files");

        Some(self.save_all(view))
    }

    /// Apply `edit` to each cached transcript in pair order
    fn rewrite_all(&mut self, view: &mut impl SlotView, edit: impl Fn(&str) -> String) -> usize {
        let mut changed = 0;

        for index in 0..self.pair_count() {
            let path = self.pairs()[index].text_path.clone();
            let Some(current) = self.cache.get(&path) else {
                continue;
            };

            let updated = edit(current);
            if self.cache.set(&path, updated.clone()) {
                changed += 1;
                self.refresh_slot(view, &path, &updated);
            }
        }

        changed
    }
}
