/// The open folder: pairs, cached text, the current page and what each
/// of the four display slots is bound to.
///
/// The UI owns one `Workspace` and talks to it through [`SlotView`], so the
/// core never sees a widget.

use std::path::{Path, PathBuf};

use super::cache::TextCache;
use super::data::{Pair, SLOTS_PER_PAGE};
use super::paginator::{NavState, Paginator};
use super::pairing::{self, FolderScan};

/// The editable side of the display slots, as seen by the workspace
pub trait SlotView {
    /// Live text of `slot`, or None if it holds nothing newer than the cache
    fn slot_text(&self, slot: usize) -> Option<String>;

    /// Replace what `slot` shows
    fn set_slot_text(&mut self, slot: usize, text: &str);

    /// Empty `slot`; it is no longer bound to a file
    fn clear_slot(&mut self, slot: usize);
}

#[derive(Debug)]
pub struct Workspace {
    folder: Option<PathBuf>,
    pairs: Vec<Pair>,
    pub(super) cache: TextCache,
    pager: Paginator,
    /// Text path shown in each slot; None past the end of the last page
    bound: [Option<PathBuf>; SLOTS_PER_PAGE],
}

impl Default for Workspace {
    fn default() -> Self {
        Self {
            folder: None,
            pairs: Vec::new(),
            cache: TextCache::new(),
            pager: Paginator::new(0, SLOTS_PER_PAGE),
            bound: Default::default(),
        }
    }
}

impl Workspace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the current folder with a fresh scan and show its first page.
    ///
    /// Anything unsaved from the previous folder is dropped; callers decide
    /// beforehand whether to save it.
    pub fn open(&mut self, scan: FolderScan, view: &mut impl SlotView) {
        let FolderScan { folder, pairs, cache } = scan;

        // Unbind first so nothing from the old folder gets flushed
        self.bound = Default::default();
        self.pager = Paginator::new(pairs.len(), SLOTS_PER_PAGE);
        self.pairs = pairs;
        self.cache = cache;
        self.folder = Some(folder);
        tracing::debug!("{} transcripts cached", self.cache.len());

        self.show_page(view);
    }

    pub fn is_open(&self) -> bool {
        self.folder.is_some()
    }

    pub fn folder(&self) -> Option<&Path> {
        self.folder.as_deref()
    }

    pub fn pairs(&self) -> &[Pair] {
        &self.pairs
    }

    pub fn pair_count(&self) -> usize {
        self.pairs.len()
    }

    pub fn cache(&self) -> &TextCache {
        &self.cache
    }

    pub fn current_page(&self) -> usize {
        self.pager.current_page()
    }

    pub fn page_count(&self) -> usize {
        self.pager.page_count()
    }

    pub fn nav_state(&self) -> NavState {
        self.pager.nav_state()
    }

    pub fn progress(&self) -> u8 {
        self.pager.progress()
    }

    /// Edits not yet written to disk
    pub fn unsaved_count(&self) -> usize {
        self.cache.dirty_count()
    }

    pub fn bound_path(&self, slot: usize) -> Option<&Path> {
        self.bound.get(slot)?.as_deref()
    }

    /// Pairs on the current page with their slot index
    pub fn visible_pairs(&self) -> impl Iterator<Item = (usize, &Pair)> {
        self.pairs[self.pager.page_range()].iter().enumerate()
    }

    /// A slot's text changed in the UI. Returns true if the cache changed.
    pub fn record_edit(&mut self, slot: usize, text: String) -> bool {
        match self.bound.get(slot).and_then(Option::as_ref) {
            Some(path) => self.cache.set(path, text),
            None => false,
        }
    }

    /// Copy the live text of every bound slot into the cache
    pub fn flush_visible(&mut self, view: &impl SlotView) {
        for (slot, path) in self.bound.iter().enumerate() {
            let Some(path) = path else { continue };
            if let Some(text) = view.slot_text(slot) {
                self.cache.set(path, text);
            }
        }
    }

    pub fn first_page(&mut self, view: &mut impl SlotView) -> bool {
        self.turn_page(view, Paginator::first)
    }

    pub fn prev_page(&mut self, view: &mut impl SlotView) -> bool {
        self.turn_page(view, Paginator::prev)
    }

    pub fn next_page(&mut self, view: &mut impl SlotView) -> bool {
        self.turn_page(view, Paginator::next)
    }

    pub fn last_page(&mut self, view: &mut impl SlotView) -> bool {
        self.turn_page(view, Paginator::last)
    }

    /// Flush, then move. The flush must come first or edits in the
    /// outgoing slots are lost.
    fn turn_page(&mut self, view: &mut impl SlotView, step: fn(&mut Paginator) -> bool) -> bool {
        self.flush_visible(view);
        if !step(&mut self.pager) {
            return false;
        }
        tracing::debug!("page {}/{}", self.current_page() + 1, self.page_count());
        self.show_page(view);
        true
    }

    /// Rebind every slot to the current page and fill it
    fn show_page(&mut self, view: &mut impl SlotView) {
        let range = self.pager.page_range();

        for slot in 0..SLOTS_PER_PAGE {
            let index = range.start + slot;
            if index >= range.end {
                self.bound[slot] = None;
                view.clear_slot(slot);
                continue;
            }

            let path = self.pairs[index].text_path.clone();
            let text = self.text_for(&path);
            view.set_slot_text(slot, &text);
            self.bound[slot] = Some(path);
        }
    }

    /// Cached text, or read from disk and cache it
    fn text_for(&mut self, path: &Path) -> String {
        if let Some(text) = self.cache.get(path) {
            return text.to_string();
        }

        match pairing::read_text(path) {
            Ok(text) => {
                self.cache.insert_loaded(path.to_path_buf(), text.clone());
                text
            }
            Err(e) => {
                tracing::warn!("{e}");
                self.cache.insert_unreadable(path.to_path_buf());
                String::new()
            }
        }
    }

    /// Push new cached text for `path` into any slot showing it
    pub(super) fn refresh_slot(&self, view: &mut impl SlotView, path: &Path, text: &str) {
        for (slot, bound) in self.bound.iter().enumerate() {
            if bound.as_deref() == Some(path) {
                view.set_slot_text(slot, text);
            }
        }
    }
}
