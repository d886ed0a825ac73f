/// The four text editors shown next to the scans
use iced::widget::text_editor::{Action, Content};

use crate::state::{SlotView, SLOTS_PER_PAGE};

/// Editor contents plus whether the user typed since the slot was filled.
///
/// Only typed-in slots report text back, so a slot the user never touched
/// can't change the file through the editor's own line handling.
pub struct EditorSlots {
    contents: [Content; SLOTS_PER_PAGE],
    edited: [bool; SLOTS_PER_PAGE],
    bound: [bool; SLOTS_PER_PAGE],
}

impl Default for EditorSlots {
    fn default() -> Self {
        Self {
            contents: std::array::from_fn(|_| Content::new()),
            edited: [false; SLOTS_PER_PAGE],
            bound: [false; SLOTS_PER_PAGE],
        }
    }
}

impl EditorSlots {
    pub fn content(&self, slot: usize) -> &Content {
        &self.contents[slot]
    }

    pub fn is_bound(&self, slot: usize) -> bool {
        self.bound[slot]
    }

    /// Apply an editor action. Returns the new text if it was an edit.
    pub fn perform(&mut self, slot: usize, action: Action) -> Option<String> {
        if !self.bound[slot] {
            return None;
        }

        let is_edit = action.is_edit();
        self.contents[slot].perform(action);
        if !is_edit {
            return None;
        }

        self.edited[slot] = true;
        Some(editor_text(&self.contents[slot]))
    }
}

/// The editor's lines joined with `\n`.
///
/// `Content::text` adds a newline to any text that doesn't already end in
/// one. It is only kept when the last line really is empty.
fn editor_text(content: &Content) -> String {
    let mut text = content.text();
    if text.ends_with('\n') && text.matches('\n').count() >= content.line_count() {
        text.pop();
    }
    text
}

impl SlotView for EditorSlots {
    fn slot_text(&self, slot: usize) -> Option<String> {
        self.edited[slot].then(|| editor_text(&self.contents[slot]))
    }

    fn set_slot_text(&mut self, slot: usize, text: &str) {
        self.contents[slot] = Content::with_text(text);
        self.edited[slot] = false;
        self.bound[slot] = true;
    }

    fn clear_slot(&mut self, slot: usize) {
        self.contents[slot] = Content::new();
        self.edited[slot] = false;
        self.bound[slot] = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::workspace::testing::{open_with, scan_folder};
    use iced::widget::text_editor::{Edit, Motion};

    fn filled(text: &str) -> EditorSlots {
        let mut slots = EditorSlots::default();
        slots.set_slot_text(0, text);
        slots
    }

    fn type_at_end(slots: &mut EditorSlots, slot: usize, edit: Edit) -> Option<String> {
        slots.perform(slot, Action::Move(Motion::DocumentEnd));
        slots.perform(slot, Action::Edit(edit))
    }

    #[test]
    fn test_unbound_slot_ignores_actions() {
        let mut slots = EditorSlots::default();
        assert!(!slots.is_bound(2));
        assert_eq!(slots.perform(2, Action::Edit(Edit::Insert('x'))), None);
        assert_eq!(slots.slot_text(2), None);
    }

    #[test]
    fn test_moving_the_cursor_is_not_an_edit() {
        let mut slots = filled("abc");
        assert_eq!(slots.perform(0, Action::Move(Motion::DocumentEnd)), None);
        assert_eq!(slots.slot_text(0), None);
    }

    #[test]
    fn test_typed_text_has_no_extra_newline() {
        let mut slots = filled("abc");
        assert_eq!(type_at_end(&mut slots, 0, Edit::Insert('x')).as_deref(), Some("abcx"));
        assert_eq!(slots.slot_text(0).as_deref(), Some("abcx"));

        let mut slots = filled("one\ntwo");
        assert_eq!(type_at_end(&mut slots, 0, Edit::Insert('!')).as_deref(), Some("one\ntwo!"));
    }

    #[test]
    fn test_typed_trailing_newline_is_kept() {
        let mut slots = filled("abc");
        assert_eq!(type_at_end(&mut slots, 0, Edit::Enter).as_deref(), Some("abc\n"));
        assert_eq!(slots.slot_text(0).as_deref(), Some("abc\n"));
    }

    #[test]
    fn test_clearing_everything_gives_empty_text() {
        let mut slots = filled("a");
        assert_eq!(type_at_end(&mut slots, 0, Edit::Backspace).as_deref(), Some(""));
    }

    #[test]
    fn test_refill_resets_edited() {
        let mut slots = filled("abc");
        type_at_end(&mut slots, 0, Edit::Insert('x'));
        assert!(slots.slot_text(0).is_some());

        slots.set_slot_text(0, "fresh");
        assert_eq!(slots.slot_text(0), None);

        slots.clear_slot(0);
        assert!(!slots.is_bound(0));
        assert_eq!(slots.perform(0, Action::Edit(Edit::Insert('x'))), None);
    }

    #[test]
    fn test_editor_edits_reach_disk_unchanged() {
        let dir = scan_folder(0);
        std::fs::write(dir.path().join("page00.txt"), "abc").unwrap();
        std::fs::write(dir.path().join("page00.png"), b"").unwrap();

        let mut slots = EditorSlots::default();
        let mut workspace = open_with(dir.path(), &mut slots);

        let text = type_at_end(&mut slots, 0, Edit::Insert('x')).unwrap();
        workspace.record_edit(0, text);
        assert_eq!(workspace.cache().get(&workspace.pairs()[0].text_path), Some("abcx"));

        let report = workspace.append_to_all(&mut slots, "DONE").unwrap();
        assert!(report.is_clean());
        let on_disk = std::fs::read_to_string(&workspace.pairs()[0].text_path).unwrap();
        assert_eq!(on_disk, "abcx\nDONE");
    }
}
