/// UI building blocks used by the main window
///
/// - The four slot editors and their edit tracking (slots.rs)
/// - Search highlighting inside the editors (highlight.rs)

pub mod highlight;
pub mod slots;

pub use highlight::{match_format, QueryHighlighter};
pub use slots::EditorSlots;
