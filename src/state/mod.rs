/// State management module
///
/// This module holds everything the window shows and edits, with no GUI types:
/// - Shared data structures (data.rs)
/// - Folder scanning and text/image matching (pairing.rs)
/// - The in-memory text cache (cache.rs)
/// - Page arithmetic (paginator.rs)
/// - The workspace that ties them to the four display slots (workspace.rs)
/// - Saving, auto-save and close handling (persistence.rs)
/// - Search, delete-matches and append-to-all (bulk.rs)

pub mod data;
pub mod pairing;
pub mod cache;
pub mod paginator;
pub mod workspace;
pub mod persistence;
pub mod bulk;

pub use data::{CloseChoice, SLOTS_PER_PAGE};
pub use workspace::{SlotView, Workspace};
