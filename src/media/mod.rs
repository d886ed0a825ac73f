/// Image handling module
///
/// This module handles:
/// - Decoding scans and shrinking them to preview size (preview.rs)

pub mod preview;

pub use preview::{load_preview, Preview};
