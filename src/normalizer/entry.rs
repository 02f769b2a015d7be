use std::path::PathBuf;

/// How a file's content is treated before archiving
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// Matched the text policy; line endings normalized
    Text,
    /// Stored byte-for-byte
    Binary,
}

/// A file collected from the source tree, ready to archive
#[derive(Debug, Clone)]
pub struct SourceEntry {
    /// Archive name relative to the root (e.g., "lib/boot.py")
    pub archive_path: String,
    /// Location on disk
    pub disk_path: PathBuf,
    /// Content as it will be stored
    pub content: Vec<u8>,
    pub kind: EntryKind,
    /// Whether normalization changed the bytes read from disk
    pub rewritten: bool,
}
