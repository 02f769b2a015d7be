mod entry;
mod newline;

pub use entry::{EntryKind, SourceEntry};
pub use newline::normalize_line_endings;

use crate::config::{NormalizeMode, TextPolicy};
use crate::error::MemzipError;
use crate::security::PathSanitizer;
use std::borrow::Cow;
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

/// Walks a source tree in a fixed order and normalizes text files
pub struct TreeNormalizer {
    policy: TextPolicy,
    mode: NormalizeMode,
}

impl TreeNormalizer {
    pub fn new(policy: TextPolicy) -> Self {
        Self {
            policy,
            mode: NormalizeMode::default(),
        }
    }

    /// Choose whether normalized text is written back to disk
    pub fn mode(mut self, mode: NormalizeMode) -> Self {
        self.mode = mode;
        self
    }

    /// Collect every regular file under `root`.
    ///
    /// At each directory level the files come first, sorted by name, then
    /// each subdirectory in name order is descended into. The returned order
    /// does not depend on on-disk directory order. In
    /// [`NormalizeMode::InPlace`] text files whose line endings change are
    /// rewritten on disk.
    pub fn normalize(&self, root: &Path) -> Result<Vec<SourceEntry>, MemzipError> {
        if !root.is_dir() {
            return Err(MemzipError::NotFound(root.to_path_buf()));
        }

        log::info!("Scanning source tree: {}", root.display());

        let mut entries = Vec::new();

        let walker = WalkDir::new(root).follow_links(false).sort_by(|a, b| {
            (a.file_type().is_dir(), a.file_name()).cmp(&(b.file_type().is_dir(), b.file_name()))
        });

        for entry in walker {
            let entry = entry?;
            let file_type = entry.file_type();

            if file_type.is_dir() {
                continue;
            }
            if !file_type.is_file() {
                log::warn!("Skipping non-regular file: {}", entry.path().display());
                continue;
            }

            let archive_path = PathSanitizer::archive_name(root, entry.path())?;
            entries.push(self.load(archive_path, entry.path())?);
        }

        let rewritten = entries.iter().filter(|e| e.rewritten).count();
        log::info!(
            "Collected {} files ({} text files rewritten)",
            entries.len(),
            rewritten
        );

        Ok(entries)
    }

    fn load(&self, archive_path: String, disk_path: &Path) -> Result<SourceEntry, MemzipError> {
        let raw = fs::read(disk_path).map_err(|e| MemzipError::io(disk_path, e))?;

        if !self.policy.is_text(&archive_path) {
            log::debug!("{archive_path}: binary, {} bytes", raw.len());
            return Ok(SourceEntry {
                archive_path,
                disk_path: disk_path.to_path_buf(),
                content: raw,
                kind: EntryKind::Binary,
                rewritten: false,
            });
        }

        let text =
            String::from_utf8(raw).map_err(|_| MemzipError::Encoding(disk_path.to_path_buf()))?;

        let normalized = match normalize_line_endings(&text) {
            Cow::Borrowed(_) => None,
            Cow::Owned(normalized) => Some(normalized),
        };
        let (content, rewritten) = match normalized {
            Some(normalized) => (normalized.into_bytes(), true),
            None => (text.into_bytes(), false),
        };

        if rewritten && self.mode == NormalizeMode::InPlace {
            write_back(disk_path, &content)?;
        }

        log::debug!(
            "{archive_path}: text, {} bytes{}",
            content.len(),
            if rewritten { ", line endings rewritten" } else { "" }
        );

        Ok(SourceEntry {
            archive_path,
            disk_path: disk_path.to_path_buf(),
            content,
            kind: EntryKind::Text,
            rewritten,
        })
    }
}

/// Replace a source file's content with its normalized form
fn write_back(disk_path: &Path, content: &[u8]) -> Result<(), MemzipError> {
    fs::write(disk_path, content).map_err(|e| MemzipError::io(disk_path, e))
}
