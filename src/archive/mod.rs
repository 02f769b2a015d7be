mod digest;

pub use digest::compute_sha256;

use crate::error::MemzipError;
use crate::normalizer::SourceEntry;
use chrono::{Datelike, Timelike};
use std::fs::{self, File};
use std::io::{ErrorKind, Seek, Write};
use std::path::{Path, PathBuf};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Modification time stamped on every entry: the Bitcoin genesis block,
/// 2009-01-03 18:15:05 UTC.
pub const ARCHIVE_EPOCH: i64 = 1_231_006_505;

/// Unix permission bits stamped on every entry
pub const ARCHIVE_PERMISSIONS: u32 = 0o644;

/// Result of writing an archive to disk
#[derive(Debug, Clone)]
pub struct ArchiveSummary {
    pub path: PathBuf,
    pub entry_count: usize,
    pub size_bytes: u64,
    /// Lowercase hex SHA-256 of the archive file
    pub sha256: String,
}

/// The fixed entry timestamp as an MS-DOS date/time.
///
/// Computed in UTC so the result does not depend on the host timezone.
pub fn archive_timestamp() -> Result<zip::DateTime, MemzipError> {
    let epoch = chrono::DateTime::from_timestamp(ARCHIVE_EPOCH, 0)
        .ok_or_else(|| MemzipError::Config(format!("Invalid archive epoch: {ARCHIVE_EPOCH}")))?;

    zip::DateTime::from_date_and_time(
        epoch.year() as u16,
        epoch.month() as u8,
        epoch.day() as u8,
        epoch.hour() as u8,
        epoch.minute() as u8,
        epoch.second() as u8,
    )
    .map_err(|e| MemzipError::Config(format!("Archive epoch not representable: {e}")))
}

/// Writes store-only ZIP archives with normalized entry metadata
pub struct ArchiveBuilder {
    options: SimpleFileOptions,
}

impl ArchiveBuilder {
    pub fn new() -> Result<Self, MemzipError> {
        let options = SimpleFileOptions::default()
            .compression_method(CompressionMethod::Stored)
            .unix_permissions(ARCHIVE_PERMISSIONS)
            .last_modified_time(archive_timestamp()?);

        Ok(Self { options })
    }

    /// Write `entries` in the order given and return the finished writer.
    ///
    /// The order is significant to the output bytes and is never changed here.
    pub fn write_to<W: Write + Seek>(
        &self,
        writer: W,
        entries: &[SourceEntry],
    ) -> Result<W, MemzipError> {
        let mut zip = ZipWriter::new(writer);

        for entry in entries {
            log::debug!(
                "Adding {} ({} bytes)",
                entry.archive_path,
                entry.content.len()
            );
            zip.start_file(entry.archive_path.as_str(), self.options)?;
            zip.write_all(&entry.content)
                .map_err(|e| MemzipError::io(&entry.disk_path, e))?;
        }

        Ok(zip.finish()?)
    }

    /// Build a fresh archive at `dest`, replacing any existing file
    pub fn write_file(
        &self,
        dest: &Path,
        entries: &[SourceEntry],
    ) -> Result<ArchiveSummary, MemzipError> {
        match fs::remove_file(dest) {
            Ok(()) => log::debug!("Removed previous archive: {}", dest.display()),
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => return Err(MemzipError::io(dest, e)),
        }

        let file = File::create(dest).map_err(|e| MemzipError::io(dest, e))?;
        let mut file = self.write_to(file, entries)?;
        file.flush().map_err(|e| MemzipError::io(dest, e))?;
        drop(file);

        let size_bytes = fs::metadata(dest)
            .map_err(|e| MemzipError::io(dest, e))?
            .len();
        let sha256 = compute_sha256(dest)?;

        log::info!(
            "Wrote {} entries to {} ({} bytes)",
            entries.len(),
            dest.display(),
            size_bytes
        );

        Ok(ArchiveSummary {
            path: dest.to_path_buf(),
            entry_count: entries.len(),
            size_bytes,
            sha256,
        })
    }
}
