// Public API exports
pub mod archive;
pub mod config;
pub mod emitter;
pub mod error;
pub mod normalizer;
pub mod pipeline;
pub mod security;

// Re-export main types for convenience
pub use error::MemzipError;
pub use security::PathSanitizer;

pub use config::{MemzipConfig, NormalizeMode, TextPolicy, DEFAULT_SYMBOL, DEFAULT_TEXT_SUFFIXES};

pub use normalizer::{normalize_line_endings, EntryKind, SourceEntry, TreeNormalizer};

pub use archive::{
    archive_timestamp, compute_sha256, ArchiveBuilder, ArchiveSummary, ARCHIVE_EPOCH,
    ARCHIVE_PERMISSIONS,
};

pub use emitter::{BlobEmitter, BlobFormat, EmitSummary, ROW_WIDTH};

pub use pipeline::{Pipeline, PipelineReport};
