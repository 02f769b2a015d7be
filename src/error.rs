use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MemzipError {
    #[error("Source directory not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Text file is not valid UTF-8: {}", .0.display())]
    Encoding(PathBuf),

    #[error("Invalid path in source tree: {0}")]
    InvalidPath(String),

    #[error("Failed to write ZIP archive: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("Failed to walk source tree: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl MemzipError {
    /// Attach the offending path to an I/O error
    pub fn io(path: impl AsRef<Path>, source: io::Error) -> Self {
        MemzipError::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}
