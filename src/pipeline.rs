use crate::archive::{ArchiveBuilder, ArchiveSummary};
use crate::config::MemzipConfig;
use crate::emitter::{BlobEmitter, EmitSummary};
use crate::error::MemzipError;
use crate::normalizer::TreeNormalizer;
use std::fs;
use std::path::{self, Path, PathBuf};

/// Outcome of a full run
#[derive(Debug, Clone)]
pub struct PipelineReport {
    pub entry_count: usize,
    /// Text files whose line endings were rewritten
    pub rewritten_count: usize,
    pub archive: ArchiveSummary,
    pub artifact: EmitSummary,
}

/// Normalize, archive, then emit, stopping at the first failure
pub struct Pipeline {
    config: MemzipConfig,
}

impl Pipeline {
    pub fn new(config: MemzipConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MemzipConfig {
        &self.config
    }

    pub fn run(&self) -> Result<PipelineReport, MemzipError> {
        let config = &self.config;

        // Validate everything before touching the source tree
        let emitter = BlobEmitter::new(config.format, config.symbol.as_str())?;
        let builder = ArchiveBuilder::new()?;
        self.check_outputs()?;

        let entries = TreeNormalizer::new(config.text_policy())
            .mode(config.normalize)
            .normalize(&config.source_dir)?;
        let rewritten_count = entries.iter().filter(|e| e.rewritten).count();

        let archive = builder.write_file(&config.zip_file, &entries)?;
        let artifact = emitter.emit_file(&archive.path, &config.c_file)?;

        Ok(PipelineReport {
            entry_count: entries.len(),
            rewritten_count,
            archive,
            artifact,
        })
    }

    /// Outputs written under the source root would be packed by the next run
    fn check_outputs(&self) -> Result<(), MemzipError> {
        let source_dir = &self.config.source_dir;
        if !source_dir.is_dir() {
            return Err(MemzipError::NotFound(source_dir.to_path_buf()));
        }
        let root = fs::canonicalize(source_dir).map_err(|e| MemzipError::io(source_dir, e))?;

        for output in [&self.config.zip_file, &self.config.c_file] {
            if resolve(output).starts_with(&root) {
                return Err(MemzipError::Config(format!(
                    "Output {} is inside the source directory {}",
                    output.display(),
                    source_dir.display()
                )));
            }
        }
        Ok(())
    }
}

/// Absolute form of a path whose final component may not exist yet
fn resolve(path: &Path) -> PathBuf {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    match (fs::canonicalize(parent), path.file_name()) {
        (Ok(parent), Some(name)) => parent.join(name),
        _ => path::absolute(path).unwrap_or_else(|_| path.to_path_buf()),
    }
}
