use anyhow::{Context, Result};
use clap::Parser;
use memzip::{BlobFormat, MemzipConfig, NormalizeMode, Pipeline};
use std::path::PathBuf;

/// Generates a C source memzip file.
///
/// Packs SOURCE_DIR into an uncompressed, reproducible ZIP archive and
/// renders the archive as a static byte array.
#[derive(Parser, Debug)]
#[command(name = "memzip", version)]
struct Cli {
    /// Name of the created zip file [default: memzip_files.zip]
    #[arg(short = 'z', long = "zip-file")]
    zip_file: Option<PathBuf>,

    /// Name of the created C source file [default: memzip_files.c]
    #[arg(short = 'c', long = "c-file")]
    c_file: Option<PathBuf>,

    /// Directory to package [default: memzip_files]
    source_dir: Option<PathBuf>,

    /// Output language of the embedded array
    #[arg(long, value_enum)]
    format: Option<BlobFormat>,

    /// Name of the emitted array
    #[arg(long)]
    symbol: Option<String>,

    /// File-name suffix treated as text (repeatable, replaces the default .py/.md set)
    #[arg(long = "text-suffix")]
    text_suffixes: Vec<String>,

    /// Normalize text in memory instead of rewriting source files
    #[arg(long)]
    in_memory: bool,

    /// JSON config file; command-line flags take precedence
    #[arg(long)]
    config: Option<PathBuf>,
}

impl Cli {
    fn into_config(self) -> Result<MemzipConfig> {
        let mut config = match &self.config {
            Some(path) => MemzipConfig::load(path)
                .with_context(|| format!("Failed to load config: {}", path.display()))?,
            None => MemzipConfig::default(),
        };

        if let Some(zip_file) = self.zip_file {
            config.zip_file = zip_file;
        }
        if let Some(c_file) = self.c_file {
            config.c_file = c_file;
        }
        if let Some(source_dir) = self.source_dir {
            config.source_dir = source_dir;
        }
        if let Some(format) = self.format {
            config.format = format;
        }
        if let Some(symbol) = self.symbol {
            config.symbol = symbol;
        }
        if !self.text_suffixes.is_empty() {
            config.text_suffixes = self.text_suffixes;
        }
        if self.in_memory {
            config.normalize = NormalizeMode::InMemory;
        }

        Ok(config)
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let config = Cli::parse().into_config()?;

    println!("zip_file = {}", config.zip_file.display());
    println!("c_file = {}", config.c_file.display());
    println!("source_dir = {}", config.source_dir.display());

    let report = Pipeline::new(config)
        .run()
        .context("memzip generation failed")?;

    println!(
        "✓ Packed {} files ({} text files rewritten) into {} bytes",
        report.entry_count, report.rewritten_count, report.archive.size_bytes
    );
    println!("  sha256 = {}", report.archive.sha256);
    println!(
        "  wrote {} ({} rows)",
        report.artifact.path.display(),
        report.artifact.rows
    );

    Ok(())
}
