use crate::emitter::BlobFormat;
use crate::error::MemzipError;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// File-name suffixes treated as text when no override is given
pub const DEFAULT_TEXT_SUFFIXES: &[&str] = &[".py", ".md"];

/// Symbol name of the emitted byte array
pub const DEFAULT_SYMBOL: &str = "memzip_data";

/// Where normalized text content ends up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NormalizeMode {
    /// Rewrite changed text files on disk before archiving
    #[default]
    InPlace,
    /// Keep normalized content in memory, leaving the source tree untouched
    InMemory,
}

/// Suffix matcher deciding which files get line-ending normalization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextPolicy {
    suffixes: Vec<String>,
}

impl TextPolicy {
    pub fn new<I, S>(suffixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            suffixes: suffixes.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether the archive path names a text file.
    ///
    /// Matching is a case-sensitive suffix test on the final path component.
    pub fn is_text(&self, archive_path: &str) -> bool {
        let file_name = archive_path.rsplit('/').next().unwrap_or(archive_path);
        self.suffixes.iter().any(|s| file_name.ends_with(s.as_str()))
    }
}

impl Default for TextPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_TEXT_SUFFIXES.iter().copied())
    }
}

/// Run configuration, loadable from JSON
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MemzipConfig {
    pub zip_file: PathBuf,
    pub c_file: PathBuf,
    pub source_dir: PathBuf,
    pub text_suffixes: Vec<String>,
    pub symbol: String,
    pub format: BlobFormat,
    pub normalize: NormalizeMode,
}

impl Default for MemzipConfig {
    fn default() -> Self {
        Self {
            zip_file: PathBuf::from("memzip_files.zip"),
            c_file: PathBuf::from("memzip_files.c"),
            source_dir: PathBuf::from("memzip_files"),
            text_suffixes: DEFAULT_TEXT_SUFFIXES.iter().map(|s| s.to_string()).collect(),
            symbol: DEFAULT_SYMBOL.to_string(),
            format: BlobFormat::default(),
            normalize: NormalizeMode::default(),
        }
    }
}

impl MemzipConfig {
    /// Load a JSON config file; absent fields keep their defaults
    pub fn load(path: &Path) -> Result<Self, MemzipError> {
        let contents = fs::read_to_string(path).map_err(|e| MemzipError::io(path, e))?;
        Self::from_json(&contents)
    }

    pub fn from_json(contents: &str) -> Result<Self, MemzipError> {
        serde_json::from_str(contents).map_err(|e| MemzipError::Config(e.to_string()))
    }

    pub fn text_policy(&self) -> TextPolicy {
        TextPolicy::new(self.text_suffixes.iter().cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy_matches_py_and_md() {
        let policy = TextPolicy::default();
        assert!(policy.is_text("README.md"));
        assert!(policy.is_text("lib/boot.py"));
        assert!(!policy.is_text("image.png"));
        assert!(!policy.is_text("notes.MD"));
    }

    #[test]
    fn test_policy_only_inspects_file_name() {
        let policy = TextPolicy::new([".md"]);
        assert!(!policy.is_text("docs.md/blob.bin"));
        assert!(policy.is_text("docs.md/index.md"));
    }

    #[test]
    fn test_empty_json_gives_defaults() {
        let config = MemzipConfig::from_json("{}").unwrap();
        assert_eq!(config.zip_file, PathBuf::from("memzip_files.zip"));
        assert_eq!(config.c_file, PathBuf::from("memzip_files.c"));
        assert_eq!(config.source_dir, PathBuf::from("memzip_files"));
        assert_eq!(config.symbol, "memzip_data");
        assert_eq!(config.format, BlobFormat::C);
        assert_eq!(config.normalize, NormalizeMode::InPlace);
        assert_eq!(config.text_policy(), TextPolicy::default());
    }

    #[test]
    fn test_json_overrides() {
        let config = MemzipConfig::from_json(
            r#"{"text_suffixes": [".txt"], "format": "rust", "normalize": "in-memory"}"#,
        )
        .unwrap();
        assert_eq!(config.text_suffixes, vec![".txt".to_string()]);
        assert_eq!(config.format, BlobFormat::Rust);
        assert_eq!(config.normalize, NormalizeMode::InMemory);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result = MemzipConfig::from_json(r#"{"compression": "deflate"}"#);
        assert!(matches!(result, Err(MemzipError::Config(_))));
    }
}
