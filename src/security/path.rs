use crate::error::MemzipError;
use std::path::{Component, Path};

pub struct PathSanitizer;

impl PathSanitizer {
    /// Turn a file found under `root` into its archive name.
    ///
    /// Archive names are relative, forward-slash separated and valid UTF-8
    /// regardless of the host platform. Rejects:
    /// - paths that do not live under `root`
    /// - parent directory components (../)
    /// - names that are not valid UTF-8
    pub fn archive_name(root: &Path, path: &Path) -> Result<String, MemzipError> {
        let relative = path.strip_prefix(root).map_err(|_| {
            MemzipError::InvalidPath(format!(
                "{} is outside {}",
                path.display(),
                root.display()
            ))
        })?;

        let mut components = Vec::new();

        for component in relative.components() {
            match component {
                Component::Prefix(_) | Component::RootDir => {
                    return Err(MemzipError::InvalidPath(format!(
                        "Absolute path not allowed: {}",
                        relative.display()
                    )));
                }
                Component::ParentDir => {
                    return Err(MemzipError::InvalidPath(format!(
                        "Parent directory traversal not allowed: {}",
                        relative.display()
                    )));
                }
                Component::CurDir => continue,
                Component::Normal(part) => {
                    let part_str = part.to_str().ok_or_else(|| {
                        MemzipError::InvalidPath(format!("Invalid UTF-8 in path: {:?}", part))
                    })?;
                    components.push(part_str);
                }
            }
        }

        if components.is_empty() {
            return Err(MemzipError::InvalidPath(format!(
                "No valid components: {}",
                path.display()
            )));
        }

        Ok(components.join("/"))
    }
}
