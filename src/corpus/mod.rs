//! Input Corpus
//!
//! Read-only access to the directory of text files a run counts words in.

use crate::normalizer::decode_lossy;

use anyhow::{Context, Result};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct Corpus {
    root: PathBuf,
}

impl Corpus {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Names of the regular, non-hidden files in the input directory, sorted.
    pub async fn enumerate_input_files(&self) -> Result<Vec<String>> {
        let mut entries = tokio::fs::read_dir(&self.root)
            .await
            .with_context(|| format!("Failed to list input directory {}", self.root.display()))?;

        let mut names = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let name = entry.file_name().to_string_lossy().into_owned();
            if name.starts_with('.') {
                continue;
            }
            // Symlinks count when their target is a regular file.
            let path = entry.path();
            let is_file = match tokio::fs::metadata(&path).await {
                Ok(metadata) => metadata.is_file(),
                Err(e) if e.kind() == ErrorKind::NotFound => {
                    tracing::warn!("Skipping dangling link {}", path.display());
                    false
                }
                Err(e) => {
                    return Err(e).with_context(|| format!("Failed to inspect {}", path.display()));
                }
            };
            if is_file {
                names.push(name);
            }
        }

        names.sort();
        Ok(names)
    }

    /// Reads one input file, skipping byte sequences that are not valid UTF-8.
    pub async fn read(&self, name: &str) -> Result<String> {
        let path = self.root.join(name);
        let bytes = tokio::fs::read(&path)
            .await
            .with_context(|| format!("Failed to read input file {}", path.display()))?;
        Ok(decode_lossy(&bytes))
    }
}
