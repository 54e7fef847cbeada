//! Directory-Backed Store
//!
//! Persists the three stores as plain files. Appends open the file in append mode for
//! each write, so the content of every file is the concatenation of its writes in the
//! order they happened.

use super::Store;
use super::format::{
    FINAL_FILE_NAME, decode_occurrences, encode_counts, encode_occurrences, is_hidden,
};
use crate::protocol::types::{AggregatedCount, Rank};

use anyhow::{Context, Result};
use async_trait::async_trait;
use dashmap::DashSet;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;

pub struct FsStore {
    intermediate_dir: PathBuf,
    output_dir: PathBuf,
    final_dir: PathBuf,
    /// Ranks whose intermediate subdirectory is known to exist.
    rank_dirs: DashSet<Rank>,
}

impl FsStore {
    pub fn new(
        intermediate_dir: impl Into<PathBuf>,
        output_dir: impl Into<PathBuf>,
        final_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            intermediate_dir: intermediate_dir.into(),
            output_dir: output_dir.into(),
            final_dir: final_dir.into(),
            rank_dirs: DashSet::new(),
        }
    }

    pub fn final_file(&self) -> PathBuf {
        self.final_dir.join(FINAL_FILE_NAME)
    }

    fn rank_dir(&self, rank: Rank) -> PathBuf {
        self.intermediate_dir.join(rank.0.to_string())
    }

    async fn ensure_rank_dir(&self, rank: Rank) -> Result<PathBuf> {
        let dir = self.rank_dir(rank);
        if !self.rank_dirs.contains(&rank) {
            tokio::fs::create_dir_all(&dir)
                .await
                .with_context(|| format!("Failed to create {}", dir.display()))?;
            self.rank_dirs.insert(rank);
            tracing::debug!("Created intermediate directory {}", dir.display());
        }
        Ok(dir)
    }

    /// Visible file names in `dir`, sorted.
    async fn list_files(dir: &Path) -> Result<Vec<String>> {
        let mut entries = tokio::fs::read_dir(dir)
            .await
            .with_context(|| format!("Failed to list {}", dir.display()))?;

        let mut names = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let name = entry.file_name().to_string_lossy().into_owned();
            if !is_hidden(&name) && entry.file_type().await?.is_file() {
                names.push(name);
            }
        }
        names.sort();
        Ok(names)
    }

    async fn is_empty_dir(dir: &Path) -> Result<bool> {
        match tokio::fs::read_dir(dir).await {
            Ok(mut entries) => Ok(entries.next_entry().await?.is_none()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(true),
            Err(e) => Err(e).with_context(|| format!("Failed to list {}", dir.display())),
        }
    }
}

async fn append(path: &Path, content: &str) -> Result<()> {
    let mut file = tokio::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .await
        .with_context(|| format!("Failed to open {} for appending", path.display()))?;
    file.write_all(content.as_bytes())
        .await
        .with_context(|| format!("Failed to append to {}", path.display()))?;
    file.flush().await?;
    Ok(())
}

#[async_trait]
impl Store for FsStore {
    async fn prepare(&self, clean: bool) -> Result<()> {
        let roots = [&self.intermediate_dir, &self.output_dir, &self.final_dir];

        if clean {
            for dir in roots {
                match tokio::fs::remove_dir_all(dir).await {
                    Ok(()) => tracing::info!("Removed previous run data in {}", dir.display()),
                    Err(e) if e.kind() == ErrorKind::NotFound => {}
                    Err(e) => {
                        return Err(e).with_context(|| format!("Failed to clean {}", dir.display()));
                    }
                }
            }
            self.rank_dirs.clear();
        } else {
            for dir in roots {
                if !Self::is_empty_dir(dir).await? {
                    tracing::warn!(
                        "{} already holds data; new results will be appended to it",
                        dir.display()
                    );
                }
            }
        }

        for dir in roots {
            tokio::fs::create_dir_all(dir)
                .await
                .with_context(|| format!("Failed to create {}", dir.display()))?;
        }

        Ok(())
    }

    async fn append_occurrences(
        &self,
        rank: Rank,
        word: &str,
        source: &str,
        times: usize,
    ) -> Result<()> {
        let dir = self.ensure_rank_dir(rank).await?;
        append(&dir.join(word), &encode_occurrences(source, times)).await
    }

    async fn intermediate_entries(&self) -> Result<Vec<(Rank, String)>> {
        let mut ranks = Vec::new();
        let mut entries = tokio::fs::read_dir(&self.intermediate_dir)
            .await
            .with_context(|| format!("Failed to list {}", self.intermediate_dir.display()))?;

        while let Some(entry) = entries.next_entry().await? {
            if !entry.file_type().await?.is_dir() {
                continue;
            }
            // Only canonical rank names: `01` or `+1` would alias rank 1.
            let name = entry.file_name().to_string_lossy().into_owned();
            match name.parse::<u32>() {
                Ok(rank) if rank.to_string() == name => ranks.push(Rank(rank)),
                _ => tracing::debug!("Skipping foreign directory {}", entry.path().display()),
            }
        }
        ranks.sort();

        let mut result = Vec::new();
        for rank in ranks {
            for word in Self::list_files(&self.rank_dir(rank)).await? {
                result.push((rank, word));
            }
        }
        Ok(result)
    }

    async fn read_occurrences(&self, rank: Rank, word: &str) -> Result<Vec<String>> {
        let path = self.rank_dir(rank).join(word);
        let text = tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Ok(decode_occurrences(&text))
    }

    async fn append_counts(&self, word: &str, counts: &[AggregatedCount]) -> Result<()> {
        append(&self.output_dir.join(word), &encode_counts(counts)).await
    }

    async fn output_words(&self) -> Result<Vec<String>> {
        Self::list_files(&self.output_dir).await
    }

    async fn read_output(&self, word: &str) -> Result<String> {
        let path = self.output_dir.join(word);
        tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))
    }

    async fn append_report_line(&self, line: &str) -> Result<()> {
        append(&self.final_file(), line).await
    }

    async fn read_report(&self) -> Result<String> {
        let path = self.final_file();
        match tokio::fs::read_to_string(&path).await {
            Ok(text) => Ok(text),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(String::new()),
            Err(e) => Err(e).with_context(|| format!("Failed to read {}", path.display())),
        }
    }

    fn describe(&self) -> String {
        format!(
            "fs(intermediate={}, output={}, final={})",
            self.intermediate_dir.display(),
            self.output_dir.display(),
            self.final_dir.display()
        )
    }
}
