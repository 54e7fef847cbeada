//! In-Memory Store
//!
//! Keeps the three stores in process memory. The intermediate store mirrors the
//! directory layout: `Rank -> word -> occurrence list`, so every worker writes into
//! its own inner map.

use super::Store;
use super::format::{decode_occurrences, encode_counts, encode_occurrences, is_hidden};
use crate::protocol::types::{AggregatedCount, Rank};

use anyhow::Result;
use async_trait::async_trait;
use dashmap::DashMap;
use tokio::sync::RwLock;

#[derive(Default)]
pub struct MemoryStore {
    intermediate: DashMap<Rank, DashMap<String, String>>,
    output: DashMap<String, String>,
    report: RwLock<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn intermediate_entry_count(&self) -> usize {
        self.intermediate
            .iter()
            .map(|entry| entry.value().len())
            .sum()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn prepare(&self, clean: bool) -> Result<()> {
        if clean {
            self.intermediate.clear();
            self.output.clear();
            self.report.write().await.clear();
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
        let rank_map = self.intermediate.entry(rank).or_default();
        rank_map
            .entry(word.to_string())
            .or_default()
            .push_str(&encode_occurrences(source, times));
        Ok(())
    }

    async fn intermediate_entries(&self) -> Result<Vec<(Rank, String)>> {
        let mut entries: Vec<(Rank, String)> = self
            .intermediate
            .iter()
            .flat_map(|rank_map| {
                let rank = *rank_map.key();
                rank_map
                    .value()
                    .iter()
                    .map(|word| (rank, word.key().clone()))
                    .collect::<Vec<_>>()
            })
            .collect();
        entries.sort();
        Ok(entries)
    }

    async fn read_occurrences(&self, rank: Rank, word: &str) -> Result<Vec<String>> {
        let rank_map = self
            .intermediate
            .get(&rank)
            .ok_or_else(|| anyhow::anyhow!("No intermediate data for rank {}", rank))?;
        let text = rank_map.get(word).ok_or_else(|| {
            anyhow::anyhow!("No intermediate list for {:?} in rank {}", word, rank)
        })?;
        Ok(decode_occurrences(text.value()))
    }

    async fn append_counts(&self, word: &str, counts: &[AggregatedCount]) -> Result<()> {
        self.output
            .entry(word.to_string())
            .or_default()
            .push_str(&encode_counts(counts));
        Ok(())
    }

    async fn output_words(&self) -> Result<Vec<String>> {
        let mut words: Vec<String> = self
            .output
            .iter()
            .map(|entry| entry.key().clone())
            .filter(|word| !is_hidden(word))
            .collect();
        words.sort();
        Ok(words)
    }

    async fn read_output(&self, word: &str) -> Result<String> {
        self.output
            .get(word)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| anyhow::anyhow!("No output list for {:?}", word))
    }

    async fn append_report_line(&self, line: &str) -> Result<()> {
        self.report.write().await.push_str(line);
        Ok(())
    }

    async fn read_report(&self) -> Result<String> {
        Ok(self.report.read().await.clone())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}
