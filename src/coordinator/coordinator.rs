//! Phase Coordinator
//!
//! Drives a run through map, reduce and finalize. Between the two barriers the
//! coordinator only sends; it suspends solely while a barrier collects replies.

use super::barrier::ReplyBarrier;
use crate::corpus::Corpus;
use crate::fabric::Endpoint;
use crate::partition::{partition_alphabet, round_robin};
use crate::protocol::types::{LetterRange, Message, Rank, Tag};

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The decisions the coordinator took during a run.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CoordinatorReport {
    pub seed: u64,
    pub worker_count: usize,
    /// Worker rank -> files it was sent, in send order.
    pub file_assignments: BTreeMap<u32, Vec<String>>,
    /// Letter range per worker, indexed by `rank - 1`.
    pub letter_ranges: Vec<LetterRange>,
    pub map_ack_order: Vec<u32>,
    pub reduce_ack_order: Vec<u32>,
}

pub struct Coordinator {
    endpoint: Endpoint,
    corpus: Corpus,
    worker_count: usize,
    seed: u64,
}

impl Coordinator {
    pub fn new(endpoint: Endpoint, corpus: Corpus, worker_count: usize, seed: u64) -> Self {
        Self {
            endpoint,
            corpus,
            worker_count,
            seed,
        }
    }

    /// Runs every phase in order and returns once the finalize signal is sent.
    pub async fn run(mut self) -> Result<CoordinatorReport> {
        let mut report = CoordinatorReport {
            seed: self.seed,
            worker_count: self.worker_count,
            ..CoordinatorReport::default()
        };

        let files = self.enumerate_input_files().await?;
        tracing::info!(
            "Distributing {} files from {} to {} workers",
            files.len(),
            self.corpus.root().display(),
            self.worker_count
        );
        report.file_assignments = self.distribute_files(&files)?;

        report.map_ack_order = self.announce_end_of_files().await?;
        tracing::info!("Map phase complete");

        let ranges = partition_alphabet(self.worker_count, self.seed);
        self.distribute_letter_ranges(&ranges)?;
        report.letter_ranges = ranges;

        report.reduce_ack_order = self.await_reduce_completion().await?;
        tracing::info!("Reduce phase complete");

        self.trigger_finalize(Rank::FINALIZER)?;

        Ok(report)
    }

    pub async fn enumerate_input_files(&self) -> Result<Vec<String>> {
        self.corpus.enumerate_input_files().await
    }

    /// Sends one `FileName` per file, cycling over the workers. No replies are expected.
    pub fn distribute_files(&self, files: &[String]) -> Result<BTreeMap<u32, Vec<String>>> {
        let mut assignments: BTreeMap<u32, Vec<String>> = Rank::workers(self.worker_count)
            .map(|rank| (rank.0, Vec::new()))
            .collect();

        for (rank, file) in round_robin(files, self.worker_count) {
            tracing::debug!("Assigning {} to worker {}", file, rank);
            self.endpoint.send(rank, Message::FileName(file.clone()))?;
            assignments.entry(rank.0).or_default().push(file);
        }

        Ok(assignments)
    }

    /// Sends `EndOfFiles` to every worker and waits for all `EndOfMapping` replies.
    ///
    /// Returns the ranks in the order their replies arrived.
    pub async fn announce_end_of_files(&mut self) -> Result<Vec<u32>> {
        for rank in Rank::workers(self.worker_count) {
            self.endpoint.send(rank, Message::EndOfFiles)?;
        }

        let mut barrier = ReplyBarrier::new(Tag::EndOfMapping, self.worker_count);
        barrier.wait(&mut self.endpoint).await?;

        Ok(barrier.arrival_order().iter().map(|rank| rank.0).collect())
    }

    /// Sends range `i` to worker `i + 1`.
    pub fn distribute_letter_ranges(&self, ranges: &[LetterRange]) -> Result<()> {
        for (rank, range) in Rank::workers(self.worker_count).zip(ranges) {
            tracing::info!("Worker {} reduces {} ({} letters)", rank, range, range.len());
            self.endpoint
                .send(rank, Message::StartReducing(range.clone()))?;
        }
        Ok(())
    }

    /// Waits for one `EndOfReducing` from every worker, in any order.
    pub async fn await_reduce_completion(&mut self) -> Result<Vec<u32>> {
        let mut barrier = ReplyBarrier::new(Tag::EndOfReducing, self.worker_count);
        barrier.wait(&mut self.endpoint).await?;

        Ok(barrier.arrival_order().iter().map(|rank| rank.0).collect())
    }

    pub fn trigger_finalize(&self, rank: Rank) -> Result<()> {
        tracing::info!("Asking worker {} to create the final file", rank);
        self.endpoint.send(rank, Message::CreateFinalFile)?;
        Ok(())
    }
}
