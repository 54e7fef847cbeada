//! Phase Storage Module
//!
//! The three stores that carry state from one phase to the next.
//!
//! ## Stores
//! - **Intermediate**: one append-only list per `(worker rank, word)`, holding the source file
//!   name once per occurrence. Written while mapping, read while reducing.
//! - **Output**: one append-only list per word, holding `(source, count)` pairs. Each word is
//!   written by exactly one reducer, so no locking is needed across workers.
//! - **Final**: the single report, one line per word in sorted order.
//!
//! ## Backends
//! - **`fs`**: the durable directory layout `intermediary/<rank>/<word>`, `output/<word>` and
//!   `final/finalFile`.
//! - **`memory`**: the same stores held in `DashMap`s, for runs that need no durability.

pub mod format;
pub mod fs;
pub mod memory;

use crate::protocol::types::{AggregatedCount, Rank};

use anyhow::Result;
use async_trait::async_trait;

pub use fs::FsStore;
pub use memory::MemoryStore;

#[async_trait]
pub trait Store: Send + Sync {
    /// Creates whatever the backend needs before the first write. With `clean`, state
    /// left behind by an earlier run is discarded first.
    async fn prepare(&self, clean: bool) -> Result<()>;

    // --- Intermediate store ---

    /// Records `times` occurrences of `word` in `source`, in the tree of worker `rank`.
    async fn append_occurrences(
        &self,
        rank: Rank,
        word: &str,
        source: &str,
        times: usize,
    ) -> Result<()>;

    /// Every `(rank, word)` list present, sorted by rank then word.
    async fn intermediate_entries(&self) -> Result<Vec<(Rank, String)>>;

    /// The source file names recorded for `word` by worker `rank`, one per occurrence.
    async fn read_occurrences(&self, rank: Rank, word: &str) -> Result<Vec<String>>;

    // --- Output store ---

    async fn append_counts(&self, word: &str, counts: &[AggregatedCount]) -> Result<()>;

    /// Words with an output list, sorted, hidden names excluded.
    async fn output_words(&self) -> Result<Vec<String>>;

    async fn read_output(&self, word: &str) -> Result<String>;

    // --- Final report ---

    async fn append_report_line(&self, line: &str) -> Result<()>;

    /// The report as written so far; empty if nothing was written.
    async fn read_report(&self) -> Result<String>;

    /// Short human-readable description for logs.
    fn describe(&self) -> String;
}

#[cfg(test)]
mod tests;
