//! Phase Steps
//!
//! The work a worker performs in each phase, independent of the message loop that
//! decides when to perform it.

use crate::corpus::Corpus;
use crate::normalizer::tokens;
use crate::protocol::types::{AggregatedCount, LetterRange, Rank};
use crate::storage::Store;
use crate::storage::format::report_line;

use anyhow::Result;
use std::collections::{BTreeMap, HashMap};

/// Maps one input file into the intermediate tree of `rank`.
///
/// Returns the number of non-empty tokens recorded. Occurrences of the same word are
/// appended in one write, which leaves the same content as one append per token.
pub async fn map_file(
    store: &dyn Store,
    corpus: &Corpus,
    rank: Rank,
    file: &str,
) -> Result<usize> {
    let text = corpus.read(file).await?;

    let mut occurrences: HashMap<String, usize> = HashMap::new();
    for token in tokens(&text) {
        if token.is_empty() {
            continue;
        }
        *occurrences.entry(token).or_insert(0) += 1;
    }

    let total = occurrences.values().sum();
    for (word, times) in occurrences {
        store.append_occurrences(rank, &word, file, times).await?;
    }

    tracing::debug!("Worker {} mapped {} ({} tokens)", rank, file, total);
    Ok(total)
}

/// Counts repetitions per source file, in order of first appearance.
pub fn count_occurrences(sources: impl IntoIterator<Item = String>) -> Vec<AggregatedCount> {
    let mut counts: Vec<AggregatedCount> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for source in sources {
        match index.get(&source) {
            Some(&slot) => counts[slot].count += 1,
            None => {
                index.insert(source.clone(), counts.len());
                counts.push(AggregatedCount { source, count: 1 });
            }
        }
    }

    counts
}

/// Reduces every word owned by `range`, reading the lists of all worker trees.
///
/// Lists of one word are read in ascending rank order and counted together, so a
/// source file seen by several workers still yields a single pair. Returns the number
/// of words written to the output store.
pub async fn reduce_range(store: &dyn Store, range: &LetterRange) -> Result<usize> {
    // Pools larger than the alphabet leave some workers with nothing to own.
    if range.is_empty() && !range.overflow {
        return Ok(0);
    }

    let mut owners: BTreeMap<String, Vec<Rank>> = BTreeMap::new();
    for (rank, word) in store.intermediate_entries().await? {
        if range.owns(&word) {
            owners.entry(word).or_default().push(rank);
        }
    }

    for (word, ranks) in &owners {
        let mut sources = Vec::new();
        for rank in ranks {
            sources.extend(store.read_occurrences(*rank, word).await?);
        }

        let counts = count_occurrences(sources);
        tracing::trace!("{} -> {} source files", word, counts.len());
        store.append_counts(word, &counts).await?;
    }

    Ok(owners.len())
}

/// Writes one report line per output list, in sorted word order.
///
/// Returns the number of lines written.
pub async fn build_report(store: &dyn Store) -> Result<usize> {
    let words = store.output_words().await?;

    for word in &words {
        let contents = store.read_output(word).await?;
        store.append_report_line(&report_line(word, &contents)).await?;
    }

    Ok(words.len())
}
