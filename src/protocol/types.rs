use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Identity of a participant on the fabric.
///
/// Rank 0 is always the coordinator; workers are numbered from 1.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Rank(pub u32);

impl Rank {
    pub const COORDINATOR: Rank = Rank(0);

    /// The worker that builds the final report once every reduce step is done.
    pub const FINALIZER: Rank = Rank(1);

    /// Ranks of every worker in a pool of `worker_count`.
    pub fn workers(worker_count: usize) -> impl Iterator<Item = Rank> {
        (1..=worker_count as u32).map(Rank)
    }

    pub fn is_worker_of(&self, worker_count: usize) -> bool {
        self.0 >= 1 && (self.0 as usize) <= worker_count
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Logical channel discriminator of a message.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Tag {
    FileName = 0,
    EndOfFiles = 1,
    EndOfMapping = 2,
    StartReducing = 3,
    EndOfReducing = 4,
    CreateFinalFile = 5,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    ToWorker,
    ToCoordinator,
}

impl Tag {
    pub fn direction(&self) -> Direction {
        match self {
            Tag::EndOfMapping | Tag::EndOfReducing => Direction::ToCoordinator,
            _ => Direction::ToWorker,
        }
    }
}

/// The wire protocol between the coordinator and its workers.
///
/// - `FileName/EndOfFiles`: the map-phase assignment stream (no per-item acknowledgment).
/// - `EndOfMapping/EndOfReducing`: acknowledgments counted by the coordinator barriers.
/// - `StartReducing`: one letter range per worker.
/// - `CreateFinalFile`: sent once, to the designated finalizer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Message {
    FileName(String),

    EndOfFiles,

    EndOfMapping { rank: Rank },

    StartReducing(LetterRange),

    EndOfReducing { rank: Rank },

    CreateFinalFile,
}

impl Message {
    pub fn tag(&self) -> Tag {
        match self {
            Message::FileName(_) => Tag::FileName,
            Message::EndOfFiles => Tag::EndOfFiles,
            Message::EndOfMapping { .. } => Tag::EndOfMapping,
            Message::StartReducing(_) => Tag::StartReducing,
            Message::EndOfReducing { .. } => Tag::EndOfReducing,
            Message::CreateFinalFile => Tag::CreateFinalFile,
        }
    }
}

/// A message in flight, stamped with its endpoints by the fabric.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Envelope {
    pub from: Rank,
    pub to: Rank,
    pub message: Message,
}

/// The set of leading letters a worker reduces.
///
/// `overflow` marks the range that also owns words whose first character is not
/// a lowercase ASCII letter. Exactly one range of a partition carries it: the last one,
/// which also receives the remainder letters.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct LetterRange {
    pub letters: BTreeSet<char>,
    pub overflow: bool,
}

impl LetterRange {
    pub fn new(letters: impl IntoIterator<Item = char>, overflow: bool) -> Self {
        Self {
            letters: letters.into_iter().collect(),
            overflow,
        }
    }

    pub fn contains(&self, letter: char) -> bool {
        self.letters.contains(&letter)
    }

    /// Whether the word's intermediate files belong to this range.
    pub fn owns(&self, word: &str) -> bool {
        match word.chars().next() {
            Some(first) if first.is_ascii_lowercase() => self.contains(first),
            Some(_) => self.overflow,
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.letters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.letters.is_empty()
    }
}

impl fmt::Display for LetterRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letters: String = self.letters.iter().collect();
        if self.overflow {
            write!(f, "[{}+]", letters)
        } else {
            write!(f, "[{}]", letters)
        }
    }
}

/// One `(source file, count)` pair of a word, produced by a reduce step.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AggregatedCount {
    pub source: String,
    pub count: usize,
}

impl fmt::Display for AggregatedCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}) ", self.source, self.count)
    }
}
