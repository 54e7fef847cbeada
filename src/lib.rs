//! Distributed Word Count Library
//!
//! Counts, for every word in a directory of text files, how often it occurs in each file.
//! One coordinator and a pool of workers run as tokio tasks that share nothing but a
//! message fabric and the phase stores.
//!
//! ## Phases
//! - **Map**: files are dealt round-robin to the workers; each worker records one
//!   occurrence per token into its own intermediate tree.
//! - **Reduce**: the alphabet is shuffled and split into one letter range per worker;
//!   each worker aggregates the words it owns across every intermediate tree.
//! - **Finalize**: worker 1 concatenates the per-word lists into a single sorted report.
//!
//! ## Modules
//! - **`coordinator`**: phase sequencing and the reply barriers between phases.
//! - **`worker`**: the per-worker state machine and the work of each phase.
//! - **`fabric`** / **`protocol`**: in-process point-to-point messaging and its messages.
//! - **`partition`**: file dealing and alphabet partitioning.
//! - **`normalizer`** / **`corpus`**: text cleanup and input file access.
//! - **`storage`**: the intermediate, output and final stores, on disk or in memory.
//! - **`config`** / **`pipeline`**: command-line configuration and whole-run orchestration.

pub mod config;
pub mod coordinator;
pub mod corpus;
pub mod error;
pub mod fabric;
pub mod normalizer;
pub mod partition;
pub mod pipeline;
pub mod protocol;
pub mod storage;
pub mod worker;
