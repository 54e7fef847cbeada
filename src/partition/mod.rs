//! Work Partitioning
//!
//! The two distribution policies of a run, kept as pure functions so that the
//! coordinator's decisions can be reproduced and tested in isolation.
//!
//! - **Files** (map phase): round-robin over worker ranks `1..=N`.
//! - **Alphabet** (reduce phase): a seeded shuffle of `a..=z` cut into `N` contiguous
//!   chunks. Initial-letter frequency is heavily skewed in natural language, so the
//!   shuffle spreads the heavy letters instead of handing one worker a dense slice.

pub mod alphabet;
pub mod files;

pub use alphabet::{ALPHABET, partition_alphabet};
pub use files::round_robin;
