//! Coordinator Module
//!
//! Rank 0 of a run. It owns the global phase sequence:
//! 1. **Map**: enumerate the corpus, assign files round-robin, announce the end of input and
//!    wait for every `EndOfMapping`.
//! 2. **Reduce**: partition the shuffled alphabet, send one range per worker and wait for
//!    every `EndOfReducing`.
//! 3. **Finalize**: signal the designated worker.
//!
//! Neither barrier times out or retries. A worker that stops responding stalls the run.

pub mod barrier;
pub mod coordinator;

pub use barrier::ReplyBarrier;
pub use coordinator::{Coordinator, CoordinatorReport};
