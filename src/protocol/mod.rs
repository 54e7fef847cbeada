//! Coordination Protocol
//!
//! Defines the tagged messages exchanged between the coordinator (rank 0) and the
//! workers (ranks `1..=N`), together with the work items they carry.
//!
//! ## Phases
//! 1. **Map**: `FileName` per input file, then `EndOfFiles`; each worker answers `EndOfMapping`.
//! 2. **Reduce**: one `StartReducing` per worker; each worker answers `EndOfReducing`.
//! 3. **Finalize**: a single `CreateFinalFile` to the designated worker.
//!
//! Delivery between one sender and one receiver is FIFO. Nothing is ordered across
//! different pairs, which is why acknowledgments are counted, never sequenced.

pub mod types;

#[cfg(test)]
mod tests;
