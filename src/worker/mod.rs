//! Worker Module
//!
//! A worker maps the files it is sent, reduces the letter range it is assigned and, if
//! it is the designated finalizer (rank 1), assembles the final report.
//!
//! ## Submodules
//! - **`state`**: the worker lifecycle and the per-run report.
//! - **`steps`**: map, reduce and finalize, written against the `Store` trait.
//! - **`worker`**: the message loop that moves a worker between states.

pub mod state;
pub mod steps;
pub mod worker;

pub use state::{WorkerReport, WorkerState};
pub use worker::Worker;
