//! Typed Errors
//!
//! Most failures in the pipeline are I/O failures and travel as `anyhow::Error` with
//! context attached. The variants here are the ones callers may want to match on:
//! protocol violations detected by the worker state machine or the coordinator
//! barriers, and configuration that cannot describe a valid run.

use crate::protocol::types::{Rank, Tag};
use thiserror::Error;

/// A message arrived that the receiver's current state does not accept.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProtocolError {
    #[error("rank {rank} in state {state} cannot accept {tag:?} from rank {from}")]
    UnexpectedMessage {
        rank: Rank,
        from: Rank,
        state: String,
        tag: Tag,
    },

    #[error("barrier waiting for {expected:?} received {received:?} from rank {from}")]
    UnexpectedReply { expected: Tag, received: Tag, from: Rank },

    #[error("rank {from} acknowledged {tag:?} twice")]
    DuplicateReply { tag: Tag, from: Rank },

    #[error("rank {from} is not a worker of a {worker_count}-worker pool")]
    UnknownWorker { from: Rank, worker_count: usize },

    #[error("rank {from} cannot send {tag:?}, it flows the other way")]
    WrongDirection { from: Rank, tag: Tag },

    #[error("no route to rank {to}")]
    NoRoute { to: Rank },

    #[error("fabric closed while rank {rank} was waiting for a message")]
    FabricClosed { rank: Rank },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("worker count must be at least 1")]
    NoWorkers,

    #[error("{name} directory must not be empty")]
    EmptyPath { name: &'static str },
}
