use crate::error::ProtocolError;
use crate::fabric::Endpoint;
use crate::protocol::types::{Envelope, Rank, Tag};

use std::collections::BTreeSet;

/// Counts acknowledgments of one phase until every worker has replied.
///
/// Arrival order is irrelevant; completion is reached when `worker_count` distinct worker
/// ranks have replied with `tag`. There is no timeout: a worker that never replies keeps
/// `wait` suspended.
#[derive(Debug)]
pub struct ReplyBarrier {
    tag: Tag,
    worker_count: usize,
    arrived: BTreeSet<Rank>,
    order: Vec<Rank>,
}

impl ReplyBarrier {
    pub fn new(tag: Tag, worker_count: usize) -> Self {
        Self {
            tag,
            worker_count,
            arrived: BTreeSet::new(),
            order: Vec::with_capacity(worker_count),
        }
    }

    pub fn tag(&self) -> Tag {
        self.tag
    }

    pub fn arrived(&self) -> usize {
        self.arrived.len()
    }

    pub fn is_complete(&self) -> bool {
        self.arrived.len() == self.worker_count
    }

    /// Ranks in the order their acknowledgments were recorded.
    pub fn arrival_order(&self) -> &[Rank] {
        &self.order
    }

    /// Accounts for one reply, rejecting anything that is not a first acknowledgment
    /// with the expected tag from a worker of the pool.
    pub fn record(&mut self, envelope: &Envelope) -> Result<(), ProtocolError> {
        let received = envelope.message.tag();
        if received != self.tag {
            return Err(ProtocolError::UnexpectedReply {
                expected: self.tag,
                received,
                from: envelope.from,
            });
        }

        if !envelope.from.is_worker_of(self.worker_count) {
            return Err(ProtocolError::UnknownWorker {
                from: envelope.from,
                worker_count: self.worker_count,
            });
        }

        if !self.arrived.insert(envelope.from) {
            return Err(ProtocolError::DuplicateReply {
                tag: self.tag,
                from: envelope.from,
            });
        }

        self.order.push(envelope.from);
        Ok(())
    }

    /// Receives on `endpoint` until the barrier is complete.
    pub async fn wait(&mut self, endpoint: &mut Endpoint) -> Result<(), ProtocolError> {
        while !self.is_complete() {
            let envelope = endpoint.recv().await?;
            self.record(&envelope)?;
            tracing::info!(
                "{:?} from worker {} ({}/{})",
                self.tag(),
                envelope.from,
                self.arrived(),
                self.worker_count
            );
        }
        Ok(())
    }
}
