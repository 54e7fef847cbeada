use crate::error::ProtocolError;
use crate::protocol::types::{Direction, Envelope, Message, Rank};

use std::collections::HashMap;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};

/// Builds the endpoints of a star-shaped fabric around the coordinator.
pub struct Fabric;

impl Fabric {
    /// Returns the coordinator endpoint and one endpoint per worker, in rank order.
    pub fn build(worker_count: usize) -> (Endpoint, Vec<Endpoint>) {
        let (coordinator_tx, coordinator_rx) = unbounded_channel();

        let mut worker_routes = HashMap::new();
        let mut workers = Vec::with_capacity(worker_count);

        for rank in Rank::workers(worker_count) {
            let (tx, rx) = unbounded_channel();
            worker_routes.insert(rank, tx);

            let mut routes = HashMap::new();
            routes.insert(Rank::COORDINATOR, coordinator_tx.clone());
            workers.push(Endpoint {
                rank,
                inbox: rx,
                routes,
            });
        }

        // Only worker endpoints keep the coordinator inbox open from here on.
        drop(coordinator_tx);

        let coordinator = Endpoint {
            rank: Rank::COORDINATOR,
            inbox: coordinator_rx,
            routes: worker_routes,
        };

        tracing::debug!("Fabric built for {} workers", worker_count);

        (coordinator, workers)
    }
}

/// One rank's view of the fabric: its inbox plus senders to the peers it may address.
pub struct Endpoint {
    rank: Rank,
    inbox: UnboundedReceiver<Envelope>,
    routes: HashMap<Rank, UnboundedSender<Envelope>>,
}

impl Endpoint {
    pub fn rank(&self) -> Rank {
        self.rank
    }

    /// Ranks this endpoint can send to, ascending.
    #[cfg(test)]
    pub fn peers(&self) -> Vec<Rank> {
        let mut peers: Vec<Rank> = self.routes.keys().copied().collect();
        peers.sort();
        peers
    }

    pub fn send(&self, to: Rank, message: Message) -> Result<(), ProtocolError> {
        let route = self.routes.get(&to).ok_or(ProtocolError::NoRoute { to })?;

        let tag = message.tag();
        let allowed = if self.rank == Rank::COORDINATOR {
            Direction::ToWorker
        } else {
            Direction::ToCoordinator
        };
        if tag.direction() != allowed {
            return Err(ProtocolError::WrongDirection {
                from: self.rank,
                tag,
            });
        }

        tracing::trace!("{} -> {}: {:?}", self.rank, to, tag);

        route
            .send(Envelope {
                from: self.rank,
                to,
                message,
            })
            .map_err(|_| ProtocolError::NoRoute { to })
    }

    /// Waits for the next message addressed to this rank.
    pub async fn recv(&mut self) -> Result<Envelope, ProtocolError> {
        match self.inbox.recv().await {
            Some(envelope) => {
                tracing::trace!(
                    "{} <- {}: {:?}",
                    self.rank,
                    envelope.from,
                    envelope.message.tag()
                );
                Ok(envelope)
            }
            None => Err(ProtocolError::FabricClosed { rank: self.rank }),
        }
    }
}
