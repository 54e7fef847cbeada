//! Worker Message Loop
//!
//! Drives one worker through its phases. The only suspension point is waiting for the
//! next inbound message; everything else happens inside `handle`, which matches on
//! the current state and the received message together.

use super::state::{WorkerReport, WorkerState};
use super::steps::{build_report, map_file, reduce_range};
use crate::corpus::Corpus;
use crate::error::ProtocolError;
use crate::fabric::Endpoint;
use crate::protocol::types::{Envelope, Message, Rank};
use crate::storage::Store;

use anyhow::Result;
use std::sync::Arc;

pub struct Worker {
    endpoint: Endpoint,
    corpus: Corpus,
    store: Arc<dyn Store>,
    /// Whether this worker builds the final report after reducing.
    finalizer: bool,
    state: WorkerState,
    report: WorkerReport,
}

impl Worker {
    pub fn new(endpoint: Endpoint, corpus: Corpus, store: Arc<dyn Store>) -> Self {
        let rank = endpoint.rank();
        Self {
            endpoint,
            corpus,
            store,
            finalizer: rank == Rank::FINALIZER,
            state: WorkerState::Idle,
            report: WorkerReport {
                rank: rank.0,
                ..WorkerReport::default()
            },
        }
    }

    pub fn rank(&self) -> Rank {
        self.endpoint.rank()
    }

    pub fn state(&self) -> WorkerState {
        self.state
    }

    pub fn is_finalizer(&self) -> bool {
        self.finalizer
    }

    /// Processes messages until the worker reaches `Done`.
    pub async fn run(mut self) -> Result<WorkerReport> {
        tracing::debug!("Worker {} started", self.rank());

        while !self.state.is_terminal() {
            let envelope = self.endpoint.recv().await?;
            self.handle(envelope).await?;
        }

        tracing::debug!("Worker {} done", self.rank());
        Ok(self.report)
    }

    /// Applies one inbound message to the state machine.
    ///
    /// Any state/message combination not listed is a protocol error.
    pub async fn handle(&mut self, envelope: Envelope) -> Result<()> {
        let rank = self.rank();

        if envelope.from != Rank::COORDINATOR {
            return Err(self.unexpected(&envelope).into());
        }

        match (self.state, &envelope.message) {
            (WorkerState::Idle | WorkerState::Mapping, Message::FileName(file)) => {
                self.state = WorkerState::Mapping;
                tracing::info!("Worker {} received {}", rank, file);

                let written = map_file(self.store.as_ref(), &self.corpus, rank, file).await?;
                self.report.occurrences_written += written;
                self.report.files_mapped.push(file.clone());
            }

            (WorkerState::Idle | WorkerState::Mapping, Message::EndOfFiles) => {
                tracing::info!(
                    "Worker {} finished mapping ({} files)",
                    rank,
                    self.report.files_mapped.len()
                );
                self.endpoint.send(Rank::COORDINATOR, Message::EndOfMapping { rank })?;
                self.state = WorkerState::AwaitingReduceAssignment;
            }

            (WorkerState::AwaitingReduceAssignment, Message::StartReducing(range)) => {
                self.state = WorkerState::Reducing;
                tracing::info!("Worker {} started reducing {}", rank, range);

                self.report.words_reduced = reduce_range(self.store.as_ref(), range).await?;
                self.report.letter_range = Some(range.to_string());

                self.endpoint.send(Rank::COORDINATOR, Message::EndOfReducing { rank })?;
                tracing::debug!(
                    "Worker {} reduced {} words",
                    rank,
                    self.report.words_reduced
                );

                self.state = if self.finalizer {
                    WorkerState::AwaitingFinalize
                } else {
                    WorkerState::Done
                };
            }

            (WorkerState::AwaitingFinalize, Message::CreateFinalFile) => {
                self.state = WorkerState::Finalizing;
                tracing::info!("Worker {} is creating the final file", rank);

                let lines = build_report(self.store.as_ref()).await?;
                self.report.report_lines = Some(lines);
                tracing::info!("Final report written ({} words)", lines);

                self.state = WorkerState::Done;
            }

            _ => return Err(self.unexpected(&envelope).into()),
        }

        Ok(())
    }

    fn unexpected(&self, envelope: &Envelope) -> ProtocolError {
        tracing::error!(
            "Worker {} in state {} rejected {:?} from rank {}",
            self.rank(),
            self.state,
            envelope.message.tag(),
            envelope.from
        );
        ProtocolError::UnexpectedMessage {
            rank: self.rank(),
            from: envelope.from,
            state: self.state.to_string(),
            tag: envelope.message.tag(),
        }
    }
}
