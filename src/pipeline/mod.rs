//! Run Orchestration
//!
//! Wires one coordinator and `N` workers onto a fresh fabric, runs them to completion and
//! collects what each of them did.
//!
//! Workers run as independent tokio tasks. The coordinator runs on the calling task so
//! that a failing worker can be noticed while the coordinator is still parked on a
//! barrier: the first error from any participant ends the run, and dropping the task
//! set aborts every worker that is still waiting.

use crate::config::PipelineConfig;
use crate::coordinator::{Coordinator, CoordinatorReport};
use crate::corpus::Corpus;
use crate::fabric::Fabric;
use crate::storage::Store;
use crate::worker::{Worker, WorkerReport};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::task::JoinSet;

/// Everything that happened during one run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunSummary {
    /// Human-readable location of the stores, e.g. the final report directory.
    pub store: String,
    pub coordinator: CoordinatorReport,
    /// One entry per worker, ascending by rank.
    pub workers: Vec<WorkerReport>,
    /// Number of lines in the final report.
    pub words: usize,
}

pub async fn run_pipeline(config: &PipelineConfig, store: Arc<dyn Store>) -> Result<RunSummary> {
    config.validate()?;

    tracing::info!(
        "Starting run with {} workers (seed {}, store {})",
        config.worker_count,
        config.seed,
        store.describe()
    );

    store
        .prepare(config.clean)
        .await
        .context("Failed to prepare stores")?;

    let corpus = Corpus::new(&config.input_dir);
    let (coordinator_endpoint, worker_endpoints) = Fabric::build(config.worker_count);

    let mut workers = JoinSet::new();
    for endpoint in worker_endpoints {
        let worker = Worker::new(endpoint, corpus.clone(), store.clone());
        workers.spawn(worker.run());
    }

    let coordinator = Coordinator::new(
        coordinator_endpoint,
        corpus,
        config.worker_count,
        config.seed,
    )
    .run();
    tokio::pin!(coordinator);

    let mut worker_reports = Vec::with_capacity(config.worker_count);
    let coordinator_report = loop {
        tokio::select! {
            result = &mut coordinator => break result.context("Coordinator failed")?,
            Some(joined) = workers.join_next() => {
                let report = joined.context("Worker task panicked")??;
                worker_reports.push(report);
            }
        }
    };

    while let Some(joined) = workers.join_next().await {
        let report = joined.context("Worker task panicked")??;
        worker_reports.push(report);
    }
    worker_reports.sort_by_key(|report| report.rank);

    let words = worker_reports
        .iter()
        .find_map(|report| report.report_lines)
        .unwrap_or_default();

    tracing::info!("Run complete: {} distinct words", words);

    Ok(RunSummary {
        store: store.describe(),
        coordinator: coordinator_report,
        workers: worker_reports,
        words,
    })
}
