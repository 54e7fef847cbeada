//! Run Configuration
//!
//! Command-line options and the validated configuration a run is started with.

use crate::error::ConfigError;
use crate::storage::{FsStore, MemoryStore, Store};

use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreKind {
    /// Directory layout on disk (durable).
    Fs,
    /// Process memory (discarded on exit).
    Memory,
}

/// Count word frequencies across a directory of text files with a pool of workers.
#[derive(Parser, Debug, Clone)]
#[command(name = "distributed-wordcount", version, about, long_about = None)]
pub struct Cli {
    /// Number of worker tasks in the pool.
    #[arg(short = 'n', long, env = "WORDCOUNT_WORKERS", default_value_t = 4)]
    pub workers: usize,

    /// Directory holding the input corpus.
    #[arg(long, default_value = "files")]
    pub input_dir: PathBuf,

    /// Root of the per-worker intermediate trees.
    #[arg(long, default_value = "intermediary")]
    pub intermediate_dir: PathBuf,

    /// Directory of per-word output lists.
    #[arg(long, default_value = "output")]
    pub output_dir: PathBuf,

    /// Directory the final report is written to.
    #[arg(long, default_value = "final")]
    pub final_dir: PathBuf,

    /// Seed for the alphabet shuffle. A random seed is drawn (and reported) when absent.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Where intermediate, output and final data are kept.
    #[arg(long, value_enum, default_value_t = StoreKind::Fs)]
    pub store: StoreKind,

    /// Remove data left by a previous run before starting.
    #[arg(long)]
    pub clean: bool,

    /// Print a JSON summary of the run to stdout.
    #[arg(long)]
    pub summary: bool,

    /// Enable verbose output (-v for debug, -vv for trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Log filter for the requested verbosity. `RUST_LOG` takes precedence when set.
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PipelineConfig {
    pub worker_count: usize,
    pub input_dir: PathBuf,
    pub intermediate_dir: PathBuf,
    pub output_dir: PathBuf,
    pub final_dir: PathBuf,
    pub seed: u64,
    pub store: StoreKind,
    pub clean: bool,
}

impl PipelineConfig {
    /// Configuration rooted at `root`, using the default directory names below it.
    pub fn rooted_at(root: impl Into<PathBuf>, worker_count: usize, seed: u64) -> Self {
        let root = root.into();
        Self {
            worker_count,
            input_dir: root.join("files"),
            intermediate_dir: root.join("intermediary"),
            output_dir: root.join("output"),
            final_dir: root.join("final"),
            seed,
            store: StoreKind::Fs,
            clean: false,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.worker_count == 0 {
            return Err(ConfigError::NoWorkers);
        }

        let paths = [
            ("input", &self.input_dir),
            ("intermediate", &self.intermediate_dir),
            ("output", &self.output_dir),
            ("final", &self.final_dir),
        ];
        for (name, path) in paths {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::EmptyPath { name });
            }
        }

        Ok(())
    }

    /// Builds the store backend this configuration selects.
    pub fn build_store(&self) -> Arc<dyn Store> {
        match self.store {
            StoreKind::Fs => Arc::new(FsStore::new(
                &self.intermediate_dir,
                &self.output_dir,
                &self.final_dir,
            )),
            StoreKind::Memory => Arc::new(MemoryStore::new()),
        }
    }
}

impl TryFrom<&Cli> for PipelineConfig {
    type Error = ConfigError;

    fn try_from(cli: &Cli) -> Result<Self, Self::Error> {
        let config = Self {
            worker_count: cli.workers,
            input_dir: cli.input_dir.clone(),
            intermediate_dir: cli.intermediate_dir.clone(),
            output_dir: cli.output_dir.clone(),
            final_dir: cli.final_dir.clone(),
            seed: cli.seed.unwrap_or_else(rand::random),
            store: cli.store,
            clean: cli.clean,
        };
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests;
