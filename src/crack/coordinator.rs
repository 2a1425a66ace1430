//! The search coordinator: partitions the key space, runs one worker
//! per partition, and aggregates the run into a single report.

use anyhow::{Result, anyhow};
use std::sync::Arc;
use std::time::{Duration, Instant};

use super::keyspace::{Alphabet, CandidateGenerator};
use super::oracle::Oracle;
use super::state::SearchState;
use super::worker::{Worker, WorkerOutcome};

/// Overall result of a search run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// The password was recovered.
    Found { password: String, payload: Vec<u8> },
    /// Every partition was exhausted with no success.
    Exhausted,
    /// The run was cancelled from outside before completion.
    Aborted,
}

/// Outcome plus the run's aggregate numbers, reported whatever the
/// outcome.
#[derive(Debug)]
pub struct SearchReport {
    pub outcome: SearchOutcome,
    pub attempts: u64,
    pub elapsed: Duration,
}

/// Longest candidate length accepted. Keeps the key-space size
/// representable and the CLI honest about what is tractable.
pub const MAX_CANDIDATE_LENGTH: usize = 16;

/// Owns the shared state and the worker pool for one run.
///
/// The space is partitioned by first symbol, one worker per alphabet
/// symbol, so the pool size is fixed and predictable. Workers run on
/// the blocking thread pool; the coordinator only awaits their joins.
pub struct Coordinator<O: Oracle + 'static> {
    alphabet: Alphabet,
    length: usize,
    oracle: Arc<O>,
    state: Arc<SearchState>,
}

impl<O: Oracle + 'static> Coordinator<O> {
    pub fn new(alphabet: Alphabet, length: usize, oracle: Arc<O>) -> Result<Self> {
        if length == 0 {
            return Err(anyhow!("Candidate length must be at least 1"));
        }
        if length > MAX_CANDIDATE_LENGTH {
            return Err(anyhow!(
                "Candidate length {} exceeds the maximum of {}",
                length,
                MAX_CANDIDATE_LENGTH
            ));
        }

        Ok(Self {
            alphabet,
            length,
            oracle,
            state: Arc::new(SearchState::new()),
        })
    }

    /// Handle to the shared state, for the host to deliver external
    /// cancellation (e.g. from a signal handler).
    pub fn cancel_handle(&self) -> Arc<SearchState> {
        Arc::clone(&self.state)
    }

    pub fn worker_count(&self) -> usize {
        self.alphabet.len()
    }

    pub fn space_size(&self) -> u128 {
        self.alphabet.space_size(self.length)
    }

    /// Run the search to completion.
    ///
    /// Returns `Err` only for fatal conditions (oracle failure or a
    /// panicked worker), after the remaining workers have drained.
    /// Everything else is a [`SearchOutcome`].
    pub async fn run(self) -> Result<SearchReport> {
        let start = Instant::now();

        let mut handles = Vec::with_capacity(self.alphabet.len());
        for prefix in self.alphabet.partitions() {
            let generator =
                CandidateGenerator::new(self.alphabet.clone(), &prefix, self.length)?;
            let worker = Worker::new(generator, Arc::clone(&self.oracle), Arc::clone(&self.state));
            handles.push(tokio::task::spawn_blocking(move || worker.run()));
        }

        // Join every worker before reading the aggregates. A fatal
        // outcome is held back until the pool has drained so no worker
        // outlives the run.
        let mut fatal: Option<anyhow::Error> = None;
        for handle in handles {
            match handle.await {
                Ok(WorkerOutcome::Failed(err)) => {
                    fatal.get_or_insert(err);
                }
                Ok(_) => {}
                Err(join_err) => {
                    self.state.request_cancel();
                    fatal.get_or_insert(anyhow!("Worker panicked: {join_err}"));
                }
            }
        }

        if let Some(err) = fatal {
            return Err(err);
        }

        let attempts = self.state.attempts();
        let elapsed = start.elapsed();

        let outcome = if let Some(finding) = self.state.take_result() {
            SearchOutcome::Found {
                password: finding.password,
                payload: finding.payload,
            }
        } else if self.state.is_cancelled() {
            SearchOutcome::Aborted
        } else {
            SearchOutcome::Exhausted
        };

        Ok(SearchReport {
            outcome,
            attempts,
            elapsed,
        })
    }
}
