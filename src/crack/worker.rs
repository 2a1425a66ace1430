//! One search worker, bound to one exclusive key-space partition.

use anyhow::Error;
use std::sync::Arc;

use super::keyspace::CandidateGenerator;
use super::oracle::{AttemptOutcome, Oracle};
use super::state::SearchState;

/// Terminal outcome of a worker run. A worker never resumes after
/// reaching one of these.
#[derive(Debug)]
pub enum WorkerOutcome {
    /// This worker found the password and won the commit.
    Succeeded,
    /// The partition ran out of candidates with no success.
    Exhausted,
    /// Cancellation was observed before the partition was exhausted.
    Cancelled,
    /// The oracle reported a fatal condition.
    Failed(Error),
}

/// Drives one candidate generator against the oracle until a terminal
/// outcome is reached.
pub struct Worker<O: Oracle> {
    generator: CandidateGenerator,
    oracle: Arc<O>,
    state: Arc<SearchState>,
}

impl<O: Oracle> Worker<O> {
    pub fn new(generator: CandidateGenerator, oracle: Arc<O>, state: Arc<SearchState>) -> Self {
        Self {
            generator,
            oracle,
            state,
        }
    }

    /// Run to a terminal state.
    ///
    /// The cancellation flag is polled once per candidate, before the
    /// attempt, so cancellation latency is bounded by a single
    /// attempt's cost. An attempt already in flight is finished, never
    /// pre-empted.
    pub fn run(mut self) -> WorkerOutcome {
        loop {
            if self.state.is_cancelled() {
                return WorkerOutcome::Cancelled;
            }

            let Some(candidate) = self.generator.next_candidate() else {
                return WorkerOutcome::Exhausted;
            };

            let outcome = self.oracle.attempt(candidate);
            // Counted per oracle call, whatever the outcome
            self.state.increment();

            match outcome {
                Ok(AttemptOutcome::AuthFailure) => {}
                Ok(AttemptOutcome::Success(payload)) => {
                    if self.state.try_commit_result(candidate.to_string(), payload) {
                        self.state.request_cancel();
                        return WorkerOutcome::Succeeded;
                    }
                    // Lost the commit race: discard and keep counting,
                    // same as a miss
                }
                Err(err) => {
                    self.state.request_cancel();
                    return WorkerOutcome::Failed(err);
                }
            }
        }
    }
}
