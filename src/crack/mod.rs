//! The parallel key-space search engine.
//!
//! Leaves first: [`keyspace`] enumerates candidates, [`oracle`] tests
//! one candidate against the archive entry, [`state`] carries the
//! cancel flag, the attempt counter and the single-winner result slot,
//! [`worker`] drives one partition, and [`coordinator`] owns a run
//! end to end.

pub mod coordinator;
pub mod keyspace;
pub mod oracle;
pub mod state;
pub mod worker;

pub use coordinator::{Coordinator, MAX_CANDIDATE_LENGTH, SearchOutcome, SearchReport};
pub use keyspace::{Alphabet, CandidateGenerator, DEFAULT_ALPHABET};
pub use oracle::{AttemptOutcome, Oracle, ZipEntryOracle};
pub use state::{Finding, SearchState};
pub use worker::{Worker, WorkerOutcome};
