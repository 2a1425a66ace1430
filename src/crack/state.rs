//! Shared coordination state for one search run.
//!
//! Owned by the coordinator, handed to every worker behind an `Arc`.
//! The cancel flag is write-once-true, the counter accumulates without
//! loss under any interleaving, and the result slot accepts exactly
//! one commit for the lifetime of the run.

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

/// A committed search result: the winning password and the payload it
/// decrypted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub password: String,
    pub payload: Vec<u8>,
}

/// Cancellation flag, attempt counter and the single-winner result
/// slot.
#[derive(Debug, Default)]
pub struct SearchState {
    cancelled: AtomicBool,
    attempts: AtomicU64,
    result: Mutex<Option<Finding>>,
}

impl SearchState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one attempted candidate.
    #[inline]
    pub fn increment(&self) {
        self.attempts.fetch_add(1, Ordering::Relaxed);
    }

    /// Total attempts recorded so far across all workers.
    pub fn attempts(&self) -> u64 {
        self.attempts.load(Ordering::Relaxed)
    }

    /// Signal every worker to stop. Idempotent; the flag never resets
    /// within a run.
    pub fn request_cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }

    /// Commit a result. Only the first caller wins; later callers get
    /// `false` and must discard their finding.
    pub fn try_commit_result(&self, password: String, payload: Vec<u8>) -> bool {
        let mut slot = self.result.lock().unwrap();
        if slot.is_some() {
            return false;
        }
        *slot = Some(Finding { password, payload });
        true
    }

    /// Take the committed result, if any.
    pub fn take_result(&self) -> Option<Finding> {
        self.result.lock().unwrap().take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn cancel_is_sticky() {
        let state = SearchState::new();
        assert!(!state.is_cancelled());
        state.request_cancel();
        state.request_cancel();
        assert!(state.is_cancelled());
    }

    #[test]
    fn first_commit_wins() {
        let state = SearchState::new();
        assert!(state.try_commit_result("first".into(), b"one".to_vec()));
        assert!(!state.try_commit_result("second".into(), b"two".to_vec()));

        let finding = state.take_result().unwrap();
        assert_eq!(finding.password, "first");
        assert_eq!(finding.payload, b"one");
    }

    #[test]
    fn concurrent_commits_have_exactly_one_winner() {
        let state = Arc::new(SearchState::new());

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let state = Arc::clone(&state);
                thread::spawn(move || {
                    let password = format!("pw{i}");
                    state.try_commit_result(password.clone(), password.clone().into_bytes())
                })
            })
            .collect();

        let winners: Vec<bool> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert_eq!(winners.iter().filter(|&&won| won).count(), 1);

        // The retained result is the winner's own finding
        let finding = state.take_result().unwrap();
        assert_eq!(finding.payload, finding.password.clone().into_bytes());
    }

    #[test]
    fn counter_accumulates_without_loss() {
        let state = Arc::new(SearchState::new());

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let state = Arc::clone(&state);
                thread::spawn(move || {
                    for _ in 0..10_000 {
                        state.increment();
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(state.attempts(), 40_000);
    }
}
