//! Candidate enumeration over a fixed alphabet.
//!
//! The key space is every string of a fixed length over an ordered
//! alphabet. It is partitioned by first symbol: each partition is
//! identified by a one-symbol prefix, so the partitions are disjoint
//! and together cover the space exactly once.

use anyhow::{Result, bail};

/// Lowercase letters and digits, the default search alphabet.
pub const DEFAULT_ALPHABET: &str = "abcdefghijklmnopqrstuvwxyz0123456789";

/// An ordered, duplicate-free set of ASCII symbols.
///
/// The symbol order defines both the lexicographic enumeration order
/// and the partition assignment.
#[derive(Debug, Clone)]
pub struct Alphabet {
    symbols: Vec<u8>,
}

impl Alphabet {
    /// Parse an alphabet from its symbol string.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is empty, contains non-ASCII
    /// characters, or contains a duplicate symbol.
    pub fn parse(symbols: &str) -> Result<Self> {
        if symbols.is_empty() {
            bail!("Alphabet must not be empty");
        }
        if !symbols.is_ascii() {
            bail!("Alphabet must be ASCII");
        }

        let bytes = symbols.as_bytes().to_vec();
        let mut seen = [false; 128];
        for &b in &bytes {
            if seen[b as usize] {
                bail!("Alphabet contains duplicate symbol '{}'", b as char);
            }
            seen[b as usize] = true;
        }

        Ok(Self { symbols: bytes })
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn symbols(&self) -> &[u8] {
        &self.symbols
    }

    /// One single-symbol prefix per alphabet symbol, in alphabet order.
    pub fn partitions(&self) -> Vec<String> {
        self.symbols
            .iter()
            .map(|&b| (b as char).to_string())
            .collect()
    }

    /// Total number of candidates of the given length.
    pub fn space_size(&self, length: usize) -> u128 {
        (self.symbols.len() as u128).pow(length as u32)
    }
}

/// Lazy lexicographic enumeration of one partition of the key space.
///
/// Works like an odometer over the suffix positions: the rightmost
/// symbol advances fastest, carrying left at alphabet rollover. The
/// generator terminates once the carry would cross into the fixed
/// prefix. Every suffix combination is produced exactly once.
#[derive(Debug)]
pub struct CandidateGenerator {
    alphabet: Alphabet,
    /// Candidate bytes: fixed prefix followed by the current suffix.
    buf: Vec<u8>,
    prefix_len: usize,
    /// Alphabet index per suffix position.
    indices: Vec<usize>,
    started: bool,
    exhausted: bool,
}

impl CandidateGenerator {
    /// Create a generator for all candidates of `length` starting with
    /// `prefix`.
    ///
    /// # Errors
    ///
    /// Returns an error if the prefix is not ASCII or is longer than
    /// the candidate length.
    pub fn new(alphabet: Alphabet, prefix: &str, length: usize) -> Result<Self> {
        if !prefix.is_ascii() {
            bail!("Partition prefix must be ASCII");
        }
        if prefix.len() > length {
            bail!(
                "Partition prefix '{}' is longer than the candidate length {}",
                prefix,
                length
            );
        }

        let suffix_len = length - prefix.len();
        let first = alphabet.symbols()[0];

        let mut buf = Vec::with_capacity(length);
        buf.extend_from_slice(prefix.as_bytes());
        buf.resize(length, first);

        Ok(Self {
            alphabet,
            buf,
            prefix_len: prefix.len(),
            indices: vec![0; suffix_len],
            started: false,
            exhausted: false,
        })
    }

    /// Produce the next candidate, or `None` once the partition is
    /// exhausted. The returned slice borrows the generator's internal
    /// buffer and is valid until the next call.
    pub fn next_candidate(&mut self) -> Option<&str> {
        if self.exhausted {
            return None;
        }

        if !self.started {
            self.started = true;
            return Some(self.current());
        }

        if !self.advance() {
            self.exhausted = true;
            return None;
        }

        Some(self.current())
    }

    /// Rewind to the first candidate of the partition.
    pub fn reset(&mut self) {
        let first = self.alphabet.symbols()[0];
        for (i, idx) in self.indices.iter_mut().enumerate() {
            *idx = 0;
            self.buf[self.prefix_len + i] = first;
        }
        self.started = false;
        self.exhausted = false;
    }

    fn current(&self) -> &str {
        // buf holds ASCII only; validated at construction
        std::str::from_utf8(&self.buf).unwrap_or_default()
    }

    /// Advance the odometer one step. Returns false when the
    /// most-significant suffix position rolls over.
    fn advance(&mut self) -> bool {
        let symbols = self.alphabet.symbols();
        for pos in (0..self.indices.len()).rev() {
            self.indices[pos] += 1;
            if self.indices[pos] < symbols.len() {
                self.buf[self.prefix_len + pos] = symbols[self.indices[pos]];
                return true;
            }
            // Rollover: reset this position, carry left
            self.indices[pos] = 0;
            self.buf[self.prefix_len + pos] = symbols[0];
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn collect(alphabet: &str, prefix: &str, length: usize) -> Vec<String> {
        let alphabet = Alphabet::parse(alphabet).unwrap();
        let mut generator = CandidateGenerator::new(alphabet, prefix, length).unwrap();
        let mut out = Vec::new();
        while let Some(candidate) = generator.next_candidate() {
            out.push(candidate.to_string());
        }
        out
    }

    #[test]
    fn alphabet_rejects_empty() {
        assert!(Alphabet::parse("").is_err());
    }

    #[test]
    fn alphabet_rejects_duplicates() {
        assert!(Alphabet::parse("abca").is_err());
    }

    #[test]
    fn alphabet_rejects_non_ascii() {
        assert!(Alphabet::parse("abcé").is_err());
    }

    #[test]
    fn default_alphabet_is_valid() {
        let alphabet = Alphabet::parse(DEFAULT_ALPHABET).unwrap();
        assert_eq!(alphabet.len(), 36);
        assert_eq!(alphabet.space_size(5), 36u128.pow(5));
    }

    #[test]
    fn prefix_a_over_abc_length_two() {
        assert_eq!(collect("abc", "a", 2), vec!["aa", "ab", "ac"]);
    }

    #[test]
    fn enumeration_is_lexicographic() {
        let all = collect("ab", "a", 3);
        assert_eq!(all, vec!["aaa", "aab", "aba", "abb"]);
        let mut sorted = all.clone();
        sorted.sort();
        assert_eq!(all, sorted);
    }

    #[test]
    fn prefix_equal_to_length_yields_single_candidate() {
        assert_eq!(collect("abc", "b", 1), vec!["b"]);
    }

    #[test]
    fn prefix_longer_than_length_is_rejected() {
        let alphabet = Alphabet::parse("abc").unwrap();
        assert!(CandidateGenerator::new(alphabet, "ab", 1).is_err());
    }

    #[test]
    fn partitions_cover_space_exactly_once() {
        let alphabet = Alphabet::parse("ab1").unwrap();
        let length = 3;

        let mut union: HashSet<String> = HashSet::new();
        let mut total = 0usize;
        for prefix in alphabet.partitions() {
            let part = collect("ab1", &prefix, length);
            // Disjointness: no candidate appears in two partitions
            for candidate in &part {
                assert!(union.insert(candidate.clone()), "duplicate {candidate}");
            }
            total += part.len();
        }

        assert_eq!(total as u128, alphabet.space_size(length));
        assert!(union.contains("a1b"));
        assert!(union.contains("111"));
    }

    #[test]
    fn reset_restarts_the_sequence() {
        let alphabet = Alphabet::parse("ab").unwrap();
        let mut generator = CandidateGenerator::new(alphabet, "a", 2).unwrap();

        let first: Vec<String> = std::iter::from_fn(|| {
            generator.next_candidate().map(str::to_string)
        })
        .collect();
        generator.reset();
        let second: Vec<String> = std::iter::from_fn(|| {
            generator.next_candidate().map(str::to_string)
        })
        .collect();

        assert_eq!(first, second);
        assert_eq!(first, vec!["aa", "ab"]);
    }
}
