//! Thresholded best-candidate selection

use super::scorer::{default_process, weighted_ratio};

/// A lookup key prepared for repeated scoring
#[derive(Debug, Clone)]
struct Candidate {
    key: String,
    processed: String,
}

/// Lookup keys prepared once per run.
///
/// Keys are kept in the order given; callers pass them in ascending order
/// so that ties resolve to the lexicographically smallest key.
#[derive(Debug, Clone, Default)]
pub struct CandidateSet {
    candidates: Vec<Candidate>,
}

impl CandidateSet {
    pub fn new<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let candidates = keys
            .into_iter()
            .map(|key| {
                let key = key.into();
                let processed = default_process(&key);
                Candidate { key, processed }
            })
            .collect();
        Self { candidates }
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}

/// The best-scoring key for a fragment
#[derive(Debug, Clone, PartialEq)]
pub struct Match<'a> {
    pub key: &'a str,
    pub score: f64,
}

/// Weighted-ratio matcher with a fixed acceptance threshold.
///
/// A wrong concept attribution costs more than a missed tag, so the
/// default threshold sits at 95 out of 100.
#[derive(Debug, Clone, Copy)]
pub struct FuzzyMatcher {
    threshold: f64,
}

impl Default for FuzzyMatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl FuzzyMatcher {
    pub const DEFAULT_THRESHOLD: f64 = 95.0;

    pub fn new() -> Self {
        Self {
            threshold: Self::DEFAULT_THRESHOLD,
        }
    }

    pub fn with_threshold(threshold: f64) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// `score >= threshold`
    pub fn accepts(&self, score: f64) -> bool {
        score >= self.threshold
    }

    /// Highest-scoring candidate regardless of the threshold.
    ///
    /// Returns `None` without scoring when there are no candidates. Only a
    /// strictly higher score replaces the current best, so the first of
    /// several equally scored candidates wins.
    pub fn best<'a>(&self, text: &str, candidates: &'a CandidateSet) -> Option<Match<'a>> {
        if candidates.is_empty() {
            return None;
        }

        let query = default_process(text);
        let mut best: Option<Match<'a>> = None;
        for candidate in &candidates.candidates {
            let score = weighted_ratio(&query, &candidate.processed);
            if best.as_ref().map_or(true, |b| score > b.score) {
                best = Some(Match {
                    key: &candidate.key,
                    score,
                });
                if score >= 100.0 {
                    break;
                }
            }
        }
        best
    }

    /// Best candidate, if it clears the threshold.
    pub fn find<'a>(&self, text: &str, candidates: &'a CandidateSet) -> Option<Match<'a>> {
        self.best(text, candidates)
            .filter(|m| self.accepts(m.score))
    }
}
