//! Approximate string matching of document fragments against lookup keys

mod matcher;
mod scorer;

pub use matcher::{CandidateSet, FuzzyMatcher, Match};
pub use scorer::{
    default_process, partial_ratio, partial_token_ratio, ratio, token_ratio, token_set_ratio,
    token_sort_ratio, weighted_ratio,
};
